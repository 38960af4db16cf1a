//! Uniform sampling without replacement over the training set (§4.5).

use rand::Rng;
use rand::seq::SliceRandom;

use crate::data::Example;

/// Draws a random batch from a dataset, without mutating it.
pub struct BatchSampler;

impl BatchSampler {
    /// Returns `min(batch_size, dataset.len())` distinct references into `dataset`,
    /// sampled uniformly without replacement.
    ///
    /// `dataset` itself is never touched — `choose_multiple` samples indices into
    /// the slice and hands back references, so there is no working copy to keep in
    /// sync and no possibility of a drawn item appearing twice.
    pub fn draw<'a>(
        dataset: &'a [Example],
        batch_size: usize,
        rng: &mut impl Rng,
    ) -> Vec<&'a Example> {
        let n = batch_size.min(dataset.len());
        dataset.choose_multiple(rng, n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn dataset(n: usize) -> Vec<Example> {
        (0..n)
            .map(|i| Example::new(format!("in{i}"), format!("out{i}")))
            .collect()
    }

    #[test]
    fn batch_size_larger_than_dataset_behaves_as_dataset_size() {
        let data = dataset(3);
        let mut rng = StdRng::seed_from_u64(0);

        let batch = BatchSampler::draw(&data, 10, &mut rng);
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn batch_never_contains_duplicates() {
        let data = dataset(20);
        let mut rng = StdRng::seed_from_u64(99);

        let batch = BatchSampler::draw(&data, 8, &mut rng);
        let unique: HashSet<_> = batch.iter().map(|e| &e.input_text).collect();
        assert_eq!(unique.len(), batch.len());
    }

    #[test]
    fn empty_dataset_yields_empty_batch() {
        let data: Vec<Example> = Vec::new();
        let mut rng = StdRng::seed_from_u64(0);

        let batch = BatchSampler::draw(&data, 5, &mut rng);
        assert!(batch.is_empty());
    }
}
