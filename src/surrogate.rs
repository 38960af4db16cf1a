//! Per-stage Tree-Parzen-Estimator-style density-ratio estimator.
//!
//! One [`StageSurrogate`] exists per declared stage. It splits every score it has
//! ever seen for that stage into a `good` and a `bad` population via a running
//! median, then answers "how promising is mutating this stage right now" as the
//! ratio of Gaussian kernel density estimates over those two populations — the
//! standard TPE acquisition signal.

use rand::Rng;

const EPSILON: f64 = 1e-6;
const BANDWIDTH_FLOOR: f64 = 1e-3;

/// Population split + Gaussian-kernel acquisition function for a single stage.
#[derive(Clone, Debug, Default)]
pub struct StageSurrogate {
    good: Vec<f64>,
    bad: Vec<f64>,
}

impl StageSurrogate {
    pub fn new() -> Self {
        Self {
            good: Vec::new(),
            bad: Vec::new(),
        }
    }

    /// Read-only view of the two populations, for introspection/tests.
    pub fn good_bad_counts(&self) -> (usize, usize) {
        (self.good.len(), self.bad.len())
    }

    /// Classifies `score` against the running median of everything seen so far for
    /// this stage, then records it.
    ///
    /// Ties go to `good` (`score >= median`), and an empty or undefined median
    /// (first observation) also goes to `good` — both choices are preserved from the
    /// reference behavior rather than "improved" on, since the ratio formulation is
    /// only well-founded if `good` gets first pick of ties.
    pub fn update(&mut self, score: f64) {
        let is_good = match median(self.good.iter().chain(self.bad.iter())) {
            Some(m) => score >= m,
            None => true,
        };

        if is_good {
            self.good.push(score);
        } else {
            self.bad.push(score);
        }
    }

    /// Returns a preference number for mutating this stage next; larger is more
    /// promising.
    ///
    /// Falls back to pure exploration — a uniform random draw from the caller's
    /// PRNG — whenever either population is still empty, since the density ratio is
    /// meaningless with one side undefined.
    pub fn utility(&self, score: f64, rng: &mut impl Rng) -> f64 {
        if self.good.is_empty() || self.bad.is_empty() {
            return rng.gen_range(0.0..1.0);
        }

        let numerator = parzen(score, &self.good);
        let denominator = parzen(score, &self.bad) + EPSILON;
        let ratio = numerator / denominator;

        if ratio.is_finite() { ratio } else { 0.0 }
    }
}

/// Median of an iterator of reals, or `None` for an empty input.
///
/// NaNs are excluded before sorting — a population containing NaN still has a
/// well-defined median over its finite members, which is what keeps [`parzen`]'s
/// bandwidth calculation from itself producing NaN.
fn median<'a>(values: impl Iterator<Item = &'a f64>) -> Option<f64> {
    let mut sorted: Vec<f64> = values.copied().filter(|v| !v.is_nan()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("NaN already filtered out"));

    let mid = sorted.len() / 2;
    Some(if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    })
}

/// Standard deviation of `values` around their **median** (not mean) — an unusual
/// choice, preserved for fidelity to the reference Silverman-style bandwidth rule
/// rather than "corrected" to the textbook mean-centered definition.
fn stddev_around_median(values: &[f64]) -> f64 {
    let Some(center) = median(values.iter()) else {
        return 0.0;
    };

    let variance =
        values.iter().map(|v| (v - center).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Silverman-style bandwidth: `1e-3 + 1.06 * stddev(arr) * |arr|^-0.2`.
///
/// The additive `1e-3` floor is what keeps the kernel from diverging on a
/// degenerate, zero-variance population (every element identical).
fn bandwidth(values: &[f64]) -> f64 {
    BANDWIDTH_FLOOR + 1.06 * stddev_around_median(values) * (values.len() as f64).powf(-0.2)
}

/// Gaussian kernel density estimate of `x` over `values`.
fn parzen(x: f64, values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let h = bandwidth(values);
    let density: f64 = values
        .iter()
        .map(|&mu| gaussian(x, mu, h))
        .sum::<f64>()
        / values.len() as f64;

    density
}

fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    let variance = sigma * sigma;
    let exponent = -((x - mu).powi(2)) / (2.0 * variance);
    (1.0 / (sigma * (2.0 * std::f64::consts::PI).sqrt())) * exponent.exp()
}
