//! The top-level driver (§4.6): owns the seed, the early-stop policy, and
//! best-so-far, and composes every other component into one sequential loop.

use std::collections::{HashMap, HashSet};
use std::error::Error as StdError;

use bon::Builder;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::assembler::CandidateAssembler;
use crate::collaborators::{DataLoader, Evaluator, Outputter, Proposer, Runner};
use crate::data::PromptSet;
use crate::errors::{CollaboratorPhase, OptimizerError};
use crate::history::{HistoryLedger, Trial};
use crate::options::Options;
use crate::sampler::BatchSampler;
use crate::selector::StageSelector;
use crate::surrogate::StageSurrogate;

/// Owns the five injected collaborators, the declared stage set, and the run
/// configuration for one or more `optimize()` calls.
///
/// Each call to [`Optimizer::optimize`] is an independent run: History, the
/// per-stage surrogates, `executed_stages`, and the PRNG are all reset at the start
/// of the call (INIT, §4.6) rather than carried over from a previous call.
#[derive(Builder)]
pub struct Optimizer<D, R, E, P, O>
where
    D: DataLoader,
    R: Runner,
    E: Evaluator<Output = R::Output>,
    P: Proposer,
    O: Outputter,
{
    /// The declared stage set, in a fixed order used for tie-breaking fallback
    /// selection (§4.2 step 2's "total is 0" case) and for `program_summary`.
    stages: Vec<String>,
    options: Options,
    data_loader: D,
    runner: R,
    evaluator: E,
    proposer: P,
    outputter: O,
}

fn collaborator_error<Err>(phase: CollaboratorPhase, source: Err) -> OptimizerError
where
    Err: StdError + Send + Sync + 'static,
{
    OptimizerError::Collaborator {
        phase,
        source: anyhow::Error::new(source),
    }
}

impl<D, R, E, P, O> Optimizer<D, R, E, P, O>
where
    D: DataLoader,
    R: Runner,
    E: Evaluator<Output = R::Output>,
    P: Proposer,
    O: Outputter,
{
    /// Runs the optimization loop and returns the best `PromptSet` found.
    ///
    /// `initial_prompts` entries that are bare instruction strings should already be
    /// normalized to `Prompt::from_instruction_text` by the caller before this is
    /// called — `PromptSet` itself has no "bare string" variant, so normalization
    /// happens at the construction boundary rather than inside this loop.
    ///
    /// # Errors
    ///
    /// Returns [`OptimizerError::Configuration`] if `stages`/`initial_prompts`/
    /// [`Options`] fail validation — no collaborator is invoked in that case.
    /// Returns [`OptimizerError::Collaborator`] the first time any collaborator
    /// raises; no retry, and the in-flight trial is not appended to History.
    pub async fn optimize(
        &self,
        initial_prompts: PromptSet,
    ) -> Result<PromptSet, OptimizerError> {
        self.options.validate(&self.stages, &initial_prompts)?;

        let seed = self.options.resolve_seed();
        let mut rng = StdRng::seed_from_u64(seed);

        let dataset = self
            .data_loader
            .load()
            .await
            .map_err(|e| collaborator_error(CollaboratorPhase::DataLoader, e))?;

        let mut surrogates: HashMap<String, StageSurrogate> = self
            .stages
            .iter()
            .map(|s| (s.clone(), StageSurrogate::new()))
            .collect();
        let mut history = HistoryLedger::new();
        let mut executed: HashSet<String> = HashSet::new();
        let mut best: Option<Trial> = None;

        for iteration in 0..self.options.max_iterations {
            let last_score = history.last().map(|t| t.score).unwrap_or(0.0);
            let stage =
                StageSelector::pick(&self.stages, &executed, &surrogates, last_score, &mut rng);
            executed.insert(stage.clone());

            let current_best = best.as_ref().map(|t| &t.prompts).unwrap_or(&initial_prompts);
            let candidate = CandidateAssembler::assemble(
                &stage,
                current_best,
                &initial_prompts,
                &dataset,
                &history,
                &self.proposer,
            )
            .await
            .map_err(|e| collaborator_error(CollaboratorPhase::Proposer, e))?;

            let batch = BatchSampler::draw(&dataset, self.options.batch_size, &mut rng);

            let mut outputs = Vec::with_capacity(batch.len());
            for item in batch {
                let output = self
                    .runner
                    .run(item, &candidate)
                    .await
                    .map_err(|e| collaborator_error(CollaboratorPhase::Runner, e))?;
                outputs.push(output);
            }

            let score = self
                .evaluator
                .evaluate(&outputs)
                .await
                .map_err(|e| collaborator_error(CollaboratorPhase::Evaluator, e))?;

            tracing::debug!(iteration, stage = %stage, score, "trial evaluated");

            let trial = Trial::new(iteration, candidate, score);
            history.append(trial.clone());
            surrogates
                .get_mut(&stage)
                .expect("every declared stage has a surrogate")
                .update(score);

            // `score > best.score` is false whenever `score` is NaN (and false on
            // the first trial's NaN too, since NaN also never beats `-inf`), which
            // is exactly the NumericError invariant from §7: a non-finite score
            // never promotes to Best.
            let is_improvement = match &best {
                None => score > f64::NEG_INFINITY,
                Some(current) => score > current.score,
            };

            if is_improvement {
                tracing::info!(
                    iteration,
                    stage = %stage,
                    previous_best = best.as_ref().map(|t| t.score),
                    new_best = score,
                    "best score improved"
                );
                best = Some(trial);
            }

            if score >= self.options.early_stop_threshold {
                tracing::debug!(iteration, score, "early-stop threshold reached");
                break;
            }
        }

        let final_prompts = best
            .as_ref()
            .map(|t| t.prompts.clone())
            .unwrap_or_else(|| initial_prompts.clone());

        self.outputter
            .output(&final_prompts)
            .await
            .map_err(|e| collaborator_error(CollaboratorPhase::Outputter, e))?;

        Ok(final_prompts)
    }
}
