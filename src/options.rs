//! Run configuration (§6 `Options`) and the INIT-time checks that gate it (§7).

use bon::Builder;

use crate::data::PromptSet;
use crate::errors::ConfigurationError;

/// Static configuration for one `optimize()` run.
///
/// `max_iterations: usize` already rules out the "`max_iterations < 0`" case §7
/// names — there is no negative `usize`, so that precondition needs no runtime
/// check, only the type.
#[derive(Builder, Clone, Debug)]
pub struct Options {
    #[builder(default = 100)]
    pub max_iterations: usize,

    #[builder(default = 8)]
    pub batch_size: usize,

    /// `None` resolves to a wall-clock-derived seed the first time `optimize()`
    /// runs; once resolved it is reported back so a caller can log it for later
    /// reproduction.
    pub seed: Option<u64>,

    #[builder(default = 0.95)]
    pub early_stop_threshold: f64,
}

impl Options {
    /// Runs every INIT-time precondition from §7. Called before any collaborator is
    /// touched — a failure here means zero Trials, zero side effects.
    pub fn validate(
        &self,
        stages: &[String],
        initial_prompts: &PromptSet,
    ) -> Result<(), ConfigurationError> {
        if stages.is_empty() {
            return Err(ConfigurationError::NoStages);
        }

        if self.batch_size == 0 {
            return Err(ConfigurationError::BatchSizeZero {
                actual: self.batch_size,
            });
        }

        for stage in stages {
            if initial_prompts.get(stage).is_none() {
                return Err(ConfigurationError::MissingInitialPrompt {
                    stage: stage.clone(),
                });
            }
        }

        for declared in initial_prompts.stages() {
            if !stages.iter().any(|s| s == declared) {
                return Err(ConfigurationError::UnknownInitialPrompt {
                    stage: declared.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Resolves `seed`, falling back to a wall-clock-derived value when unset.
    pub(crate) fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        })
    }
}
