//! The error taxonomy from §7: configuration errors raised at INIT before any
//! collaborator is touched, and collaborator errors that pass through unchanged.

use thiserror::Error;

/// Everything that can abort a call to [`optimize`](crate::optimizer::optimize).
#[derive(Debug, Error)]
pub enum OptimizerError {
    /// A precondition on the run's static configuration failed. Always raised at
    /// INIT, before any collaborator call — no partial run, no partial History.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// A collaborator (Runner, Proposer, Evaluator, DataLoader, or Outputter) raised.
    /// Its own error is preserved as the source chain — the optimizer performs no
    /// retry and no translation, only attributes which phase was running.
    #[error("{phase} collaborator failed")]
    Collaborator {
        phase: CollaboratorPhase,
        #[source]
        source: anyhow::Error,
    },
}

/// Which of the five injected capabilities was running when a [`CollaboratorError`](OptimizerError::Collaborator)
/// occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollaboratorPhase {
    DataLoader,
    Proposer,
    Runner,
    Evaluator,
    Outputter,
}

impl std::fmt::Display for CollaboratorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::DataLoader => "data loader",
            Self::Proposer => "proposer",
            Self::Runner => "runner",
            Self::Evaluator => "evaluator",
            Self::Outputter => "outputter",
        };
        f.write_str(name)
    }
}

/// A static precondition on `stages` / `initial_prompts` / [`Options`](crate::options::Options)
/// that failed before any collaborator was invoked.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("declared stage set must not be empty")]
    NoStages,

    #[error("initial_prompts is missing a prompt for declared stage `{stage}`")]
    MissingInitialPrompt { stage: String },

    #[error("initial_prompts has an entry for `{stage}` that is not a declared stage")]
    UnknownInitialPrompt { stage: String },

    #[error("batch_size must be >= 1, got {actual}")]
    BatchSizeZero { actual: usize },
}
