//! The five injected capabilities the optimizer calls out to (§6).
//!
//! Each is a single-operation contract realized as a one-method trait with its own
//! associated `Error` type, the same shape this codebase's `Module`/`TypedMetric`
//! traits take — so a concrete collaborator's own error type (an LLM client's retry
//! error, a scorer's parse error, whatever) surfaces through [`optimize`](crate::optimizer::optimize)
//! unchanged rather than everything being funneled through one boxed error up front.
//!
//! None of these traits are implemented by this crate for production use — concrete
//! data loaders, proposers (that call an LLM), runners (that execute a pipeline), and
//! evaluators (cosine similarity, LLM-as-judge, exact match) are all out of scope.
//! [`crate::reference`] ships trivial stand-ins used only by this crate's own tests
//! and doctests.

use std::error::Error as StdError;

use crate::assembler::ProposerContext;
use crate::data::{Example, Prompt, PromptSet};

/// A nullary effect returning the training set. Invoked exactly once at INIT.
#[allow(async_fn_in_trait)]
pub trait DataLoader {
    type Error: StdError + Send + Sync + 'static;

    async fn load(&self) -> Result<Vec<Example>, Self::Error>;
}

/// Executes one pipeline run of `prompts` against `item`; the returned output is
/// opaque to the optimizer core.
///
/// Invoked once per item per iteration, strictly sequentially within a batch (§5) —
/// never concurrently — because the Evaluator receives the batch's outputs as one
/// ordered list and some evaluators are order-sensitive.
#[allow(async_fn_in_trait)]
pub trait Runner {
    type Output;
    type Error: StdError + Send + Sync + 'static;

    async fn run(&self, item: &Example, prompts: &PromptSet) -> Result<Self::Output, Self::Error>;
}

/// Scores one batch's worth of outputs as a single finite real, higher is better.
///
/// Invoked once per iteration, after every item in the batch has been run. Must
/// accept an empty slice (the `|dataset| = 0` edge case) and return some finite
/// real for it — the core does not dictate which value, it only propagates whatever
/// comes back.
#[allow(async_fn_in_trait)]
pub trait Evaluator {
    type Output;
    type Error: StdError + Send + Sync + 'static;

    async fn evaluate(&self, outputs: &[Self::Output]) -> Result<f64, Self::Error>;
}

/// Synthesizes a new [`Prompt`] for one stage, grounded in that stage's history.
///
/// If `context.past_attempts` is empty, a well-behaved Proposer returns
/// `context.initial_prompts.get(context.stage_name)` verbatim rather than inventing
/// something new — this is a contract on the collaborator, not something the core
/// can enforce, but [`crate::reference::EchoProposer`] follows it and tests assert
/// it (S5 in the scenario suite).
#[allow(async_fn_in_trait)]
pub trait Proposer {
    type Error: StdError + Send + Sync + 'static;

    async fn propose(&self, context: &ProposerContext<'_>) -> Result<Prompt, Self::Error>;
}

/// Receives the best [`PromptSet`] once, at termination.
#[allow(async_fn_in_trait)]
pub trait Outputter {
    type Error: StdError + Send + Sync + 'static;

    async fn output(&self, prompts: &PromptSet) -> Result<(), Self::Error>;
}
