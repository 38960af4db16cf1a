//! Minimal, allocation-only stand-ins for the five collaborator traits.
//!
//! None of these call an LLM, touch disk, or do anything production-worthy — they
//! exist only so this crate's own tests and doctests can run `optimize()` without an
//! external service, the same role [`DummyLM`-style reference clients][dummy] play
//! in this codebase's other layers.
//!
//! [dummy]: https://docs.rs/dspy-rs (DummyLM — not a dependency of this crate)

use std::convert::Infallible;
use std::sync::{Arc, Mutex};

use crate::assembler::ProposerContext;
use crate::collaborators::{DataLoader, Outputter, Proposer};
use crate::data::{Example, Prompt, PromptSet};

/// Hands back a fixed, in-memory dataset.
pub struct VecDataLoader(pub Vec<Example>);

impl DataLoader for VecDataLoader {
    type Error = Infallible;

    async fn load(&self) -> Result<Vec<Example>, Self::Error> {
        Ok(self.0.clone())
    }
}

/// Follows the §6 Proposer contract literally: echoes `initial_prompts[stage]` when
/// there is no history for the stage yet, otherwise appends a revision marker to the
/// most recently tried instruction so successive calls are visibly distinct.
pub struct EchoProposer;

impl Proposer for EchoProposer {
    type Error = Infallible;

    async fn propose(&self, context: &ProposerContext<'_>) -> Result<Prompt, Self::Error> {
        if context.past_attempts.is_empty() {
            return Ok(context
                .initial_prompts
                .get(context.stage_name)
                .cloned()
                .unwrap_or_else(|| Prompt::from_instruction_text(context.stage_name)));
        }

        let last = &context.past_attempts[context.past_attempts.len() - 1];
        let revised = format!(
            "{} (revision {})",
            last.prompt.instruction.as_str(),
            context.past_attempts.len()
        );
        Ok(Prompt::from_instruction_text(revised))
    }
}

/// Discards the final `PromptSet`. Useful when a caller only cares about the
/// `PromptSet` `optimize()` returns, not the Outputter side channel.
pub struct NullOutputter;

impl Outputter for NullOutputter {
    type Error = Infallible;

    async fn output(&self, _prompts: &PromptSet) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Captures the final `PromptSet` for later inspection — used by this crate's
/// scenario tests to assert what the Outputter actually received.
#[derive(Clone, Default)]
pub struct InMemoryOutputter {
    captured: Arc<Mutex<Option<PromptSet>>>,
}

impl InMemoryOutputter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Option<PromptSet> {
        self.captured.lock().expect("lock not poisoned").clone()
    }
}

impl Outputter for InMemoryOutputter {
    type Error = Infallible;

    async fn output(&self, prompts: &PromptSet) -> Result<(), Self::Error> {
        *self.captured.lock().expect("lock not poisoned") = Some(prompts.clone());
        Ok(())
    }
}
