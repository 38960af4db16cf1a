//! Builds the next candidate [`PromptSet`] by asking the Proposer for a single new
//! stage instruction and grafting it onto the current best (§4.4).

use crate::collaborators::Proposer;
use crate::data::{Example, PromptSet, data_summary};
use crate::history::{Attempt, HistoryLedger};

/// Everything the external Proposer needs to draft a new instruction for one stage.
///
/// Borrowed, not owned — this is assembled fresh for a single `propose()` call and
/// does not outlive it.
pub struct ProposerContext<'a> {
    pub stage_name: &'a str,
    pub data_summary: String,
    pub program_summary: String,
    pub past_attempts: Vec<Attempt>,
    pub initial_prompts: &'a PromptSet,
}

/// Forms the next candidate [`PromptSet`] from the current best plus a
/// proposer-generated replacement for one stage.
pub struct CandidateAssembler;

impl CandidateAssembler {
    /// Produces a fresh `PromptSet` identical to `best` except that `stage` now maps
    /// to whatever the Proposer returns.
    ///
    /// Never mutates `best` — even when `best` has no entry yet for `stage` (the
    /// first time `stage` is chosen, before its initial prompt is seeded), this
    /// still calls through to the Proposer, which is contractually allowed to
    /// return `initial_prompts[stage]` on empty history.
    pub async fn assemble<P>(
        stage: &str,
        best: &PromptSet,
        initial_prompts: &PromptSet,
        dataset: &[Example],
        history: &HistoryLedger,
        proposer: &P,
    ) -> Result<PromptSet, P::Error>
    where
        P: Proposer,
    {
        let context = ProposerContext {
            stage_name: stage,
            data_summary: data_summary(dataset),
            program_summary: initial_prompts.program_summary(),
            past_attempts: history.attempts_for(stage),
            initial_prompts,
        };

        let new_prompt = proposer.propose(&context).await?;
        Ok(best.with_replaced(stage, new_prompt))
    }
}
