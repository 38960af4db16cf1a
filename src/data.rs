//! The immutable value types the optimizer passes between components.
//!
//! [`Example`] and [`Prompt`] are the only two things an embedder constructs directly;
//! everything else ([`PromptSet`], [`Trial`](crate::history::Trial)) is assembled by the
//! optimizer from those two.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One labeled training example: an input and its expected target.
///
/// Neither field is validated as non-empty by this type — callers load examples
/// however they like (the loader is out of scope for this crate) and pass them in
/// already formed. `min(batch_size, examples.len())` of these are drawn per iteration
/// by the [`BatchSampler`](crate::sampler::BatchSampler).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub input_text: String,
    pub target: String,
}

impl Example {
    pub fn new(input_text: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            input_text: input_text.into(),
            target: target.into(),
        }
    }

    /// Short one-line preview used in [`ProposerContext::data_summary`](crate::assembler::ProposerContext).
    fn preview(&self) -> String {
        format!("input: {:?} -> target: {:?}", self.input_text, self.target)
    }
}

/// A natural-language instruction handed to an LLM.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction(String);

impl Instruction {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for Instruction {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<&str> for Instruction {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

/// One input/output pair bundled with an instruction as a few-shot demonstration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Demonstration {
    pub input: String,
    pub output: String,
}

impl Demonstration {
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// An instruction plus zero or more demonstrations — the unit the proposer produces
/// and the runner consumes for a single stage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub instruction: Instruction,
    pub examples: Vec<Demonstration>,
}

impl Prompt {
    pub fn new(instruction: impl Into<Instruction>, examples: Vec<Demonstration>) -> Self {
        Self {
            instruction: instruction.into(),
            examples,
        }
    }

    /// Wraps a bare instruction string with no demonstrations.
    ///
    /// This is the normalization §4.6 INIT requires for `initial_prompts` entries
    /// that arrive as plain strings rather than full `{instruction, examples}` records.
    pub fn from_instruction_text(text: impl Into<String>) -> Self {
        Self {
            instruction: Instruction::new(text.into()),
            examples: Vec::new(),
        }
    }
}

/// The complete mapping of stage name to [`Prompt`] needed to run one pipeline
/// execution.
///
/// Keyed on a [`BTreeMap`] rather than a hasher-randomized map so that iteration
/// order — and therefore anything derived from it, like `program_summary`'s
/// comma-joined stage list — is stable across runs with the same stage set,
/// which invariant 4 (byte-identical histories for identical seeds) depends on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PromptSet(BTreeMap<String, Prompt>);

impl PromptSet {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, stage: &str) -> Option<&Prompt> {
        self.0.get(stage)
    }

    pub fn insert(&mut self, stage: impl Into<String>, prompt: Prompt) {
        self.0.insert(stage.into(), prompt);
    }

    pub fn stages(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns a fresh `PromptSet` identical to `self` except that `stage` now maps
    /// to `prompt` — the Candidate Assembler (§4.4) never mutates the incumbent best.
    pub fn with_replaced(&self, stage: &str, prompt: Prompt) -> Self {
        let mut next = self.clone();
        next.0.insert(stage.to_string(), prompt);
        next
    }

    /// `"Program stages: " + comma-joined names`, used verbatim as
    /// [`ProposerContext::program_summary`](crate::assembler::ProposerContext).
    pub fn program_summary(&self) -> String {
        format!("Program stages: {}", self.stages().collect::<Vec<_>>().join(", "))
    }
}

impl FromIterator<(String, Prompt)> for PromptSet {
    fn from_iter<I: IntoIterator<Item = (String, Prompt)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Short textual preview of the first three examples, used verbatim as
/// [`ProposerContext::data_summary`](crate::assembler::ProposerContext).
pub fn data_summary(dataset: &[Example]) -> String {
    dataset
        .iter()
        .take(3)
        .map(Example::preview)
        .collect::<Vec<_>>()
        .join("\n")
}
