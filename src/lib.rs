//! An iterative, black-box prompt optimizer for multi-stage LLM programs.
//!
//! A "program" here is a fixed sequence of named stages, each driven by its own
//! natural-language instruction (optionally with a few worked examples attached).
//! This crate does not call an LLM, run a pipeline, or score anything itself — it
//! treats all of that as pluggable, externally supplied behavior (the [`DataLoader`],
//! [`Runner`], [`Evaluator`], [`Proposer`], and [`Outputter`] traits in
//! [`collaborators`]) and is responsible only for the search loop around it: pick a
//! stage, ask for a new instruction, try it on a batch, score it, and decide whether
//! to keep it.
//!
//! Stage selection is guided by a small per-stage surrogate ([`surrogate::StageSurrogate`])
//! that splits observed scores into a "good" and "bad" population and prefers stages
//! whose good/bad density ratio looks promising at the most recent score — the same
//! acquisition idea behind Tree-Parzen-Estimator search, scaled down to a handful of
//! stages rather than a high-dimensional hyperparameter space.
//!
//! ```
//! use promptsearch::{Optimizer, Options, Prompt, PromptSet};
//! use promptsearch::reference::{EchoProposer, InMemoryOutputter, VecDataLoader};
//! use promptsearch::data::Example;
//! use promptsearch::collaborators::{Evaluator, Runner};
//! use std::convert::Infallible;
//!
//! struct EchoRunner;
//! impl Runner for EchoRunner {
//!     type Output = String;
//!     type Error = Infallible;
//!     async fn run(&self, item: &Example, prompts: &PromptSet) -> Result<String, Infallible> {
//!         let instruction = prompts.get("generate").map(|p| p.instruction.as_str()).unwrap_or("");
//!         Ok(format!("{instruction}: {}", item.input_text))
//!     }
//! }
//!
//! struct LengthEvaluator;
//! impl Evaluator for LengthEvaluator {
//!     type Output = String;
//!     type Error = Infallible;
//!     async fn evaluate(&self, outputs: &[String]) -> Result<f64, Infallible> {
//!         let total: usize = outputs.iter().map(|o| o.len()).sum();
//!         Ok(total as f64 / outputs.len().max(1) as f64)
//!     }
//! }
//!
//! # fn main() {
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let mut initial_prompts = PromptSet::new();
//! initial_prompts.insert("generate", Prompt::from_instruction_text("Answer briefly."));
//!
//! let dataset = vec![Example::new("2+2?", "4"), Example::new("capital of France?", "Paris")];
//!
//! let optimizer = Optimizer::builder()
//!     .stages(vec!["generate".to_string()])
//!     .options(Options::builder().max_iterations(5).seed(7).build())
//!     .data_loader(VecDataLoader(dataset))
//!     .runner(EchoRunner)
//!     .evaluator(LengthEvaluator)
//!     .proposer(EchoProposer)
//!     .outputter(InMemoryOutputter::new())
//!     .build();
//!
//! let best_prompts = optimizer.optimize(initial_prompts).await.unwrap();
//! assert!(best_prompts.get("generate").is_some());
//! # });
//! # }
//! ```

pub mod assembler;
pub mod collaborators;
pub mod data;
pub mod errors;
pub mod history;
pub mod optimizer;
pub mod options;
pub mod reference;
pub mod sampler;
pub mod selector;
pub mod surrogate;
pub mod telemetry;

pub use assembler::{CandidateAssembler, ProposerContext};
pub use collaborators::{DataLoader, Evaluator, Outputter, Proposer, Runner};
pub use data::{Demonstration, Example, Instruction, Prompt, PromptSet};
pub use errors::{CollaboratorPhase, ConfigurationError, OptimizerError};
pub use history::{Attempt, HistoryLedger, Trial};
pub use optimizer::Optimizer;
pub use options::Options;
pub use sampler::BatchSampler;
pub use selector::StageSelector;
pub use surrogate::StageSurrogate;
pub use telemetry::{TelemetryInitError, init_tracing};
