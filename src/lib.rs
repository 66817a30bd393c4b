//! Hedging calibration for language models.
//!
//! Asks a model a batch of questions, judges each answer against its ground
//! truth, measures how much each answer hedges, and reports whether the model
//! hedges more when it is wrong than when it is right.

pub mod calibration;
pub mod correctness;
pub mod dataset;
pub mod error;
pub mod hedging;
pub mod lexicon;
pub mod llm;
pub mod pipeline;
pub mod report;
pub mod sentiment;
pub mod server;
pub mod types;

pub use calibration::{aggregate, summarize, CalibrationSummary};
pub use error::CalibrationError;
pub use hedging::{HedgeScorer, HedgeStrategy};
pub use llm::AnswerGenerator;
pub use pipeline::EvaluationPipeline;
pub use types::{AnswerOutcome, QuestionRecord, ResultRecord};
