pub mod openai;

use crate::types::AnswerOutcome;

/// Produces the model's answer to a question.
///
/// Must not fail past this boundary: transport, auth and provider errors all
/// come back as [`AnswerOutcome::Failure`]. Retries, if any, happen inside.
#[async_trait::async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> AnswerOutcome;
}
