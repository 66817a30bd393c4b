use crate::{
    correctness,
    error::{CalibrationError, Result},
    hedging::HedgeScorer,
    llm::AnswerGenerator,
    types::{AnswerOutcome, QuestionRecord, ResultRecord},
};
use futures::{stream, StreamExt};
use std::sync::Arc;

/// Asks every question, judges the answers and scores their hedging.
pub struct EvaluationPipeline {
    generator: Arc<dyn AnswerGenerator>,
    scorer: HedgeScorer,
    concurrency: usize,
}

impl EvaluationPipeline {
    pub fn new(generator: Arc<dyn AnswerGenerator>, scorer: HedgeScorer) -> Self {
        Self { generator, scorer, concurrency: 1 }
    }

    /// Number of generator calls allowed in flight. Output order is unaffected.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn scorer(&self) -> &HedgeScorer { &self.scorer }

    /// One result per question, in input order. Every record is checked
    /// before the first generator call, so a malformed one aborts the run
    /// with nothing produced.
    pub async fn run(&self, questions: &[QuestionRecord]) -> Result<Vec<ResultRecord>> {
        let checked = questions
            .iter()
            .enumerate()
            .map(|(index, rec)| match rec.question.as_deref() {
                Some(q) => Ok((rec.clone(), q.to_string())),
                None => Err(CalibrationError::MalformedInput { index }),
            })
            .collect::<Result<Vec<_>>>()?;

        let tasks = checked.into_iter().enumerate().map(|(i, (rec, question))| async move {
            let answer = self.generator.generate(&question).await;
            let result = self.assemble(&rec, &question, answer);
            tracing::debug!(index = i, correct = result.correct, hedge_score = result.hedge_score, "question evaluated");
            result
        });
        let results: Vec<ResultRecord> = stream::iter(tasks).buffered(self.concurrency).collect().await;

        let failures = results.iter().filter(|r| r.llm_answer.is_failure()).count();
        tracing::info!(questions = results.len(), failures, strategy = ?self.scorer.strategy(), "evaluation run finished");
        Ok(results)
    }

    /// Builds the result for an answer already in hand.
    pub fn assemble(&self, rec: &QuestionRecord, question: &str, answer: AnswerOutcome) -> ResultRecord {
        let correct = correctness::evaluate(&answer, rec.ground_truth.as_deref());
        let hedge = self.scorer.score(&answer);
        ResultRecord {
            id: rec.id.clone(),
            question: question.to_string(),
            llm_answer: answer,
            correct,
            hedge_score: hedge.hedge_score,
            lexical_hedges: hedge.lexical_hedges,
            sentiment_hedge: hedge.sentiment_hedge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Echo { calls: AtomicUsize }
    #[async_trait::async_trait]
    impl AnswerGenerator for Echo {
        async fn generate(&self, question: &str) -> AnswerOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if question.contains("fail") { AnswerOutcome::Failure } else { AnswerOutcome::Answer(format!("It might be {question}")) }
        }
    }

    fn pipeline() -> (Arc<Echo>, EvaluationPipeline) {
        let echo = Arc::new(Echo { calls: AtomicUsize::new(0) });
        let p = EvaluationPipeline::new(echo.clone(), HedgeScorer::default());
        (echo, p)
    }

    #[tokio::test]
    async fn results_follow_input_order() {
        let (_, p) = pipeline();
        let qs = vec![
            QuestionRecord::new("Paris", Some("paris")),
            QuestionRecord::new("please fail", Some("x")),
            QuestionRecord::new("opinion", None),
        ];
        let out = p.with_concurrency(3).run(&qs).await.unwrap();
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].question, "Paris");
        assert!(out[0].correct);
        assert_eq!(out[0].hedge_score, 1.0);
        assert_eq!(out[1].llm_answer, AnswerOutcome::Failure);
        assert!(!out[1].correct);
        assert_eq!(out[1].hedge_score, 0.0);
        assert!(out[2].correct);
    }

    #[tokio::test]
    async fn malformed_record_aborts_before_generation() {
        let (echo, p) = pipeline();
        let qs = vec![QuestionRecord::new("ok", None), QuestionRecord { question: None, ..Default::default() }];
        let err = p.run(&qs).await.unwrap_err();
        assert!(matches!(err, CalibrationError::MalformedInput { index: 1 }));
        assert_eq!(echo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn run_can_be_spawned() {
        let (_, p) = pipeline();
        let qs = vec![QuestionRecord::new("Paris", Some("paris"))];
        let out = tokio::spawn(async move { p.run(&qs).await }).await.unwrap().unwrap();
        assert_eq!(out.len(), 1);
        assert!(out[0].correct);
    }

    #[tokio::test]
    async fn empty_input_yields_empty_output() {
        let (_, p) = pipeline();
        assert!(p.run(&[]).await.unwrap().is_empty());
    }
}
