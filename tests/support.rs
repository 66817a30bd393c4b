#![allow(dead_code)]

use async_trait::async_trait;
use hedgecal::{AnswerGenerator, AnswerOutcome};
use std::sync::Mutex;

pub struct FakeGenerator {
    // maps each question to the model's answer
    pub handler: Box<dyn Fn(&str) -> AnswerOutcome + Send + Sync>,
    pub delay_ms: u64,
    pub asked: Mutex<Vec<String>>,
}

impl FakeGenerator {
    pub fn new(handler: impl Fn(&str) -> AnswerOutcome + Send + Sync + 'static) -> Self {
        Self { handler: Box::new(handler), delay_ms: 0, asked: Mutex::new(Vec::new()) }
    }

    /// Answers from a fixed (question, answer) table; unknown questions fail.
    pub fn scripted(table: &[(&str, Option<&str>)]) -> Self {
        let table: Vec<(String, Option<String>)> =
            table.iter().map(|(q, a)| (q.to_string(), a.map(str::to_string))).collect();
        Self::new(move |q| {
            table
                .iter()
                .find(|(tq, _)| tq == q)
                .and_then(|(_, a)| a.clone())
                .map_or(AnswerOutcome::Failure, AnswerOutcome::Answer)
        })
    }

    pub fn asked(&self) -> Vec<String> { self.asked.lock().unwrap().clone() }
}

#[async_trait]
impl AnswerGenerator for FakeGenerator {
    async fn generate(&self, question: &str) -> AnswerOutcome {
        use tokio::time::{sleep, Duration};
        if self.delay_ms > 0 { sleep(Duration::from_millis(self.delay_ms)).await; }
        self.asked.lock().unwrap().push(question.to_string());
        (self.handler)(question)
    }
}
