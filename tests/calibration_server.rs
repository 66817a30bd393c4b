mod support;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use hedgecal::sentiment::{LexiconSentiment, SentimentScorer};
use hedgecal::server::{self, Engine, EvaluateResp};
use hedgecal::{AnswerOutcome, CalibrationSummary, HedgeStrategy};
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use support::FakeGenerator;
use tower::ServiceExt; // for `oneshot`

fn engine() -> Arc<Engine> {
    let generator = FakeGenerator::scripted(&[
        ("What is the capital of France?", Some("The capital of France is Paris.")),
        ("What is the capital of Australia?", Some("It might be Sydney, but I'm not sure.")),
        ("Who painted the Mona Lisa?", None),
    ]);
    let sentiment: Arc<dyn SentimentScorer> = Arc::new(LexiconSentiment::new());
    Arc::new(Engine {
        generator: Arc::new(generator),
        sentiment: Some(sentiment),
        default_strategy: HedgeStrategy::Lexical,
        concurrency: 4,
    })
}

async fn post(path: &str, payload: serde_json::Value) -> (StatusCode, serde_json::Value) {
    let resp = server::router(engine())
        .oneshot(
            Request::post(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = resp.status();
    let body = resp.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn evaluate_returns_results_and_summary() {
    let (status, v) = post(
        "/calibration/evaluate",
        json!({
            "questions": [
                {"question": "What is the capital of France?", "ground_truth": "Paris"},
                {"question": "What is the capital of Australia?", "ground_truth": "Canberra"},
                {"question": "Who painted the Mona Lisa?", "ground_truth": "Leonardo"}
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let resp: EvaluateResp = serde_json::from_value(v).unwrap();
    assert_eq!(resp.results.len(), 3);
    assert!(resp.results[0].correct);
    assert_eq!(resp.results[0].hedge_score, 0.0);
    assert!(!resp.results[1].correct);
    assert_eq!(resp.results[1].hedge_score, 2.0); // "might", "I'm not sure"
    assert_eq!(resp.results[2].llm_answer, AnswerOutcome::Failure);
    assert_eq!(resp.results[2].hedge_score, 0.0);
    assert!(resp.results.iter().all(|r| r.sentiment_hedge.is_some()));

    let s = resp.summary;
    assert_eq!((s.n_correct, s.n_incorrect, s.n_failures), (1, 2, 1));
    // incorrect: (2 + 0) / 2, correct: 0
    assert!((s.calibration_score - 1.0).abs() < 1e-9);
}

#[tokio::test]
async fn sentiment_strategy_feeds_hedge_score() {
    let (status, v) = post(
        "/calibration/evaluate",
        json!({
            "strategy": "sentiment",
            "questions": [{"question": "What is the capital of France?", "ground_truth": "Paris"}]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let resp: EvaluateResp = serde_json::from_value(v).unwrap();
    let r = &resp.results[0];
    assert_eq!(Some(r.hedge_score), r.sentiment_hedge);
    // no polarity words: all neutral, so 0.5
    assert!((r.hedge_score - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn malformed_question_is_bad_request() {
    let (status, v) = post(
        "/calibration/evaluate",
        json!({ "questions": [{"question": "What is the capital of France?"}, {"ground_truth": "x"}] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["error"].as_str().unwrap().contains("#1"));
}

#[tokio::test]
async fn score_aggregates_posted_results() {
    let (status, v) = post(
        "/calibration/score",
        json!({ "results": [
            {"question": "a", "llm_answer": {"answer": "x"}, "correct": true, "hedge_score": 0.1},
            {"question": "b", "llm_answer": {"answer": "y"}, "correct": true, "hedge_score": 0.3},
            {"question": "c", "llm_answer": "failure", "correct": false, "hedge_score": 0.8}
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let s: CalibrationSummary = serde_json::from_value(v).unwrap();
    assert!((s.avg_correct_hedge - 0.2).abs() < 1e-9);
    assert!((s.avg_incorrect_hedge - 0.8).abs() < 1e-9);
    assert!((s.calibration_score - 0.6).abs() < 1e-9);
}
