use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::calibration::{summarize, CalibrationSummary};
use crate::error::CalibrationError;
use crate::hedging::{HedgeScorer, HedgeStrategy};
use crate::lexicon::HedgeLexicon;
use crate::llm::AnswerGenerator;
use crate::pipeline::EvaluationPipeline;
use crate::sentiment::SentimentScorer;
use crate::types::{QuestionRecord, ResultRecord};

#[derive(Clone)]
pub struct Engine {
    pub generator: Arc<dyn AnswerGenerator>,
    pub sentiment: Option<Arc<dyn SentimentScorer>>,
    pub default_strategy: HedgeStrategy,
    pub concurrency: usize,
}

impl Engine {
    fn pipeline(&self, strategy: Option<HedgeStrategy>) -> Result<EvaluationPipeline, CalibrationError> {
        let scorer = HedgeScorer::new(
            HedgeLexicon::default(),
            self.sentiment.clone(),
            strategy.unwrap_or(self.default_strategy),
        )?;
        Ok(EvaluationPipeline::new(self.generator.clone(), scorer).with_concurrency(self.concurrency))
    }
}

#[derive(Debug, Deserialize)]
pub struct EvaluateReq {
    pub questions: Vec<QuestionRecord>,
    #[serde(default)]
    pub strategy: Option<HedgeStrategy>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluateResp {
    pub results: Vec<ResultRecord>,
    pub summary: CalibrationSummary,
}

#[derive(Debug, Deserialize)]
pub struct ScoreReq {
    pub results: Vec<ResultRecord>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Calibration(CalibrationError::MalformedInput { .. } | CalibrationError::Config(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Calibration(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

pub async fn evaluate(
    State(engine): State<Arc<Engine>>,
    Json(req): Json<EvaluateReq>,
) -> Result<Json<EvaluateResp>, ApiError> {
    let pipeline = engine.pipeline(req.strategy)?;
    let results = pipeline.run(&req.questions).await?;
    let summary = summarize(&results);
    tracing::info!(questions = results.len(), score = summary.calibration_score, "batch evaluated");
    Ok(Json(EvaluateResp { results, summary }))
}

pub async fn score(Json(req): Json<ScoreReq>) -> Json<CalibrationSummary> {
    Json(summarize(&req.results))
}

pub fn router(engine: Arc<Engine>) -> Router {
    Router::new()
        .route("/calibration/evaluate", post(evaluate))
        .route("/calibration/score", post(score))
        .with_state(engine)
}

pub async fn run_server(engine: Engine, addr: &str) -> anyhow::Result<()> {
    let app = router(Arc::new(engine));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
