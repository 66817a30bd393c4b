//! Calibration: does the model hedge more when it is wrong?
//!
//! The score is `avg_incorrect_hedge - avg_correct_hedge`. Positive means the
//! model hedges more on wrong answers than right ones, which is the desired
//! behaviour. Zero or negative means hedging carries no signal, or points the
//! wrong way. An empty side of the split averages to 0, so the score is
//! always defined; with every answer correct it can only be zero or negative.

use crate::types::ResultRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    pub n_correct: usize,
    pub n_incorrect: usize,
    pub n_failures: usize,
    pub avg_correct_hedge: f64,
    pub avg_incorrect_hedge: f64,
    pub calibration_score: f64,
}

pub fn summarize(results: &[ResultRecord]) -> CalibrationSummary {
    let (mut sum_c, mut n_c, mut sum_i, mut n_i) = (0.0, 0usize, 0.0, 0usize);
    for r in results {
        if r.correct { sum_c += r.hedge_score; n_c += 1 } else { sum_i += r.hedge_score; n_i += 1 }
    }
    let mean = |sum: f64, n: usize| if n == 0 { 0.0 } else { sum / n as f64 };
    let (avg_c, avg_i) = (mean(sum_c, n_c), mean(sum_i, n_i));
    CalibrationSummary {
        n_correct: n_c,
        n_incorrect: n_i,
        n_failures: results.iter().filter(|r| r.llm_answer.is_failure()).count(),
        avg_correct_hedge: avg_c,
        avg_incorrect_hedge: avg_i,
        calibration_score: avg_i - avg_c,
    }
}

pub fn aggregate(results: &[ResultRecord]) -> f64 {
    summarize(results).calibration_score
}
