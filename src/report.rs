use crate::calibration::CalibrationSummary;
use crate::types::ResultRecord;
use std::io::{self, Write};

/// Human-readable report: one block per result, then the overall score.
pub fn render_report<W: Write>(results: &[ResultRecord], summary: &CalibrationSummary, out: &mut W) -> io::Result<()> {
    writeln!(out, "\n--- Results ---")?;
    for r in results {
        writeln!(out, "Question: {}", r.question)?;
        writeln!(out, "LLM Answer: {}", r.llm_answer)?;
        writeln!(out, "Correct: {}", r.correct)?;
        writeln!(out, "Hedge Score: {:.2}", r.hedge_score)?;
        if let Some(s) = r.sentiment_hedge {
            writeln!(out, "Sentiment Hedge: {s:.2}")?;
        }
        writeln!(out, "{}", "-".repeat(20))?;
    }
    writeln!(
        out,
        "\nCorrect: {} (avg hedge {:.2})  Incorrect: {} (avg hedge {:.2})  Failed queries: {}",
        summary.n_correct, summary.avg_correct_hedge, summary.n_incorrect, summary.avg_incorrect_hedge, summary.n_failures
    )?;
    writeln!(out, "Overall Calibration Score: {:.2}", summary.calibration_score)
}
