use crate::types::AnswerOutcome;

/// Judges an answer against its ground truth.
///
/// Correct means the ground truth appears as a case-insensitive substring of
/// the answer. This is coarse on purpose: "not Paris" still contains "paris",
/// and synonyms never match. Questions without ground truth are exempt and
/// pass, but a failed query is never correct, exempt or not.
pub fn evaluate(answer: &AnswerOutcome, ground_truth: Option<&str>) -> bool {
    let AnswerOutcome::Answer(text) = answer else { return false };
    match ground_truth {
        None => true,
        Some(truth) => text.to_lowercase().contains(&truth.to_lowercase()),
    }
}
