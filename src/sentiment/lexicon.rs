use super::{Polarity, SentimentScorer};
use std::collections::HashSet;
use unicode_segmentation::UnicodeSegmentation;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "best", "better", "correct", "right", "true",
    "accurate", "certain", "certainly", "sure", "definitely", "clearly", "confident",
    "indeed", "exactly", "precisely", "known", "well", "happy", "glad", "love",
    "like", "beautiful", "famous", "success", "successful", "important", "helpful",
    "interesting", "popular", "positive", "benefit", "win", "won", "strong",
    "easy", "perfect", "agree", "yes", "welcome", "thanks", "pleased",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "worse", "worst", "wrong", "false", "incorrect", "inaccurate",
    "unfortunately", "sorry", "error", "fail", "failed", "failure", "unknown",
    "unclear", "doubt", "doubtful", "unsure", "uncertain", "confusing", "difficult",
    "hard", "problem", "poor", "sad", "hate", "dislike", "unable", "cannot",
    "impossible", "risk", "danger", "dangerous", "negative", "lose", "lost",
    "weak", "disagree", "no", "dispute", "disputed", "controversial", "limited",
    "lack", "missing",
];

const NEGATION_WORDS: &[&str] = &[
    "not", "never", "don't", "doesn't", "didn't", "isn't", "aren't", "wasn't",
    "weren't", "won't", "wouldn't", "couldn't", "shouldn't", "hardly", "barely",
    "neither", "nor", "without",
];

const NEGATION_WINDOW: usize = 3;

/// Word-list polarity scorer.
///
/// Each token that hits the positive or negative list counts towards that
/// side; a negation word up to three tokens earlier flips it. Tokens that hit
/// neither list are neutral.
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    positive: HashSet<&'static str>,
    negative: HashSet<&'static str>,
    negation: HashSet<&'static str>,
}

impl LexiconSentiment {
    pub fn new() -> Self {
        Self {
            positive: POSITIVE_WORDS.iter().copied().collect(),
            negative: NEGATIVE_WORDS.iter().copied().collect(),
            negation: NEGATION_WORDS.iter().copied().collect(),
        }
    }
}

impl Default for LexiconSentiment {
    fn default() -> Self { Self::new() }
}

impl SentimentScorer for LexiconSentiment {
    fn polarity(&self, text: &str) -> Polarity {
        let lower = text.to_lowercase().replace('\u{2019}', "'");
        let words: Vec<&str> = lower.unicode_words().collect();
        if words.is_empty() {
            return Polarity::NEUTRAL;
        }

        let negations: Vec<usize> = words
            .iter()
            .enumerate()
            .filter(|(_, w)| self.negation.contains(**w))
            .map(|(i, _)| i)
            .collect();

        let (mut pos, mut neg) = (0usize, 0usize);
        for (i, w) in words.iter().enumerate() {
            let is_pos = self.positive.contains(*w);
            let is_neg = self.negative.contains(*w);
            if !is_pos && !is_neg {
                continue;
            }
            let negated = negations.iter().any(|&n| n < i && i - n <= NEGATION_WINDOW);
            if is_pos != negated { pos += 1 } else { neg += 1 }
        }

        let n = words.len() as f64;
        let (pos, neg) = (pos as f64 / n, neg as f64 / n);
        Polarity { neg, neu: (1.0 - pos - neg).max(0.0), pos }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sums_to_one(p: Polarity) -> bool { (p.neg + p.neu + p.pos - 1.0).abs() < 1e-9 }

    #[test]
    fn plain_statement_is_neutral() {
        let p = LexiconSentiment::new().polarity("Paris is the capital of France");
        assert_eq!(p, Polarity { neg: 0.0, neu: 1.0, pos: 0.0 });
    }

    #[test]
    fn counts_hits_per_token() {
        // 3 tokens: "unfortunately" negative, "correct" positive
        let p = LexiconSentiment::new().polarity("Unfortunately, that's correct.");
        assert!(sums_to_one(p));
        assert!(p.neg > 0.0 && p.pos > 0.0);
        assert!((p.neg - p.pos).abs() < 1e-12);
    }

    #[test]
    fn negation_flips_polarity() {
        let p = LexiconSentiment::new().polarity("I am not sure");
        assert_eq!(p.pos, 0.0);
        assert!((p.neg - 0.25).abs() < 1e-12);
        assert!(sums_to_one(p));
    }

    #[test]
    fn empty_text_is_neutral() {
        assert_eq!(LexiconSentiment::new().polarity("  ...  "), Polarity::NEUTRAL);
    }
}
