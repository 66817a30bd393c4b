//! Sentiment polarity, used as a weak proxy for hedging.
//!
//! The scorer is a boundary: anything that can split text into negative,
//! neutral and positive proportions plugs in here. [`LexiconSentiment`] is the
//! built-in word-list implementation.

pub mod lexicon;

pub use lexicon::LexiconSentiment;

use serde::{Deserialize, Serialize};

/// Proportions of negative, neutral and positive tone. Sums to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polarity {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
}

impl Polarity {
    pub const NEUTRAL: Polarity = Polarity { neg: 0.0, neu: 1.0, pos: 0.0 };

    /// Clamps negatives (and NaN) to zero and rescales to sum 1. An all-zero
    /// triple becomes [`Polarity::NEUTRAL`].
    pub fn normalized(neg: f64, neu: f64, pos: f64) -> Self {
        let c = |x: f64| if x.is_finite() && x > 0.0 { x } else { 0.0 };
        let (neg, neu, pos) = (c(neg), c(neu), c(pos));
        let total = neg + neu + pos;
        if total <= 0.0 {
            return Self::NEUTRAL;
        }
        Self { neg: neg / total, neu: neu / total, pos: pos / total }
    }
}

pub trait SentimentScorer: Send + Sync {
    fn polarity(&self, text: &str) -> Polarity;
}
