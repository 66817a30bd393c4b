use crate::{
    error::{CalibrationError, Result},
    lexicon::HedgeLexicon,
    sentiment::{Polarity, SentimentScorer},
    types::AnswerOutcome,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Which estimate becomes a result's `hedge_score`. Never a blend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HedgeStrategy {
    #[default]
    Lexical,
    Sentiment,
}

impl std::str::FromStr for HedgeStrategy {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lexical" => Ok(HedgeStrategy::Lexical),
            "sentiment" => Ok(HedgeStrategy::Sentiment),
            other => Err(format!("unknown hedge strategy '{other}' (expected lexical|sentiment)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HedgeEstimate {
    pub hedge_score: f64,
    pub lexical_hedges: u32,
    pub sentiment_hedge: Option<f64>,
}

#[derive(Clone)]
pub struct HedgeScorer {
    lexicon: HedgeLexicon,
    sentiment: Option<Arc<dyn SentimentScorer>>,
    strategy: HedgeStrategy,
}

impl HedgeScorer {
    /// Lexical-only scorer over the standard marker list.
    pub fn lexical() -> Self {
        Self { lexicon: HedgeLexicon::default(), sentiment: None, strategy: HedgeStrategy::Lexical }
    }

    pub fn new(
        lexicon: HedgeLexicon,
        sentiment: Option<Arc<dyn SentimentScorer>>,
        strategy: HedgeStrategy,
    ) -> Result<Self> {
        if strategy == HedgeStrategy::Sentiment && sentiment.is_none() {
            return Err(CalibrationError::Config("sentiment strategy needs a sentiment scorer".into()));
        }
        Ok(Self { lexicon, sentiment, strategy })
    }

    pub fn strategy(&self) -> HedgeStrategy { self.strategy }

    /// `neg + 0.5 * neu` of the answer's tone, in [0, 1]. 0 for a failure.
    /// The scorer's triple is renormalized first, so a bad scorer cannot push
    /// the estimate outside the range or make it NaN.
    pub fn sentiment_hedge(&self, answer: &AnswerOutcome) -> Option<f64> {
        let scorer = self.sentiment.as_ref()?;
        Some(match answer.text() {
            None => 0.0,
            Some(text) => {
                let raw = scorer.polarity(text);
                let p = Polarity::normalized(raw.neg, raw.neu, raw.pos);
                (p.neg + 0.5 * p.neu).clamp(0.0, 1.0)
            }
        })
    }

    /// Distinct hedge markers in the answer. 0 for a failure.
    pub fn lexical_hedge(&self, answer: &AnswerOutcome) -> u32 {
        answer.text().map_or(0, |t| self.lexicon.count(t))
    }

    pub fn score(&self, answer: &AnswerOutcome) -> HedgeEstimate {
        let lexical_hedges = self.lexical_hedge(answer);
        let sentiment_hedge = self.sentiment_hedge(answer);
        let hedge_score = match self.strategy {
            HedgeStrategy::Lexical => lexical_hedges as f64,
            HedgeStrategy::Sentiment => sentiment_hedge.unwrap_or(0.0),
        };
        HedgeEstimate { hedge_score, lexical_hedges, sentiment_hedge }
    }
}

impl Default for HedgeScorer {
    fn default() -> Self { Self::lexical() }
}
