//! Hedge markers and the whole-word matcher that counts them.

use crate::error::{CalibrationError, Result};
use once_cell::sync::Lazy;
use regex::Regex;

/// Words and phrases that express epistemic uncertainty, in match order.
pub const HEDGE_MARKERS: &[&str] = &[
    "might",
    "could",
    "may",
    "possibly",
    "probably",
    "perhaps",
    "seems",
    "appears",
    "suggests",
    "indicates",
    "I'm not sure",
    "it is believed that",
    "unsure",
    "uncertain",
    "speculative",
    "potential",
    "it's possible",
    "one might argue",
];

static DEFAULT: Lazy<HedgeLexicon> = Lazy::new(|| HedgeLexicon {
    markers: HEDGE_MARKERS
        .iter()
        .map(|m| (m.to_string(), Regex::new(&marker_pattern(m)).expect("valid regex")))
        .collect(),
});

/// An immutable ordered set of hedge markers, each compiled to a
/// case-insensitive pattern anchored on word boundaries at both ends.
#[derive(Debug, Clone)]
pub struct HedgeLexicon {
    markers: Vec<(String, Regex)>,
}

impl HedgeLexicon {
    pub fn new<'a>(markers: impl IntoIterator<Item = &'a str>) -> Result<Self> {
        let mut out: Vec<(String, Regex)> = Vec::new();
        for m in markers {
            let m = m.trim();
            if m.is_empty() || out.iter().any(|(seen, _)| seen.eq_ignore_ascii_case(m)) {
                continue;
            }
            let re = Regex::new(&marker_pattern(m))
                .map_err(|e| CalibrationError::Config(format!("hedge marker {m:?}: {e}")))?;
            out.push((m.to_string(), re));
        }
        Ok(Self { markers: out })
    }

    /// The built-in marker list.
    pub fn standard() -> &'static HedgeLexicon { &DEFAULT }

    pub fn markers(&self) -> impl Iterator<Item = &str> { self.markers.iter().map(|(m, _)| m.as_str()) }

    pub fn len(&self) -> usize { self.markers.len() }

    pub fn is_empty(&self) -> bool { self.markers.is_empty() }

    /// Markers present in `text`, each listed once.
    pub fn matches<'s>(&'s self, text: &str) -> Vec<&'s str> {
        let text = normalize_apostrophes(text);
        self.markers.iter().filter(|(_, re)| re.is_match(&text)).map(|(m, _)| m.as_str()).collect()
    }

    /// Number of distinct markers present. Repeats of one marker count once;
    /// nested markers ("might" inside "one might argue") each count.
    pub fn count(&self, text: &str) -> u32 {
        let text = normalize_apostrophes(text);
        self.markers.iter().filter(|(_, re)| re.is_match(&text)).count() as u32
    }
}

impl Default for HedgeLexicon {
    fn default() -> Self { Self::standard().clone() }
}

fn marker_pattern(marker: &str) -> String {
    format!(r"(?i)\b{}\b", regex::escape(&normalize_apostrophes(marker)))
}

// Model output often uses typographic apostrophes ("I’m not sure").
fn normalize_apostrophes(s: &str) -> String {
    s.replace(['\u{2019}', '\u{2018}'], "'")
}
