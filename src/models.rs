//! Request and response types shared by the HTTP API, the CLI, and tests.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// A detection request: the text plus optional knobs. Every field except
/// `text` has a zero-value default, so the minimal JSON body is just
/// `{"text": "..."}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectRequest {
    /// Text to identify.
    pub text: String,
    /// Candidate language codes. Empty, or containing `all`, means every
    /// loaded language.
    pub langs: Vec<String>,
    /// Per-language bias multipliers applied before normalization.
    /// A missing entry means 1.0; 0.0 eliminates a candidate.
    pub coefficients: HashMap<String, f64>,
    /// Number of scoring trials. 0 picks the default, negative runs one
    /// trial per token.
    pub max_trials: i32,
    /// Per-trial token cap. 0 picks the default.
    pub max_iterations: u16,
    /// Fixed RNG seed for reproducible runs; omitted means OS entropy.
    pub seed: Option<u64>,
}

impl DetectRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_langs<I, S>(mut self, langs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.langs = langs.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_coefficient(mut self, lang: impl Into<String>, coefficient: f64) -> Self {
        self.coefficients.insert(lang.into(), coefficient);
        self
    }

    pub fn with_trials(mut self, max_trials: i32) -> Self {
        self.max_trials = max_trials;
        self
    }

    pub fn with_iterations(mut self, max_iterations: u16) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Result of one detection call.
///
/// `langs` holds every candidate that survived the probability floor,
/// keyed by code so serialization order is stable. `lang` is empty when
/// nothing survived (no tokens, no candidates).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Best language code, empty when the distribution is empty.
    pub lang: String,
    /// Aggregated probability of the best language.
    pub prob: f64,
    /// True when the best score is a unique maximum.
    pub strict: bool,
    /// Aggregated probability per surviving candidate.
    pub langs: BTreeMap<String, f64>,
    /// Tokens produced from the normalized text.
    pub tokens_total: usize,
    /// Tokens actually consumed by trials.
    pub tokens_processed: usize,
}
