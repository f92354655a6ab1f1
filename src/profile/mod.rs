//! Per-language n-gram frequency profiles
//!
//! A profile is the trained model for one language: gram counts plus their
//! running total. Lookups never return zero for an unseen gram — the floor
//! keeps multiplicative trial scores alive, so a single missing gram cannot
//! veto a language outright.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

pub mod store;

pub use store::{ProfileStore, StoreError, ALL_LANGUAGES};

/// Probability assigned to a gram the profile has never seen.
pub const MIN_GRAM_PROB: f64 = 1e-11;

/// Frequency table for a single language.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageProfile {
    /// Gram -> observation count.
    grams: FxHashMap<String, f64>,
    /// Sum of all retained counts.
    total: f64,
}

impl LanguageProfile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `gram`.
    pub fn increment(&mut self, gram: &str) {
        if let Some(count) = self.grams.get_mut(gram) {
            *count += 1.0;
        } else {
            self.grams.insert(gram.to_string(), 1.0);
        }
        self.total += 1.0;
    }

    /// Record one observation of every token, in order.
    pub fn train(&mut self, tokens: &[String]) {
        for token in tokens {
            self.increment(token);
        }
    }

    /// Relative frequency of `gram`, floored at [`MIN_GRAM_PROB`] for grams
    /// this profile has never seen.
    pub fn probability(&self, gram: &str) -> f64 {
        match self.grams.get(gram) {
            Some(count) => *count / self.total,
            None => MIN_GRAM_PROB,
        }
    }

    /// Drop grams observed fewer than `min_count` times, then recompute the
    /// total from the survivors.
    pub fn prune(&mut self, min_count: f64) {
        self.grams.retain(|_, count| *count >= min_count);
        self.total = self.grams.values().sum();
    }

    /// Number of distinct grams.
    pub fn len(&self) -> usize {
        self.grams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grams.is_empty()
    }

    /// Sum of all retained counts; the profile's corpus size.
    pub fn total(&self) -> f64 {
        self.total
    }
}
