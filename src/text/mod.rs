//! Text pipeline: Unicode normalization and n-gram tokenization.

pub mod normalize;
pub mod tokenize;

pub use normalize::normalize;
pub use tokenize::{tokenize, MAX_NGRAM, MIN_NGRAM};
