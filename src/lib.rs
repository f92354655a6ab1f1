//! Statistical language identification from character n-grams.
//!
//! Profiles are trained from Wikipedia abstract dumps, stored as JSON, and
//! scored with a randomized multi-trial walk over the input's n-grams. The
//! crate ships a CLI and a small HTTP API around the same engine.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod detector;
pub mod models;
pub mod profile;
pub mod server;
pub mod text;
pub mod trainer;

pub use detector::{Detector, Prior};
pub use models::{DetectRequest, Detection};
pub use profile::{LanguageProfile, ProfileStore};
