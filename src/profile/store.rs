//! Profile persistence and lookup
//!
//! One JSON file per language under the profile directory (`en.json`,
//! `de.json`, ...). Loading tolerates individual bad files — a corrupt or
//! empty profile is skipped with a warning so the rest of the set still
//! serves — while an unreadable directory is an error for the caller to
//! surface.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::{debug, warn};

use super::LanguageProfile;

/// Sentinel language-list entry meaning "every available language".
pub const ALL_LANGUAGES: &str = "all";

/// Shortest accepted language code. Single-letter stems are junk from
/// stray files, not languages.
const MIN_LANG_CODE_LEN: usize = 2;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("profile directory {dir}: {source}")]
    Dir {
        dir: String,
        #[source]
        source: std::io::Error,
    },
    #[error("write profile {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("encode profile {lang}: {source}")]
    Encode {
        lang: String,
        #[source]
        source: serde_json::Error,
    },
}

/// In-memory set of language profiles, keyed by language code.
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: FxHashMap<String, LanguageProfile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, lang: impl Into<String>, profile: LanguageProfile) {
        self.profiles.insert(lang.into(), profile);
    }

    pub fn get(&self, lang: &str) -> Option<&LanguageProfile> {
        self.profiles.get(lang)
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.profiles.contains_key(lang)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Sorted codes of every loaded language.
    pub fn languages(&self) -> Vec<String> {
        let mut langs: Vec<String> = self.profiles.keys().cloned().collect();
        langs.sort();
        langs
    }

    /// Prune every profile with the same count threshold.
    pub fn prune_all(&mut self, min_count: f64) {
        for profile in self.profiles.values_mut() {
            profile.prune(min_count);
        }
    }

    /// Load the requested languages from `dir`. An empty request or the
    /// [`ALL_LANGUAGES`] sentinel loads everything available. Individual
    /// files that are missing, malformed, or empty are skipped with a
    /// warning.
    pub fn load(dir: &Path, langs: &[String]) -> Result<Self, StoreError> {
        let requested: Vec<String> =
            if langs.is_empty() || langs.iter().any(|l| l == ALL_LANGUAGES) {
                Self::available_languages(dir)?
            } else {
                langs.to_vec()
            };

        let mut store = Self::new();
        for lang in requested {
            let path = dir.join(format!("{lang}.json"));
            let content = match fs::read_to_string(&path) {
                Ok(c) => c,
                Err(e) => {
                    warn!("skipping profile {}: {}", path.display(), e);
                    continue;
                }
            };
            let profile: LanguageProfile = match serde_json::from_str(&content) {
                Ok(p) => p,
                Err(e) => {
                    warn!("skipping malformed profile {}: {}", path.display(), e);
                    continue;
                }
            };
            if profile.is_empty() {
                warn!("skipping empty profile {}", path.display());
                continue;
            }
            debug!("loaded profile {} ({} grams)", lang, profile.len());
            store.profiles.insert(lang, profile);
        }
        Ok(store)
    }

    /// Write one `<lang>.json` per non-empty profile, creating `dir` first.
    pub fn save(&self, dir: &Path) -> Result<(), StoreError> {
        fs::create_dir_all(dir).map_err(|e| StoreError::Dir {
            dir: dir.display().to_string(),
            source: e,
        })?;
        for (lang, profile) in &self.profiles {
            if profile.is_empty() {
                debug!("not writing empty profile {}", lang);
                continue;
            }
            let content = serde_json::to_string(profile).map_err(|e| StoreError::Encode {
                lang: lang.clone(),
                source: e,
            })?;
            let path = dir.join(format!("{lang}.json"));
            fs::write(&path, content).map_err(|e| StoreError::Write {
                path: path.display().to_string(),
                source: e,
            })?;
        }
        Ok(())
    }

    /// Language codes present in `dir`, by file stem, sorted. Stems shorter
    /// than two characters or containing non-alphanumeric characters are
    /// ignored.
    pub fn available_languages(dir: &Path) -> Result<Vec<String>, StoreError> {
        let entries = fs::read_dir(dir).map_err(|e| StoreError::Dir {
            dir: dir.display().to_string(),
            source: e,
        })?;

        let mut langs = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("unreadable entry in {}: {}", dir.display(), e);
                    continue;
                }
            };
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if stem.len() < MIN_LANG_CODE_LEN || !stem.chars().all(|c| c.is_ascii_alphanumeric()) {
                continue;
            }
            langs.push(stem.to_string());
        }
        langs.sort();
        Ok(langs)
    }
}
