//! Runtime configuration
//!
//! Loads settings from `glossa.toml` in the working directory (or a path
//! given on the command line). Every field has a default, so a missing or
//! partial file still yields a usable configuration.
//!
//! # Configuration Format
//!
//! ```toml
//! # glossa.toml
//!
//! profile_path = "profiles"
//! profile = "main"
//! xml_path = "xml"
//! port = 3000
//! languages = ["en", "de", "fr"]
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::profile::ALL_LANGUAGES;

/// Default configuration file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "glossa.toml";

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Root directory holding named profile sets (default: "profiles")
    #[serde(default = "default_profile_path")]
    pub profile_path: PathBuf,

    /// Profile set to use, a subdirectory of `profile_path` (default: "main")
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Directory scanned for abstract dumps during training (default: "xml")
    #[serde(default = "default_xml_path")]
    pub xml_path: PathBuf,

    /// HTTP listen port (default: 3000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Languages to load at startup; "all" loads every stored profile
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            profile_path: default_profile_path(),
            profile: default_profile(),
            xml_path: default_xml_path(),
            port: default_port(),
            languages: default_languages(),
        }
    }
}

fn default_profile_path() -> PathBuf {
    PathBuf::from("profiles")
}
fn default_profile() -> String {
    "main".to_string()
}
fn default_xml_path() -> PathBuf {
    PathBuf::from("xml")
}
fn default_port() -> u16 {
    3000
}
fn default_languages() -> Vec<String> {
    vec![ALL_LANGUAGES.to_string()]
}

impl AppConfig {
    /// Directory the active profile set lives in.
    pub fn profile_dir(&self) -> PathBuf {
        self.profile_path.join(&self.profile)
    }
}

/// Load configuration from `path`.
///
/// Returns defaults when the file is missing. A file that exists but does
/// not parse is reported and also falls back to defaults rather than
/// aborting startup.
pub fn load_config(path: &Path) -> AppConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                debug!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("failed to parse {}: {}", path.display(), e);
                AppConfig::default()
            }
        },
        Err(_) => {
            debug!("no config at {}, using defaults", path.display());
            AppConfig::default()
        }
    }
}
