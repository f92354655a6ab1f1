//! `glossa detect` - one-shot detection from the command line

use std::io::Read;

use anyhow::{bail, Context, Result};

use crate::config::AppConfig;
use crate::detector::Detector;
use crate::models::DetectRequest;
use crate::profile::ProfileStore;

pub(crate) fn run(
    config: &AppConfig,
    text: &str,
    langs: Vec<String>,
    trials: i32,
    iterations: u16,
    seed: Option<u64>,
) -> Result<()> {
    let text = if text == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading text from stdin")?;
        buf
    } else {
        text.to_string()
    };

    let profile_dir = config.profile_dir();
    let store = ProfileStore::load(&profile_dir, &config.languages)
        .with_context(|| format!("loading profiles from {}", profile_dir.display()))?;
    if store.is_empty() {
        bail!(
            "no language profiles in {} - run `glossa train` first",
            profile_dir.display()
        );
    }

    let detector = Detector::new(store);
    let request = DetectRequest {
        text,
        langs,
        max_trials: trials,
        max_iterations: iterations,
        seed,
        ..Default::default()
    };
    let detection = detector.detect(&request);

    println!("{}", serde_json::to_string_pretty(&detection)?);
    Ok(())
}
