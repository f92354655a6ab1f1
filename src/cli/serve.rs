//! `glossa serve` - run the HTTP detection server

use std::sync::Arc;

use anyhow::{bail, Context, Result};

use crate::config::AppConfig;
use crate::detector::Detector;
use crate::profile::ProfileStore;
use crate::server;

pub(crate) fn run(config: &AppConfig, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port);
    let profile_dir = config.profile_dir();

    let store = ProfileStore::load(&profile_dir, &config.languages)
        .with_context(|| format!("loading profiles from {}", profile_dir.display()))?;
    if store.is_empty() {
        bail!(
            "no language profiles in {} - run `glossa train` first",
            profile_dir.display()
        );
    }

    let detector = Arc::new(Detector::new(store));

    let runtime = tokio::runtime::Runtime::new().context("starting async runtime")?;
    runtime.block_on(server::run(detector, port));
    Ok(())
}
