//! `glossa train` - build language profiles from abstract dumps

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tracing::info;

use crate::config::AppConfig;
use crate::corpus::{discover_dumps, stream_abstracts};
use crate::profile::ProfileStore;
use crate::trainer::{spawn_training, TrainEvent};

pub(crate) fn run(config: &AppConfig, xml_path: Option<&Path>) -> Result<()> {
    let xml_dir = xml_path.unwrap_or(&config.xml_path);
    let profile_dir = config.profile_dir();

    let dumps = discover_dumps(xml_dir)
        .with_context(|| format!("scanning {} for abstract dumps", xml_dir.display()))?;
    if dumps.is_empty() {
        bail!(
            "no abstract dumps in {} (expected <lang>wiki-latest-abstract.xml)",
            xml_dir.display()
        );
    }

    // Languages that already have a stored profile are not retrained.
    let existing = ProfileStore::available_languages(&profile_dir).unwrap_or_default();
    let mut sources = Vec::new();
    for dump in &dumps {
        if existing.contains(&dump.lang) {
            info!("{} already trained, skipping", dump.lang);
            continue;
        }
        let stream = stream_abstracts(&dump.path)
            .with_context(|| format!("opening {}", dump.path.display()))?;
        sources.push((dump.lang.clone(), stream));
    }

    if sources.is_empty() {
        println!(
            "{}All {} languages already trained in {}",
            style("✓ ").green(),
            dumps.len(),
            profile_dir.display()
        );
        return Ok(());
    }

    println!(
        "Training {} languages from {}\n",
        sources.len(),
        xml_dir.display()
    );

    let langs: Vec<String> = sources.iter().map(|(lang, _)| lang.clone()).collect();
    let mut pipeline = spawn_training(sources);

    // One spinner per language, driven by worker events.
    let multi = MultiProgress::new();
    let spinner_style = create_spinner_style();
    let mut bars: HashMap<String, ProgressBar> = HashMap::new();
    for lang in &langs {
        let bar = multi.add(ProgressBar::new_spinner());
        bar.set_style(spinner_style.clone());
        bar.set_message(format!("{}: 0 units", lang));
        bar.enable_steady_tick(std::time::Duration::from_millis(100));
        bars.insert(lang.clone(), bar);
    }

    let mut unit_counts: HashMap<String, usize> = HashMap::new();
    if let Some(events) = pipeline.take_events() {
        for event in events {
            match event {
                TrainEvent::Unit { lang } => {
                    let count = unit_counts.entry(lang.clone()).or_insert(0);
                    *count += 1;
                    if let Some(bar) = bars.get(&lang) {
                        bar.set_message(format!("{}: {} units", lang, count));
                    }
                }
                TrainEvent::Done { lang, units, grams } => {
                    if let Some(bar) = bars.get(&lang) {
                        bar.finish_with_message(format!(
                            "{}{}: {} units, {} grams",
                            style("✓ ").green(),
                            lang,
                            units,
                            grams
                        ));
                    }
                }
            }
        }
    }

    let (trained, stats) = pipeline.join();

    let mut store = ProfileStore::new();
    for result in trained {
        if result.profile.is_empty() {
            println!(
                "{}{}: no grams survived training, not saved",
                style("⚠ ").yellow(),
                result.lang
            );
            continue;
        }
        store.insert(result.lang, result.profile);
    }
    store
        .save(&profile_dir)
        .with_context(|| format!("saving profiles to {}", profile_dir.display()))?;

    println!(
        "\n{}Saved {} profiles ({} units) to {}",
        style("✓ ").green(),
        store.len(),
        stats.units,
        profile_dir.display()
    );
    if stats.failed > 0 {
        println!(
            "{}{} training workers failed",
            style("⚠ ").yellow(),
            stats.failed
        );
    }

    Ok(())
}

/// Create spinner progress style
fn create_spinner_style() -> ProgressStyle {
    ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.green} {msg}")
        .unwrap()
}
