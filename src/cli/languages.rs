//! `glossa languages` - list stored profiles

use anyhow::Result;

use crate::config::AppConfig;
use crate::profile::ProfileStore;

pub(crate) fn run(config: &AppConfig) -> Result<()> {
    let profile_dir = config.profile_dir();
    let langs = ProfileStore::available_languages(&profile_dir).unwrap_or_default();

    if langs.is_empty() {
        println!(
            "no profiles in {} - run `glossa train` first",
            profile_dir.display()
        );
        return Ok(());
    }
    for lang in langs {
        println!("{}", lang);
    }
    Ok(())
}
