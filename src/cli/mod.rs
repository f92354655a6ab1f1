//! CLI command definitions and handlers

mod detect;
mod languages;
mod serve;
mod train;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_FILE;

/// Glossa - statistical language detection
#[derive(Parser, Debug)]
#[command(name = "glossa")]
#[command(
    version,
    about = "Statistical language detection — train n-gram profiles from Wikipedia abstracts and serve detection over HTTP",
    after_help = "\
Examples:
  glossa train                              Train profiles from dumps in ./xml
  glossa serve --port 3000                  Serve detection over HTTP
  glossa detect \"bonjour tout le monde\"     Detect the language of a string
  glossa detect - < letter.txt              Detect text read from stdin
  glossa languages                          List trained languages"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// Override the profile root directory from the config
    #[arg(long, global = true)]
    pub profile_path: Option<PathBuf>,

    /// Override the profile set name from the config
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train language profiles from Wikipedia abstract dumps
    #[command(after_help = "\
Dump files are discovered by name: <lang>wiki-latest-abstract.xml, one per
language. Languages that already have a stored profile are skipped.")]
    Train {
        /// Directory containing the dump files (default from config)
        #[arg(long)]
        xml_path: Option<PathBuf>,
    },

    /// Start the HTTP detection server
    Serve {
        /// Listen port (default from config: 3000)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },

    /// Detect the language of a text
    #[command(after_help = "\
Examples:
  glossa detect \"guten morgen\"              Score against all trained languages
  glossa detect \"hola\" --langs es,pt,it     Restrict the candidate set
  glossa detect - --seed 42 < input.txt     Reproducible scoring from stdin")]
    Detect {
        /// Text to classify, or "-" to read stdin
        text: String,

        /// Candidate languages, comma separated (default: all trained)
        #[arg(long, value_delimiter = ',')]
        langs: Vec<String>,

        /// Scoring trials (0 = default, negative = exhaust the whole text)
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        trials: i32,

        /// Token cap per trial (0 = default)
        #[arg(long, default_value = "0")]
        iterations: u16,

        /// Seed for reproducible results
        #[arg(long)]
        seed: Option<u64>,
    },

    /// List languages with stored profiles
    Languages,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    let mut config = crate::config::load_config(&cli.config);
    if let Some(profile_path) = cli.profile_path {
        config.profile_path = profile_path;
    }
    if let Some(profile) = cli.profile {
        config.profile = profile;
    }

    match cli.command {
        Some(Commands::Train { xml_path }) => train::run(&config, xml_path.as_deref()),

        Some(Commands::Serve { port }) => serve::run(&config, port),

        Some(Commands::Detect {
            text,
            langs,
            trials,
            iterations,
            seed,
        }) => detect::run(&config, &text, langs, trials, iterations, seed),

        Some(Commands::Languages) => languages::run(&config),

        // Default: serve with config settings
        None => serve::run(&config, None),
    }
}
