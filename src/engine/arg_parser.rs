use clap::Parser;
use std::path::PathBuf;

use crate::Weighting;

/// Concurrent simhash fingerprinting for document corpora.
#[derive(Clone, Debug, Parser)]
#[command(name = "simprint")]
#[command(about = "Print a 64-bit similarity fingerprint for every document matching PATTERN.")]
pub struct Cli {
    /// Glob selecting the documents. Default: `files/*.html` (or `pattern` from the config file).
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Config file. Default: `.simprint.toml` in the current directory, if present.
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Worker thread count per stage. Default: all available threads.
    #[arg(long, short = 't', value_parser = clap::value_parser!(usize))]
    pub threads: Option<usize>,

    /// Exclude patterns (glob syntax). Can specify multiple: -e pattern1 pattern2 pattern3
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// Vote weighting: `uniform` ignores feature counts, `frequency` scales votes by them.
    #[arg(long, short = 'w', value_enum)]
    pub weighting: Option<Weighting>,

    /// Append each document's path to its fingerprint line.
    #[arg(long, short = 'p', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub show_paths: Option<bool>,

    /// Verbose output (debug logging and per-stage progress bars).
    #[arg(long, short = 'v', num_args = 0..=1, default_missing_value = "true", value_parser = clap::value_parser!(bool))]
    pub verbose: Option<bool>,
}
