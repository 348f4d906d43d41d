//! CLI command handler: resolve options, run the pipeline, print timings and fingerprints.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::path::Path;

use crate::Opts;
use crate::engine::arg_parser::Cli;
use crate::errors::Error;
use crate::pipeline::{print_fingerprints, print_timings, run_pipeline};
use crate::utils::config::PackagePaths;
use crate::utils::{apply_file_to_opts, load_default_simprint_toml, load_simprint_toml, setup_logging};

/// Apply CLI flags over `opts` (only flags that were given).
pub fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(ref p) = cli.pattern {
        opts.pattern = Some(p.clone());
    }
    if cli.threads.is_some() {
        opts.num_threads = cli.threads;
    }
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    if let Some(w) = cli.weighting {
        opts.weighting = w;
    }
    if let Some(v) = cli.show_paths {
        opts.show_paths = v;
    }
    if let Some(v) = cli.verbose {
        opts.verbose = v;
    }
}

/// Defaults < config file < CLI. Returns the opts plus a problem with the default config file, if any,
/// so it can be logged once logging is configured.
pub fn resolve_opts(cli: &Cli, cwd: &Path) -> Result<(Opts, Option<Error>), Error> {
    let mut opts = Opts::default();
    let mut ignored = None;
    match cli.config {
        Some(ref path) => apply_file_to_opts(&load_simprint_toml(path)?, &mut opts),
        None => match load_default_simprint_toml(cwd, PackagePaths::get().config_filename()) {
            Ok(Some(file)) => apply_file_to_opts(&file, &mut opts),
            Ok(None) => {}
            Err(e) => ignored = Some(e),
        },
    }
    apply_cli_to_opts(cli, &mut opts);
    Ok((opts, ignored))
}

/// Fingerprint every document matching the resolved pattern and print the report.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let (opts, ignored) = resolve_opts(cli, Path::new("."))?;
    setup_logging(opts.verbose);
    if let Some(e) = ignored {
        warn!("{}; ignoring it", e);
    }
    debug!(
        "{} CONFIG:{:#?}",
        PackagePaths::get().pkg_name().to_uppercase(),
        opts
    );

    let corpus = run_pipeline(&opts)?;
    print_timings(&corpus.timings).context("write timings")?;
    print_fingerprints(&corpus, opts.show_paths).context("write fingerprints")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Weighting;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(".simprint.toml"),
            "[settings]\npattern = \"a/*.html\"\nweighting = \"frequency\"\nthreads = 2\n",
        )
        .unwrap();
        let cli = Cli::try_parse_from(["simprint", "b/*.html", "-w", "uniform"]).unwrap();
        let (opts, ignored) = resolve_opts(&cli, dir.path()).unwrap();
        assert!(ignored.is_none());
        assert_eq!(opts.pattern.as_deref(), Some("b/*.html"));
        assert_eq!(opts.weighting, Weighting::Uniform);
        assert_eq!(opts.num_threads, Some(2));
    }

    #[test]
    fn test_malformed_default_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".simprint.toml"), "not toml [").unwrap();
        let cli = Cli::try_parse_from(["simprint"]).unwrap();
        let (opts, ignored) = resolve_opts(&cli, dir.path()).unwrap();
        assert!(matches!(ignored, Some(Error::Config { .. })));
        assert!(opts.pattern.is_none());
    }

    #[test]
    fn test_missing_explicit_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let cli = Cli::try_parse_from(["simprint", "-c", missing.to_str().unwrap()]).unwrap();
        assert!(resolve_opts(&cli, dir.path()).is_err());
    }
}
