//! Load `.simprint.toml` (CLI only). Lib does not use this; the consuming program injects config via SimprintOpts.

use serde::Deserialize;
use std::path::Path;

use crate::errors::Error;
use crate::{Opts, Weighting};

#[derive(Debug, Default, Deserialize)]
pub struct SimprintToml {
    #[serde(default)]
    settings: SettingsSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsSection {
    pattern: Option<String>,
    threads: Option<usize>,
    exclude: Option<Vec<String>>,
    weighting: Option<Weighting>,
    verbose: Option<bool>,
    show_paths: Option<bool>,
}

fn parse(path: &Path) -> Result<SimprintToml, Error> {
    let s = std::fs::read_to_string(path).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    toml::from_str(&s).map_err(|e| Error::Config {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Load an explicitly named config file. Missing or malformed is an error.
pub fn load_simprint_toml(path: &Path) -> Result<SimprintToml, Error> {
    parse(path)
}

/// Load the default config file from `dir` if present. Missing is `Ok(None)`; unreadable or malformed is an error
/// the caller may choose to only warn about.
pub fn load_default_simprint_toml(dir: &Path, filename: &str) -> Result<Option<SimprintToml>, Error> {
    let path = dir.join(filename);
    if !path.is_file() {
        return Ok(None);
    }
    parse(&path).map(Some)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($idx:expr, $opts:expr, $idx_field:ident => $opts_field:ident) => {
        if let Some(v) = $idx.$idx_field.clone() {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only set fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &SimprintToml, opts: &mut Opts) {
    let s = &file.settings;
    if let Some(ref p) = s.pattern {
        opts.pattern = Some(p.clone());
    }
    if let Some(n) = s.threads {
        opts.num_threads = Some(n);
    }
    apply_file_opt!(s, opts, exclude => exclude);
    apply_file_opt!(s, opts, weighting => weighting);
    apply_file_opt!(s, opts, verbose => verbose);
    apply_file_opt!(s, opts, show_paths => show_paths);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_only_present_fields() {
        let file: SimprintToml = toml::from_str(
            r#"
            [settings]
            pattern = "docs/*.htm"
            weighting = "frequency"
            "#,
        )
        .unwrap();
        let mut opts = Opts {
            exclude: vec!["keep".to_string()],
            show_paths: true,
            ..Default::default()
        };
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.pattern.as_deref(), Some("docs/*.htm"));
        assert_eq!(opts.weighting, Weighting::Frequency);
        assert_eq!(opts.exclude, vec!["keep".to_string()]);
        assert!(opts.show_paths);
        assert_eq!(opts.num_threads, None);
    }

    #[test]
    fn test_empty_file_changes_nothing() {
        let file: SimprintToml = toml::from_str("").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert!(opts.pattern.is_none());
        assert_eq!(opts.weighting, Weighting::Uniform);
    }

    #[test]
    fn test_unknown_setting_rejected() {
        assert!(toml::from_str::<SimprintToml>("[settings]\nhash = true\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_simprint_toml(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_default_file_missing_vs_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".simprint.toml"), "[settings\n").unwrap();
        assert!(load_default_simprint_toml(dir.path(), ".simprint.toml").is_err());
        assert!(
            load_default_simprint_toml(dir.path(), "absent.toml")
                .unwrap()
                .is_none()
        );
    }
}
