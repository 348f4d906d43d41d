//! Application configuration constants.
//! Tuning and thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Config file looked up in the working directory when `--config` is not given.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }
}

// ---- Discovery ----

/// Documents selected when neither CLI nor config file names a pattern.
pub const DEFAULT_PATTERN: &str = "files/*.html";

// ---- Worker threads ----

/// Thread limits for the worker pools.
#[derive(Clone, Copy, Debug)]
pub struct WorkerThreadLimits {
    /// Available threads (from rayon); set by [`WorkerThreadLimits::current()`].
    pub all_threads: usize,
    /// Minimum pool size, even when the FD limit suggests fewer.
    pub floor: usize,
}

impl Default for WorkerThreadLimits {
    fn default() -> Self {
        Self {
            all_threads: 0, // use current() to set from rayon
            floor: Self::FLOOR_THREADS,
        }
    }
}

impl WorkerThreadLimits {
    pub const FLOOR_THREADS: usize = 1;

    /// Build limits with `all_threads` set from `rayon::current_num_threads()`.
    pub fn current() -> Self {
        Self {
            all_threads: rayon::current_num_threads(),
            ..Self::default()
        }
    }
}

// ---- Progress ----

/// Progress bar tuning.
pub struct ProgressConsts;

impl ProgressConsts {
    /// Target number of progress updates per stage (~100 total).
    pub const TARGET_UPDATES: usize = 100;
    /// Minimum documents between updates (avoid too-frequent redraws).
    pub const CHUNK_MIN: usize = 10;
}

// ---- Fingerprinting ----

/// Fingerprint algorithm constants.
pub struct FingerprintConsts;

impl FingerprintConsts {
    /// Width of a fingerprint in bits.
    pub const BITS: usize = 64;
    /// Top of the scale for frequency weights (`count * SCALE / max_count`).
    pub const FREQUENCY_SCALE: usize = 255;
}
