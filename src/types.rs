//! Public and internal types for the simprint API and pipeline.

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Stable identifier of one document (a path as returned by discovery).
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocumentId(PathBuf);

impl DocumentId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl From<PathBuf> for DocumentId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&str> for DocumentId {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

/// Raw bytes of one document, as read by the loader.
#[derive(Clone, Debug)]
pub struct RawDocument {
    pub id: DocumentId,
    pub content: Vec<u8>,
}

/// Normalized text fragments of one document and how often each occurs.
///
/// Built once by [`extract_features`](crate::engine::features::extract_features); never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureSet {
    counts: HashMap<String, usize>,
}

impl FeatureSet {
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Occurrences of `feature`, 0 when absent.
    pub fn count(&self, feature: &str) -> usize {
        self.counts.get(feature).copied().unwrap_or(0)
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.counts.contains_key(feature)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Distinct features in lexicographic order.
    pub fn sorted_features(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.counts.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Highest occurrence count, 0 for an empty set.
    pub fn max_count(&self) -> usize {
        self.counts.values().copied().max().unwrap_or(0)
    }
}

impl<S: Into<String>> FromIterator<S> for FeatureSet {
    /// Count each yielded fragment; empty fragments are skipped.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut counts = HashMap::new();
        for fragment in iter {
            let fragment = fragment.into();
            if !fragment.is_empty() {
                *counts.entry(fragment).or_insert(0) += 1;
            }
        }
        Self { counts }
    }
}

/// 64-bit simhash of one document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Fingerprint(pub u64);

impl Fingerprint {
    pub fn value(self) -> u64 {
        self.0
    }

    /// Number of differing bits.
    pub fn hamming_distance(self, other: Fingerprint) -> u32 {
        (self.0 ^ other.0).count_ones()
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

impl fmt::LowerHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl fmt::UpperHex for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// How each feature's words vote in the fingerprint.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Weighting {
    /// Every distinct feature votes once; occurrence counts are ignored.
    #[default]
    Uniform,
    /// Feature words vote with `count * 255 / max_count`.
    Frequency,
}

/// Wall-clock duration of each pipeline stage.
#[derive(Clone, Copy, Debug, Default)]
pub struct StageTimings {
    pub discover: Duration,
    pub load: Duration,
    pub extract: Duration,
    pub fingerprint: Duration,
    pub total: Duration,
}

impl StageTimings {
    /// `(label, duration)` pairs in pipeline order, excluding the total.
    pub fn stages(&self) -> [(&'static str, Duration); 4] {
        [
            ("discover", self.discover),
            ("load", self.load),
            ("extract", self.extract),
            ("fingerprint", self.fingerprint),
        ]
    }
}

/// Result of a full run: identifiers and fingerprints, position-aligned.
#[derive(Debug, Default)]
pub struct CorpusFingerprints {
    pub ids: Vec<DocumentId>,
    pub fingerprints: Vec<Fingerprint>,
    pub timings: StageTimings,
}

impl CorpusFingerprints {
    pub fn len(&self) -> usize {
        self.fingerprints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fingerprints.is_empty()
    }

    /// `(position, id, fingerprint)` in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &DocumentId, Fingerprint)> {
        self.ids
            .iter()
            .zip(self.fingerprints.iter().copied())
            .enumerate()
            .map(|(i, (id, fp))| (i, id, fp))
    }
}

/// Lib-only options for [`fingerprint_corpus`](crate::fingerprint_corpus).
#[derive(Clone, Debug, Default)]
pub struct SimprintOpts {
    /// Override worker thread count. When None, rayon's default (capped by FD limit for loading).
    pub num_threads: Option<usize>,
    /// Exclude patterns (glob syntax, e.g. `*.min.html`, `drafts`).
    pub exclude: Vec<String>,
    /// Vote weighting for fingerprints.
    pub weighting: Weighting,
}

impl From<&SimprintOpts> for Opts {
    fn from(o: &SimprintOpts) -> Self {
        Opts {
            pattern: None,
            num_threads: o.num_threads,
            exclude: o.exclude.clone(),
            weighting: o.weighting,
            verbose: false,
            show_paths: false,
        }
    }
}

/// Full options (CLI). Use [`SimprintOpts`] for lib.
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Glob selecting the documents. When None, [`DEFAULT_PATTERN`](crate::utils::config::DEFAULT_PATTERN).
    pub pattern: Option<String>,
    /// Override worker thread count.
    pub num_threads: Option<usize>,
    /// Exclude patterns (glob syntax).
    pub exclude: Vec<String>,
    /// Vote weighting for fingerprints.
    pub weighting: Weighting,
    /// Debug logging and progress bars.
    pub verbose: bool,
    /// Print each document's path next to its fingerprint.
    pub show_paths: bool,
}
