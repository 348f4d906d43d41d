//! Simhash fingerprinting: per-word FNV-1 64 hashes combined by signed bit voting.

use regex::Regex;
use std::sync::OnceLock;

use crate::utils::config::FingerprintConsts;
use crate::{FeatureSet, Fingerprint, Weighting};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001b3;

/// Word boundaries: runs of ASCII word chars/apostrophes, optionally followed by a `://` URL tail.
const WORD_PATTERN: &str = r"(?-u:[\w']+(?:://[\w./]+)?)";

static WORD_RE: OnceLock<Regex> = OnceLock::new();

fn word_regex() -> &'static Regex {
    WORD_RE.get_or_init(|| Regex::new(WORD_PATTERN).expect("word pattern is valid"))
}

/// FNV-1 (multiply, then xor) 64-bit hash. The word hash every fingerprint depends on.
#[must_use]
pub fn fnv1_64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in bytes {
        hash = hash.wrapping_mul(FNV_PRIME);
        hash ^= u64::from(*byte);
    }
    hash
}

/// Lower-cased words of `text`, in order, duplicates kept.
pub fn words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    word_regex()
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Signed per-bit vote tally over 64 positions.
#[derive(Clone, Debug)]
pub struct BitVotes {
    tally: [i64; FingerprintConsts::BITS],
}

impl Default for BitVotes {
    fn default() -> Self {
        Self {
            tally: [0; FingerprintConsts::BITS],
        }
    }
}

impl BitVotes {
    /// Add `weight` for every set bit of `hash`, subtract it for every clear bit.
    pub fn add(&mut self, hash: u64, weight: i64) {
        for (i, slot) in self.tally.iter_mut().enumerate() {
            if (hash >> i) & 1 == 1 {
                *slot += weight;
            } else {
                *slot -= weight;
            }
        }
    }

    /// Bit i is set iff tally i is >= 0 (ties resolve to 1).
    pub fn fingerprint(&self) -> Fingerprint {
        let mut out = 0u64;
        for (i, &sum) in self.tally.iter().enumerate() {
            if sum >= 0 {
                out |= 1u64 << i;
            }
        }
        Fingerprint(out)
    }
}

/// Fingerprint a text blob: every word votes once.
pub fn simhash_text(text: &str) -> Fingerprint {
    let mut votes = BitVotes::default();
    for word in words(text) {
        votes.add(fnv1_64(word.as_bytes()), 1);
    }
    votes.fingerprint()
}

/// Distinct features joined by single spaces, in lexicographic order.
pub fn combined_blob(features: &FeatureSet) -> String {
    features.sorted_features().join(" ")
}

/// Weight of one feature in frequency mode: `count * 255 / max_count`.
pub fn frequency_weight(count: usize, max_count: usize) -> i64 {
    if max_count == 0 {
        return 0;
    }
    (count * FingerprintConsts::FREQUENCY_SCALE / max_count) as i64
}

/// Each whole feature string votes once, weighted by how often it occurred.
fn simhash_frequency(features: &FeatureSet) -> Fingerprint {
    let max_count = features.max_count();
    let mut votes = BitVotes::default();
    for (feature, count) in features.iter() {
        votes.add(fnv1_64(feature.as_bytes()), frequency_weight(count, max_count));
    }
    votes.fingerprint()
}

/// Reduce one document's features to its fingerprint.
pub fn compute_fingerprint(features: &FeatureSet, weighting: Weighting) -> Fingerprint {
    match weighting {
        Weighting::Uniform => simhash_text(&combined_blob(features)),
        Weighting::Frequency => simhash_frequency(features),
    }
}
