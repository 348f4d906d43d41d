//! Text normalization: raw markup -> weighted bag of line/sentence fragments.

use regex::Regex;
use std::sync::OnceLock;

use crate::FeatureSet;

/// `<script ...>...</script>` and `<style ...>...</style>` regions, body may span lines.
const NON_PROSE_PATTERN: &str = r"(?s)<script.*?>.*?</script>|<style.*?>.*?</style>";
/// Anything that is neither an ASCII word character nor ASCII whitespace. Accented and
/// other non-ASCII letters are stripped too.
const PUNCTUATION_PATTERN: &str = r"[^0-9A-Za-z_\t\n\f\r ]";

/// Pre-compiled matchers shared read-only by every extraction worker.
pub struct FeatureExtractor {
    non_prose: Regex,
    punctuation: Regex,
}

static EXTRACTOR: OnceLock<FeatureExtractor> = OnceLock::new();

impl FeatureExtractor {
    /// Process-wide extractor, compiled on first use.
    pub fn shared() -> &'static FeatureExtractor {
        EXTRACTOR.get_or_init(|| FeatureExtractor {
            non_prose: Regex::new(NON_PROSE_PATTERN).expect("non-prose pattern is valid"),
            punctuation: Regex::new(PUNCTUATION_PATTERN).expect("punctuation pattern is valid"),
        })
    }

    /// Normalize `text` and count its fragments.
    pub fn extract(&self, text: &str) -> FeatureSet {
        let prose = self.non_prose.replace_all(text, "");
        let lowered = prose.to_lowercase();
        let bare = self.punctuation.replace_all(&lowered, "");

        // The '.' split is a no-op while '.' counts as punctuation.
        bare.split('\n')
            .map(str::trim)
            .flat_map(|line| line.split('.'))
            .filter(|fragment| !fragment.is_empty())
            .collect()
    }
}

/// Extract features from raw bytes (invalid UTF-8 replaced lossily).
pub fn extract_features(content: &[u8]) -> FeatureSet {
    FeatureExtractor::shared().extract(&String::from_utf8_lossy(content))
}
