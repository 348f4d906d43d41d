//! Engine module for per-document operations: load, extract, fingerprint.

pub mod arg_parser;
pub mod cli;
pub mod features;
pub mod hashing;
pub mod loader;
pub mod parallel;
pub mod progress;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use cli::handle_run;
pub use features::{FeatureExtractor, extract_features};
pub use hashing::{compute_fingerprint, fnv1_64, simhash_text};
pub use loader::{load_document, read_content};
pub use tools::{ExcludeSet, is_os_hidden_file, should_include_document};
