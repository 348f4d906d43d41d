//! Simprint: concurrent simhash fingerprinting for document corpora

pub mod engine;
pub mod errors;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

use log::debug;

/// Result alias used by public simprint API
pub use errors::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// Single entry point: fingerprint every document matching `pattern`.
///
/// Documents are discovered in sorted order; `fingerprints[i]` belongs to `ids[i]`. The run
/// fails as a whole on a malformed pattern ([`Error::Discovery`]) or the first unreadable
/// document ([`Error::Load`]); no partial results are returned.
///
/// ```ignore
/// let corpus = simprint::fingerprint_corpus("files/*.html", &SimprintOpts::default())?;
/// for (i, id, fp) in corpus.iter() {
///     println!("{i} {id} {fp}");
/// }
/// ```
pub fn fingerprint_corpus(pattern: &str, opts: &SimprintOpts) -> Result<CorpusFingerprints> {
    let mut opts = Opts::from(opts);
    opts.pattern = Some(pattern.to_string());
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_string().to_uppercase(),
        opts
    );
    pipeline::run_pipeline(&opts)
}

/// Fingerprint an explicit, already-ordered list of documents (no discovery).
/// Output is position-aligned with `ids`.
pub fn fingerprint_paths(ids: &[DocumentId], opts: &SimprintOpts) -> Result<Vec<Fingerprint>> {
    let (fingerprints, _) = pipeline::fingerprint_documents(ids, &Opts::from(opts))?;
    Ok(fingerprints)
}

/// Fingerprint one in-memory document with the same rules as the pipeline.
pub fn fingerprint_bytes(content: &[u8], weighting: Weighting) -> Fingerprint {
    let features = engine::extract_features(content);
    engine::compute_fingerprint(&features, weighting)
}
