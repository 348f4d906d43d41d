use log::debug;
use std::time::Instant;

use crate::engine::features::extract_features;
use crate::engine::hashing::compute_fingerprint;
use crate::engine::loader::load_document;
use crate::engine::parallel::{build_pool, compute_threads, load_threads};
use crate::engine::progress::StageProgress;
use crate::errors::Error;
use crate::pipeline::discovery::discover_documents;
use crate::pipeline::slots::{run_stage, try_run_stage};
use crate::utils::config::DEFAULT_PATTERN;
use crate::{
    CorpusFingerprints, DocumentId, FeatureSet, Fingerprint, Opts, RawDocument, StageTimings,
};

/// Stage 1: read every document. Any unreadable document aborts the stage.
pub fn load_stage(ids: &[DocumentId], opts: &Opts) -> Result<Vec<RawDocument>, Error> {
    let pool = build_pool("load", load_threads(opts.num_threads))?;
    let progress = StageProgress::new(opts.verbose, "Loading", ids.len());
    try_run_stage(&pool, "load", ids, &progress, load_document)
}

/// Stage 2: normalize every document into its feature set.
pub fn extract_stage(
    docs: &[RawDocument],
    pool: &rayon::ThreadPool,
    verbose: bool,
) -> Result<Vec<FeatureSet>, Error> {
    let progress = StageProgress::new(verbose, "Extracting", docs.len());
    run_stage(pool, "extract", docs, &progress, |doc| {
        extract_features(&doc.content)
    })
}

/// Stage 3: reduce every feature set to a fingerprint.
pub fn fingerprint_stage(
    features: &[FeatureSet],
    pool: &rayon::ThreadPool,
    opts: &Opts,
) -> Result<Vec<Fingerprint>, Error> {
    let progress = StageProgress::new(opts.verbose, "Fingerprinting", features.len());
    let weighting = opts.weighting;
    run_stage(pool, "fingerprint", features, &progress, |set| {
        compute_fingerprint(set, weighting)
    })
}

/// Load, extract and fingerprint `ids` as three barrier stages. Output is position-aligned with `ids`.
/// Only the load/extract/fingerprint fields of the returned timings are set.
pub fn fingerprint_documents(
    ids: &[DocumentId],
    opts: &Opts,
) -> Result<(Vec<Fingerprint>, StageTimings), Error> {
    let mut timings = StageTimings::default();

    let step = Instant::now();
    let docs = load_stage(ids, opts)?;
    timings.load = step.elapsed();
    debug!("loaded {} documents in {:?}", docs.len(), timings.load);

    let pool = build_pool("compute", compute_threads(opts.num_threads))?;

    let step = Instant::now();
    let features = extract_stage(&docs, &pool, opts.verbose)?;
    timings.extract = step.elapsed();
    drop(docs);
    debug!(
        "extracted {} feature sets ({} empty) in {:?}",
        features.len(),
        features.iter().filter(|f| f.is_empty()).count(),
        timings.extract
    );

    let step = Instant::now();
    let fingerprints = fingerprint_stage(&features, &pool, opts)?;
    timings.fingerprint = step.elapsed();
    debug!(
        "computed {} fingerprints in {:?}",
        fingerprints.len(),
        timings.fingerprint
    );

    Ok((fingerprints, timings))
}

/// Main orchestrator: discover documents for the configured pattern, then fingerprint them.
pub fn run_pipeline(opts: &Opts) -> Result<CorpusFingerprints, Error> {
    let start = Instant::now();
    let pattern = opts.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);

    let step = Instant::now();
    let ids = discover_documents(pattern, &opts.exclude)?;
    let discover = step.elapsed();

    let (fingerprints, mut timings) = fingerprint_documents(&ids, opts)?;
    timings.discover = discover;
    timings.total = start.elapsed();

    Ok(CorpusFingerprints {
        ids,
        fingerprints,
        timings,
    })
}
