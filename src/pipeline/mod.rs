//! Pipeline components: discovery, index-addressed stages, orchestration.

pub mod discovery;
pub mod orchestrator;
pub mod report;
pub mod slots;

pub use discovery::discover_documents;
pub use orchestrator::{
    extract_stage, fingerprint_documents, fingerprint_stage, load_stage, run_pipeline,
};
pub use report::{print_fingerprints, print_timings};
pub use slots::{SlotBuffer, run_stage, try_run_stage};
