//! Error taxonomy for the fingerprinting pipeline.

use std::path::PathBuf;
use thiserror::Error;

use crate::DocumentId;

/// Every failure a simprint run can report. All of them abort the run.
#[derive(Debug, Error)]
pub enum Error {
    /// The selection pattern is malformed or enumeration failed.
    #[error("cannot discover documents for pattern '{pattern}': {reason}")]
    Discovery { pattern: String, reason: String },

    /// A document's content could not be read.
    #[error("cannot load document {id}")]
    Load {
        id: DocumentId,
        #[source]
        source: std::io::Error,
    },

    /// A stage produced a result slot that was never filled or filled twice.
    #[error("{stage} stage left slot {index} inconsistent")]
    SlotInvariant { stage: &'static str, index: usize },

    /// An explicitly requested config file could not be read or parsed.
    #[error("invalid config file {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },

    #[error("cannot build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl Error {
    pub fn discovery(pattern: &str, reason: impl ToString) -> Self {
        Self::Discovery {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn load(id: &DocumentId, source: std::io::Error) -> Self {
        Self::Load {
            id: id.clone(),
            source,
        }
    }

    /// The offending document, for load failures.
    pub fn document(&self) -> Option<&DocumentId> {
        match self {
            Self::Load { id, .. } => Some(id),
            _ => None,
        }
    }
}
