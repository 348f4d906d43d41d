//! Document source: glob pattern -> sorted, deduplicated document ids.

use log::debug;

use crate::DocumentId;
use crate::engine::tools::{ExcludeSet, should_include_document};
use crate::errors::Error;

/// Enumerate regular files matching `pattern`, minus OS clutter and `exclude` matches.
///
/// The result is sorted lexicographically with no duplicates. A malformed pattern or an
/// entry that cannot be inspected is a [`Error::Discovery`], as is a malformed exclude
/// pattern; no matches is an empty vec.
pub fn discover_documents(pattern: &str, exclude: &[String]) -> Result<Vec<DocumentId>, Error> {
    let exclude = ExcludeSet::new(exclude)?;
    let entries = glob::glob(pattern).map_err(|e| Error::discovery(pattern, e))?;

    let mut ids = Vec::new();
    let mut skipped = 0_usize;
    for entry in entries {
        let path = entry.map_err(|e| Error::discovery(pattern, e))?;
        if !path.is_file() {
            continue;
        }
        if !should_include_document(&path, &exclude) {
            skipped += 1;
            continue;
        }
        ids.push(DocumentId::from(path));
    }
    ids.sort();
    ids.dedup();

    debug!(
        "discovered {} documents for '{}' ({} excluded)",
        ids.len(),
        pattern,
        skipped
    );
    Ok(ids)
}
