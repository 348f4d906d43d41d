//! Document loading utilities

use std::path::Path;

use crate::errors::Error;
use crate::{DocumentId, RawDocument};

/// Read a file fully into memory.
pub fn read_content(path: &Path) -> std::io::Result<Vec<u8>> {
    std::fs::read(path)
}

/// Load one document. Failure names the document.
pub fn load_document(id: &DocumentId) -> Result<RawDocument, Error> {
    let content = read_content(id.path()).map_err(|e| Error::load(id, e))?;
    Ok(RawDocument {
        id: id.clone(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_reads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.html");
        std::fs::write(&path, b"<p>hi</p>").unwrap();
        let doc = load_document(&DocumentId::new(&path)).unwrap();
        assert_eq!(doc.content, b"<p>hi</p>");
        assert_eq!(doc.id.path(), path.as_path());
    }

    #[test]
    fn test_load_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.html");
        std::fs::write(&path, b"").unwrap();
        assert!(load_document(&DocumentId::new(&path)).unwrap().content.is_empty());
    }

    #[test]
    fn test_load_missing_names_document() {
        let dir = tempfile::tempdir().unwrap();
        let id = DocumentId::new(dir.path().join("missing.html"));
        let err = load_document(&id).unwrap_err();
        assert_eq!(err.document(), Some(&id));
        assert!(err.to_string().contains("missing.html"));
    }

    #[test]
    fn test_load_large_file_intact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.html");
        let body: Vec<u8> = (0..3 * 1024 * 1024).map(|i| (i % 251) as u8).collect();
        std::fs::write(&path, &body).unwrap();
        assert_eq!(read_content(&path).unwrap(), body);
    }
}
