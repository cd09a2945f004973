//! Loading documents and synonym lists from disk.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

use crate::models::Document;
use crate::synonyms::SynonymIndex;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Read a text file as a list of lines.
///
/// Both `\n` and `\r\n` terminators are accepted. The file must be UTF-8.
pub fn read_lines(path: &Path) -> Result<Vec<String>, SourceError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SourceError::NotFound(path.to_path_buf()),
        _ => SourceError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    let lines: Vec<String> = content.lines().map(str::to_owned).collect();
    debug!(path = %path.display(), lines = lines.len(), "read source file");
    Ok(lines)
}

/// Load a document to be compared.
pub fn load_document(path: &Path) -> Result<Document, SourceError> {
    let lines = read_lines(path)?;
    Ok(Document::new(path, lines))
}

/// Load a synonym list, one group per line.
pub fn load_synonyms(path: &Path) -> Result<SynonymIndex, SourceError> {
    let lines = read_lines(path)?;
    let index = SynonymIndex::build(&lines);

    let stats = index.stats();
    info!(
        path = %path.display(),
        groups = stats.groups,
        words = stats.words,
        "loaded synonyms"
    );
    Ok(index)
}
