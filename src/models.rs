//! Data structures for the tuple plagiarism pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scan::ScanError;
use crate::synonyms::SynonymStats;
use crate::tokenize::{tokenize_lines, TokenLine};

/// Default minimum run length before matches are counted
pub const DEFAULT_WINDOW_SIZE: usize = 3;

/// Largest window whose per-line adjustment fits the signed compared count
pub const MAX_WINDOW_SIZE: usize = i64::MAX as usize;

/// A text document held as its raw lines
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub lines: Vec<String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, lines: Vec<String>) -> Self {
        Self {
            path: path.into(),
            lines,
        }
    }

    /// Build an in-memory document from a block of text.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self::new(path, text.lines().map(str::to_owned).collect())
    }

    /// Tokenized view of every line
    pub fn token_lines(&self) -> Vec<TokenLine<'_>> {
        tokenize_lines(&self.lines)
    }

    pub fn stats(&self) -> DocumentStats {
        let token_lines = self.token_lines();
        DocumentStats {
            line_count: token_lines.len(),
            blank_lines: token_lines.iter().filter(|l| l.is_blank()).count(),
            word_count: token_lines.iter().map(|l| l.words().len()).sum(),
        }
    }
}

/// Shape of a document as seen by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub line_count: usize,
    pub blank_lines: usize,
    pub word_count: usize,
}

/// Scan parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanParams {
    pub window_size: usize, // Minimum run length before matches count
    pub trace: bool,        // Emit per-line counter events
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            trace: false,
        }
    }
}

impl ScanParams {
    pub fn with_window_size(window_size: usize) -> Self {
        Self {
            window_size,
            ..Default::default()
        }
    }

    /// Reject parameters the scanner cannot work with.
    pub fn validate(&self) -> Result<(), ScanError> {
        if self.window_size < 1 || self.window_size > MAX_WINDOW_SIZE {
            return Err(ScanError::InvalidWindowSize(self.window_size));
        }
        Ok(())
    }
}

/// Counters carried from one compared word pair to the next.
///
/// `run_length` is the number of consecutive equivalent positions seen so far
/// in the current run, capped at the window size. Once the cap is reached,
/// further matches increment `matched` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanState {
    pub run_length: usize,
    pub matched: u64,
    pub compared: i64, // Can dip below zero after per-line adjustment
}

impl Default for ScanState {
    fn default() -> Self {
        Self {
            run_length: 1,
            matched: 0,
            compared: 0,
        }
    }
}

impl ScanState {
    /// Whether the current run has reached the window and is counting matches
    pub fn is_counting(&self, window_size: usize) -> bool {
        self.run_length >= window_size
    }

    pub fn counts(&self) -> TupleCounts {
        TupleCounts {
            matched: self.matched,
            compared: self.compared,
        }
    }
}

/// Result of a scan: duplicated positions over compared tuples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TupleCounts {
    pub matched: u64,
    pub compared: i64,
}

impl TupleCounts {
    /// Plagiarism percentage, `matched / compared * 100`.
    ///
    /// A non-positive denominator means there was nothing comparable.
    pub fn percentage(&self) -> Result<f64, ScanError> {
        if self.compared <= 0 {
            return Err(ScanError::DegenerateInput {
                compared: self.compared,
            });
        }
        Ok(self.matched as f64 / self.compared as f64 * 100.0)
    }
}

/// Description of one side of a comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub path: PathBuf,
    #[serde(flatten)]
    pub stats: DocumentStats,
}

impl From<&Document> for DocumentInfo {
    fn from(doc: &Document) -> Self {
        DocumentInfo {
            path: doc.path.clone(),
            stats: doc.stats(),
        }
    }
}

/// Full comparison result
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonReport {
    pub version: String,
    pub parameters: ScanParams,
    pub document_a: DocumentInfo,
    pub document_b: DocumentInfo,
    pub synonyms: SynonymStats,
    pub counts: TupleCounts,
    pub percentage: f64,
}
