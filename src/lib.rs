//! Tuple Plagiarism Detection Library
//!
//! Estimates how much of one text was copied from another by comparing them
//! position by position. Words are matched exactly or through a synonym list,
//! and a run of matches only counts as plagiarized once it reaches the
//! configured window size.
//!
//! # Example
//!
//! ```
//! use tuple_plagiarism::prelude::*;
//!
//! let synonyms = SynonymIndex::build(["fast quick rapid"]);
//! let doc_a = Document::from_text("a.txt", "a quick brown fox");
//! let doc_b = Document::from_text("b.txt", "a fast brown dog");
//!
//! let report = compare_documents(&doc_a, &doc_b, &synonyms, &ScanParams::default()).unwrap();
//! println!("{}", format_headline(&report));
//! ```
//!
//! # Scanning Tokenized Lines
//!
//! ```
//! use tuple_plagiarism::prelude::*;
//!
//! let a = vec![TokenLine::from_line("a b c d e")];
//! let b = vec![TokenLine::from_line("a b c d e")];
//!
//! let counts = scan(&a, &b, &SynonymIndex::default(), &ScanParams::with_window_size(1)).unwrap();
//! assert_eq!(counts.matched, 5);
//! assert_eq!(counts.compared, 5);
//! ```

pub mod compare;
pub mod models;
pub mod output;
pub mod scan;
pub mod source;
pub mod synonyms;
pub mod tokenize;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::compare::{
        compare_batch, compare_documents, compare_files, BatchEntry, CompareError,
    };
    pub use crate::models::{
        ComparisonReport, Document, DocumentInfo, DocumentStats, ScanParams, ScanState,
        TupleCounts, DEFAULT_WINDOW_SIZE, MAX_WINDOW_SIZE,
    };
    pub use crate::output::{
        format_headline, format_percentage, print_batch_summary, print_summary, write_batch_json,
        write_batch_json_file, write_batch_summary, write_batch_summary_file, write_csv,
        write_csv_file, write_json, write_json_file, write_summary, write_summary_file,
        OutputError,
    };
    pub use crate::scan::{scan, scan_line_pair, ScanError};
    pub use crate::source::{load_document, load_synonyms, read_lines, SourceError};
    pub use crate::synonyms::{SynonymIndex, SynonymStats};
    pub use crate::tokenize::{split_words, tokenize_lines, TokenLine};
}

// Re-export commonly used types at the crate root
pub use models::{ComparisonReport, ScanParams, TupleCounts};
pub use synonyms::SynonymIndex;
