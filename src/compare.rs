//! Document comparison orchestration.
//!
//! Ties together loading, tokenization, scanning and the final percentage.
//! Batch comparison fans one suspect document out against many sources in
//! parallel, sharing a single read-only synonym index.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::models::{ComparisonReport, Document, DocumentInfo, ScanParams};
use crate::scan::{scan, ScanError};
use crate::source::{load_document, load_synonyms, SourceError};
use crate::synonyms::SynonymIndex;

#[derive(Error, Debug)]
pub enum CompareError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Outcome of comparing the suspect against one source in a batch
#[derive(Debug)]
pub struct BatchEntry {
    pub source: PathBuf,
    pub outcome: Result<ComparisonReport, CompareError>,
}

/// Compare two loaded documents.
pub fn compare_documents(
    doc_a: &Document,
    doc_b: &Document,
    synonyms: &SynonymIndex,
    params: &ScanParams,
) -> Result<ComparisonReport, ScanError> {
    let lines_a = doc_a.token_lines();
    let lines_b = doc_b.token_lines();

    let counts = scan(&lines_a, &lines_b, synonyms, params)?;
    let percentage = counts.percentage()?;

    Ok(ComparisonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        parameters: params.clone(),
        document_a: DocumentInfo::from(doc_a),
        document_b: DocumentInfo::from(doc_b),
        synonyms: synonyms.stats(),
        counts,
        percentage,
    })
}

/// Load two documents and a synonym list from disk and compare them.
pub fn compare_files(
    path_a: &Path,
    path_b: &Path,
    synonyms_path: &Path,
    params: &ScanParams,
    show_progress: bool,
) -> Result<ComparisonReport, CompareError> {
    // Reject bad parameters before touching the filesystem
    params.validate()?;

    if show_progress {
        info!("Loading synonyms from {}", synonyms_path.display());
    }
    let synonyms = load_synonyms(synonyms_path)?;

    if show_progress {
        info!("Loading {} and {}", path_a.display(), path_b.display());
    }
    let doc_a = load_document(path_a)?;
    let doc_b = load_document(path_b)?;

    let report = compare_documents(&doc_a, &doc_b, &synonyms, params)?;

    if show_progress {
        info!(
            matched = report.counts.matched,
            compared = report.counts.compared,
            "Comparison finished"
        );
    }
    Ok(report)
}

/// Compare one suspect document against each of `sources`.
///
/// Sources are loaded and scanned in parallel. Failures are reported per
/// entry; the result keeps the order of `sources`.
pub fn compare_batch(
    suspect: &Document,
    sources: &[PathBuf],
    synonyms: &SynonymIndex,
    params: &ScanParams,
    show_progress: bool,
) -> Vec<BatchEntry> {
    let progress = if show_progress {
        let pb = ProgressBar::new(sources.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        Some(pb)
    } else {
        None
    };

    let entries: Vec<BatchEntry> = sources
        .par_iter()
        .map(|source| {
            let outcome = load_document(source)
                .map_err(CompareError::from)
                .and_then(|doc| {
                    compare_documents(suspect, &doc, synonyms, params).map_err(CompareError::from)
                });

            if let Err(ref e) = outcome {
                warn!(source = %source.display(), "comparison failed: {}", e);
            }
            if let Some(ref pb) = progress {
                pb.inc(1);
            }

            BatchEntry {
                source: source.clone(),
                outcome,
            }
        })
        .collect();

    if let Some(pb) = progress {
        pb.finish_with_message("Done");
    }

    entries
}
