//! Output formatting for comparison results (text, JSON, CSV).

use serde::Serialize;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::compare::BatchEntry;
use crate::models::ComparisonReport;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Format a percentage with at most two decimals and no trailing zeros.
pub fn format_percentage(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}

/// Headline sentence for a comparison.
pub fn format_headline(report: &ComparisonReport) -> String {
    format!(
        "The plagiarism percentage between the two texts was: {}%",
        format_percentage(report.percentage)
    )
}

/// Write the text summary of a comparison.
pub fn write_summary<W: Write>(
    report: &ComparisonReport,
    verbose: bool,
    writer: &mut W,
) -> Result<(), OutputError> {
    writeln!(writer, "{}", format_headline(report))?;

    if verbose {
        writeln!(writer)?;
        for (label, doc) in [("A", &report.document_a), ("B", &report.document_b)] {
            writeln!(writer, "Document {}: {}", label, doc.path.display())?;
            writeln!(
                writer,
                "  Lines: {} ({} blank), words: {}",
                doc.stats.line_count, doc.stats.blank_lines, doc.stats.word_count
            )?;
        }
        writeln!(
            writer,
            "Synonyms: {} groups, {} words",
            report.synonyms.groups, report.synonyms.words
        )?;
        writeln!(writer, "Window size: {}", report.parameters.window_size)?;
        writeln!(writer, "Matched tuples: {}", report.counts.matched)?;
        writeln!(writer, "Compared tuples: {}", report.counts.compared)?;
    }

    Ok(())
}

/// Write the text summary of a comparison to a file.
pub fn write_summary_file(
    report: &ComparisonReport,
    verbose: bool,
    path: &Path,
) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_summary(report, verbose, &mut file)
}

/// Print a comparison to stdout.
pub fn print_summary(report: &ComparisonReport, verbose: bool) -> Result<(), OutputError> {
    write_summary(report, verbose, &mut io::stdout().lock())
}

/// Write one line per batch entry, highest percentage first.
///
/// Failed entries sort last and carry their error message.
pub fn write_batch_summary<W: Write>(
    entries: &[BatchEntry],
    writer: &mut W,
) -> Result<(), OutputError> {
    let mut ranked: Vec<&BatchEntry> = entries.iter().collect();
    ranked.sort_by(|a, b| {
        let pa = a.outcome.as_ref().map(|r| r.percentage).unwrap_or(f64::NEG_INFINITY);
        let pb = b.outcome.as_ref().map(|r| r.percentage).unwrap_or(f64::NEG_INFINITY);
        pb.total_cmp(&pa)
    });

    writeln!(writer, "=== Batch Summary ===")?;
    for entry in ranked {
        match &entry.outcome {
            Ok(report) => writeln!(
                writer,
                "{:>8}%  {}",
                format_percentage(report.percentage),
                entry.source.display()
            )?,
            Err(e) => writeln!(writer, "{:>9}  {} ({})", "error", entry.source.display(), e)?,
        }
    }

    Ok(())
}

/// Write the batch summary to a file.
pub fn write_batch_summary_file(entries: &[BatchEntry], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_batch_summary(entries, &mut file)
}

/// Print the batch summary to stdout.
pub fn print_batch_summary(entries: &[BatchEntry]) -> Result<(), OutputError> {
    write_batch_summary(entries, &mut io::stdout().lock())
}

/// Write a comparison report as JSON.
pub fn write_json<W: Write>(report: &ComparisonReport, writer: &mut W) -> Result<(), OutputError> {
    let json = serde_json::to_string_pretty(report)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write a comparison report as JSON to a file.
pub fn write_json_file(report: &ComparisonReport, path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_json(report, &mut file)
}

#[derive(Serialize)]
struct BatchRecord<'a> {
    source: &'a PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a ComparisonReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> From<&'a BatchEntry> for BatchRecord<'a> {
    fn from(entry: &'a BatchEntry) -> Self {
        match &entry.outcome {
            Ok(report) => BatchRecord {
                source: &entry.source,
                report: Some(report),
                error: None,
            },
            Err(e) => BatchRecord {
                source: &entry.source,
                report: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Write batch results as a JSON array.
pub fn write_batch_json<W: Write>(entries: &[BatchEntry], writer: &mut W) -> Result<(), OutputError> {
    let records: Vec<BatchRecord<'_>> = entries.iter().map(BatchRecord::from).collect();
    let json = serde_json::to_string_pretty(&records)?;
    writer.write_all(json.as_bytes())?;
    Ok(())
}

/// Write batch results as JSON to a file.
pub fn write_batch_json_file(entries: &[BatchEntry], path: &Path) -> Result<(), OutputError> {
    let mut file = std::fs::File::create(path)?;
    write_batch_json(entries, &mut file)
}

/// Write reports as CSV, one row each.
pub fn write_csv<'a, W, I>(reports: I, writer: &mut W) -> Result<(), OutputError>
where
    W: Write,
    I: IntoIterator<Item = &'a ComparisonReport>,
{
    writeln!(
        writer,
        "document_a,document_b,window_size,matched,compared,percentage,\
         a_lines,a_blank_lines,a_words,b_lines,b_blank_lines,b_words"
    )?;

    for report in reports {
        writeln!(
            writer,
            "{:?},{:?},{},{},{},{},{},{},{},{},{},{}",
            report.document_a.path.display().to_string(),
            report.document_b.path.display().to_string(),
            report.parameters.window_size,
            report.counts.matched,
            report.counts.compared,
            format_percentage(report.percentage),
            report.document_a.stats.line_count,
            report.document_a.stats.blank_lines,
            report.document_a.stats.word_count,
            report.document_b.stats.line_count,
            report.document_b.stats.blank_lines,
            report.document_b.stats.word_count
        )?;
    }

    Ok(())
}

/// Write reports as CSV to a file.
pub fn write_csv_file<'a, I>(reports: I, path: &Path) -> Result<(), OutputError>
where
    I: IntoIterator<Item = &'a ComparisonReport>,
{
    let mut file = std::fs::File::create(path)?;
    write_csv(reports, &mut file)
}
