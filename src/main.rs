//! Tuple Plagiarism Detection CLI
//!
//! Compares texts line by line and word by word, treating listed synonyms as
//! equal, and reports the share of positions that belong to long enough
//! matching runs.

use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use tuple_plagiarism::compare::{compare_batch, compare_files, CompareError};
use tuple_plagiarism::models::{ComparisonReport, ScanParams, DEFAULT_WINDOW_SIZE};
use tuple_plagiarism::output::{
    print_batch_summary, print_summary, write_batch_json, write_batch_json_file,
    write_batch_summary_file, write_csv, write_csv_file, write_json, write_json_file,
    write_summary_file, OutputError,
};
use tuple_plagiarism::scan::ScanError;
use tuple_plagiarism::source::{load_document, load_synonyms, SourceError};

#[derive(Parser)]
#[command(name = "tuple-plagiarism")]
#[command(about = "Synonym-aware n-tuple plagiarism detection")]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for comparison results
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Pretty-printed JSON
    Json,
    /// CSV, one row per comparison
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two texts
    Compare {
        /// First text
        file_a: PathBuf,

        /// Second text
        file_b: PathBuf,

        /// Synonym list, one group of interchangeable words per line
        synonyms: PathBuf,

        /// Minimum run length before matches count [default: 3]
        window_size: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the output to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Log running counters for every line pair
        #[arg(long)]
        trace: bool,

        /// Print counts and parameters under the headline
        #[arg(long)]
        details: bool,

        /// Suppress progress output
        #[arg(long)]
        quiet: bool,
    },

    /// Compare one suspect text against many sources
    Batch {
        /// Synonym list
        #[arg(long)]
        synonyms: PathBuf,

        /// Text suspected of copying
        #[arg(long)]
        suspect: PathBuf,

        /// Source texts to compare against
        #[arg(required = true)]
        sources: Vec<PathBuf>,

        /// Minimum run length before matches count [default: 3]
        #[arg(long)]
        window_size: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Write the output to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Suppress the progress bar
        #[arg(long)]
        quiet: bool,
    },

    /// Inspect a synonym list
    Synonyms {
        /// Synonym list
        synonyms: PathBuf,

        /// Show the group a word is bound to (repeatable)
        #[arg(long)]
        lookup: Vec<String>,

        /// Check whether two words are interchangeable
        #[arg(long, num_args = 2, value_names = ["A", "B"])]
        equivalent: Option<Vec<String>>,
    },
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Compare(#[from] CompareError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Output(#[from] OutputError),
    #[error("None of the {0} sources could be compared")]
    BatchFailed(usize),
}

impl CliError {
    fn exit_code(&self) -> u8 {
        match self {
            CliError::Scan(ScanError::InvalidWindowSize(_))
            | CliError::Compare(CompareError::Scan(ScanError::InvalidWindowSize(_))) => 2,
            _ => 1,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // --trace output is emitted at debug level
    let trace = matches!(cli.command, Commands::Compare { trace: true, .. });
    let log_level = match cli.verbose {
        _ if trace => "debug",
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Compare {
            file_a,
            file_b,
            synonyms,
            window_size,
            format,
            output,
            trace,
            details,
            quiet,
        } => {
            let params = ScanParams {
                window_size: window_size.unwrap_or(DEFAULT_WINDOW_SIZE),
                trace,
            };

            let report = compare_files(&file_a, &file_b, &synonyms, &params, !quiet)?;

            match format {
                OutputFormat::Text => match output.as_deref() {
                    Some(path) => write_summary_file(&report, details, path)?,
                    None => print_summary(&report, details)?,
                },
                OutputFormat::Json => write_report_json(&report, output.as_deref())?,
                OutputFormat::Csv => write_reports_csv(&[&report], output.as_deref())?,
            }
        }

        Commands::Batch {
            synonyms,
            suspect,
            sources,
            window_size,
            format,
            output,
            quiet,
        } => {
            let params = ScanParams {
                window_size: window_size.unwrap_or(DEFAULT_WINDOW_SIZE),
                ..Default::default()
            };
            params.validate()?;

            let synonyms = load_synonyms(&synonyms)?;
            let suspect = load_document(&suspect)?;

            let entries = compare_batch(&suspect, &sources, &synonyms, &params, !quiet);

            match format {
                OutputFormat::Text => match output.as_deref() {
                    Some(path) => write_batch_summary_file(&entries, path)?,
                    None => print_batch_summary(&entries)?,
                },
                OutputFormat::Json => match output.as_deref() {
                    Some(path) => write_batch_json_file(&entries, path)?,
                    None => {
                        write_batch_json(&entries, &mut io::stdout().lock())?;
                        println!();
                    }
                },
                OutputFormat::Csv => {
                    let reports: Vec<&ComparisonReport> = entries
                        .iter()
                        .filter_map(|e| e.outcome.as_ref().ok())
                        .collect();
                    write_reports_csv(&reports, output.as_deref())?;
                }
            }

            if entries.iter().all(|e| e.outcome.is_err()) {
                return Err(CliError::BatchFailed(entries.len()));
            }
        }

        Commands::Synonyms {
            synonyms,
            lookup,
            equivalent,
        } => {
            let index = load_synonyms(&synonyms)?;
            let stats = index.stats();

            println!("=== Synonym Index ===");
            println!("Groups: {}", stats.groups);
            println!("Words: {}", stats.words);

            for word in &lookup {
                match index.group(word) {
                    Some(group) => println!("{}: {}", word, group.join(" ")),
                    None => println!("{}: (no synonyms)", word),
                }
            }

            if let Some(pair) = equivalent {
                if let [a, b] = pair.as_slice() {
                    println!("{} ~ {}: {}", a, b, index.are_equivalent(a, b));
                }
            }
        }
    }

    Ok(())
}

fn write_report_json(report: &ComparisonReport, output: Option<&Path>) -> Result<(), OutputError> {
    match output {
        Some(path) => write_json_file(report, path),
        None => {
            write_json(report, &mut io::stdout().lock())?;
            println!();
            Ok(())
        }
    }
}

fn write_reports_csv(reports: &[&ComparisonReport], output: Option<&Path>) -> Result<(), OutputError> {
    let reports = reports.iter().copied();
    match output {
        Some(path) => write_csv_file(reports, path),
        None => write_csv(reports, &mut io::stdout().lock()),
    }
}
