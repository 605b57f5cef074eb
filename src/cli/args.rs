//! Command line argument parsing for the Kategoria CLI using clap.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::dataset::DataLabel;

/// Kategoria - Naive Bayes text classification and evaluation
#[derive(Parser, Debug, Clone)]
#[command(name = "kategoria")]
#[command(about = "Train and evaluate a Naive Bayes text classifier")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct KategoriaArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl KategoriaArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Train on a corpus and report test-set metrics
    Evaluate(EvaluateArgs),

    /// Compare two models with a paired bootstrap significance test
    Compare(CompareArgs),

    /// Show corpus statistics
    Stats(StatsArgs),
}

/// Arguments for evaluating a classifier
#[derive(Parser, Debug, Clone)]
pub struct EvaluateArgs {
    /// Path to the corpus directory
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Maximum number of documents to load per split
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Add-alpha smoothing factor
    #[arg(short, long, default_value = "1")]
    pub smoothing: u64,

    /// Tokenizer to apply to raw documents
    #[arg(short, long, default_value = "simple")]
    pub tokenizer: TokenizerKind,

    /// Log progress during loading and training
    #[arg(long)]
    pub progress: bool,

    /// Skip post-training consistency checks
    #[arg(long)]
    pub no_invariant_checks: bool,
}

/// Arguments for comparing two models
#[derive(Parser, Debug, Clone)]
pub struct CompareArgs {
    /// Path to the corpus directory
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Maximum number of documents to load per split
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Tokenizer to apply to raw documents
    #[arg(short, long, default_value = "simple")]
    pub tokenizer: TokenizerKind,

    /// Smoothing factor for model A
    #[arg(long, default_value = "1")]
    pub smoothing_a: u64,

    /// Smoothing factor for model B
    #[arg(long, default_value = "2")]
    pub smoothing_b: u64,

    /// Metric to compare the models with
    #[arg(short, long, default_value = "accuracy")]
    pub metric: MetricKind,

    /// Class for class-conditioned metrics (precision, recall, f1)
    #[arg(short, long)]
    pub class: Option<DataLabel>,

    /// Number of bootstrap trials
    #[arg(short, long, default_value = "10000")]
    pub iterations: usize,

    /// RNG seed for reproducible runs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Thread pool size for the bootstrap trials
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log progress during loading and training
    #[arg(long)]
    pub progress: bool,
}

/// Arguments for corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Path to the corpus directory
    #[arg(value_name = "CORPUS_DIR")]
    pub corpus_dir: PathBuf,

    /// Maximum number of documents to load per split
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Tokenizer to apply to raw documents
    #[arg(short, long, default_value = "simple")]
    pub tokenizer: TokenizerKind,
}

/// Tokenizers available in the CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenizerKind {
    /// Split on whitespace, keeping tokens verbatim
    Whitespace,
    /// Lowercase and extract word runs
    Simple,
    /// Unicode word boundaries (UAX #29), lowercased
    UnicodeWord,
}

/// Metrics available for model comparison
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetricKind {
    /// Fraction of correct predictions
    Accuracy,
    /// Precision for a given class
    Precision,
    /// Recall for a given class
    Recall,
    /// F-measure with beta=1 for a given class
    F1,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
