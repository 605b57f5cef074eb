//! Output formatting for CLI commands.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::args::{KategoriaArgs, OutputFormat};
use crate::dataset::DataLabel;
use crate::error::Result;

/// Per-class metrics in an evaluation report. `None` marks a metric that
/// is undefined for this prediction set (e.g. a class never predicted).
#[derive(Debug, Serialize, Deserialize)]
pub struct ClassReport {
    pub label: DataLabel,
    pub precision: Option<f64>,
    pub recall: Option<f64>,
    pub f1: Option<f64>,
}

/// Result structure for the evaluate command.
#[derive(Debug, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub corpus: String,
    pub tokenizer: String,
    pub smoothing_factor: u64,
    pub train_size: usize,
    pub test_size: usize,
    pub vocabulary_size: usize,
    pub accuracy: f64,
    pub classes: Vec<ClassReport>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Result structure for the compare command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub corpus: String,
    pub tokenizer: String,
    pub metric: String,
    pub class: Option<DataLabel>,
    pub smoothing_a: u64,
    pub smoothing_b: u64,
    pub metric_a: f64,
    pub metric_b: f64,
    pub delta: f64,
    pub p_value: f64,
    pub iterations: usize,
    pub seed: Option<u64>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

/// Per-split statistics for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct SplitStats {
    pub name: String,
    pub size: usize,
    /// (label, count) pairs in ascending label order.
    pub label_counts: Vec<(DataLabel, usize)>,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorpusStats {
    pub corpus: String,
    pub splits: Vec<SplitStats>,
    pub timestamp: DateTime<Utc>,
}

/// Print an evaluation report in the configured format.
pub fn output_evaluation(report: &EvaluationReport, args: &KategoriaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print_evaluation_human(report, args),
        OutputFormat::Json => output_json(report, args),
    }
}

/// Print a comparison report in the configured format.
pub fn output_comparison(report: &ComparisonReport, args: &KategoriaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print_comparison_human(report, args),
        OutputFormat::Json => output_json(report, args),
    }
}

/// Print corpus statistics in the configured format.
pub fn output_stats(stats: &CorpusStats, args: &KategoriaArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => print_stats_human(stats, args),
        OutputFormat::Json => output_json(stats, args),
    }
}

fn print_evaluation_human(report: &EvaluationReport, args: &KategoriaArgs) -> Result<()> {
    println!("Testing Results:");
    println!("═══════════════");
    println!();
    println!("Accuracy: {:.4}", report.accuracy);
    println!();
    println!("Precision:");
    for class in &report.classes {
        let value = format_optional_metric(class.precision);
        println!("  {}: {value}", class.label);
    }
    println!();
    println!("Recall:");
    for class in &report.classes {
        let value = format_optional_metric(class.recall);
        println!("  {}: {value}", class.label);
    }
    println!();
    println!("F1 (F-measure with beta=1):");
    for class in &report.classes {
        let value = format_optional_metric(class.f1);
        println!("  {}: {value}", class.label);
    }

    if args.verbosity() > 1 {
        println!();
        println!("Trained on {} documents", report.train_size);
        println!("Tested on {} documents", report.test_size);
        println!("Vocabulary size: {}", report.vocabulary_size);
        println!("Smoothing factor: {}", report.smoothing_factor);
        println!("Tokenizer: {}", report.tokenizer);
        println!("Total time: {}ms", report.duration_ms);
    }

    Ok(())
}

fn print_comparison_human(report: &ComparisonReport, args: &KategoriaArgs) -> Result<()> {
    let metric_name = match report.class {
        Some(class) => format!("{} (class {class})", report.metric),
        None => report.metric.clone(),
    };

    println!("Paired Bootstrap Test:");
    println!("═════════════════════");
    println!();
    println!("Metric: {metric_name}");
    println!(
        "Model A (smoothing {}): {:.4}",
        report.smoothing_a, report.metric_a
    );
    println!(
        "Model B (smoothing {}): {:.4}",
        report.smoothing_b, report.metric_b
    );
    println!("Observed delta: {:+.4}", report.delta);
    println!();
    println!("p-value: {:.4} ({} trials)", report.p_value, report.iterations);

    if args.verbosity() > 1 {
        println!();
        if let Some(seed) = report.seed {
            println!("Seed: {seed}");
        }
        println!("Total time: {}ms", report.duration_ms);
    }

    Ok(())
}

fn print_stats_human(stats: &CorpusStats, _args: &KategoriaArgs) -> Result<()> {
    println!("Corpus Statistics:");
    println!("═════════════════");
    println!();
    println!("Corpus: {}", stats.corpus);

    for split in &stats.splits {
        println!();
        println!("{} ({} documents)", split.name, split.size);
        for (label, count) in &split.label_counts {
            println!("  class {label}: {count}");
        }
    }

    Ok(())
}

/// Output any serializable report as JSON.
pub fn output_json<T: Serialize>(result: &T, args: &KategoriaArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

fn format_optional_metric(value: Option<f64>) -> String {
    match value {
        Some(value) => format!("{value:.4}"),
        None => "undefined".to_string(),
    }
}
