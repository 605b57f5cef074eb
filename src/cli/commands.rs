//! Command implementations for the Kategoria CLI.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;
use chrono::Utc;

use crate::analysis::{SimpleTokenizer, Tokenizer, UnicodeWordTokenizer, WhitespaceTokenizer};
use crate::classifier::{Classifier, NaiveBayesClassifier};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::corpus::CorpusLoader;
use crate::dataset::{DataLabel, Dataset, TokenSequence};
use crate::error::{KategoriaError, Result};
use crate::evaluation::{BootstrapConfig, paired_bootstrap_test};
use crate::evaluation::{accuracy, f1, precision, recall};
use crate::progress::{LogProgress, NoProgress, ProgressReporter};

/// Execute a CLI command.
pub fn execute_command(args: KategoriaArgs) -> Result<()> {
    match &args.command {
        Command::Evaluate(eval_args) => evaluate(eval_args.clone(), &args),
        Command::Compare(compare_args) => compare(compare_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Train a model on the train split and report test-set metrics.
fn evaluate(args: EvaluateArgs, cli_args: &KategoriaArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Evaluating corpus at: {}", args.corpus_dir.display());
        println!();
    }

    let start_time = Instant::now();
    let tokenizer = build_tokenizer(&args.tokenizer);
    let dataset = load_corpus(&args.corpus_dir, args.limit, &tokenizer, args.progress)?;

    let model = train_model(
        &dataset,
        args.smoothing,
        !args.no_invariant_checks,
        args.progress,
    )?;

    let (predictions, solutions) = predict_test_split(&model, &dataset)?;
    let accuracy_value = accuracy(&predictions, &solutions)?;

    // Per-class metrics can be undefined for a given prediction set (e.g.
    // a class never predicted); report those as missing instead of
    // failing the whole run.
    let classes = model
        .classes()
        .iter()
        .map(|&label| ClassReport {
            label,
            precision: precision(&predictions, &solutions, label).ok(),
            recall: recall(&predictions, &solutions, label).ok(),
            f1: f1(&predictions, &solutions, label).ok(),
        })
        .collect();

    let report = EvaluationReport {
        corpus: args.corpus_dir.to_string_lossy().to_string(),
        tokenizer: tokenizer.name().to_string(),
        smoothing_factor: model.smoothing_factor(),
        train_size: dataset.train_size(),
        test_size: dataset.test_size(),
        vocabulary_size: model.vocabulary_size(),
        accuracy: accuracy_value,
        classes,
        duration_ms: start_time.elapsed().as_millis() as u64,
        timestamp: Utc::now(),
    };

    output_evaluation(&report, cli_args)
}

/// Train two models differing in smoothing factor and compare them with
/// the paired bootstrap test.
fn compare(args: CompareArgs, cli_args: &KategoriaArgs) -> Result<()> {
    if cli_args.verbosity() > 0 {
        println!("Comparing models on corpus at: {}", args.corpus_dir.display());
        println!();
    }

    let start_time = Instant::now();
    let tokenizer = build_tokenizer(&args.tokenizer);
    let dataset = load_corpus(&args.corpus_dir, args.limit, &tokenizer, args.progress)?;

    let model_a = train_model(&dataset, args.smoothing_a, true, args.progress)?;
    let model_b = train_model(&dataset, args.smoothing_b, true, args.progress)?;

    let (preds_a, solutions) = predict_test_split(&model_a, &dataset)?;
    let (preds_b, _) = predict_test_split(&model_b, &dataset)?;

    let metric = build_metric(&args.metric, args.class)?;
    let metric_a = metric(&preds_a, &solutions)?;
    let metric_b = metric(&preds_b, &solutions)?;

    let config = BootstrapConfig {
        iterations: args.iterations,
        seed: args.seed,
        threads: args.threads,
    };
    let p_value = paired_bootstrap_test(&preds_a, &preds_b, &solutions, &metric, &config)?;

    let report = ComparisonReport {
        corpus: args.corpus_dir.to_string_lossy().to_string(),
        tokenizer: tokenizer.name().to_string(),
        metric: metric_name(&args.metric).to_string(),
        class: args.class,
        smoothing_a: args.smoothing_a,
        smoothing_b: args.smoothing_b,
        metric_a,
        metric_b,
        delta: metric_a - metric_b,
        p_value,
        iterations: args.iterations,
        seed: args.seed,
        duration_ms: start_time.elapsed().as_millis() as u64,
        timestamp: Utc::now(),
    };

    output_comparison(&report, cli_args)
}

/// Show split sizes and label histograms for a corpus.
fn show_stats(args: StatsArgs, cli_args: &KategoriaArgs) -> Result<()> {
    let tokenizer = build_tokenizer(&args.tokenizer);
    let dataset = load_corpus(&args.corpus_dir, args.limit, &tokenizer, false)?;

    let splits = [
        ("train", dataset.train()),
        ("dev", dataset.dev()),
        ("test", dataset.test()),
    ]
    .into_iter()
    .map(|(name, samples)| {
        let mut counts: AHashMap<DataLabel, usize> = AHashMap::new();
        for sample in samples {
            *counts.entry(sample.label).or_insert(0) += 1;
        }
        let mut label_counts: Vec<(DataLabel, usize)> = counts.into_iter().collect();
        label_counts.sort_unstable();

        SplitStats {
            name: name.to_string(),
            size: samples.len(),
            label_counts,
        }
    })
    .collect();

    let stats = CorpusStats {
        corpus: args.corpus_dir.to_string_lossy().to_string(),
        splits,
        timestamp: Utc::now(),
    };

    output_stats(&stats, cli_args)
}

/// Build the tokenizer selected on the command line.
fn build_tokenizer(kind: &TokenizerKind) -> Arc<dyn Tokenizer> {
    match kind {
        TokenizerKind::Whitespace => Arc::new(WhitespaceTokenizer::new()),
        TokenizerKind::Simple => Arc::new(SimpleTokenizer::new()),
        TokenizerKind::UnicodeWord => Arc::new(UnicodeWordTokenizer::new()),
    }
}

/// Load a corpus with the configured tokenizer, limit, and progress.
fn load_corpus(
    corpus_dir: &Path,
    limit: Option<usize>,
    tokenizer: &Arc<dyn Tokenizer>,
    show_progress: bool,
) -> Result<Dataset> {
    let mut loader = CorpusLoader::new(corpus_dir).with_tokenizer(tokenizer.clone());
    if let Some(limit) = limit {
        loader = loader.with_limit(limit);
    }

    let progress: Box<dyn ProgressReporter> = if show_progress {
        Box::new(LogProgress::new("loading corpus", 1000))
    } else {
        Box::new(NoProgress)
    };

    loader.load_with_progress(progress.as_ref())
}

/// Train a Naive Bayes model on the train split, declaring the classes
/// observed there.
fn train_model(
    dataset: &Dataset,
    smoothing: u64,
    check_invariants: bool,
    show_progress: bool,
) -> Result<NaiveBayesClassifier> {
    if dataset.train_size() == 0 {
        return Err(KategoriaError::corpus("corpus has no train documents"));
    }

    let classes: Vec<DataLabel> = dataset.train_labels();
    let mut model = NaiveBayesClassifier::new(classes)?
        .with_smoothing_factor(smoothing)
        .with_invariant_checks(check_invariants);

    let progress: Box<dyn ProgressReporter> = if show_progress {
        Box::new(LogProgress::new("training model", 1000))
    } else {
        Box::new(NoProgress)
    };

    model.train_with_progress(dataset.train(), progress.as_ref())?;
    Ok(model)
}

/// Run a trained model over the test split.
fn predict_test_split(
    model: &NaiveBayesClassifier,
    dataset: &Dataset,
) -> Result<(Vec<DataLabel>, Vec<DataLabel>)> {
    if dataset.test_size() == 0 {
        return Err(KategoriaError::corpus("corpus has no test documents"));
    }

    let inputs: Vec<TokenSequence> = dataset.test().iter().map(|s| s.tokens.clone()).collect();
    let predictions = model.multi_run(&inputs)?;
    Ok((predictions, dataset.test_labels()))
}

/// Resolve the metric flag into a metric function for the bootstrap test.
fn build_metric(
    kind: &MetricKind,
    class: Option<DataLabel>,
) -> Result<Box<dyn Fn(&[DataLabel], &[DataLabel]) -> Result<f64> + Sync>> {
    match kind {
        MetricKind::Accuracy => Ok(Box::new(accuracy)),
        MetricKind::Precision => {
            let class = require_class(class, "precision")?;
            Ok(Box::new(move |p: &[DataLabel], s: &[DataLabel]| {
                precision(p, s, class)
            }))
        }
        MetricKind::Recall => {
            let class = require_class(class, "recall")?;
            Ok(Box::new(move |p: &[DataLabel], s: &[DataLabel]| {
                recall(p, s, class)
            }))
        }
        MetricKind::F1 => {
            let class = require_class(class, "f1")?;
            Ok(Box::new(move |p: &[DataLabel], s: &[DataLabel]| {
                f1(p, s, class)
            }))
        }
    }
}

fn require_class(class: Option<DataLabel>, metric: &str) -> Result<DataLabel> {
    class.ok_or_else(|| {
        KategoriaError::other(format!("--class is required for the {metric} metric"))
    })
}

fn metric_name(kind: &MetricKind) -> &'static str {
    match kind {
        MetricKind::Accuracy => "accuracy",
        MetricKind::Precision => "precision",
        MetricKind::Recall => "recall",
        MetricKind::F1 => "f1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use clap::Parser;
    use tempfile::TempDir;

    fn write_doc(root: &Path, split: &str, label: &str, name: &str, text: &str) {
        let dir = root.join(split).join(label);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(name), text).unwrap();
    }

    fn sample_corpus() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        write_doc(root, "train", "pos", "0.txt", "a good movie");
        write_doc(root, "train", "pos", "1.txt", "great fun film");
        write_doc(root, "train", "neg", "0.txt", "a bad movie");
        write_doc(root, "train", "neg", "1.txt", "awful boring film");
        write_doc(root, "test", "pos", "0.txt", "good fun film");
        write_doc(root, "test", "neg", "0.txt", "bad boring movie");
        tmp
    }

    #[test]
    fn test_build_tokenizer_names() {
        assert_eq!(build_tokenizer(&TokenizerKind::Whitespace).name(), "whitespace");
        assert_eq!(build_tokenizer(&TokenizerKind::Simple).name(), "simple");
        assert_eq!(
            build_tokenizer(&TokenizerKind::UnicodeWord).name(),
            "unicode_word"
        );
    }

    #[test]
    fn test_metric_requires_class() {
        assert!(build_metric(&MetricKind::Accuracy, None).is_ok());
        assert!(build_metric(&MetricKind::Precision, None).is_err());
        assert!(build_metric(&MetricKind::F1, Some(1)).is_ok());
    }

    #[test]
    fn test_evaluate_command_on_sample_corpus() {
        let tmp = sample_corpus();
        let args = KategoriaArgs::try_parse_from([
            "kategoria",
            "--quiet",
            "evaluate",
            tmp.path().to_str().unwrap(),
        ])
        .unwrap();

        execute_command(args).unwrap();
    }

    #[test]
    fn test_compare_command_on_sample_corpus() {
        let tmp = sample_corpus();
        let args = KategoriaArgs::try_parse_from([
            "kategoria",
            "--quiet",
            "compare",
            tmp.path().to_str().unwrap(),
            "--iterations",
            "50",
            "--seed",
            "7",
        ])
        .unwrap();

        execute_command(args).unwrap();
    }

    #[test]
    fn test_stats_command_on_sample_corpus() {
        let tmp = sample_corpus();
        let args = KategoriaArgs::try_parse_from([
            "kategoria",
            "--quiet",
            "stats",
            tmp.path().to_str().unwrap(),
        ])
        .unwrap();

        execute_command(args).unwrap();
    }

    #[test]
    fn test_evaluate_fails_without_test_split() {
        let tmp = TempDir::new().unwrap();
        write_doc(tmp.path(), "train", "pos", "0.txt", "good");
        write_doc(tmp.path(), "train", "neg", "0.txt", "bad");

        let args = KategoriaArgs::try_parse_from([
            "kategoria",
            "--quiet",
            "evaluate",
            tmp.path().to_str().unwrap(),
        ])
        .unwrap();

        assert!(execute_command(args).is_err());
    }
}
