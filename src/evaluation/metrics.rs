//! Classification metrics over parallel prediction/solution sequences.
//!
//! All metrics are pure functions of two equal-length ordered sequences of
//! labels. Undefined cases (empty input, no predictions or instances of
//! the requested class, zero F-measure denominator) fail with explicit
//! errors instead of dividing by zero.

use crate::dataset::DataLabel;
use crate::error::{KategoriaError, Result};

fn check_lengths(predictions: &[DataLabel], solutions: &[DataLabel]) -> Result<()> {
    if predictions.len() != solutions.len() {
        return Err(KategoriaError::LengthMismatch {
            expected: solutions.len(),
            actual: predictions.len(),
        });
    }
    Ok(())
}

/// Fraction of positions where the prediction equals the solution.
pub fn accuracy(predictions: &[DataLabel], solutions: &[DataLabel]) -> Result<f64> {
    check_lengths(predictions, solutions)?;
    if predictions.is_empty() {
        return Err(KategoriaError::EmptyInput);
    }

    let correct = predictions
        .iter()
        .zip(solutions)
        .filter(|(pred, sol)| pred == sol)
        .count();

    Ok(correct as f64 / predictions.len() as f64)
}

/// Of the positions predicted as `class`, the fraction also labeled
/// `class`.
pub fn precision(
    predictions: &[DataLabel],
    solutions: &[DataLabel],
    class: DataLabel,
) -> Result<f64> {
    check_lengths(predictions, solutions)?;

    let mut predicted_count = 0usize;
    let mut correct_count = 0usize;

    for (pred, sol) in predictions.iter().zip(solutions) {
        if *pred == class {
            predicted_count += 1;
            if pred == sol {
                correct_count += 1;
            }
        }
    }

    if predicted_count == 0 {
        return Err(KategoriaError::NoPredictionsOfClass(class));
    }

    Ok(correct_count as f64 / predicted_count as f64)
}

/// Of the positions actually labeled `class`, the fraction predicted
/// correctly.
pub fn recall(predictions: &[DataLabel], solutions: &[DataLabel], class: DataLabel) -> Result<f64> {
    check_lengths(predictions, solutions)?;

    let mut instance_count = 0usize;
    let mut correct_count = 0usize;

    for (pred, sol) in predictions.iter().zip(solutions) {
        if *sol == class {
            instance_count += 1;
            if pred == sol {
                correct_count += 1;
            }
        }
    }

    if instance_count == 0 {
        return Err(KategoriaError::NoInstancesOfClass(class));
    }

    Ok(correct_count as f64 / instance_count as f64)
}

/// Weighted harmonic combination of precision and recall:
/// `((beta^2 + 1) * P * R) / (beta^2 * P + R)`.
///
/// Propagates precision/recall failures; fails with
/// [`KategoriaError::UndefinedFMeasure`] when the denominator is zero.
pub fn f_measure(
    predictions: &[DataLabel],
    solutions: &[DataLabel],
    class: DataLabel,
    beta: f64,
) -> Result<f64> {
    let beta_sqr = beta * beta;

    let prec = precision(predictions, solutions, class)?;
    let rec = recall(predictions, solutions, class)?;

    let denominator = beta_sqr * prec + rec;
    if denominator == 0.0 {
        return Err(KategoriaError::UndefinedFMeasure(class));
    }

    Ok(((beta_sqr + 1.0) * prec * rec) / denominator)
}

/// F-measure with beta = 1: the harmonic mean of precision and recall.
pub fn f1(predictions: &[DataLabel], solutions: &[DataLabel], class: DataLabel) -> Result<f64> {
    f_measure(predictions, solutions, class, 1.0)
}
