//! Trainable text classification models.

use crate::dataset::{DataLabel, Sample, Token, TokenSequence};
use crate::error::Result;
use crate::progress::{NoProgress, ProgressReporter};

pub mod naive_bayes;

pub use naive_bayes::NaiveBayesClassifier;

/// Trait for classifiers that learn from labeled token sequences and
/// predict a class label for new ones.
pub trait Classifier {
    /// Whether the model has completed a successful training run.
    fn is_trained(&self) -> bool;

    /// Train the model, fully replacing any previously learned state.
    fn train(&mut self, data: &[Sample]) -> Result<()> {
        self.train_with_progress(data, &NoProgress)
    }

    /// Train the model, reporting one step per processed sample.
    fn train_with_progress(
        &mut self,
        data: &[Sample],
        progress: &dyn ProgressReporter,
    ) -> Result<()>;

    /// Predict the most probable class for a token sequence.
    fn run(&self, tokens: &[Token]) -> Result<DataLabel>;

    /// Predict a class for each input independently, preserving order.
    fn multi_run(&self, inputs: &[TokenSequence]) -> Result<Vec<DataLabel>> {
        inputs.iter().map(|tokens| self.run(tokens)).collect()
    }

    /// Get the name of this classifier (for debugging and configuration).
    fn name(&self) -> &'static str;
}
