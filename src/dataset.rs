//! Core data types for labeled text classification data.
//!
//! A [`Dataset`] holds three disjoint splits (train/dev/test) of labeled,
//! already-tokenized documents. It is immutable once constructed; derived
//! views such as split sizes and label projections are computed on demand.

use serde::{Deserialize, Serialize};

/// An opaque unit of text consumed by the model (e.g. a word).
pub type Token = String;

/// The ordered tokens of one document. Order is irrelevant to the
/// bag-of-words model but preserved for fidelity to the input.
pub type TokenSequence = Vec<Token>;

/// An integer class identifier. By convention small non-negative values,
/// e.g. 1 = positive, 0 = negative.
pub type DataLabel = u32;

/// One labeled document: a token sequence and its class label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    /// Tokens of the document.
    pub tokens: TokenSequence,
    /// Class label of the document.
    pub label: DataLabel,
}

impl Sample {
    /// Create a new labeled sample.
    pub fn new<I, T>(tokens: I, label: DataLabel) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Sample {
            tokens: tokens.into_iter().map(Into::into).collect(),
            label,
        }
    }
}

/// Immutable holder of train/dev/test splits of labeled samples.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    train: Vec<Sample>,
    dev: Vec<Sample>,
    test: Vec<Sample>,
}

impl Dataset {
    /// Create a dataset from its three splits.
    pub fn new(train: Vec<Sample>, dev: Vec<Sample>, test: Vec<Sample>) -> Self {
        Dataset { train, dev, test }
    }

    /// The training split.
    pub fn train(&self) -> &[Sample] {
        &self.train
    }

    /// The development split.
    pub fn dev(&self) -> &[Sample] {
        &self.dev
    }

    /// The test split.
    pub fn test(&self) -> &[Sample] {
        &self.test
    }

    /// Number of samples in the training split.
    pub fn train_size(&self) -> usize {
        self.train.len()
    }

    /// Number of samples in the development split.
    pub fn dev_size(&self) -> usize {
        self.dev.len()
    }

    /// Number of samples in the test split.
    pub fn test_size(&self) -> usize {
        self.test.len()
    }

    /// Labels of the training split, in order.
    pub fn train_labels(&self) -> Vec<DataLabel> {
        self.train.iter().map(|s| s.label).collect()
    }

    /// Labels of the development split, in order.
    pub fn dev_labels(&self) -> Vec<DataLabel> {
        self.dev.iter().map(|s| s.label).collect()
    }

    /// Labels of the test split, in order.
    pub fn test_labels(&self) -> Vec<DataLabel> {
        self.test.iter().map(|s| s.label).collect()
    }
}
