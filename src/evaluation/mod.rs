//! Evaluation tooling: metrics and significance testing.

pub mod bootstrap;
pub mod metrics;

pub use bootstrap::{BootstrapConfig, paired_bootstrap_test};
pub use metrics::{accuracy, f1, f_measure, precision, recall};
