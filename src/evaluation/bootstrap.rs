//! Paired bootstrap significance testing between two prediction sets.
//!
//! Estimates how likely an observed metric difference between two models
//! arose by chance: each virtual trial resamples test positions with
//! replacement and recomputes the metric delta, and the p-value is the
//! fraction of trials whose delta reaches twice the observed one.
//!
//! Resampling draws the aligned triple `(preds_a[i], preds_b[i],
//! solutions[i])` per index, preserving the paired structure on both the
//! predictions and the gold labels.
//!
//! Trials are independent, so they run chunked on a rayon pool. Each chunk
//! owns a private RNG seeded deterministically from the base seed and the
//! chunk index, which keeps a seeded run reproducible for any thread
//! count.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;

use crate::dataset::DataLabel;
use crate::error::{KategoriaError, Result};

/// Default number of virtual trials.
pub const DEFAULT_ITERATIONS: usize = 10_000;

/// Trials per work unit handed to the thread pool.
const TRIALS_PER_CHUNK: usize = 256;

/// Configuration for [`paired_bootstrap_test`].
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Number of virtual trials to run.
    pub iterations: usize,
    /// Base RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Thread pool size; `None` uses all available cores.
    pub threads: Option<usize>,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        BootstrapConfig {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            threads: None,
        }
    }
}

impl BootstrapConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of virtual trials.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set the base RNG seed for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the thread pool size.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }
}

/// Compute the p-value for the significance of the difference between two
/// models' predictions under the given metric.
///
/// `metric` takes a prediction sequence and a solution sequence and
/// returns a score (e.g. [`accuracy`](crate::evaluation::accuracy), or a
/// closure fixing the class of
/// [`precision`](crate::evaluation::precision)). Metric failures, on the
/// observed sequences or inside any trial, propagate to the caller.
///
/// Returns a value in `[0, 1]`.
pub fn paired_bootstrap_test<M>(
    preds_a: &[DataLabel],
    preds_b: &[DataLabel],
    solutions: &[DataLabel],
    metric: M,
    config: &BootstrapConfig,
) -> Result<f64>
where
    M: Fn(&[DataLabel], &[DataLabel]) -> Result<f64> + Sync,
{
    for preds in [preds_a, preds_b] {
        if preds.len() != solutions.len() {
            return Err(KategoriaError::LengthMismatch {
                expected: solutions.len(),
                actual: preds.len(),
            });
        }
    }
    if config.iterations == 0 {
        return Err(KategoriaError::other(
            "bootstrap iteration count must be positive",
        ));
    }

    let metric_a_observed = metric(preds_a, solutions)?;
    let metric_b_observed = metric(preds_b, solutions)?;
    let delta_observed = metric_a_observed - metric_b_observed;
    let threshold = 2.0 * delta_observed;

    let n = solutions.len();
    let base_seed = config.seed.unwrap_or_else(|| rand::rng().random());

    let threads = config.threads.unwrap_or_else(num_cpus::get).max(1);
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("bootstrap-{i}"))
        .build()
        .map_err(|e| KategoriaError::other(format!("Failed to create thread pool: {e}")))?;

    let chunk_count = config.iterations.div_ceil(TRIALS_PER_CHUNK);
    let iterations = config.iterations;
    let metric = &metric;

    let matches: usize = pool.install(|| {
        (0..chunk_count)
            .into_par_iter()
            .map(|chunk| -> Result<usize> {
                let first_trial = chunk * TRIALS_PER_CHUNK;
                let trials = TRIALS_PER_CHUNK.min(iterations - first_trial);

                // Chunk seeds depend only on the base seed and the chunk
                // index, never on thread scheduling.
                let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(chunk as u64));

                let mut case_a = Vec::with_capacity(n);
                let mut case_b = Vec::with_capacity(n);
                let mut case_solutions = Vec::with_capacity(n);
                let mut count = 0usize;

                for _ in 0..trials {
                    case_a.clear();
                    case_b.clear();
                    case_solutions.clear();

                    for _ in 0..n {
                        let index = rng.random_range(0..n);
                        case_a.push(preds_a[index]);
                        case_b.push(preds_b[index]);
                        case_solutions.push(solutions[index]);
                    }

                    let delta_virtual =
                        metric(&case_a, &case_solutions)? - metric(&case_b, &case_solutions)?;

                    if delta_virtual >= threshold {
                        count += 1;
                    }
                }

                Ok(count)
            })
            .try_reduce(|| 0, |a, b| Ok(a + b))
    })?;

    Ok(matches as f64 / iterations as f64)
}
