//! Progress reporting hooks for long-running operations.
//!
//! Training and corpus loading accept a caller-supplied
//! [`ProgressReporter`]. The hooks are invoked once before the work begins
//! ([`start`](ProgressReporter::start)), once per processed item
//! ([`step`](ProgressReporter::step)), and once after the work completes
//! ([`finish`](ProgressReporter::finish)). Callers that decline progress
//! reporting pass [`NoProgress`].

use parking_lot::Mutex;

/// Trait for observers of long-running operations.
pub trait ProgressReporter: Send + Sync {
    /// Called once before the operation begins, with the total step count.
    fn start(&self, total: usize);

    /// Called once per processed item.
    fn step(&self);

    /// Called once after the operation completes.
    fn finish(&self);
}

/// A progress reporter that does nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&self, _total: usize) {}

    fn step(&self) {}

    fn finish(&self) {}
}

/// A progress reporter that logs at `info` level every `interval` steps.
#[derive(Debug)]
pub struct LogProgress {
    label: String,
    interval: usize,
    state: Mutex<LogProgressState>,
}

#[derive(Debug, Default)]
struct LogProgressState {
    current: usize,
    total: usize,
}

impl LogProgress {
    /// Create a reporter that logs under the given label every
    /// `interval` steps. An interval of 0 is treated as 1.
    pub fn new<S: Into<String>>(label: S, interval: usize) -> Self {
        LogProgress {
            label: label.into(),
            interval: interval.max(1),
            state: Mutex::new(LogProgressState::default()),
        }
    }
}

impl ProgressReporter for LogProgress {
    fn start(&self, total: usize) {
        let mut state = self.state.lock();
        state.current = 0;
        state.total = total;
        log::info!("{}: starting ({total} steps)", self.label);
    }

    fn step(&self) {
        let mut state = self.state.lock();
        state.current += 1;
        if state.current % self.interval == 0 {
            log::info!("{}: {}/{}", self.label, state.current, state.total);
        }
    }

    fn finish(&self) {
        let state = self.state.lock();
        log::info!("{}: finished ({} steps)", self.label, state.current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_is_inert() {
        let progress = NoProgress;
        progress.start(10);
        progress.step();
        progress.finish();
    }

    #[test]
    fn test_log_progress_counts_steps() {
        let progress = LogProgress::new("test", 2);
        progress.start(4);
        for _ in 0..4 {
            progress.step();
        }
        progress.finish();
        assert_eq!(progress.state.lock().current, 4);
    }

    #[test]
    fn test_log_progress_zero_interval() {
        let progress = LogProgress::new("test", 0);
        assert_eq!(progress.interval, 1);
    }
}
