//! Parallel batch processing for multi-panel dashboards.
//!
//! This module runs one transform pipeline over many named series using
//! Rayon's work-stealing thread pool. The pipeline is stateless, so a
//! single instance is shared by reference across all workers; each
//! series is transformed independently.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                   BatchProcessor                       │
//! │  ┌───────────────────────────────────────────────────┐│
//! │  │               Rayon Thread Pool                    ││
//! │  │                                                    ││
//! │  │   Thread 1       Thread 2       Thread N           ││
//! │  │      │              │              │               ││
//! │  │   "cpu"          "memory"       "disk_io"          ││
//! │  │      │              │              │        (all   ││
//! │  │      └──────── &Pipeline ──────────┘       shared) ││
//! │  │      │              │              │               ││
//! │  │      ▼              ▼              ▼               ││
//! │  │ SeriesResult   SeriesResult   SeriesResult         ││
//! │  └──────────────────────┬────────────────────────────┘│
//! │                         ▼                              │
//! │                    BatchOutput                         │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! # Error Handling
//!
//! Pipelines isolate step failures (a failing step passes its input
//! through), so every series produces output. A series whose run had
//! skipped steps counts as *degraded*:
//!
//! - [`ErrorMode::FailFast`]: the first degraded series aborts the batch
//! - [`ErrorMode::CollectErrors`]: degraded series stay in the results,
//!   with a summary per failure in [`BatchOutput::failures`]
//!
//! # Example
//!
//! ```
//! use telemetry_charts::batch::{BatchConfig, BatchProcessor};
//! use telemetry_charts::builder::PipelineBuilder;
//! use telemetry_charts::series::Sample;
//!
//! let pipeline = PipelineBuilder::new().decimate(100).build().unwrap();
//! let processor = BatchProcessor::new(pipeline, BatchConfig::new());
//!
//! let jobs: Vec<(String, Vec<Sample>)> = ["cpu", "memory"]
//!     .iter()
//!     .map(|name| {
//!         let series = (0..500).map(|i| Sample::new(i * 1_000, i as f64)).collect();
//!         (name.to_string(), series)
//!     })
//!     .collect();
//!
//! let output = processor.process(jobs).unwrap();
//! assert_eq!(output.processed_count(), 2);
//! assert!(output.all_clean());
//! ```
//!
//! # Cancellation Support
//!
//! Long refreshes over hundreds of panels can be cancelled from another
//! thread with a [`CancellationToken`]; series not yet started are
//! skipped and counted in [`BatchOutput::skipped_count`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::error::{ChartError, Result};
use crate::pipeline::{Pipeline, PipelineReport};
use crate::series::Series;

// ============================================================================
// Configuration
// ============================================================================

/// How the processor reacts to a degraded series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Abort the whole batch on the first degraded series (default).
    #[default]
    FailFast,

    /// Keep going; degraded series are summarized in the output.
    CollectErrors,
}

/// Configuration for batch processing.
#[derive(Debug, Clone, Default)]
pub struct BatchConfig {
    /// Number of worker threads. `None` uses the Rayon default.
    pub num_threads: Option<usize>,

    /// How to handle degraded series.
    pub error_mode: ErrorMode,
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of worker threads.
    ///
    /// # Panics
    ///
    /// Panics if `threads` is 0.
    pub fn with_threads(mut self, threads: usize) -> Self {
        assert!(threads > 0, "Thread count must be > 0");
        self.num_threads = Some(threads);
        self
    }

    /// Set the error handling mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Configured threads, or Rayon's default.
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(rayon::current_num_threads)
    }
}

// ============================================================================
// Cancellation Support
// ============================================================================

/// Thread-safe flag for cancelling a running batch.
///
/// Clone the token, hand one copy to the processor, keep the other to
/// call [`CancellationToken::cancel`] from any thread. Series already
/// being transformed finish normally; series not yet started are
/// skipped.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Safe to call from any thread.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Reset the token for reuse. Only call between batches.
    pub fn reset(&self) {
        self.cancelled.store(false, Ordering::SeqCst);
    }
}

// ============================================================================
// Results
// ============================================================================

/// Result from transforming a single series.
#[derive(Debug, Clone)]
pub struct SeriesResult {
    /// Series name (panel identifier).
    pub name: String,

    /// The transformed series.
    pub series: Series,

    /// Point count before any step ran.
    pub points_in: usize,

    /// Per-step accounting from the pipeline run.
    pub report: PipelineReport,

    /// Transform time for this series.
    pub elapsed: Duration,
}

impl SeriesResult {
    /// Point count after the full pipeline.
    pub fn points_out(&self) -> usize {
        self.series.len()
    }

    /// True when no step was skipped for this series.
    pub fn is_clean(&self) -> bool {
        self.report.is_clean()
    }
}

/// Summary of a degraded series.
#[derive(Debug, Clone)]
pub struct SeriesError {
    /// Series name.
    pub name: String,

    /// First step that failed.
    pub step: String,

    /// Error message from that step.
    pub error: String,
}

/// Aggregated results from batch processing.
#[derive(Debug)]
pub struct BatchOutput {
    /// Every series that was transformed, degraded or not, in input order.
    pub results: Vec<SeriesResult>,

    /// Degraded series (only populated with ErrorMode::CollectErrors).
    pub failures: Vec<SeriesError>,

    /// Total wall-clock time.
    pub elapsed: Duration,

    /// Number of threads used.
    pub threads_used: usize,

    /// Whether the batch was cancelled before completion.
    pub was_cancelled: bool,

    /// Series skipped because of cancellation.
    pub skipped_count: usize,
}

impl BatchOutput {
    /// Count of transformed series.
    pub fn processed_count(&self) -> usize {
        self.results.len()
    }

    /// Count of degraded series.
    pub fn degraded_count(&self) -> usize {
        self.failures.len()
    }

    /// True when every series transformed with no skipped steps.
    pub fn all_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total points across all inputs.
    pub fn total_points_in(&self) -> usize {
        self.results.iter().map(|r| r.points_in).sum()
    }

    /// Total points across all outputs.
    pub fn total_points_out(&self) -> usize {
        self.results.iter().map(|r| r.points_out()).sum()
    }

    /// Results sorted by series name.
    pub fn results_by_name(&self) -> Vec<&SeriesResult> {
        let mut sorted: Vec<_> = self.results.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        sorted
    }

    pub fn iter(&self) -> impl Iterator<Item = &SeriesResult> {
        self.results.iter()
    }
}

// ============================================================================
// Progress Reporting
// ============================================================================

/// Progress information for callbacks.
#[derive(Debug, Clone)]
pub struct ProgressInfo {
    /// Series about to be transformed.
    pub current_series: String,

    /// Total number of series in the batch.
    pub total_series: usize,

    /// Series completed so far.
    pub completed: usize,

    /// Elapsed time since the batch started.
    pub elapsed: Duration,
}

impl ProgressInfo {
    /// Completion percentage (0.0 to 100.0).
    pub fn percent_complete(&self) -> f64 {
        if self.total_series == 0 {
            100.0
        } else {
            self.completed as f64 / self.total_series as f64 * 100.0
        }
    }
}

/// Callback interface for batch progress.
pub trait ProgressCallback: Send + Sync {
    /// Called before each series is transformed.
    fn on_progress(&self, info: &ProgressInfo);

    /// Called once when the batch completes.
    fn on_complete(&self, output: &BatchOutput);
}

/// Progress reporter that writes through the `log` facade.
#[derive(Debug, Default)]
pub struct LogProgress;

impl ProgressCallback for LogProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        log::info!(
            "transforming '{}' ({}/{}, {:.1}%)",
            info.current_series,
            info.completed + 1,
            info.total_series,
            info.percent_complete()
        );
    }

    fn on_complete(&self, output: &BatchOutput) {
        log::info!(
            "batch complete: {} series ({} degraded, {} skipped) in {:?} on {} threads",
            output.processed_count(),
            output.degraded_count(),
            output.skipped_count,
            output.elapsed,
            output.threads_used
        );
    }
}

// ============================================================================
// Batch Processor
// ============================================================================

/// Runs one pipeline over many named series in parallel.
///
/// The pipeline has no per-run state, so all workers share one instance
/// by reference; no locks, no per-thread construction.
pub struct BatchProcessor {
    pipeline: Pipeline,
    batch_config: BatchConfig,
    progress_callback: Option<Arc<dyn ProgressCallback>>,
    cancellation_token: CancellationToken,
}

impl BatchProcessor {
    /// Create a new batch processor around a built pipeline.
    pub fn new(pipeline: Pipeline, batch_config: BatchConfig) -> Self {
        Self {
            pipeline,
            batch_config,
            progress_callback: None,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Set a progress callback.
    pub fn with_progress_callback(mut self, callback: Box<dyn ProgressCallback>) -> Self {
        self.progress_callback = Some(Arc::from(callback));
        self
    }

    /// Set a cancellation token shared with other threads.
    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// Get a clone of the cancellation token.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Request cancellation. Safe to call from any thread.
    pub fn cancel(&self) {
        self.cancellation_token.cancel();
    }

    pub fn batch_config(&self) -> &BatchConfig {
        &self.batch_config
    }

    /// Transform every `(name, series)` job in parallel.
    ///
    /// Results come back in input order.
    ///
    /// # Errors
    ///
    /// With [`ErrorMode::FailFast`], the first degraded series aborts
    /// the batch with [`ChartError::TransformStep`]. Thread pool
    /// construction failures also surface here.
    pub fn process(&self, jobs: Vec<(String, Series)>) -> Result<BatchOutput> {
        let start = Instant::now();
        let total_series = jobs.len();
        let threads_used = self.batch_config.effective_threads();

        let completed = AtomicUsize::new(0);

        enum JobResult {
            Done(SeriesResult),
            Skipped,
        }

        // A local pool, so different processors can use different
        // thread counts within one process.
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads_used)
            .build()
            .map_err(|e| ChartError::Config(format!("failed to create thread pool: {e}")))?;

        let outcomes: Vec<JobResult> = pool.install(|| {
            jobs.into_par_iter()
                .map(|(name, series)| {
                    // Check for cancellation before starting work
                    if self.cancellation_token.is_cancelled() {
                        return JobResult::Skipped;
                    }

                    if let Some(ref callback) = self.progress_callback {
                        callback.on_progress(&ProgressInfo {
                            current_series: name.clone(),
                            total_series,
                            completed: completed.load(Ordering::Relaxed),
                            elapsed: start.elapsed(),
                        });
                    }

                    let job_start = Instant::now();
                    let points_in = series.len();
                    let (transformed, report) = self.pipeline.apply_with_report(series);
                    completed.fetch_add(1, Ordering::Relaxed);

                    JobResult::Done(SeriesResult {
                        name,
                        series: transformed,
                        points_in,
                        report,
                        elapsed: job_start.elapsed(),
                    })
                })
                .collect()
        });

        let mut results = Vec::new();
        let mut failures = Vec::new();
        let mut skipped_count = 0usize;

        for outcome in outcomes {
            match outcome {
                JobResult::Done(result) => {
                    if let Some(failed) = result.report.steps.iter().find(|s| s.error.is_some()) {
                        let error = SeriesError {
                            name: result.name.clone(),
                            step: failed.name.clone(),
                            error: failed.error.clone().unwrap_or_default(),
                        };
                        if self.batch_config.error_mode == ErrorMode::FailFast {
                            return Err(ChartError::TransformStep {
                                step: error.step,
                                message: format!("series '{}': {}", error.name, error.error),
                            });
                        }
                        failures.push(error);
                    }
                    results.push(result);
                }
                JobResult::Skipped => skipped_count += 1,
            }
        }

        let output = BatchOutput {
            results,
            failures,
            elapsed: start.elapsed(),
            threads_used,
            was_cancelled: self.cancellation_token.is_cancelled(),
            skipped_count,
        };

        if let Some(ref callback) = self.progress_callback {
            callback.on_complete(&output);
        }

        Ok(output)
    }
}

// ============================================================================
// Convenience Functions
// ============================================================================

/// Transform many series through a configured pipeline, in parallel,
/// with default batch settings.
pub fn transform_series_parallel(
    config: &crate::config::PipelineConfig,
    jobs: Vec<(String, Series)>,
) -> Result<BatchOutput> {
    let pipeline = Pipeline::from_config(config)?;
    BatchProcessor::new(pipeline, BatchConfig::default()).process(jobs)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::TransformStep;
    use crate::series::Sample;

    fn jobs(names: &[&str], points: usize) -> Vec<(String, Series)> {
        names
            .iter()
            .map(|name| {
                let series = (0..points)
                    .map(|i| Sample::new(i as i64 * 1_000, (i % 13) as f64))
                    .collect();
                (name.to_string(), series)
            })
            .collect()
    }

    fn decimating_processor(max_points: usize) -> BatchProcessor {
        let pipeline = Pipeline::new().with_step(TransformStep::decimate(max_points, true));
        BatchProcessor::new(pipeline, BatchConfig::new().with_threads(2))
    }

    #[test]
    fn test_batch_config_defaults() {
        let config = BatchConfig::new();
        assert!(config.num_threads.is_none());
        assert_eq!(config.error_mode, ErrorMode::FailFast);
    }

    #[test]
    fn test_batch_config_builder() {
        let config = BatchConfig::new()
            .with_threads(4)
            .with_error_mode(ErrorMode::CollectErrors);
        assert_eq!(config.num_threads, Some(4));
        assert_eq!(config.error_mode, ErrorMode::CollectErrors);
        assert_eq!(config.effective_threads(), 4);
    }

    #[test]
    #[should_panic(expected = "Thread count must be > 0")]
    fn test_batch_config_zero_threads() {
        BatchConfig::new().with_threads(0);
    }

    #[test]
    fn test_process_preserves_input_order() {
        let output = decimating_processor(50)
            .process(jobs(&["cpu", "memory", "disk", "network"], 400))
            .unwrap();

        let names: Vec<&str> = output.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["cpu", "memory", "disk", "network"]);
        assert!(output.all_clean());
        assert!(output.results.iter().all(|r| r.points_out() <= 50));
        assert_eq!(output.total_points_in(), 1_600);
    }

    #[test]
    fn test_results_by_name_sorts() {
        let output = decimating_processor(50)
            .process(jobs(&["zeta", "alpha"], 10))
            .unwrap();
        let sorted: Vec<&str> = output
            .results_by_name()
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(sorted, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_collect_errors_keeps_degraded_series() {
        let pipeline = Pipeline::new().with_step(TransformStep::new("boom", |_| {
            Err(ChartError::invalid_argument("synthetic failure"))
        }));
        let processor = BatchProcessor::new(
            pipeline,
            BatchConfig::new()
                .with_threads(2)
                .with_error_mode(ErrorMode::CollectErrors),
        );

        let output = processor.process(jobs(&["cpu", "memory"], 20)).unwrap();

        // Both series degraded, both still present with their input data
        assert_eq!(output.processed_count(), 2);
        assert_eq!(output.degraded_count(), 2);
        assert!(!output.all_clean());
        assert!(output.results.iter().all(|r| r.points_out() == 20));
        assert_eq!(output.failures[0].step, "boom");
    }

    #[test]
    fn test_fail_fast_aborts_on_degraded_series() {
        let pipeline = Pipeline::new().with_step(TransformStep::new("boom", |_| {
            Err(ChartError::invalid_argument("synthetic failure"))
        }));
        let processor = BatchProcessor::new(pipeline, BatchConfig::new().with_threads(2));

        let err = processor.process(jobs(&["cpu"], 20)).unwrap_err();
        assert!(matches!(err, ChartError::TransformStep { .. }));
        assert!(err.to_string().contains("cpu"));
    }

    #[test]
    fn test_cancellation_skips_remaining_series() {
        let processor = decimating_processor(50);
        processor.cancel();

        let output = processor.process(jobs(&["a", "b", "c"], 100)).unwrap();
        assert!(output.was_cancelled);
        assert_eq!(output.skipped_count, 3);
        assert_eq!(output.processed_count(), 0);
    }

    #[test]
    fn test_cancellation_token_reset() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        token.cancel();
        assert!(token.is_cancelled());
        token.reset();
        assert!(!token.is_cancelled());
    }

    #[test]
    fn test_progress_callback_fires_per_series() {
        struct Counter {
            progressed: AtomicUsize,
            completed: AtomicUsize,
        }
        impl ProgressCallback for Counter {
            fn on_progress(&self, _info: &ProgressInfo) {
                self.progressed.fetch_add(1, Ordering::SeqCst);
            }
            fn on_complete(&self, _output: &BatchOutput) {
                self.completed.fetch_add(1, Ordering::SeqCst);
            }
        }

        let counter = Arc::new(Counter {
            progressed: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
        });

        struct Forward(Arc<Counter>);
        impl ProgressCallback for Forward {
            fn on_progress(&self, info: &ProgressInfo) {
                self.0.on_progress(info);
            }
            fn on_complete(&self, output: &BatchOutput) {
                self.0.on_complete(output);
            }
        }

        let pipeline = Pipeline::new().with_step(TransformStep::decimate(10, true));
        let processor = BatchProcessor::new(pipeline, BatchConfig::new().with_threads(2))
            .with_progress_callback(Box::new(Forward(Arc::clone(&counter))));

        processor.process(jobs(&["a", "b", "c"], 50)).unwrap();

        assert_eq!(counter.progressed.load(Ordering::SeqCst), 3);
        assert_eq!(counter.completed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_convenience_function() {
        use crate::config::{PipelineConfig, StepConfig};

        let config = PipelineConfig::new().with_step(StepConfig::Decimate {
            max_points: 25,
            preserve_extremes: true,
        });
        let output = transform_series_parallel(&config, jobs(&["cpu"], 200)).unwrap();
        assert_eq!(output.processed_count(), 1);
        assert!(output.results[0].points_out() <= 25);
    }

    #[test]
    fn test_progress_info_percent() {
        let info = ProgressInfo {
            current_series: "cpu".to_string(),
            total_series: 10,
            completed: 5,
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(info.percent_complete(), 50.0);
    }
}
