//! Background planet pipeline: filter and scoring workers.
//!
//! The render thread submits a run and keeps drawing the previous set. Two
//! worker threads do the work:
//!
//! - **filter worker** cuts the catalog down to candidates, then forwards
//!   them (by value) to the scoring worker, or publishes an empty result
//!   directly when nothing passed.
//! - **scoring worker** scores candidates and publishes the finished result
//!   through a lock-free triple buffer.
//!
//! Every run carries a generation. Starting a new generation sends a
//! `Supersede` message down the chain so in-flight stages abandon their
//! work at the next chunk boundary, and the render thread drops any result
//! whose generation is not the latest it issued.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{mpsc, Arc};

use web_time::{Duration, Instant};

use super::prepared::{
    FilterJob, FilterRequest, PipelineOutcome, PipelineResult, ScoreJob,
    ScoreRequest, ScoredPlanetSet,
};
use super::{filter, score};
use crate::catalog::PlanetRecord;
use crate::error::ExovizError;
use crate::options::{
    FilterThresholds, PipelineOptions, ScoringParams, ToolSettings,
};

/// Filter stage entry point.
pub(crate) type FilterStageFn = fn(
    &[PlanetRecord],
    &FilterThresholds,
    usize,
    &mut dyn FnMut() -> bool,
) -> Option<Vec<PlanetRecord>>;

/// Scoring stage entry point.
pub(crate) type ScoreStageFn = fn(
    Vec<PlanetRecord>,
    &ScoringParams,
    usize,
    &mut dyn FnMut() -> bool,
) -> Option<Vec<PlanetRecord>>;

/// Background worker pair that filters and scores planets off the render
/// thread.
pub struct PipelineProcessor {
    request_tx: mpsc::Sender<FilterRequest>,
    result: triple_buffer::Output<Option<PipelineResult>>,
    generation: u64,
    threads: Vec<std::thread::JoinHandle<()>>,
}

impl PipelineProcessor {
    /// Spawn the filter and scoring worker threads.
    ///
    /// # Errors
    ///
    /// Returns [`ExovizError::ThreadSpawn`] if either thread fails to spawn.
    pub fn new(options: PipelineOptions) -> Result<Self, ExovizError> {
        Self::with_stages(options, filter::filter_chunked, score::score_chunked)
    }

    pub(crate) fn with_stages(
        options: PipelineOptions,
        filter_stage: FilterStageFn,
        score_stage: ScoreStageFn,
    ) -> Result<Self, ExovizError> {
        let (request_tx, request_rx) = mpsc::channel::<FilterRequest>();
        let (score_tx, score_rx) = mpsc::channel::<ScoreRequest>();
        let (result_input, result_output) = triple_buffer::triple_buffer(&None);

        let score_options = options.clone();
        let scorer = std::thread::Builder::new()
            .name("planet-score".into())
            .spawn(move || {
                score_loop(&score_rx, result_input, &score_options, score_stage);
            })
            .map_err(ExovizError::ThreadSpawn)?;

        let filterer = std::thread::Builder::new()
            .name("planet-filter".into())
            .spawn(move || {
                filter_loop(&request_rx, &score_tx, &options, filter_stage);
            });
        let filterer = match filterer {
            Ok(handle) => handle,
            Err(e) => {
                // The scorer exits once its sender (moved into the failed
                // closure) is dropped.
                let _ = scorer.join();
                return Err(ExovizError::ThreadSpawn(e));
            }
        };

        Ok(Self {
            request_tx,
            result: result_output,
            generation: 0,
            threads: vec![filterer, scorer],
        })
    }

    /// Start a new generation (non-blocking). Any earlier generation still in
    /// flight is cancelled and will never be delivered.
    ///
    /// Returns the new generation number.
    pub fn run(
        &mut self,
        catalog: &Arc<[PlanetRecord]>,
        settings: &ToolSettings,
    ) -> u64 {
        self.generation += 1;
        let job = FilterJob {
            generation: self.generation,
            catalog: Arc::clone(catalog),
            thresholds: settings.filter_thresholds(),
            scoring: settings.scoring_params(),
            started: Instant::now(),
        };
        log::debug!(
            "pipeline generation {} submitted ({} records)",
            self.generation,
            catalog.len()
        );
        if self.request_tx.send(FilterRequest::Run(job)).is_err() {
            log::error!("pipeline workers are gone; run dropped");
        }
        self.generation
    }

    /// Latest generation issued by [`run`](Self::run).
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Non-blocking check for the current generation's result.
    ///
    /// Each result is returned at most once. Results from superseded
    /// generations are discarded.
    pub fn try_recv(&mut self) -> Option<PipelineResult> {
        let _ = self.result.update();
        let result = self.result.output_buffer_mut().take()?;
        if result.generation != self.generation {
            log::trace!(
                "dropping stale pipeline result (generation {} < {})",
                result.generation,
                self.generation
            );
            return None;
        }
        Some(result)
    }

    /// Poll until the current generation's result arrives or `timeout`
    /// elapses. Meant for batch tools and tests, never the frame loop.
    pub fn wait_for_result(
        &mut self,
        timeout: Duration,
    ) -> Option<PipelineResult> {
        let deadline = Instant::now() + timeout;
        loop {
            if let Some(result) = self.try_recv() {
                return Some(result);
            }
            if Instant::now() >= deadline {
                return None;
            }
            std::thread::sleep(Duration::from_millis(1));
        }
    }

    /// Shut down both workers and wait for them to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(FilterRequest::Shutdown);
        for handle in self.threads.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for PipelineProcessor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

// ---------------------------------------------------------------------------
// Filter worker
// ---------------------------------------------------------------------------

fn filter_loop(
    request_rx: &mpsc::Receiver<FilterRequest>,
    score_tx: &mpsc::Sender<ScoreRequest>,
    options: &PipelineOptions,
    filter_stage: FilterStageFn,
) {
    let mut pending: Option<FilterRequest> = None;

    loop {
        let request = match pending.take() {
            Some(r) => r,
            None => match request_rx.recv() {
                Ok(r) => r,
                Err(_) => break,
            },
        };

        let job = match drain_latest_filter(request, request_rx) {
            FilterRequest::Shutdown => break,
            FilterRequest::Run(job) => job,
        };

        let _ = score_tx.send(ScoreRequest::Supersede(job.generation));

        let mut should_abort = || match request_rx.try_recv() {
            Ok(newer) => {
                pending = Some(newer);
                true
            }
            Err(_) => false,
        };
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            filter_stage(
                &job.catalog,
                &job.thresholds,
                options.chunk_size,
                &mut should_abort,
            )
        }));

        let message = match outcome {
            Ok(None) => {
                log::trace!("filter generation {} cancelled", job.generation);
                continue;
            }
            Ok(Some(candidates)) if candidates.is_empty() => {
                log::debug!(
                    "generation {}: no candidates out of {} records",
                    job.generation,
                    job.catalog.len()
                );
                ScoreRequest::Publish(Box::new(PipelineResult::empty(
                    job.generation,
                    PipelineOutcome::NoCandidates,
                    job.catalog.len(),
                    job.started,
                )))
            }
            Ok(Some(candidates)) => ScoreRequest::Run(ScoreJob {
                generation: job.generation,
                candidates,
                params: job.scoring,
                catalog_len: job.catalog.len(),
                started: job.started,
            }),
            Err(panic) => {
                log::error!(
                    "filter stage failed for generation {}: {}",
                    job.generation,
                    panic_message(panic.as_ref())
                );
                ScoreRequest::Publish(Box::new(PipelineResult::empty(
                    job.generation,
                    PipelineOutcome::Failed,
                    job.catalog.len(),
                    job.started,
                )))
            }
        };
        if score_tx.send(message).is_err() {
            break;
        }
    }

    let _ = score_tx.send(ScoreRequest::Shutdown);
}

/// Drain queued requests, keeping only the latest. `Shutdown` wins over
/// anything queued behind it.
fn drain_latest_filter(
    initial: FilterRequest,
    rx: &mpsc::Receiver<FilterRequest>,
) -> FilterRequest {
    let mut latest = initial;
    while let Ok(newer) = rx.try_recv() {
        if !matches!(latest, FilterRequest::Shutdown) {
            latest = newer;
        }
    }
    latest
}

// ---------------------------------------------------------------------------
// Scoring worker
// ---------------------------------------------------------------------------

fn score_loop(
    score_rx: &mpsc::Receiver<ScoreRequest>,
    mut result_input: triple_buffer::Input<Option<PipelineResult>>,
    options: &PipelineOptions,
    score_stage: ScoreStageFn,
) {
    let mut pending: Option<ScoreRequest> = None;

    loop {
        let request = match pending.take() {
            Some(r) => r,
            None => match score_rx.recv() {
                Ok(r) => r,
                Err(_) => break,
            },
        };

        match drain_latest_score(request, score_rx) {
            ScoreRequest::Shutdown => break,
            ScoreRequest::Supersede(_) => {}
            ScoreRequest::Publish(result) => {
                result_input.write(Some(*result));
            }
            ScoreRequest::Run(job) => {
                let ScoreJob {
                    generation,
                    candidates,
                    params,
                    catalog_len,
                    started,
                } = job;
                let candidate_len = candidates.len();

                // Anything arriving here belongs to a newer generation.
                let mut should_abort = || match score_rx.try_recv() {
                    Ok(newer) => {
                        pending = Some(newer);
                        true
                    }
                    Err(_) => false,
                };
                let outcome = catch_unwind(AssertUnwindSafe(|| {
                    score_stage(
                        candidates,
                        &params,
                        options.chunk_size,
                        &mut should_abort,
                    )
                }));

                let result = match outcome {
                    Ok(None) => {
                        log::trace!("scoring generation {generation} cancelled");
                        continue;
                    }
                    Ok(Some(scored)) => {
                        let set = ScoredPlanetSet::from_scored(scored);
                        let result = PipelineResult::assemble(
                            generation,
                            PipelineOutcome::Scored,
                            set,
                            catalog_len,
                            candidate_len,
                            started,
                            options,
                        );
                        log::debug!(
                            "generation {generation}: scored {candidate_len} of {catalog_len} in {:.1}ms",
                            result.stats.elapsed.as_secs_f64() * 1000.0
                        );
                        result
                    }
                    Err(panic) => {
                        log::error!(
                            "scoring stage failed for generation {generation}: {}",
                            panic_message(panic.as_ref())
                        );
                        PipelineResult::empty(
                            generation,
                            PipelineOutcome::Failed,
                            catalog_len,
                            started,
                        )
                    }
                };
                result_input.write(Some(result));
            }
        }
    }
}

/// Drain queued messages, keeping only the latest. Messages arrive in
/// generation order, so the last one supersedes everything before it.
fn drain_latest_score(
    initial: ScoreRequest,
    rx: &mpsc::Receiver<ScoreRequest>,
) -> ScoreRequest {
    let mut latest = initial;
    while let Ok(newer) = rx.try_recv() {
        if !matches!(latest, ScoreRequest::Shutdown) {
            latest = newer;
        }
    }
    latest
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_owned()
    }
}
