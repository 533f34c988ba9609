//! Parallel Monte-Carlo estimation of π.
//!
//! Points are drawn uniformly from the unit square; the fraction that lands in
//! the closed quarter-disk `x² + y² ≤ 1` approaches π / 4.

use crate::config::{Reduction, SamplerConfig, SeedSource};
use crate::error::{Result, SamplerError};
use crate::partition::partition;
use crate::seed::worker_seed;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f64::consts::PI;
use std::io;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Draws `samples` points from `rng` and returns how many fall inside the
/// quarter-disk.
pub fn count_hits<R: Rng + ?Sized>(rng: &mut R, samples: u64) -> u64 {
    let mut inside = 0;
    for _ in 0..samples {
        let x: f64 = rng.gen();
        let y: f64 = rng.gen();
        if x * x + y * y <= 1.0 {
            inside += 1;
        }
    }
    inside
}

/// Outcome of one estimation run.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    pub pi: f64,
    pub hits: u64,
    pub samples: u64,
    /// Workers that actually ran; capped at `samples`.
    pub threads: usize,
    pub elapsed: Duration,
}

impl Estimate {
    /// Signed distance from the true value.
    pub fn error(&self) -> f64 {
        PI - self.pi
    }
}

/// Splits a run across `threads` workers, each owning its own generator.
///
/// `R` is constructed inside each worker from that worker's seed and never
/// leaves the worker thread.
pub struct ParallelSampler<R = StdRng> {
    config: SamplerConfig,
    rng: PhantomData<fn() -> R>,
}

impl ParallelSampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self::with_rng(config)
    }
}

impl<R> ParallelSampler<R>
where
    R: Rng + SeedableRng + 'static,
{
    /// Same as [`ParallelSampler::new`] but with a caller-chosen generator.
    pub fn with_rng(config: SamplerConfig) -> Self {
        Self {
            config,
            rng: PhantomData,
        }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    /// Runs every worker to completion and combines their counts.
    pub fn run(&self) -> Result<Estimate> {
        let threads = self.config.threads();
        let samples = self.config.samples();
        let reduction = self.config.reduction();

        info!(
            component = "sampler",
            event = "run_started",
            threads,
            samples,
            reduction = ?reduction,
            "starting parallel sampling"
        );

        let start = Instant::now();
        let workers = worker_count(threads, samples);
        let chunks = partition(samples, workers);
        let seeds = Arc::new(self.config.seeds().clone());

        let hits = match reduction {
            Reduction::Join => reduce_by_join::<R, _>(chunks, seeds, spawn_named)?,
            Reduction::Atomic => reduce_atomically::<R, _>(chunks, seeds, spawn_named)?,
        };
        let elapsed = start.elapsed();

        // samples > 0 is guaranteed by SamplerConfig.
        let pi = 4.0 * hits as f64 / samples as f64;

        info!(
            component = "sampler",
            event = "run_finished",
            hits,
            samples,
            pi,
            elapsed = ?elapsed,
            "reduction complete"
        );

        Ok(Estimate {
            pi,
            hits,
            samples,
            threads: workers,
            elapsed,
        })
    }
}

/// Never more workers than samples, so every spawned worker has work.
fn worker_count(threads: usize, samples: u64) -> usize {
    usize::try_from(samples).map_or(threads, |samples| threads.min(samples))
}

fn run_worker<R: Rng + SeedableRng>(seeds: &SeedSource, worker_id: usize, samples: u64) -> u64 {
    let seed = worker_seed(seeds, worker_id);
    let mut rng = R::seed_from_u64(seed);
    let inside = count_hits(&mut rng, samples);

    debug!(
        component = "sampler",
        event = "worker_done",
        worker = worker_id,
        seed,
        samples,
        inside,
        "worker finished sampling"
    );
    inside
}

/// Work handed to a single worker thread.
type Job<T> = Box<dyn FnOnce() -> T + Send + 'static>;

fn spawn_named<T: Send + 'static>(worker_id: usize, job: Job<T>) -> io::Result<JoinHandle<T>> {
    thread::Builder::new()
        .name(format!("sampler-{worker_id}"))
        .spawn(job)
}

/// Joins every handle before reporting, so no worker outlives the run.
fn join_all<T>(handles: Vec<JoinHandle<T>>) -> Result<Vec<T>> {
    let joined: Vec<_> = handles.into_iter().map(JoinHandle::join).collect();
    joined
        .into_iter()
        .enumerate()
        .map(|(worker, res)| res.map_err(|_| SamplerError::WorkerPanicked { worker }))
        .collect()
}

/// Starts one thread per job. When a spawn fails, the workers already started
/// are joined before the error is returned.
fn spawn_all<T, S>(jobs: Vec<Job<T>>, mut spawn: S) -> Result<Vec<JoinHandle<T>>>
where
    S: FnMut(usize, Job<T>) -> io::Result<JoinHandle<T>>,
{
    let mut handles = Vec::with_capacity(jobs.len());
    for (worker, job) in jobs.into_iter().enumerate() {
        match spawn(worker, job) {
            Ok(handle) => handles.push(handle),
            Err(source) => {
                warn!(
                    component = "sampler",
                    event = "spawn_failed",
                    worker,
                    started = handles.len(),
                    error = %source,
                    "could not start worker thread"
                );
                if join_all(handles).is_err() {
                    debug!(
                        component = "sampler",
                        event = "worker_panicked",
                        "a started worker panicked while unwinding a failed spawn"
                    );
                }
                return Err(SamplerError::SpawnFailed { worker, source });
            }
        }
    }
    Ok(handles)
}

fn reduce_by_join<R, S>(chunks: Vec<u64>, seeds: Arc<SeedSource>, spawn: S) -> Result<u64>
where
    R: Rng + SeedableRng + 'static,
    S: FnMut(usize, Job<u64>) -> io::Result<JoinHandle<u64>>,
{
    let jobs: Vec<Job<u64>> = chunks
        .into_iter()
        .enumerate()
        .map(|(worker_id, samples)| {
            let seeds = Arc::clone(&seeds);
            Box::new(move || run_worker::<R>(&seeds, worker_id, samples)) as Job<u64>
        })
        .collect();

    let handles = spawn_all(jobs, spawn)?;
    Ok(join_all(handles)?.into_iter().sum())
}

fn reduce_atomically<R, S>(chunks: Vec<u64>, seeds: Arc<SeedSource>, spawn: S) -> Result<u64>
where
    R: Rng + SeedableRng + 'static,
    S: FnMut(usize, Job<()>) -> io::Result<JoinHandle<()>>,
{
    let total = Arc::new(AtomicU64::new(0));

    let jobs: Vec<Job<()>> = chunks
        .into_iter()
        .enumerate()
        .map(|(worker_id, samples)| {
            let seeds = Arc::clone(&seeds);
            let total = Arc::clone(&total);
            Box::new(move || {
                let inside = run_worker::<R>(&seeds, worker_id, samples);
                total.fetch_add(inside, Ordering::Relaxed);
            }) as Job<()>
        })
        .collect();

    let handles = spawn_all(jobs, spawn)?;
    join_all(handles)?;
    // join() orders every fetch_add before this load.
    Ok(total.load(Ordering::Relaxed))
}
