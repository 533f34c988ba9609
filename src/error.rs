//! Error taxonomy for the sampler.

use std::io;

/// Errors reported by [`crate::ParallelSampler`].
///
/// Input errors are detected before any worker is spawned.
#[derive(Debug, thiserror::Error)]
pub enum SamplerError {
    #[error("invalid thread count {0}: must be a positive integer")]
    InvalidThreadCount(i64),

    #[error("invalid sample count {0}: must be a positive integer")]
    InvalidSampleCount(i64),

    #[error("expected {expected} seeds (one per worker), got {actual}")]
    SeedCountMismatch { expected: usize, actual: usize },

    #[error("failed to spawn worker {worker}")]
    SpawnFailed {
        worker: usize,
        #[source]
        source: io::Error,
    },

    #[error("worker {worker} panicked before reporting its hit count")]
    WorkerPanicked { worker: usize },
}

pub type Result<T> = std::result::Result<T, SamplerError>;
