//! Sampler configuration and validation.

use crate::error::{Result, SamplerError};

/// Where each worker's generator seed comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SeedSource {
    /// Wall clock sampled at worker start, offset by the worker index.
    #[default]
    Clock,
    /// Worker `i` is seeded with `base + i` (wrapping).
    Base(u64),
    /// One seed per worker, in worker order.
    Explicit(Vec<u64>),
}

/// How per-worker hit counts are combined into the global count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Reduction {
    /// Each worker hands its count back through its join handle; counts are
    /// summed in worker order after every worker has been joined.
    #[default]
    Join,
    /// Each worker performs a single `fetch_add` on a shared atomic counter.
    Atomic,
}

/// Validated input for one estimation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SamplerConfig {
    threads: usize,
    samples: u64,
    seeds: SeedSource,
    reduction: Reduction,
}

impl SamplerConfig {
    /// Validates raw counts. Signed inputs so that negative CLI values reach
    /// validation instead of wrapping.
    pub fn new(threads: i64, samples: i64) -> Result<Self> {
        if threads <= 0 {
            return Err(SamplerError::InvalidThreadCount(threads));
        }
        if samples <= 0 {
            return Err(SamplerError::InvalidSampleCount(samples));
        }
        let threads =
            usize::try_from(threads).map_err(|_| SamplerError::InvalidThreadCount(threads))?;

        Ok(Self {
            threads,
            samples: samples as u64,
            seeds: SeedSource::default(),
            reduction: Reduction::default(),
        })
    }

    pub fn with_seeds(mut self, seeds: SeedSource) -> Result<Self> {
        if let SeedSource::Explicit(list) = &seeds {
            if list.len() != self.threads {
                return Err(SamplerError::SeedCountMismatch {
                    expected: self.threads,
                    actual: list.len(),
                });
            }
        }
        self.seeds = seeds;
        Ok(self)
    }

    pub fn with_reduction(mut self, reduction: Reduction) -> Self {
        self.reduction = reduction;
        self
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    pub fn samples(&self) -> u64 {
        self.samples
    }

    pub fn seeds(&self) -> &SeedSource {
        &self.seeds
    }

    pub fn reduction(&self) -> Reduction {
        self.reduction
    }
}
