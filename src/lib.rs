//! Monte-Carlo estimation of π across a fixed set of worker threads.

pub mod config;
pub mod error;
pub mod monte_carlo;
pub mod partition;
pub mod seed;

pub use config::{Reduction, SamplerConfig, SeedSource};
pub use error::{Result, SamplerError};
pub use monte_carlo::{count_hits, Estimate, ParallelSampler};

/// Estimates π with `thread_count` workers and `sample_count` total points,
/// using clock-derived seeds.
pub fn estimate(thread_count: i64, sample_count: i64) -> Result<f64> {
    let config = SamplerConfig::new(thread_count, sample_count)?;
    Ok(ParallelSampler::new(config).run()?.pi)
}
