//! Per-worker seed derivation.

use crate::config::SeedSource;
use std::time::{SystemTime, UNIX_EPOCH};

/// Nanoseconds since the Unix epoch, truncated to 64 bits.
fn clock_nanos() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default()
}

fn offset(base: u64, worker_id: usize) -> u64 {
    base.wrapping_add(worker_id as u64)
}

/// Seed for `worker_id`. Must be called from the worker itself so that the
/// clock is read at worker start.
///
/// `Explicit` lists are length-checked by `SamplerConfig::with_seeds`.
pub fn worker_seed(source: &SeedSource, worker_id: usize) -> u64 {
    match source {
        SeedSource::Clock => offset(clock_nanos(), worker_id),
        SeedSource::Base(base) => offset(*base, worker_id),
        SeedSource::Explicit(seeds) => seeds[worker_id],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_same_tick_gives_distinct_seeds() {
        let tick = clock_nanos();
        let seeds: HashSet<u64> = (0..64).map(|i| offset(tick, i)).collect();
        assert_eq!(seeds.len(), 64);
    }

    #[test]
    fn test_base_seed_wraps() {
        let source = SeedSource::Base(u64::MAX);
        assert_eq!(worker_seed(&source, 0), u64::MAX);
        assert_eq!(worker_seed(&source, 1), 0);
        assert_eq!(worker_seed(&source, 2), 1);
    }

    #[test]
    fn test_explicit_seeds_passed_through() {
        let source = SeedSource::Explicit(vec![42, 7, 42]);
        assert_eq!(worker_seed(&source, 0), 42);
        assert_eq!(worker_seed(&source, 1), 7);
        assert_eq!(worker_seed(&source, 2), 42);
    }

    #[test]
    fn test_clock_seed_is_nonzero() {
        assert_ne!(worker_seed(&SeedSource::Clock, 0), 0);
    }
}
