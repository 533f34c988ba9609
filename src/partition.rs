//! Splits the sample index space across workers.

/// Returns the number of samples each worker handles.
///
/// Contiguous chunks of `samples / workers`; the last worker also takes the
/// remainder. The sizes always sum to `samples`.
pub fn partition(samples: u64, workers: usize) -> Vec<u64> {
    if workers == 0 {
        return Vec::new();
    }
    let per_worker = samples / workers as u64;
    let remainder = samples % workers as u64;

    (0..workers)
        .map(|worker_id| {
            if worker_id == workers - 1 {
                per_worker + remainder
            } else {
                per_worker
            }
        })
        .collect()
}
