//! Shared helpers for parallel processing.

use log::debug;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::errors::Error;
use crate::utils::config::WorkerThreadLimits;
use crate::utils::fd_limit::{FD_BUDGET_PERCENT, max_concurrent_loads};

/// Worker count for CPU-bound stages: the override, or all available threads.
pub fn compute_threads(requested: Option<usize>) -> usize {
    let limits = WorkerThreadLimits::current();
    requested.unwrap_or(limits.all_threads).max(limits.floor)
}

/// Worker count for the load stage: [`compute_threads`] capped so concurrent opens stay under the FD limit.
pub fn load_threads(requested: Option<usize>) -> usize {
    let threads = compute_threads(requested);
    match max_concurrent_loads() {
        Some(fd_cap) if fd_cap < threads => {
            debug!(
                "Capping load threads {} -> {} ({}% of FD limit)",
                threads, fd_cap, FD_BUDGET_PERCENT
            );
            fd_cap.max(WorkerThreadLimits::FLOOR_THREADS)
        }
        _ => threads,
    }
}

/// Build a named rayon pool for one stage.
pub fn build_pool(stage: &'static str, num_threads: usize) -> Result<ThreadPool, Error> {
    debug!("{} stage: {} worker threads", stage, num_threads);
    let pool = ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .thread_name(move |i| format!("{}-{}-{}", env!("CARGO_PKG_NAME"), stage, i))
        .build()?;
    Ok(pool)
}
