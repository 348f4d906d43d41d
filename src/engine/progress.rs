//! Progress bar utilities for displaying per-stage processing status

use kdam::{Animation, Bar, BarExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::utils::config::ProgressConsts;

// Progress bar type alias
pub type ProgressBar = Arc<Mutex<Bar>>;

/// Configuration for creating a progress bar
pub struct ProgressBarConfig {
    pub total: usize,
    pub desc: &'static str,
    pub animation: Animation,
}

impl ProgressBarConfig {
    /// Create a new progress bar configuration
    pub fn new(total: usize, desc: &'static str, animation: Animation) -> Self {
        Self {
            total,
            desc,
            animation,
        }
    }
}

/// Create a progress bar with the given configuration
pub fn create_progress_bar(config: ProgressBarConfig) -> ProgressBar {
    Arc::new(Mutex::new(kdam::tqdm!(
        total = config.total,
        desc = config.desc,
        animation = config.animation,
        unit = " docs"
    )))
}

/// Update progress bar if available.
/// Uses try_lock so a contended bar never blocks a worker. A skipped increment is lost until
/// [`StageProgress::finish`] sets the bar to the final count.
pub fn update_progress_bar(pb: &ProgressBar, n: usize) {
    if let Ok(mut pb) = pb.try_lock() {
        let _ = pb.update(n);
    }
}

/// Documents per progress update so a stage redraws ~TARGET_UPDATES times.
pub fn adaptive_chunk_size(total: usize) -> usize {
    (total / ProgressConsts::TARGET_UPDATES).max(ProgressConsts::CHUNK_MIN)
}

/// Per-stage progress: bar (verbose only), shared counter and chunk size.
pub struct StageProgress {
    bar: Option<ProgressBar>,
    counter: AtomicUsize,
    total: usize,
    chunk_size: usize,
}

impl StageProgress {
    pub fn new(verbose: bool, desc: &'static str, total: usize) -> Self {
        let bar = (verbose && total > 0).then(|| {
            create_progress_bar(ProgressBarConfig::new(total, desc, Animation::Classic))
        });
        Self {
            bar,
            counter: AtomicUsize::new(0),
            total,
            chunk_size: adaptive_chunk_size(total),
        }
    }

    /// Record one finished document. Call from workers.
    pub fn tick(&self) {
        report_progress_batched(self.bar.as_ref(), &self.counter, self.chunk_size);
    }

    /// Set the bar to the final count and close its line. Call once after the stage barrier,
    /// when no worker holds the lock any more.
    pub fn finish(&self) {
        if let Some(pb) = &self.bar {
            if let Ok(mut bar) = pb.lock() {
                let _ = bar.update_to(self.completed().min(self.total));
            }
            eprintln!();
        }
    }

    pub fn completed(&self) -> usize {
        self.counter.load(Ordering::Relaxed)
    }
}

/// Increment a shared counter and update the progress bar every `chunk_size` items.
/// Call from parallel workers to reduce lock contention while still updating progress.
pub fn report_progress_batched(pb: Option<&ProgressBar>, counter: &AtomicUsize, chunk_size: usize) {
    let count = counter.fetch_add(1, Ordering::Relaxed);
    if let Some(pb) = pb {
        // Update when we've just completed a full chunk (count is 0-based before this item)
        if (count + 1).is_multiple_of(chunk_size) {
            update_progress_bar(pb, chunk_size);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adaptive_chunk_size() {
        assert_eq!(adaptive_chunk_size(0), ProgressConsts::CHUNK_MIN);
        assert_eq!(adaptive_chunk_size(50), ProgressConsts::CHUNK_MIN);
        assert_eq!(adaptive_chunk_size(10_000), 100);
    }

    #[test]
    fn test_quiet_progress_counts_without_bar() {
        let progress = StageProgress::new(false, "test", 25);
        for _ in 0..25 {
            progress.tick();
        }
        progress.finish();
        assert_eq!(progress.completed(), 25);
    }

    #[test]
    fn test_finish_sets_bar_to_completed_count() {
        let progress = StageProgress::new(true, "test", 25);
        for _ in 0..25 {
            progress.tick();
        }
        progress.finish();
        let bar = progress.bar.as_ref().unwrap().lock().unwrap();
        assert_eq!(bar.counter, 25);
    }

    #[test]
    fn test_finish_recovers_updates_lost_to_contention() {
        let progress = StageProgress::new(true, "test", 30);
        let pb = progress.bar.clone().unwrap();
        {
            let _held = pb.lock().unwrap();
            for _ in 0..30 {
                progress.tick();
            }
        }
        assert_eq!(pb.lock().unwrap().counter, 0);
        progress.finish();
        assert_eq!(pb.lock().unwrap().counter, 30);
    }
}
