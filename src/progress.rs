//! Progress tracking for k-mer counting operations.
//!
//! Counting reports a [`Progress`] snapshot after every chunk read. When
//! several inputs are counted in parallel, a shared [`ProgressTracker`]
//! accumulates the per-input increments with atomic counters.
//!
//! # Example
//!
//! ```rust,no_run
//! use kmer_total::run::count_path_with_progress;
//!
//! let histogram = count_path_with_progress("genome.fa", 8, |progress| {
//!     eprintln!(
//!         "Read {} bytes, {} records, {} k-mers",
//!         progress.bytes_processed,
//!         progress.records_processed,
//!         progress.windows_counted
//!     );
//! })?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::scanner::ScanStats;

/// Progress snapshot during k-mer counting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Progress {
    /// Number of header records seen so far.
    pub records_processed: u64,
    /// Number of input bytes consumed so far.
    pub bytes_processed: u64,
    /// Number of k-mers added to the histogram so far.
    pub windows_counted: u64,
}

impl Progress {
    /// Field-wise difference `self - earlier`.
    #[must_use]
    pub const fn since(&self, earlier: &Self) -> Self {
        Self {
            records_processed: self.records_processed - earlier.records_processed,
            bytes_processed: self.bytes_processed - earlier.bytes_processed,
            windows_counted: self.windows_counted - earlier.windows_counted,
        }
    }
}

impl From<&ScanStats> for Progress {
    fn from(stats: &ScanStats) -> Self {
        Self {
            records_processed: stats.records,
            bytes_processed: stats.bytes_read,
            windows_counted: stats.windows_counted,
        }
    }
}

/// Thread-safe progress tracker using atomic counters.
///
/// This struct maintains atomic counters that can be safely updated from
/// multiple threads while independent inputs are counted in parallel.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    records: AtomicU64,
    bytes: AtomicU64,
    windows: AtomicU64,
}

impl ProgressTracker {
    /// Create a new progress tracker with zero counts.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: AtomicU64::new(0),
            bytes: AtomicU64::new(0),
            windows: AtomicU64::new(0),
        }
    }

    /// Adds an increment reported by one counting run.
    pub fn record(&self, delta: &Progress) {
        self.records
            .fetch_add(delta.records_processed, Ordering::Relaxed);
        self.bytes.fetch_add(delta.bytes_processed, Ordering::Relaxed);
        self.windows
            .fetch_add(delta.windows_counted, Ordering::Relaxed);
    }

    /// Get a snapshot of the current progress.
    ///
    /// The returned values represent the state at a point in time and may
    /// change immediately after this call returns.
    pub fn snapshot(&self) -> Progress {
        Progress {
            records_processed: self.records.load(Ordering::Relaxed),
            bytes_processed: self.bytes.load(Ordering::Relaxed),
            windows_counted: self.windows.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.records.store(0, Ordering::Relaxed);
        self.bytes.store(0, Ordering::Relaxed);
        self.windows.store(0, Ordering::Relaxed);
    }
}
