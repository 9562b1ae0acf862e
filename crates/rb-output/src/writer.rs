//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TickCountsRow};

/// A sink for per-tick population counts.
///
/// Errors are surfaced to the caller; [`CountsObserver`](crate::CountsObserver)
/// stores them because observer hooks cannot return one.
pub trait OutputWriter {
    /// Write one tick's counts.
    fn write_counts(&mut self, row: &TickCountsRow) -> OutputResult<()>;

    /// Flush and close the underlying file handle.
    ///
    /// Idempotent, safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
