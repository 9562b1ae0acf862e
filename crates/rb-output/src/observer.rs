//! `CountsObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use rb_core::Tick;
use rb_sim::{Census, SimObserver};

use crate::row::TickCountsRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes each tick's census to any [`OutputWriter`].
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `world.run()` returns, check for errors with
/// [`take_error`][Self::take_error].  Once a write fails, later rows are
/// skipped so the file never has gaps in the middle.
pub struct CountsObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> CountsObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any) after `world.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Number of rows written successfully.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for CountsObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, census: &Census) {
        if self.last_error.is_some() {
            return;
        }
        let row = TickCountsRow::from_census(tick, census);
        match self.writer.write_counts(&row) {
            Ok(()) => self.rows += 1,
            Err(e) => self.store_err(Err(e)),
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
