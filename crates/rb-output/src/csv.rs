//! CSV output backend.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickCountsRow};

/// Column names, in write order.
pub const HEADER: [&str; 5] = ["tick", "active", "jailed", "quiet", "cops"];

/// Writes one counts row per tick to a single CSV file.
pub struct CsvWriter {
    counts:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create (or truncate) the file at `path` and write the header row.
    pub fn new(path: &Path) -> OutputResult<Self> {
        let mut counts = Writer::from_path(path)?;
        counts.write_record(HEADER)?;
        Ok(Self { counts, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_counts(&mut self, row: &TickCountsRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.active.to_string(),
            row.jailed.to_string(),
            row.quiet.to_string(),
            row.cops.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        Ok(())
    }
}
