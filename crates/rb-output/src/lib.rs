//! `rb-output` — simulation output writers for the rebellion model.
//!
//! One row per tick, carrying the population census after that tick:
//!
//! ```text
//! tick,active,jailed,quiet,cops
//! 0,0,12,1108,64
//! 1,3,12,1105,64
//! ```
//!
//! Writers implement [`OutputWriter`] and are driven by [`CountsObserver`],
//! which implements `rb_sim::SimObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use rb_output::{CountsObserver, CsvWriter};
//!
//! let writer = CsvWriter::new(Path::new("./counts.csv"))?;
//! let mut obs = CountsObserver::new(writer);
//! world.run(100, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::CountsObserver;
pub use row::TickCountsRow;
pub use writer::OutputWriter;
