//! Configuration error type.
//!
//! Sub-crates define their own error enums and convert `RbError` into them
//! via `From` impls.

use thiserror::Error;

/// Rejections raised while validating grid extents and model parameters.
///
/// Values are never clamped: anything outside its documented range fails
/// fast with the offending name and value.
#[derive(Debug, Error, PartialEq)]
pub enum RbError {
    #[error("grid extents must be positive, got {width}x{height}")]
    InvalidDims { width: u32, height: u32 },

    #[error("grid {width}x{height} has more cells than actor ids can address")]
    TooLarge { width: u32, height: u32 },

    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f64 },

    #[error("{name} must be > 0, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("{name} must be >= 0, got {value}")]
    Negative { name: &'static str, value: f64 },
}

/// Shorthand result type for `rb-core`.
pub type RbResult<T> = Result<T, RbError>;
