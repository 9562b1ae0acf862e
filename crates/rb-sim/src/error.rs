use rb_core::RbError;
use rb_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] RbError),

    #[error("occupancy error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("world has not been set up")]
    NotSetUp,

    #[error("world is already set up")]
    AlreadySetUp,

    #[error("invariant violated: {0}")]
    Invariant(String),
}

pub type SimResult<T> = Result<T, SimError>;
