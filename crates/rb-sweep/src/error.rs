//! Error types for rb-sweep.

use rb_sim::SimError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("simulation error: {0}")]
    Sim(#[from] SimError),

    #[error("sweep configuration: {0}")]
    Config(&'static str),
}

pub type SweepResult<T> = Result<T, SweepError>;
