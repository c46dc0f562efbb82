use thiserror::Error;

/// Failures reported by a [`Simulation`][crate::Simulation] implementation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation initialization failed: {0}")]
    Initialize(String),

    #[error("simulation step failed: {0}")]
    Execute(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

pub type SimResult<T> = Result<T, SimError>;
