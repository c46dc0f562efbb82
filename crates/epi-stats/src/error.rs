//! Error types for epi-stats.

use epi_core::StatKind;
use thiserror::Error;

/// Errors raised while recording or exporting statistics.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error("`{kind}` record for frame {frame} has columns {got:?}, table expects {expected:?}")]
    SchemaDrift {
        kind:     StatKind,
        frame:    u64,
        expected: Vec<String>,
        got:      Vec<String>,
    },

    #[error("`{kind}` table has no schema yet")]
    NoSchema { kind: StatKind },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, StatsError>`.
pub type StatsResult<T> = Result<T, StatsError>;
