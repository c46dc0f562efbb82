use epi_core::StatKind;
use epi_stats::StatsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("population has {population} agents but {positions} positions")]
    PopulationMismatch {
        population: usize,
        positions:  usize,
    },

    #[error("graph layout needs a simulation topology, none available")]
    TopologyUnavailable,

    #[error("`{0}` table has no rows to plot")]
    EmptyTable(StatKind),

    #[error("statistics tables out of step: {info} info rows, {ecom} ecom rows")]
    RowCountMismatch {
        info: usize,
        ecom: usize,
    },

    #[error("series `{column}` expected frame {expected}, got frame {got}")]
    SeriesOutOfStep {
        column:   String,
        expected: u64,
        got:      u64,
    },

    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("drawing error: {0}")]
    Drawing(String),
}

pub type RenderResult<T> = Result<T, RenderError>;

/// Stringify a plotters error; its error types are generic over the backend.
pub(crate) fn drawing<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}
