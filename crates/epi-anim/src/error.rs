use epi_core::CoreError;
use epi_render::RenderError;
use epi_sim::SimError;
use epi_stats::StatsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnimError {
    #[error("animation configuration error: {0}")]
    Config(String),

    #[error("`{op}` is not allowed in state {state}")]
    InvalidState {
        op:    &'static str,
        state: String,
    },

    #[error("frame budget of {frames} frames is exhausted")]
    BudgetExhausted { frames: u64 },

    #[error("color mapping error: {0}")]
    Colors(#[from] CoreError),

    #[error("simulation error: {0}")]
    Simulation(#[from] SimError),

    #[error("statistics error: {0}")]
    Stats(#[from] StatsError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),
}

pub type AnimResult<T> = Result<T, AnimError>;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("unsupported encoding `{0}`: only .gif is supported")]
    UnsupportedEncoding(String),

    #[error("cannot export an unbounded frame sequence")]
    UnboundedSequence,

    #[error("no frames to export")]
    EmptySequence,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("drawing error: {0}")]
    Drawing(String),

    #[error("animation error: {0}")]
    Animation(#[from] AnimError),
}

impl From<RenderError> for ExportError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::Drawing(msg) => ExportError::Drawing(msg),
            other => ExportError::Animation(AnimError::Render(other)),
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
