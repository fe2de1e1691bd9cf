use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while validating, deriving, or rendering a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    /// Empty series, x/y length mismatch, non-increasing x, or non-finite values.
    #[error("invalid series: {0}")]
    InvalidSeries(String),

    /// A ratio transform hit a zero divisor at `index` of the input.
    #[error("division by zero at index {index}")]
    DivisionByZero { index: usize },

    /// Creating the output directory or writing the image failed.
    #[error("i/o error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The drawing backend reported an error.
    #[error("render error: {0}")]
    Render(String),

    /// A manifest or data table could not be read or written.
    #[error("manifest error: {0}")]
    Manifest(String),
}

impl ChartError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ChartError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ChartError>;
