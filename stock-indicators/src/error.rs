use stock_engine::EngineError;
use thiserror::Error;

/// Result alias for indicator operations.
pub type IndicatorResult<T> = Result<T, IndicatorError>;

/// Error type surfaced by the indicator functions and result collections.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum IndicatorError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0} results collection is empty")]
    EmptyCollection(&'static str),
    /// Raised by the computation engine; message preserved verbatim.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
