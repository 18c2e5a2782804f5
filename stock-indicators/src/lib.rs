#![doc = include_str!("../README.md")]

//! Technical indicators over [`Quote`] sequences with decimal-typed results.

pub mod chandelier;
mod error;
mod marshal;
pub mod results;
pub mod sma;

pub use chandelier::{
    get_chandelier, get_chandelier_default, get_chandelier_with, ChandelierResult,
    ChandelierResults, CHANDELIER_DEFAULT_LOOKBACK, CHANDELIER_DEFAULT_MULTIPLIER,
};
pub use error::{IndicatorError, IndicatorResult};
pub use results::{IndicatorRecord, ResultsCollection};
pub use sma::{
    get_sma, get_sma_extended, SmaExtendedResult, SmaExtendedResults, SmaFields, SmaResult,
    SmaResults,
};
pub use stock_core::Quote;
pub use stock_engine::{ChandelierParams, ChandelierType, EngineError};
