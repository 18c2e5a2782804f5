//! Simple Moving Average and its extended variant.

use rust_decimal::Decimal;
use stock_core::Quote;
use stock_engine::indicators::sma;
use stock_engine::{SmaExtendedRaw, SmaRaw};
use tracing::debug;

use crate::error::IndicatorResult;
use crate::marshal::marshal_quotes;
use crate::results::{decimal_accessors, indicator_record, ResultsCollection};

/// Read/write access to the moving-average value shared by the SMA result types.
pub trait SmaFields {
    fn sma(&self) -> Option<Decimal>;

    fn set_sma(&mut self, value: Option<Decimal>);
}

/// One period of SMA output.
#[derive(Clone, Debug, PartialEq)]
pub struct SmaResult {
    raw: SmaRaw,
}

impl SmaResult {
    decimal_accessors! {
        /// Simple moving average of the trailing closes; absent during warm-up.
        sma => set_sma;
    }
}

indicator_record!(SmaResult, SmaRaw);

impl SmaFields for SmaResult {
    fn sma(&self) -> Option<Decimal> {
        SmaResult::sma(self)
    }

    fn set_sma(&mut self, value: Option<Decimal>) {
        SmaResult::set_sma(self, value)
    }
}

/// One period of SMA output with error statistics.
#[derive(Clone, Debug, PartialEq)]
pub struct SmaExtendedResult {
    raw: SmaExtendedRaw,
}

impl SmaExtendedResult {
    decimal_accessors! {
        /// Simple moving average of the trailing closes; absent during warm-up.
        sma => set_sma;
        /// Mean absolute deviation of the window closes from the SMA.
        mad => set_mad;
        /// Mean squared error of the window closes against the SMA.
        mse => set_mse;
        /// Mean absolute percentage error; absent when a window close is zero.
        mape => set_mape;
    }
}

indicator_record!(SmaExtendedResult, SmaExtendedRaw);

impl SmaFields for SmaExtendedResult {
    fn sma(&self) -> Option<Decimal> {
        SmaExtendedResult::sma(self)
    }

    fn set_sma(&mut self, value: Option<Decimal>) {
        SmaExtendedResult::set_sma(self, value)
    }
}

pub type SmaResults = ResultsCollection<SmaResult>;
pub type SmaExtendedResults = ResultsCollection<SmaExtendedResult>;

/// Simple moving average of closing prices over `lookback_periods`.
///
/// Returns one result per quote; the first `lookback_periods - 1` have no value.
pub fn get_sma<'a, I>(quotes: I, lookback_periods: usize) -> IndicatorResult<SmaResults>
where
    I: IntoIterator<Item = &'a Quote>,
{
    let quotes = marshal_quotes(quotes);
    debug!(
        indicator = "sma",
        quotes = quotes.len(),
        lookback_periods,
        "computing indicator"
    );
    let raw = sma::compute(&quotes, lookback_periods)?;
    Ok(ResultsCollection::from_raw(raw))
}

/// SMA plus mean absolute deviation, mean squared error and mean absolute
/// percentage error over the same window.
pub fn get_sma_extended<'a, I>(
    quotes: I,
    lookback_periods: usize,
) -> IndicatorResult<SmaExtendedResults>
where
    I: IntoIterator<Item = &'a Quote>,
{
    let quotes = marshal_quotes(quotes);
    debug!(
        indicator = "sma_extended",
        quotes = quotes.len(),
        lookback_periods,
        "computing indicator"
    );
    let raw = sma::compute_extended(&quotes, lookback_periods)?;
    Ok(ResultsCollection::from_raw(raw))
}
