//! Chandelier Exit.

use rust_decimal::Decimal;
use stock_core::Quote;
use stock_engine::indicators::chandelier::{
    self, DEFAULT_LOOKBACK_PERIODS, DEFAULT_MULTIPLIER,
};
use stock_engine::{ChandelierParams, ChandelierRaw, ChandelierType};
use tracing::debug;

use crate::error::IndicatorResult;
use crate::marshal::marshal_quotes;
use crate::results::{decimal_accessors, indicator_record, ResultsCollection};

pub const CHANDELIER_DEFAULT_LOOKBACK: usize = DEFAULT_LOOKBACK_PERIODS;
pub const CHANDELIER_DEFAULT_MULTIPLIER: Decimal = DEFAULT_MULTIPLIER;

/// One period of Chandelier Exit output.
#[derive(Clone, Debug, PartialEq)]
pub struct ChandelierResult {
    raw: ChandelierRaw,
}

impl ChandelierResult {
    decimal_accessors! {
        /// Trailing stop level; absent until the lookback window is full.
        chandelier_exit => set_chandelier_exit;
    }
}

indicator_record!(ChandelierResult, ChandelierRaw);

pub type ChandelierResults = ResultsCollection<ChandelierResult>;

/// Long Chandelier Exit: highest high over `lookback_periods` minus `multiplier` ATRs.
pub fn get_chandelier<'a, I>(
    quotes: I,
    lookback_periods: usize,
    multiplier: Decimal,
) -> IndicatorResult<ChandelierResults>
where
    I: IntoIterator<Item = &'a Quote>,
{
    get_chandelier_with(
        quotes,
        &ChandelierParams {
            lookback_periods,
            multiplier,
            chandelier_type: ChandelierType::Long,
        },
    )
}

/// Long Chandelier Exit with a 22 period lookback and a 3 ATR multiplier.
pub fn get_chandelier_default<'a, I>(quotes: I) -> IndicatorResult<ChandelierResults>
where
    I: IntoIterator<Item = &'a Quote>,
{
    get_chandelier(
        quotes,
        CHANDELIER_DEFAULT_LOOKBACK,
        CHANDELIER_DEFAULT_MULTIPLIER,
    )
}

/// Chandelier Exit for either side of the trade.
pub fn get_chandelier_with<'a, I>(
    quotes: I,
    params: &ChandelierParams,
) -> IndicatorResult<ChandelierResults>
where
    I: IntoIterator<Item = &'a Quote>,
{
    let quotes = marshal_quotes(quotes);
    debug!(
        indicator = "chandelier",
        quotes = quotes.len(),
        lookback_periods = params.lookback_periods,
        multiplier = %params.multiplier,
        chandelier_type = ?params.chandelier_type,
        "computing indicator"
    );
    let raw = chandelier::compute(&quotes, params)?;
    Ok(ResultsCollection::from_raw(raw))
}
