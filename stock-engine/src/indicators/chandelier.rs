//! Chandelier Exit trailing stop.

use std::collections::VecDeque;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stock_core::Quote;

use crate::core::{validate_lookback, EngineError, Indicator};
use crate::indicators::atr::Atr;
use crate::records::ChandelierRaw;

/// Default lookback window for the Chandelier Exit.
pub const DEFAULT_LOOKBACK_PERIODS: usize = 22;
/// Default ATR multiplier for the Chandelier Exit.
pub const DEFAULT_MULTIPLIER: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Side of the trade the exit protects.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChandelierType {
    /// Stop below the highest high, for long positions.
    #[default]
    Long,
    /// Stop above the lowest low, for short positions.
    Short,
}

/// Parameters of the Chandelier Exit.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct ChandelierParams {
    /// Window used for both the ATR and the high/low extremes.
    pub lookback_periods: usize,
    /// ATR multiple subtracted from (long) or added to (short) the extreme.
    pub multiplier: Decimal,
    /// Long or short variant.
    pub chandelier_type: ChandelierType,
}

impl Default for ChandelierParams {
    fn default() -> Self {
        Self {
            lookback_periods: DEFAULT_LOOKBACK_PERIODS,
            multiplier: DEFAULT_MULTIPLIER,
            chandelier_type: ChandelierType::Long,
        }
    }
}

impl ChandelierParams {
    /// Validates the parameters without looking at any quotes.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.lookback_periods == 0 {
            return Err(EngineError::invalid_period(
                "Chandelier Exit",
                self.lookback_periods,
            ));
        }
        if self.multiplier <= Decimal::ZERO {
            return Err(EngineError::invalid_parameter(
                "Chandelier Exit",
                "multiplier",
                self.multiplier,
            ));
        }
        Ok(())
    }
}

/// Streaming Chandelier Exit.
#[derive(Debug, Clone)]
pub struct Chandelier {
    params: ChandelierParams,
    atr: Atr,
    highs: VecDeque<Decimal>,
    lows: VecDeque<Decimal>,
}

impl Chandelier {
    /// Creates a new Chandelier Exit indicator.
    pub fn new(params: ChandelierParams) -> Result<Self, EngineError> {
        params.validate()?;
        Ok(Self {
            params,
            atr: Atr::new(params.lookback_periods)?,
            highs: VecDeque::with_capacity(params.lookback_periods),
            lows: VecDeque::with_capacity(params.lookback_periods),
        })
    }
}

impl Indicator for Chandelier {
    type Input = Quote;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.highs.push_back(input.high);
        self.lows.push_back(input.low);
        if self.highs.len() > self.params.lookback_periods {
            self.highs.pop_front();
            self.lows.pop_front();
        }

        let atr = self.atr.next(input)?;
        let offset = self.params.multiplier * atr;
        match self.params.chandelier_type {
            ChandelierType::Long => {
                let highest = self.highs.iter().copied().max()?;
                Some(highest - offset)
            }
            ChandelierType::Short => {
                let lowest = self.lows.iter().copied().min()?;
                Some(lowest + offset)
            }
        }
    }

    fn reset(&mut self) {
        self.atr.reset();
        self.highs.clear();
        self.lows.clear();
    }
}

/// Computes one Chandelier Exit record per quote.
pub fn compute(
    quotes: &[Quote],
    params: &ChandelierParams,
) -> Result<Vec<ChandelierRaw>, EngineError> {
    params.validate()?;
    validate_lookback("Chandelier Exit", params.lookback_periods, quotes.len())?;

    let mut chandelier = Chandelier::new(*params)?;
    Ok(quotes
        .iter()
        .map(|quote| ChandelierRaw {
            date: quote.date,
            chandelier_exit: chandelier.next(quote.clone()),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stock_test_utils::quote;

    fn bars() -> Vec<Quote> {
        vec![
            quote(0, "10", "12", "8", "10", "100"),
            quote(1, "10", "14", "10", "12", "100"),
            quote(2, "12", "13", "9", "11", "100"),
            quote(3, "11", "16", "12", "15", "100"),
        ]
    }

    fn params(chandelier_type: ChandelierType) -> ChandelierParams {
        ChandelierParams {
            lookback_periods: 3,
            multiplier: dec!(2),
            chandelier_type,
        }
    }

    #[test]
    fn long_exit_trails_highest_high() {
        let results = compute(&bars(), &params(ChandelierType::Long)).unwrap();
        assert_eq!(results.len(), 4);
        assert!(results[0].chandelier_exit.is_none());
        assert!(results[1].chandelier_exit.is_none());
        // true ranges 4, 4, 4 -> ATR 4; highest high 14
        assert_eq!(results[2].chandelier_exit, Some(dec!(6)));
        // true range 5 -> ATR 13/3; highest high 16
        let atr = (dec!(4) * dec!(2) + dec!(5)) / dec!(3);
        assert_eq!(results[3].chandelier_exit, Some(dec!(16) - dec!(2) * atr));
    }

    #[test]
    fn short_exit_trails_lowest_low() {
        let results = compute(&bars(), &params(ChandelierType::Short)).unwrap();
        assert_eq!(results[2].chandelier_exit, Some(dec!(16)));
    }

    #[test]
    fn reset_mid_series_rewarms_from_scratch() {
        let mut chandelier = Chandelier::new(params(ChandelierType::Long)).unwrap();
        let series = bars();
        for bar in &series[..3] {
            chandelier.next(bar.clone());
        }
        assert!(chandelier.next(series[3].clone()).is_some());

        chandelier.reset();
        assert_eq!(chandelier.next(series[0].clone()), None);
        assert_eq!(chandelier.next(series[1].clone()), None);
        // same value as the first pass: no stale highs or ATR survive
        assert_eq!(chandelier.next(series[2].clone()), Some(dec!(6)));
    }

    #[test]
    fn rejects_invalid_parameters() {
        let quotes = bars();
        let zero = ChandelierParams {
            lookback_periods: 0,
            ..ChandelierParams::default()
        };
        assert!(matches!(
            compute(&quotes, &zero),
            Err(EngineError::InvalidPeriod { .. })
        ));

        for multiplier in [dec!(0), dec!(-1)] {
            let bad = ChandelierParams {
                lookback_periods: 3,
                multiplier,
                ..ChandelierParams::default()
            };
            assert!(matches!(
                compute(&quotes, &bad),
                Err(EngineError::InvalidParameter { parameter: "multiplier", .. })
            ));
        }

        assert!(matches!(
            compute(&quotes, &ChandelierParams::default()),
            Err(EngineError::InsufficientQuotes { required: 22, .. })
        ));
    }

    #[test]
    fn default_multiplier_is_three() {
        assert_eq!(DEFAULT_MULTIPLIER, dec!(3));
    }
}
