//! Wilder-smoothed Average True Range, the volatility input of the Chandelier Exit.

use rust_decimal::Decimal;
use stock_core::Quote;

use crate::core::{decimal_from_usize, EngineError, Indicator};

/// Greatest of the bar's range and its distance from the previous close.
///
/// Without a previous close the true range is just `high - low`.
pub fn true_range(quote: &Quote, prev_close: Option<Decimal>) -> Decimal {
    let range = quote.high - quote.low;
    match prev_close {
        Some(close) => range
            .max((quote.high - close).abs())
            .max((quote.low - close).abs()),
        None => range,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    /// Accumulating true ranges for the seed average.
    Seeding { sum: Decimal, seen: usize },
    /// Seeded; holds the latest smoothed value.
    Smoothing(Decimal),
}

impl Default for Phase {
    fn default() -> Self {
        Phase::Seeding {
            sum: Decimal::ZERO,
            seen: 0,
        }
    }
}

/// Average True Range: a simple mean of the first `periods` true ranges,
/// then `(prev * (periods - 1) + tr) / periods`.
#[derive(Debug, Clone)]
pub struct Atr {
    periods: usize,
    divisor: Decimal,
    prev_close: Option<Decimal>,
    phase: Phase,
}

impl Atr {
    /// Creates an ATR over `periods` bars.
    pub fn new(periods: usize) -> Result<Self, EngineError> {
        if periods == 0 {
            return Err(EngineError::invalid_period("ATR", periods));
        }
        Ok(Self {
            periods,
            divisor: decimal_from_usize(periods),
            prev_close: None,
            phase: Phase::default(),
        })
    }
}

impl Indicator for Atr {
    type Input = Quote;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        let tr = true_range(&input, self.prev_close.replace(input.close));

        self.phase = match self.phase {
            Phase::Smoothing(prev) => {
                Phase::Smoothing((prev * (self.divisor - Decimal::ONE) + tr) / self.divisor)
            }
            Phase::Seeding { sum, seen } if seen + 1 == self.periods => {
                Phase::Smoothing((sum + tr) / self.divisor)
            }
            Phase::Seeding { sum, seen } => Phase::Seeding {
                sum: sum + tr,
                seen: seen + 1,
            },
        };

        match self.phase {
            Phase::Smoothing(atr) => Some(atr),
            Phase::Seeding { .. } => None,
        }
    }

    fn reset(&mut self) {
        self.prev_close = None;
        self.phase = Phase::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use stock_test_utils::quote;

    #[test]
    fn first_bar_uses_its_own_range() {
        let bar = quote(0, "101", "104", "99.5", "103", "900");
        assert_eq!(true_range(&bar, None), dec!(4.5));
    }

    #[test]
    fn gap_up_widens_true_range() {
        let bar = quote(1, "110", "112", "109", "111", "900");
        assert_eq!(true_range(&bar, Some(dec!(100))), dec!(12));
        let gap_down = quote(1, "90", "92", "88", "91", "900");
        assert_eq!(true_range(&gap_down, Some(dec!(100))), dec!(12));
    }

    #[test]
    fn first_value_averages_true_ranges() {
        let mut atr = Atr::new(3).unwrap();
        assert_eq!(atr.next(quote(0, "20", "21", "19", "20", "1")), None);
        // previous close 20 -> range 23 - 20
        assert_eq!(atr.next(quote(1, "21", "23", "21", "22", "1")), None);
        assert_eq!(
            atr.next(quote(2, "22", "23", "22", "22.5", "1")),
            Some(dec!(2))
        );
    }

    #[test]
    fn wilder_smoothing_after_seed() {
        let mut atr = Atr::new(2).unwrap();
        atr.next(quote(0, "50", "52", "48", "50", "1"));
        assert_eq!(atr.next(quote(1, "50", "52", "48", "50", "1")), Some(dec!(4)));
        // true range 10 from the prior close of 50
        assert_eq!(atr.next(quote(2, "58", "60", "57", "59", "1")), Some(dec!(7)));
        atr.reset();
        assert_eq!(atr.next(quote(3, "59", "60", "58", "59", "1")), None);
    }
}
