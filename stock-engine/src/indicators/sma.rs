//! Simple Moving Average (SMA) and its extended error statistics.

use std::collections::VecDeque;
use std::marker::PhantomData;

use rust_decimal::Decimal;
use stock_core::Quote;

use crate::core::{decimal_from_usize, validate_lookback, EngineError, Indicator, Input};
use crate::records::{SmaExtendedRaw, SmaRaw};

/// Computes the arithmetic mean over a rolling window.
#[derive(Debug, Clone)]
pub struct Sma<I = Decimal> {
    period: usize,
    divisor: Decimal,
    window: VecDeque<Decimal>,
    marker: PhantomData<I>,
}

impl<I> Sma<I>
where
    I: Input,
{
    /// Creates a new SMA with the provided period.
    pub fn new(period: usize) -> Result<Self, EngineError> {
        if period == 0 {
            return Err(EngineError::invalid_period("SMA", period));
        }

        Ok(Self {
            period,
            divisor: decimal_from_usize(period),
            window: VecDeque::with_capacity(period),
            marker: PhantomData,
        })
    }

    fn window(&self) -> impl Iterator<Item = Decimal> + '_ {
        self.window.iter().copied()
    }
}

impl<I> Indicator for Sma<I>
where
    I: Input,
{
    type Input = I;
    type Output = Decimal;

    fn next(&mut self, input: Self::Input) -> Option<Self::Output> {
        self.window.push_back(input.value());
        if self.window.len() > self.period {
            self.window.pop_front();
        }

        if self.window.len() == self.period {
            Some(self.window().sum::<Decimal>() / self.divisor)
        } else {
            None
        }
    }

    fn reset(&mut self) {
        self.window.clear();
    }
}

/// Computes one SMA record per quote, averaging closing prices.
pub fn compute(quotes: &[Quote], lookback_periods: usize) -> Result<Vec<SmaRaw>, EngineError> {
    validate_lookback("SMA", lookback_periods, quotes.len())?;

    let mut sma = Sma::<Quote>::new(lookback_periods)?;
    Ok(quotes
        .iter()
        .map(|quote| SmaRaw {
            date: quote.date,
            sma: sma.next(quote.clone()),
        })
        .collect())
}

/// Computes SMA records enriched with MAD, MSE and MAPE of the window closes.
///
/// MAPE stays empty for any window containing a zero close.
pub fn compute_extended(
    quotes: &[Quote],
    lookback_periods: usize,
) -> Result<Vec<SmaExtendedRaw>, EngineError> {
    validate_lookback("SMA Extended", lookback_periods, quotes.len())?;

    let mut sma = Sma::<Decimal>::new(lookback_periods)?;
    let mut results = Vec::with_capacity(quotes.len());
    for quote in quotes {
        let mut record = SmaExtendedRaw {
            date: quote.date,
            sma: None,
            mad: None,
            mse: None,
            mape: None,
        };

        if let Some(mean) = sma.next(quote.close) {
            let mut abs_dev = Decimal::ZERO;
            let mut sq_err = Decimal::ZERO;
            let mut pct_err = Some(Decimal::ZERO);
            for close in sma.window() {
                let diff = (close - mean).abs();
                abs_dev += diff;
                sq_err += diff * diff;
                pct_err = match pct_err {
                    Some(acc) if !close.is_zero() => Some(acc + diff / close),
                    _ => None,
                };
            }
            record.sma = Some(mean);
            record.mad = Some(abs_dev / sma.divisor);
            record.mse = Some(sq_err / sma.divisor);
            record.mape = pct_err.map(|acc| acc / sma.divisor);
        }
        results.push(record);
    }
    Ok(results)
}
