//! Traits shared by every indicator plus the engine error type.

use std::fmt::Display;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use stock_core::Quote;
use thiserror::Error;

/// Value that can be fed into single-series indicators.
pub trait Input {
    /// Returns the numeric value the indicator consumes.
    fn value(&self) -> Decimal;
}

impl Input for Decimal {
    fn value(&self) -> Decimal {
        *self
    }
}

/// Quotes feed their closing price.
impl Input for Quote {
    fn value(&self) -> Decimal {
        self.close
    }
}

/// Converts a period count into a decimal divisor.
pub(crate) fn decimal_from_usize(value: usize) -> Decimal {
    Decimal::from_usize(value).unwrap_or(Decimal::MAX)
}

/// Incremental indicator fed one period at a time.
pub trait Indicator {
    /// Per-period input.
    type Input;
    /// Value produced once the indicator is warmed up.
    type Output;

    /// Consumes the next input, returning a value once enough history has accumulated.
    fn next(&mut self, input: Self::Input) -> Option<Self::Output>;

    /// Clears all accumulated state.
    fn reset(&mut self);
}

/// Errors raised while validating indicator inputs.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    /// The lookback window must hold at least one period.
    #[error("lookback periods must be greater than 0 for {indicator} (got {period})")]
    InvalidPeriod {
        /// Indicator that rejected the period.
        indicator: &'static str,
        /// Offending value.
        period: usize,
    },
    /// A non-period parameter was out of range.
    #[error("invalid {parameter} for {indicator}: {value}")]
    InvalidParameter {
        /// Indicator that rejected the parameter.
        indicator: &'static str,
        /// Parameter name.
        parameter: &'static str,
        /// Offending value, rendered for display.
        value: String,
    },
    /// Not enough quotes for the requested lookback window.
    #[error(
        "insufficient quotes provided for {indicator}: got {provided} periods, at least {required} are required"
    )]
    InsufficientQuotes {
        /// Indicator that rejected the input.
        indicator: &'static str,
        /// Number of quotes provided.
        provided: usize,
        /// Minimum number of quotes required.
        required: usize,
    },
}

impl EngineError {
    /// Convenience constructor for [`EngineError::InvalidPeriod`].
    pub fn invalid_period(indicator: &'static str, period: usize) -> Self {
        Self::InvalidPeriod { indicator, period }
    }

    /// Convenience constructor for [`EngineError::InvalidParameter`].
    pub fn invalid_parameter(
        indicator: &'static str,
        parameter: &'static str,
        value: impl Display,
    ) -> Self {
        Self::InvalidParameter {
            indicator,
            parameter,
            value: value.to_string(),
        }
    }

    /// Convenience constructor for [`EngineError::InsufficientQuotes`].
    pub fn insufficient_quotes(indicator: &'static str, provided: usize, required: usize) -> Self {
        Self::InsufficientQuotes {
            indicator,
            provided,
            required,
        }
    }
}

/// Rejects a zero lookback and inputs shorter than the window.
pub(crate) fn validate_lookback(
    indicator: &'static str,
    lookback_periods: usize,
    provided: usize,
) -> Result<(), EngineError> {
    if lookback_periods == 0 {
        return Err(EngineError::invalid_period(indicator, lookback_periods));
    }
    if provided < lookback_periods {
        return Err(EngineError::insufficient_quotes(
            indicator,
            provided,
            lookback_periods,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn messages_name_the_indicator() {
        let err = EngineError::insufficient_quotes("SMA", 3, 10);
        assert_eq!(
            err.to_string(),
            "insufficient quotes provided for SMA: got 3 periods, at least 10 are required"
        );
        let err = EngineError::invalid_parameter("Chandelier Exit", "multiplier", dec!(-1.5));
        assert_eq!(err.to_string(), "invalid multiplier for Chandelier Exit: -1.5");
    }

    #[test]
    fn lookback_validation_order() {
        assert_eq!(
            validate_lookback("SMA", 0, 0),
            Err(EngineError::invalid_period("SMA", 0))
        );
        assert!(matches!(
            validate_lookback("SMA", 5, 4),
            Err(EngineError::InsufficientQuotes { required: 5, .. })
        ));
        assert!(validate_lookback("SMA", 5, 5).is_ok());
    }

    #[test]
    fn period_counts_become_exact_divisors() {
        assert_eq!(decimal_from_usize(22), dec!(22));
        assert_eq!(decimal_from_usize(0), Decimal::ZERO);
    }
}
