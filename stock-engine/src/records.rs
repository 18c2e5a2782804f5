//! Raw per-period records produced by the batch `compute` functions.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Behaviour shared by every raw result record.
pub trait RawResult: Clone {
    /// Display name of the indicator that produced the record.
    const INDICATOR: &'static str;

    /// Date of the quote this record belongs to.
    fn date(&self) -> DateTime<Utc>;

    /// Whether the indicator's primary value has been computed for this period.
    fn is_warm(&self) -> bool;

    /// Whether any numeric field of the record is populated.
    fn has_values(&self) -> bool;
}

/// Simple moving average for one period.
#[derive(Clone, Debug, PartialEq)]
pub struct SmaRaw {
    /// Period timestamp.
    pub date: DateTime<Utc>,
    /// Mean of the trailing window of closes.
    pub sma: Option<Decimal>,
}

impl RawResult for SmaRaw {
    const INDICATOR: &'static str = "SMA";

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn is_warm(&self) -> bool {
        self.sma.is_some()
    }

    fn has_values(&self) -> bool {
        self.sma.is_some()
    }
}

/// Simple moving average with error statistics for one period.
#[derive(Clone, Debug, PartialEq)]
pub struct SmaExtendedRaw {
    /// Period timestamp.
    pub date: DateTime<Utc>,
    /// Mean of the trailing window of closes.
    pub sma: Option<Decimal>,
    /// Mean absolute deviation of the window closes from the SMA.
    pub mad: Option<Decimal>,
    /// Mean squared error of the window closes against the SMA.
    pub mse: Option<Decimal>,
    /// Mean absolute percentage error of the window closes against the SMA.
    pub mape: Option<Decimal>,
}

impl RawResult for SmaExtendedRaw {
    const INDICATOR: &'static str = "SMA Extended";

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn is_warm(&self) -> bool {
        self.sma.is_some()
    }

    fn has_values(&self) -> bool {
        self.sma.is_some() || self.mad.is_some() || self.mse.is_some() || self.mape.is_some()
    }
}

/// Chandelier Exit stop level for one period.
#[derive(Clone, Debug, PartialEq)]
pub struct ChandelierRaw {
    /// Period timestamp.
    pub date: DateTime<Utc>,
    /// Trailing stop level.
    pub chandelier_exit: Option<Decimal>,
}

impl RawResult for ChandelierRaw {
    const INDICATOR: &'static str = "Chandelier Exit";

    fn date(&self) -> DateTime<Utc> {
        self.date
    }

    fn is_warm(&self) -> bool {
        self.chandelier_exit.is_some()
    }

    fn has_values(&self) -> bool {
        self.chandelier_exit.is_some()
    }
}
