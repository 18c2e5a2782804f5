//! Generic results collection shared by every indicator.

use std::ops::{Index, IndexMut};
use std::slice;

use chrono::{DateTime, Utc};
use stock_engine::{condense, remove_warmup_periods, RawResult};
use tracing::debug;

use crate::error::{IndicatorError, IndicatorResult};

/// A per-period result wrapper that owns exactly one raw engine record.
pub trait IndicatorRecord: Clone {
    /// Engine record type wrapped by this result.
    type Raw: RawResult;

    fn from_raw(raw: Self::Raw) -> Self;

    fn raw(&self) -> &Self::Raw;

    /// Date of the quote this result belongs to.
    fn date(&self) -> DateTime<Utc> {
        self.raw().date()
    }
}

/// Ordered results of one indicator run, index-aligned with the input quotes.
///
/// Operations that drop periods return a new collection and leave `self` untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsCollection<T> {
    items: Vec<T>,
}

impl<T: IndicatorRecord> ResultsCollection<T> {
    /// Wraps raw engine records, preserving their order.
    pub fn from_raw(raw: Vec<T::Raw>) -> Self {
        Self {
            items: raw.into_iter().map(T::from_raw).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.items.iter_mut()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// First result dated exactly `date`.
    pub fn find(&self, date: DateTime<Utc>) -> Option<&T> {
        self.items.iter().find(|item| item.date() == date)
    }

    /// Drops leading warm-up periods into a new collection.
    ///
    /// With `Some(count)` exactly `count` leading periods are removed; a count
    /// larger than the collection is rejected. With `None` the engine decides
    /// how many periods this indicator needs to warm up, which requires at
    /// least one result to be present.
    pub fn remove_warmup_periods(&self, remove_periods: Option<usize>) -> IndicatorResult<Self> {
        let indicator = <T::Raw as RawResult>::INDICATOR;
        let retained = match remove_periods {
            Some(count) => {
                if count > self.items.len() {
                    return Err(IndicatorError::InvalidArgument(format!(
                        "cannot remove {count} warm-up periods from {} {indicator} results",
                        self.items.len()
                    )));
                }
                self.items[count..].to_vec()
            }
            None => {
                if self.items.is_empty() {
                    return Err(IndicatorError::EmptyCollection(indicator));
                }
                let raw = self.raw_records();
                remove_warmup_periods(&raw)
                    .into_iter()
                    .map(T::from_raw)
                    .collect()
            }
        };

        debug!(
            indicator,
            removed = self.items.len() - retained.len(),
            remaining = retained.len(),
            "removed warm-up periods"
        );
        Ok(Self { items: retained })
    }

    /// New collection without periods whose values are all absent.
    pub fn condense(&self) -> Self {
        let raw = self.raw_records();
        Self::from_raw(condense(&raw))
    }

    fn raw_records(&self) -> Vec<T::Raw> {
        self.items.iter().map(|item| item.raw().clone()).collect()
    }
}

impl<T> Default for ResultsCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> From<Vec<T>> for ResultsCollection<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ResultsCollection<T> {
    fn from_iter<It: IntoIterator<Item = T>>(iter: It) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Index<usize> for ResultsCollection<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl<T> IndexMut<usize> for ResultsCollection<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.items[index]
    }
}

impl<T> IntoIterator for ResultsCollection<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a ResultsCollection<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Generates a getter and setter pair over an `Option<Decimal>` field of `self.raw`.
macro_rules! decimal_accessors {
    ($($(#[$meta:meta])* $field:ident => $setter:ident;)+) => {
        $(
            $(#[$meta])*
            pub fn $field(&self) -> Option<rust_decimal::Decimal> {
                self.raw.$field
            }

            #[doc = concat!("Stores `", stringify!($field), "`; `None` clears it.")]
            pub fn $setter(&mut self, value: Option<rust_decimal::Decimal>) {
                self.raw.$field = value;
            }
        )+
    };
}

pub(crate) use decimal_accessors;

/// Implements [`IndicatorRecord`] for a wrapper struct with a single `raw` field.
macro_rules! indicator_record {
    ($wrapper:ty, $raw:ty) => {
        impl $crate::results::IndicatorRecord for $wrapper {
            type Raw = $raw;

            fn from_raw(raw: Self::Raw) -> Self {
                Self { raw }
            }

            fn raw(&self) -> &Self::Raw {
                &self.raw
            }
        }
    };
}

pub(crate) use indicator_record;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use stock_engine::SmaRaw;

    use crate::sma::SmaResult;

    fn collection(values: &[Option<Decimal>]) -> ResultsCollection<SmaResult> {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        ResultsCollection::from_raw(
            values
                .iter()
                .enumerate()
                .map(|(idx, sma)| SmaRaw {
                    date: start + Duration::days(idx as i64),
                    sma: *sma,
                })
                .collect(),
        )
    }

    #[test]
    fn explicit_removal_is_a_suffix() {
        let results = collection(&[None, Some(dec!(1.5)), Some(dec!(2.5)), Some(dec!(3.5))]);
        let trimmed = results.remove_warmup_periods(Some(2)).unwrap();
        assert_eq!(trimmed.as_slice(), &results.as_slice()[2..]);
        assert_eq!(results.len(), 4);

        let same = results.remove_warmup_periods(Some(0)).unwrap();
        assert_eq!(same, results);

        let all = results.remove_warmup_periods(Some(4)).unwrap();
        assert!(all.is_empty());
    }

    #[test]
    fn explicit_removal_rejects_oversized_count() {
        let results = collection(&[None, Some(dec!(1.5))]);
        let err = results.remove_warmup_periods(Some(3)).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidArgument(_)));
    }

    #[test]
    fn automatic_removal_requires_results() {
        let empty: ResultsCollection<SmaResult> = ResultsCollection::default();
        assert_eq!(
            empty.remove_warmup_periods(None).unwrap_err(),
            IndicatorError::EmptyCollection("SMA")
        );
        assert!(empty.remove_warmup_periods(Some(0)).unwrap().is_empty());
    }

    #[test]
    fn automatic_removal_uses_first_value() {
        let results = collection(&[None, None, Some(dec!(5.5)), None]);
        let trimmed = results.remove_warmup_periods(None).unwrap();
        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed[0].date(), results[2].date());
    }

    #[test]
    fn condense_and_find() {
        let results = collection(&[None, Some(dec!(1.5)), None, Some(dec!(3.5))]);
        let condensed = results.condense();
        assert_eq!(condensed.len(), 2);

        let date = results[3].date();
        assert_eq!(results.find(date), Some(&results[3]));
        assert!(results.find(date + Duration::days(30)).is_none());
    }
}
