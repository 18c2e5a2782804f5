use crate::records::RawResult;

/// Number of leading records that precede the first computed value.
///
/// When no record ever warms up, every record counts as warm-up.
pub fn warmup_periods<R: RawResult>(results: &[R]) -> usize {
    results
        .iter()
        .position(R::is_warm)
        .unwrap_or(results.len())
}

/// Returns a copy of `results` without its leading warm-up records.
pub fn remove_warmup_periods<R: RawResult>(results: &[R]) -> Vec<R> {
    let skip = warmup_periods(results);
    results[skip..].to_vec()
}

/// Returns a copy of `results` without records that carry no values at all.
pub fn condense<R: RawResult>(results: &[R]) -> Vec<R> {
    results.iter().filter(|r| r.has_values()).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::SmaRaw;
    use chrono::{Duration, TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn series(values: &[Option<Decimal>]) -> Vec<SmaRaw> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(idx, sma)| SmaRaw {
                date: start + Duration::days(idx as i64),
                sma: *sma,
            })
            .collect()
    }

    #[test]
    fn strips_until_first_value() {
        let results = series(&[None, None, Some(dec!(101.25)), None, Some(dec!(102.5))]);
        assert_eq!(warmup_periods(&results), 2);
        let trimmed = remove_warmup_periods(&results);
        assert_eq!(trimmed, results[2..].to_vec());
    }

    #[test]
    fn strips_everything_when_never_warm() {
        let results = series(&[None, None]);
        assert!(remove_warmup_periods(&results).is_empty());
        assert!(remove_warmup_periods::<SmaRaw>(&[]).is_empty());
    }

    #[test]
    fn condense_drops_interior_gaps() {
        let results = series(&[None, Some(dec!(101.25)), None, Some(dec!(102.5))]);
        let condensed = condense(&results);
        assert_eq!(condensed.len(), 2);
        assert!(condensed.iter().all(|r| r.sma.is_some()));
    }
}
