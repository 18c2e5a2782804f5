//! Quote fixtures shared by the workspace's test suites.

use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use stock_core::Quote;

/// Date of the first fixture quote.
pub fn start_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0)
        .single()
        .expect("valid fixture start date")
}

/// Parses a decimal literal, panicking on malformed fixtures.
pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).expect("valid decimal literal")
}

/// Builds one daily quote `day` days after [`start_date`].
pub fn quote(day: i64, open: &str, high: &str, low: &str, close: &str, volume: &str) -> Quote {
    Quote::new(
        start_date() + Duration::days(day),
        dec(open),
        dec(high),
        dec(low),
        dec(close),
        dec(volume),
    )
}

/// Daily quotes whose open, high and low all equal the given closes.
pub fn quotes_from_closes(closes: &[&str]) -> Vec<Quote> {
    closes
        .iter()
        .enumerate()
        .map(|(day, close)| quote(day as i64, close, close, close, close, "1000"))
        .collect()
}

/// A deterministic, gently trending daily series of `count` quotes.
///
/// Prices stay well above zero and every bar has a non-empty range.
pub fn sample_quotes(count: usize) -> Vec<Quote> {
    let mut quotes = Vec::with_capacity(count);
    let mut prev_close = Decimal::from(200);
    for idx in 0..count {
        let step = i64::try_from(idx).unwrap_or(i64::MAX);
        // cycle of seven moves: up, up, down, up, down, down, up
        let delta = match step % 7 {
            0 | 1 | 3 | 6 => Decimal::new(175, 2),
            _ => Decimal::new(-125, 2),
        };
        let open = prev_close;
        let close = open + delta;
        let spread = Decimal::new(50 + (step % 5) * 25, 2);
        let high = open.max(close) + spread;
        let low = open.min(close) - spread;
        let volume = Decimal::from(10_000 + (step % 11) * 1_250);
        quotes.push(Quote::new(
            start_date() + Duration::days(step),
            open,
            high,
            low,
            close,
            volume,
        ));
        prev_close = close;
    }
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_series_is_deterministic_and_ordered() {
        let first = sample_quotes(40);
        assert_eq!(first, sample_quotes(40));
        assert!(first.windows(2).all(|w| w[0].date < w[1].date));
        assert!(first.iter().all(|q| q.low < q.high && q.low > Decimal::ZERO));
    }
}
