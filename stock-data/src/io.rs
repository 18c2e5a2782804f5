//! CSV quote files with a `date,open,high,low,close,volume` header.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use csv::StringRecord;
use rust_decimal::Decimal;
use stock_core::Quote;
use tracing::{debug, info};

const COLUMNS: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

/// Reads quotes from a CSV file, returning them sorted by date.
pub fn read_quotes(path: impl AsRef<Path>) -> Result<Vec<Quote>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let quotes = read_quotes_from_reader(BufReader::new(file))
        .with_context(|| format!("failed to read quotes from {}", path.display()))?;
    info!(path = %path.display(), rows = quotes.len(), "loaded quote history");
    Ok(quotes)
}

/// Reads quotes from any CSV source. Column order is taken from the header.
pub fn read_quotes_from_reader<R: Read>(source: R) -> Result<Vec<Quote>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(source);
    let headers = reader.headers().context("missing CSV header")?.clone();
    let columns = ColumnIndex::from_headers(&headers)?;

    let mut quotes = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let row = idx + 1;
        let record = record.with_context(|| format!("failed to read record {row}"))?;
        let quote = columns
            .parse(&record)
            .with_context(|| format!("invalid quote on row {row}"))?;
        if quote.high < quote.low {
            bail!(
                "row {row} failed validation: high {} < low {}",
                quote.high,
                quote.low
            );
        }
        if quote.volume < Decimal::ZERO {
            bail!("row {row} failed validation: negative volume {}", quote.volume);
        }
        quotes.push(quote);
    }

    quotes.sort_by_key(|quote| quote.date);
    if let Some(pair) = quotes.windows(2).find(|pair| pair[0].date == pair[1].date) {
        bail!("duplicate quote date {}", pair[0].date);
    }
    debug!(rows = quotes.len(), "parsed quote rows");
    Ok(quotes)
}

/// Writes quotes to a CSV file, replacing any existing content.
pub fn write_quotes(path: impl AsRef<Path>, quotes: &[Quote]) -> Result<()> {
    let path = path.as_ref();
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    write_quotes_to_writer(file, quotes)
        .with_context(|| format!("failed to write quotes to {}", path.display()))?;
    debug!(path = %path.display(), rows = quotes.len(), "wrote quote history");
    Ok(())
}

pub fn write_quotes_to_writer<W: Write>(sink: W, quotes: &[Quote]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(COLUMNS)?;
    for quote in quotes {
        writer.write_record([
            quote.date.to_rfc3339(),
            quote.open.to_string(),
            quote.high.to_string(),
            quote.low.to_string(),
            quote.close.to_string(),
            quote.volume.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Positions of the quote columns within a CSV header.
struct ColumnIndex {
    positions: HashMap<&'static str, usize>,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = HashMap::new();
        for column in COLUMNS {
            let position = headers
                .iter()
                .position(|header| header.eq_ignore_ascii_case(column))
                .ok_or_else(|| anyhow!("CSV header is missing the '{column}' column"))?;
            positions.insert(column, position);
        }
        Ok(Self { positions })
    }

    fn field<'r>(&self, record: &'r StringRecord, column: &'static str) -> Result<&'r str> {
        let position = self.positions[column];
        let raw = record
            .get(position)
            .ok_or_else(|| anyhow!("row missing {column} column {position}"))?;
        if raw.is_empty() {
            bail!("{column} column {position} is empty");
        }
        Ok(raw)
    }

    fn decimal(&self, record: &StringRecord, column: &'static str) -> Result<Decimal> {
        let raw = self.field(record, column)?;
        Decimal::from_str(raw).map_err(|err| anyhow!("invalid {column} value '{raw}': {err}"))
    }

    fn parse(&self, record: &StringRecord) -> Result<Quote> {
        Ok(Quote::new(
            parse_date(self.field(record, "date")?)?,
            self.decimal(record, "open")?,
            self.decimal(record, "high")?,
            self.decimal(record, "low")?,
            self.decimal(record, "close")?,
            self.decimal(record, "volume")?,
        ))
    }
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{raw}'"))?;
    date.and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| anyhow!("invalid date '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stock_test_utils::{dec, sample_quotes, start_date};
    use tempfile::tempdir;

    #[test]
    fn file_round_trip_preserves_quotes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("quotes.csv");
        let quotes = sample_quotes(12);
        write_quotes(&path, &quotes).unwrap();
        assert_eq!(read_quotes(&path).unwrap(), quotes);
    }

    #[test]
    fn accepts_bare_dates_and_any_column_order() {
        let csv = "Close,Date,Open,High,Low,Volume\n\
                   11.5,2024-01-03,10,12,9.5,700\n\
                   10.25,2024-01-02,10,11,9,500\n";
        let quotes = read_quotes_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].date, start_date());
        assert_eq!(quotes[0].close, dec("10.25"));
        assert_eq!(quotes[1].high, dec("12"));
    }

    #[test]
    fn rejects_inverted_range() {
        let csv = "date,open,high,low,close,volume\n2024-01-02,10,9,11,10,1\n";
        let err = read_quotes_from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("high 9 < low 11"), "{err}");
    }

    #[test]
    fn rejects_duplicates_and_missing_columns() {
        let dupes = "date,open,high,low,close,volume\n\
                     2024-01-02,10,11,9,10,1\n\
                     2024-01-02,10,11,9,10,1\n";
        assert!(read_quotes_from_reader(dupes.as_bytes()).is_err());

        let missing = "date,open,high,low,close\n2024-01-02,10,11,9,10\n";
        let err = read_quotes_from_reader(missing.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("'volume'"), "{err}");
    }
}
