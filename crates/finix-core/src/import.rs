//! CSV transaction import
//!
//! Expected header: `date,amount,category,currency,description`.
//! `currency` and `description` may be omitted or left empty.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;

/// One CSV row before validation
#[derive(Debug, Deserialize)]
struct CsvRow {
    date: String,
    amount: String,
    category: String,
    #[serde(default)]
    currency: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Parse transactions from CSV data
///
/// The first invalid row aborts the import; its line number is in the error.
pub fn parse_transactions_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut transactions = Vec::new();

    for (index, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // Line 1 is the header
        let line = index + 2;
        let row = result?;

        let mut tx = Transaction::new(
            parse_amount(&row.amount).map_err(|e| at_line(line, e))?,
            &row.category,
            parse_date(&row.date).map_err(|e| at_line(line, e))?,
        );
        if let Some(currency) = row.currency.as_deref().filter(|c| !c.is_empty()) {
            tx = tx.with_currency(currency);
        }
        if let Some(description) = row.description.as_deref().filter(|d| !d.is_empty()) {
            tx = tx.with_description(description);
        }

        tx.validate().map_err(|e| at_line(line, e))?;
        transactions.push(tx);
    }

    debug!(count = transactions.len(), "Parsed transactions CSV");
    Ok(transactions)
}

/// Parse transactions from a CSV file
pub fn import_transactions_file(path: &Path) -> Result<Vec<Transaction>> {
    let file = File::open(path)?;
    parse_transactions_csv(file)
}

fn at_line(line: usize, err: Error) -> Error {
    match err {
        Error::InvalidData(msg) => Error::InvalidData(format!("Line {}: {}", line, msg)),
        other => other,
    }
}

/// Parse a date string in various common formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::InvalidData(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> Result<Decimal> {
    let cleaned = s.trim().replace(['$', ',', ' '], "");

    Decimal::from_str(&cleaned)
        .map_err(|_| Error::InvalidData(format!("Unable to parse amount: {}", s)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15").unwrap(), expected);
        assert_eq!(parse_date("01/15/2024").unwrap(), expected);
        assert!(parse_date("15th January").is_err());
    }

    #[test]
    fn test_parse_amount_is_exact() {
        assert_eq!(parse_amount("$1,234.56").unwrap(), dec!(1234.56));
        assert_eq!(parse_amount("0.10").unwrap(), dec!(0.10));
        assert!(parse_amount("twelve").is_err());
    }

    #[test]
    fn test_parse_csv() {
        let csv = "date,amount,category,currency,description
2024-01-05,100.00,Food,usd,Weekly groceries
2024-01-10,50,Entertainment,,
2024-02-01,\"1,200.00\",Rent,EUR,February rent";

        let transactions = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(transactions.len(), 3);
        assert_eq!(transactions[0].currency, "USD");
        assert_eq!(transactions[0].description.as_deref(), Some("Weekly groceries"));
        assert_eq!(transactions[1].currency, "USD");
        assert_eq!(transactions[1].description, None);
        assert_eq!(transactions[2].amount, dec!(1200));
        assert_eq!(transactions[2].currency, "EUR");
    }

    #[test]
    fn test_optional_columns_may_be_missing() {
        let csv = "date,amount,category\n2024-03-01,12.50,Coffee\n";
        let transactions = parse_transactions_csv(csv.as_bytes()).unwrap();
        assert_eq!(transactions[0].category, "Coffee");
        assert_eq!(transactions[0].currency, "USD");
    }

    #[test]
    fn test_invalid_row_reports_line() {
        let csv = "date,amount,category\n2024-03-01,12.50,Coffee\n2024-03-02,-4.00,Coffee\n";
        let err = parse_transactions_csv(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("Line 3"), "{}", err);
    }

    #[test]
    fn test_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.csv");
        std::fs::write(&path, "date,amount,category\n2024-03-01,9.99,Books\n").unwrap();
        assert_eq!(import_transactions_file(&path).unwrap().len(), 1);
    }
}
