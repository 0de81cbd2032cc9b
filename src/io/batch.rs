//! Batch calculation over CSV rows of meter readings.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use thiserror::Error;

use crate::bill::calculator::BillCalculator;
use crate::bill::locale::Locale;
use crate::bill::types::{BillResult, RawInput};
use crate::bill::validate::ValidationError;

/// One input row. Every column except `previous` and `current` may be
/// omitted or left blank.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BatchRow {
    /// Caller-chosen row identifier; blank rows are numbered from 1.
    pub id: String,
    pub previous: String,
    pub current: String,
    pub months: String,
    /// Bill at the institutional rate.
    pub institution: Option<bool>,
    pub category: String,
    pub exchange_rate: String,
}

impl From<&BatchRow> for RawInput {
    fn from(row: &BatchRow) -> Self {
        Self {
            previous: row.previous.clone(),
            current: row.current.clone(),
            months: row.months.clone(),
            institution_mode: row.institution.unwrap_or(false),
            category: row.category.clone(),
            exchange_rate: row.exchange_rate.clone(),
        }
    }
}

/// A CSV record as read: either a decoded row or the reason it could not be decoded.
pub type DecodedRow = Result<BatchRow, csv::Error>;

/// Why a batch row produced no bill.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowError {
    /// The CSV record could not be decoded into a row.
    #[error("cannot decode row: {0}")]
    Decode(String),
    /// The row decoded but failed input validation.
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl RowError {
    /// Stable machine-readable identifier.
    pub fn kind(&self) -> &'static str {
        match self {
            RowError::Decode(_) => "decode_error",
            RowError::Invalid(e) => e.kind(),
        }
    }

    /// Human-readable message; validation messages follow `locale`.
    pub fn message(&self, locale: Locale) -> String {
        match self {
            RowError::Decode(_) => self.to_string(),
            RowError::Invalid(e) => e.message(locale),
        }
    }
}

/// Calculation outcome for one batch row.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutcome {
    pub id: String,
    pub outcome: Result<BillResult, RowError>,
}

/// Reads batch rows from CSV with a header line.
///
/// Each record is decoded independently, so a malformed record yields an
/// `Err` entry without hiding the records around it.
///
/// # Arguments
///
/// * `reader` - CSV source whose first line is the header
pub fn read_batch(reader: impl Read) -> Vec<DecodedRow> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);
    rdr.deserialize().collect()
}

/// Reads batch rows from a CSV file.
///
/// # Arguments
///
/// * `path` - CSV file to read
///
/// # Errors
///
/// Returns an `io::Error` if the file cannot be opened.
pub fn read_batch_file(path: &Path) -> io::Result<Vec<DecodedRow>> {
    let file = File::open(path)?;
    Ok(read_batch(io::BufReader::new(file)))
}

/// Calculates every row independently; a failed row never stops the batch.
///
/// # Arguments
///
/// * `calculator` - Calculator bound to the active tariff
/// * `rows` - Records from [`read_batch`], in input order
pub fn run_batch(calculator: &BillCalculator, rows: &[DecodedRow]) -> Vec<BatchOutcome> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            let number = (i + 1).to_string();
            let (id, outcome) = match row {
                Ok(row) => {
                    let id = if row.id.is_empty() {
                        number
                    } else {
                        row.id.clone()
                    };
                    let outcome = calculator
                        .calculate(&RawInput::from(row))
                        .map_err(RowError::from);
                    (id, outcome)
                }
                Err(e) => (number, Err(RowError::Decode(e.to_string()))),
            };
            if let Err(e) = &outcome {
                log::debug!("batch row {id} rejected: {}", e.kind());
            }
            BatchOutcome { id, outcome }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
id,previous,current,months,institution,category,exchange_rate
flat-1,1000,1700,2,false,,14500
office,0,500,,true,premium,
bad,500,100,2,,,
";

    fn decoded(csv: &str) -> Vec<BatchRow> {
        read_batch(csv.as_bytes())
            .into_iter()
            .map(Result::unwrap)
            .collect()
    }

    #[test]
    fn reads_rows_with_blank_cells() {
        let rows = decoded(SAMPLE);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "flat-1");
        assert_eq!(rows[1].institution, Some(true));
        assert_eq!(rows[1].months, "");
        assert_eq!(rows[2].institution, None);
    }

    #[test]
    fn missing_optional_columns_default() {
        let rows = decoded("previous,current\n0,300\n");
        assert_eq!(rows.len(), 1);
        assert!(rows[0].id.is_empty());
        assert_eq!(rows[0].institution, None);
    }

    #[test]
    fn failed_row_does_not_stop_batch() {
        let rows = read_batch(SAMPLE.as_bytes());
        let out = run_batch(&BillCalculator::default(), &rows);
        assert_eq!(out.len(), 3);

        let flat = out[0].outcome.as_ref().unwrap();
        assert_eq!(flat.total_local, 740_000.0);
        assert!(flat.total_foreign.is_some());

        let office = out[1].outcome.as_ref().unwrap();
        assert_eq!(office.total_local, 900_000.0);
        assert_eq!(office.months, 2.0);

        assert_eq!(
            out[2].outcome,
            Err(RowError::Invalid(ValidationError::ReadingOrder))
        );
    }

    #[test]
    fn undecodable_row_is_isolated() {
        let csv = "\
id,previous,current,institution
ok,0,300,false
bad,0,300,yes
ok2,0,10,
";
        let rows = read_batch(csv.as_bytes());
        assert_eq!(rows.len(), 3);
        assert!(rows[1].is_err());

        let out = run_batch(&BillCalculator::default(), &rows);
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].id, "ok");
        assert_eq!(out[0].outcome.as_ref().unwrap().total_local, 180_000.0);

        assert_eq!(out[1].id, "2");
        let err = out[1].outcome.as_ref().unwrap_err();
        assert_eq!(err.kind(), "decode_error");
        assert!(err.message(Locale::En).starts_with("cannot decode row"));

        assert_eq!(out[2].id, "ok2");
        assert_eq!(out[2].outcome.as_ref().unwrap().total_local, 6_000.0);
    }

    #[test]
    fn blank_ids_are_numbered() {
        let rows = read_batch("previous,current\n0,1\n0,2\n".as_bytes());
        let out = run_batch(&BillCalculator::default(), &rows);
        assert_eq!(out[0].id, "1");
        assert_eq!(out[1].id, "2");
    }

    #[test]
    fn validation_error_messages_follow_locale() {
        let err = RowError::from(ValidationError::NegativeReading);
        assert_eq!(err.kind(), "negative_reading");
        assert_eq!(err.message(Locale::Ar), "لا يمكن أن تكون القراءات سالبة.");
    }
}
