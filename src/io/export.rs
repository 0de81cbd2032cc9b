//! CSV export for bill outcomes.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::bill::locale::Locale;

use super::batch::BatchOutcome;

/// Column header for CSV bill export.
const HEADER: &str = "id,status,consumption_kwh,months,avg_kwh_per_month,\
                      tier1_kwh,tier2_kwh,total_local,total_foreign,category,error";

/// Exports bill outcomes to a CSV file at the given path.
///
/// # Arguments
///
/// * `outcomes` - Per-row bill outcomes, in output order
/// * `path` - Output file path
/// * `locale` - Language for category labels and error messages
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(outcomes: &[BatchOutcome], path: &Path, locale: Locale) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(outcomes, buf, locale)
}

/// Writes bill outcomes as CSV to any writer.
///
/// Successful rows fill the numeric columns and leave `error` blank; failed
/// rows carry the error kind in `status` and the localized message in
/// `error`. Produces identical output for identical inputs.
///
/// # Arguments
///
/// * `outcomes` - Per-row bill outcomes, in output order
/// * `writer` - Destination implementing `Write`
/// * `locale` - Language for category labels and error messages
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(outcomes: &[BatchOutcome], writer: impl Write, locale: Locale) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for o in outcomes {
        match &o.outcome {
            Ok(bill) => wtr.write_record(&[
                o.id.clone(),
                "ok".to_string(),
                bill.consumption_kwh.to_string(),
                bill.months.to_string(),
                format!("{:.4}", bill.avg_kwh_per_month),
                bill.tier1_kwh.to_string(),
                bill.tier2_kwh.to_string(),
                format!("{:.2}", bill.total_local),
                bill.total_foreign
                    .map(|v| format!("{v:.4}"))
                    .unwrap_or_default(),
                bill.category_label(locale),
                String::new(),
            ])?,
            Err(e) => {
                let mut record = vec![o.id.clone(), e.kind().to_string()];
                record.extend(std::iter::repeat_n(String::new(), 8));
                record.push(e.message(locale));
                wtr.write_record(&record)?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bill::calculator::BillCalculator;
    use crate::bill::types::RawInput;
    use crate::bill::validate::ValidationError;
    use crate::io::batch::RowError;

    fn outcomes() -> Vec<BatchOutcome> {
        let calc = BillCalculator::default();
        let ok = calc.calculate(&RawInput {
            previous: "1000".into(),
            current: "1700".into(),
            exchange_rate: "14500".into(),
            ..RawInput::default()
        });
        vec![
            BatchOutcome {
                id: "a".into(),
                outcome: ok.map_err(RowError::from),
            },
            BatchOutcome {
                id: "b".into(),
                outcome: Err(RowError::from(ValidationError::NegativeReading)),
            },
            BatchOutcome {
                id: "c".into(),
                outcome: Err(RowError::Decode("field 3: not a bool".into())),
            },
        ]
    }

    fn render(locale: Locale) -> String {
        let mut buf = Vec::new();
        write_csv(&outcomes(), &mut buf, locale).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_matches_schema() {
        let out = render(Locale::En);
        assert_eq!(
            out.lines().next(),
            Some(
                "id,status,consumption_kwh,months,avg_kwh_per_month,\
                 tier1_kwh,tier2_kwh,total_local,total_foreign,category,error"
            )
        );
    }

    #[test]
    fn success_and_failure_rows() {
        let out = render(Locale::En);
        let mut rdr = csv::ReaderBuilder::new().from_reader(out.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().map(Result::unwrap).collect();
        assert_eq!(rows.len(), 3);

        let ok = &rows[0];
        assert_eq!(ok.len(), 11);
        assert_eq!(&ok[1], "ok");
        assert_eq!(&ok[2], "700");
        assert_eq!(&ok[7], "740000.00");
        assert_eq!(&ok[8], "51.0345");
        assert_eq!(&ok[9], "Household - above 300 kWh");
        assert_eq!(&ok[10], "");

        let bad = &rows[1];
        assert_eq!(bad.len(), 11);
        assert_eq!(&bad[1], "negative_reading");
        assert_eq!(&bad[7], "");
        assert_eq!(&bad[10], "Meter readings cannot be negative.");

        let undecodable = &rows[2];
        assert_eq!(undecodable.len(), 11);
        assert_eq!(&undecodable[1], "decode_error");
        assert_eq!(&undecodable[10], "cannot decode row: field 3: not a bool");
    }

    #[test]
    fn localized_messages() {
        let out = render(Locale::Ar);
        assert!(out.contains("سالبة"));
    }

    #[test]
    fn deterministic_output() {
        assert_eq!(render(Locale::En), render(Locale::En));
    }
}
