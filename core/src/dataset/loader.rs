//! CSV decoding for the sales dataset.
//!
//! The header is read first so every missing required column can be reported
//! at once; the body is then decoded with an explicit schema (labels as Utf8,
//! amounts as Float64). Any bad row fails the whole load.

use std::io::{Cursor, Read};
use std::sync::Arc;

use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::NaiveDate;

use super::column_helpers::{col_f64, col_strings};
use super::{DatasetError, LoadOptions, SalesRecord};
use crate::context::intern;

pub const REQUIRED_COLUMNS: [&str; 5] = ["date", "region", "product", "units", "revenue"];

const AMOUNT_COLUMNS: [&str; 2] = ["units", "revenue"];

pub(super) fn read_records<R: Read>(
    mut reader: R,
    options: &LoadOptions,
) -> Result<Vec<SalesRecord>, DatasetError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    if buf.iter().all(u8::is_ascii_whitespace) {
        return Err(DatasetError::MissingColumns {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        });
    }

    let (header, _) = Format::default()
        .with_header(true)
        .infer_schema(Cursor::new(&buf), Some(0))?;
    check_required_columns(&header)?;

    let csv = ReaderBuilder::new(Arc::new(decode_schema(&header)))
        .with_header(true)
        .build(Cursor::new(&buf))?;

    let mut records = Vec::new();
    for batch in csv {
        let batch = batch?;
        append_batch(&batch, options, &mut records)?;
    }
    Ok(records)
}

fn check_required_columns(header: &Schema) -> Result<(), DatasetError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|name| header.index_of(name).is_err())
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns { columns: missing })
    }
}

/// Amount columns decode as Float64, everything else stays text. Columns
/// outside the required set are carried through and ignored.
fn decode_schema(header: &Schema) -> Schema {
    let fields: Vec<Field> = header
        .fields()
        .iter()
        .map(|f| {
            let data_type = if AMOUNT_COLUMNS.contains(&f.name().as_str()) {
                DataType::Float64
            } else {
                DataType::Utf8
            };
            Field::new(f.name(), data_type, true)
        })
        .collect();
    Schema::new(fields)
}

fn append_batch(
    batch: &RecordBatch,
    options: &LoadOptions,
    records: &mut Vec<SalesRecord>,
) -> Result<(), DatasetError> {
    let dates = col_strings(batch, "date")?;
    let regions = col_strings(batch, "region")?;
    let products = col_strings(batch, "product")?;
    let units = col_f64(batch, "units")?;
    let revenue = col_f64(batch, "revenue")?;

    records.reserve(batch.num_rows());
    for i in 0..batch.num_rows() {
        // 1-based data row, header excluded
        let row = records.len() + 1;

        let date_str = label(dates[i], row, "date")?;
        let date = NaiveDate::parse_from_str(date_str, &options.date_format).map_err(|source| {
            DatasetError::InvalidDate {
                row,
                value: date_str.to_string(),
                format: options.date_format.clone(),
                source,
            }
        })?;

        records.push(SalesRecord {
            date,
            region: intern(label(regions[i], row, "region")?),
            product: intern(label(products[i], row, "product")?),
            units: amount(units[i], row, "units")?,
            revenue: amount(revenue[i], row, "revenue")?,
        });
    }
    Ok(())
}

fn label<'a>(value: Option<&'a str>, row: usize, column: &'static str) -> Result<&'a str, DatasetError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(DatasetError::MissingValue { row, column }),
    }
}

fn amount(value: Option<f64>, row: usize, column: &'static str) -> Result<f64, DatasetError> {
    match value {
        None => Err(DatasetError::MissingValue { row, column }),
        Some(v) if v.is_finite() && v >= 0.0 => Ok(v),
        Some(v) => Err(DatasetError::InvalidAmount { row, column, value: v }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_rejects_non_finite_values() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                amount(Some(bad), 3, "units"),
                Err(DatasetError::InvalidAmount { row: 3, column: "units", .. })
            ));
        }
        assert!(matches!(
            amount(None, 1, "revenue"),
            Err(DatasetError::MissingValue { row: 1, column: "revenue" })
        ));
        assert_eq!(amount(Some(0.0), 1, "units").unwrap(), 0.0);
    }
}
