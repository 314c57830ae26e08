use arrow::array::{Array, AsArray};
use arrow::datatypes::Float64Type;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

// ─────────────────────────────────────────────────────────────────────────────
// Column Extractors (the decode schema fixes labels to Utf8, amounts to Float64)
// ─────────────────────────────────────────────────────────────────────────────

fn schema_mismatch(name: &str, expected: &str) -> ArrowError {
    ArrowError::SchemaError(format!("column {name} was not decoded as {expected}"))
}

pub fn col_strings<'a>(
    batch: &'a RecordBatch,
    name: &str,
) -> Result<Vec<Option<&'a str>>, ArrowError> {
    let a = batch
        .column_by_name(name)
        .and_then(|c| c.as_string_opt::<i32>())
        .ok_or_else(|| schema_mismatch(name, "Utf8"))?;
    Ok((0..a.len()).map(|i| a.is_valid(i).then(|| a.value(i))).collect())
}

pub fn col_f64(batch: &RecordBatch, name: &str) -> Result<Vec<Option<f64>>, ArrowError> {
    let a = batch
        .column_by_name(name)
        .and_then(|c| c.as_primitive_opt::<Float64Type>())
        .ok_or_else(|| schema_mismatch(name, "Float64"))?;
    Ok((0..a.len()).map(|i| a.is_valid(i).then(|| a.value(i))).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{ArrayRef, Float64Array, StringArray};
    use std::sync::Arc;

    fn batch() -> RecordBatch {
        RecordBatch::try_from_iter(vec![
            (
                "region",
                Arc::new(StringArray::from(vec![Some("East"), None])) as ArrayRef,
            ),
            (
                "units",
                Arc::new(Float64Array::from(vec![None, Some(4.5)])) as ArrayRef,
            ),
        ])
        .unwrap()
    }

    #[test]
    fn extractors_keep_nulls() {
        let b = batch();
        assert_eq!(col_strings(&b, "region").unwrap(), vec![Some("East"), None]);
        assert_eq!(col_f64(&b, "units").unwrap(), vec![None, Some(4.5)]);
    }

    #[test]
    fn wrong_type_or_missing_column_is_schema_error() {
        let b = batch();
        assert!(matches!(col_f64(&b, "region"), Err(ArrowError::SchemaError(_))));
        assert!(matches!(col_strings(&b, "units"), Err(ArrowError::SchemaError(_))));
        assert!(matches!(col_strings(&b, "product"), Err(ArrowError::SchemaError(_))));
    }
}
