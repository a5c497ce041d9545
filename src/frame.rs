use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;
use ndarray::Array1;
use polars::prelude::*;
use serde_json::Value;

use crate::error::PredictError;
use crate::records::FEATURE_COLUMNS;

lazy_static! {
    static ref EXPECTED_COLUMNS: HashSet<&'static str> =
        FEATURE_COLUMNS.iter().copied().collect();
}

/// Build a one-row feature table from the record's own keys. Nothing is
/// filtered or validated here; the schema check and the numeric coercion run
/// as separate stages so each failure reports its own error class.
pub fn record_frame(record: &Value) -> Result<DataFrame, PredictError> {
    let object = record
        .as_object()
        .ok_or_else(|| PredictError::Parse("expected a JSON object".to_string()))?;

    let mut columns = Vec::with_capacity(object.len());
    for (name, value) in object {
        columns.push(value_series(name, value));
    }
    Ok(DataFrame::new(columns)?)
}

fn value_series(name: &str, value: &Value) -> Series {
    match value {
        Value::Number(n) => Series::new(name, vec![n.as_f64()]),
        Value::String(s) => Series::new(name, vec![s.as_str()]),
        Value::Bool(b) => Series::new(name, vec![*b]),
        Value::Null => Series::new(name, vec![None::<f64>]),
        // Arrays and nested objects keep their JSON text and fail the
        // numeric cast later, so the schema check still runs first.
        other => Series::new(name, vec![other.to_string()]),
    }
}

/// Set difference between the fitted schema and the table's columns.
pub fn check_required_columns(df: &DataFrame) -> Result<(), PredictError> {
    let present: HashSet<&str> = df.get_column_names().into_iter().collect();

    let missing: Vec<String> = FEATURE_COLUMNS
        .iter()
        .filter(|name| !present.contains(*name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(PredictError::MissingColumns(missing));
    }

    let extra: Vec<&str> = df
        .get_column_names()
        .into_iter()
        .filter(|name| !EXPECTED_COLUMNS.contains(name))
        .collect();
    if !extra.is_empty() {
        debug!("ignoring fields not in the fitted schema: {:?}", extra);
    }
    Ok(())
}

/// Cast every column to Float64. A cast failure or a null left behind by the
/// cast aborts the run with the offending column name.
pub fn coerce_numeric(mut df: DataFrame) -> Result<DataFrame, PredictError> {
    let names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(String::from)
        .collect();

    for name in names {
        let casted = df
            .column(&name)?
            .cast(&DataType::Float64)
            .map_err(|_| PredictError::TypeCoercion {
                column: name.clone(),
            })?;
        if casted.null_count() > 0 {
            return Err(PredictError::TypeCoercion { column: name });
        }
        df.with_column(casted)?;
    }
    Ok(df)
}

/// Extract the row in the column order the artifacts were fitted on.
pub fn feature_vector(df: &DataFrame) -> Result<Array1<f64>, PredictError> {
    let features = df.select(FEATURE_COLUMNS)?;

    let mut values = Vec::with_capacity(FEATURE_COLUMNS.len());
    for name in FEATURE_COLUMNS {
        let value = features
            .column(name)?
            .f64()?
            .get(0)
            .ok_or_else(|| PredictError::TypeCoercion {
                column: name.to_string(),
            })?;
        values.push(value);
    }
    Ok(Array1::from(values))
}
