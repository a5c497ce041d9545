use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

/// Failure classes for a prediction run. Every variant is terminal: the
/// process prints the message to stderr and exits non-zero, nothing is
/// written to stdout.
#[derive(Error, Debug)]
pub enum PredictError {
    #[error("usage: predict-asthma [--model-dir DIR] '<json-record>'")]
    Usage,
    #[error("failed to load artifact {path:?}: {message}")]
    ArtifactLoad { path: PathBuf, message: String },
    #[error("invalid record: {0}")]
    Parse(String),
    #[error("missing columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("column {column:?} is not numeric")]
    TypeCoercion { column: String },
    #[error("inference failed: {0}")]
    Inference(String),
}

impl From<serde_json::Error> for PredictError {
    fn from(e: serde_json::Error) -> Self {
        PredictError::Parse(e.to_string())
    }
}

impl From<PolarsError> for PredictError {
    fn from(e: PolarsError) -> Self {
        PredictError::Inference(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message_names_fields() {
        let err = PredictError::MissingColumns(vec!["Age".to_string(), "BMI".to_string()]);
        assert_eq!(err.to_string(), "missing columns: Age, BMI");
    }

    #[test]
    fn json_errors_map_to_parse() {
        let json_err = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let err = PredictError::from(json_err);
        assert!(matches!(err, PredictError::Parse(_)));
        assert!(err.to_string().starts_with("invalid record:"));
    }
}
