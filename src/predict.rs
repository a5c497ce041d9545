use std::fmt;
use std::path::Path;

use log::debug;
use serde_json::Value;

use crate::artifacts::Artifacts;
use crate::error::PredictError;
use crate::frame;

/// One classified record: the binary label and the positive-class
/// probability. `Display` renders the line the parent process parses.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub label: i32,
    pub probability: f64,
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.label == 1 { "Asthma" } else { "No Asthma" };
        write!(f, "{},{:.4}", label, self.probability)
    }
}

/// Run one prediction: load the fitted artifacts, validate the record,
/// scale it and score it. Stage order follows the process contract — the
/// artifacts load before the argument is inspected, and the schema check
/// runs before any value is coerced.
pub async fn run(model_dir: &Path, record: Option<&str>) -> Result<Prediction, PredictError> {
    let artifacts = Artifacts::load(model_dir).await?;

    let raw = record.ok_or(PredictError::Usage)?;
    let value: Value = serde_json::from_str(raw)?;

    let df = frame::record_frame(&value)?;
    frame::check_required_columns(&df)?;
    let df = frame::coerce_numeric(df)?;
    let x = frame::feature_vector(&df)?;
    debug!("feature vector: {:?}", x);

    let scaled = artifacts.scaler.transform(&x)?;
    let label = artifacts.classifier.predict(&scaled)?;
    let probability = artifacts.classifier.predict_proba(&scaled)?;

    Ok(Prediction { label, probability })
}
