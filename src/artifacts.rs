use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::debug;
use ndarray::{aview1, Array1};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::PredictError;

pub const SCALER_FILE: &str = "scaler.json";
pub const CLASSIFIER_FILE: &str = "asthma_model.json";
pub const ENCODERS_FILE: &str = "label_encoders.json";

/// Standardization parameters fitted by the external training job.
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn transform(&self, x: &Array1<f64>) -> Result<Array1<f64>, PredictError> {
        if x.len() != self.mean.len() || x.len() != self.scale.len() {
            return Err(PredictError::Inference(format!(
                "scaler was fitted on {} features, record has {}",
                self.mean.len(),
                x.len()
            )));
        }
        Ok((x - &aview1(&self.mean)) / &aview1(&self.scale))
    }
}

/// Fitted binary decision function. The training job exports the decision
/// weights; the positive class is 1.
#[derive(Debug, Clone, Deserialize)]
pub struct Classifier {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl Classifier {
    fn decision(&self, x: &Array1<f64>) -> Result<f64, PredictError> {
        if x.len() != self.weights.len() {
            return Err(PredictError::Inference(format!(
                "classifier was fitted on {} features, record has {}",
                self.weights.len(),
                x.len()
            )));
        }
        Ok(aview1(&self.weights).dot(x) + self.intercept)
    }

    /// Label in {0, 1}. A decision score of exactly zero stays on the
    /// negative side, matching the training library.
    pub fn predict(&self, x: &Array1<f64>) -> Result<i32, PredictError> {
        Ok(if self.decision(x)? > 0.0 { 1 } else { 0 })
    }

    /// Probability of the positive class.
    pub fn predict_proba(&self, x: &Array1<f64>) -> Result<f64, PredictError> {
        let z = self.decision(x)?;
        Ok(1.0 / (1.0 + (-z).exp()))
    }
}

/// Fitted categorical mapping for one column. `classes` is ordered the way
/// the trainer fitted it; a value encodes to its index.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    pub fn transform(&self, value: &str) -> Option<f64> {
        self.classes
            .iter()
            .position(|class| class == value)
            .map(|index| index as f64)
    }
}

pub type LabelEncoders = HashMap<String, LabelEncoder>;

/// The three artifacts a prediction run needs. All are loaded up front;
/// failure to load any of them is fatal.
#[derive(Debug)]
pub struct Artifacts {
    pub scaler: StandardScaler,
    pub classifier: Classifier,
    pub encoders: LabelEncoders,
}

impl Artifacts {
    pub async fn load(dir: &Path) -> Result<Self, PredictError> {
        let (scaler, classifier, encoders) = tokio::try_join!(
            load_artifact::<StandardScaler>(dir.join(SCALER_FILE)),
            load_artifact::<Classifier>(dir.join(CLASSIFIER_FILE)),
            load_artifact::<LabelEncoders>(dir.join(ENCODERS_FILE)),
        )?;
        debug!(
            "loaded artifacts from {:?}: {} scaled features, {} weights, {} encoders",
            dir,
            scaler.mean.len(),
            classifier.weights.len(),
            encoders.len()
        );
        Ok(Self {
            scaler,
            classifier,
            encoders,
        })
    }
}

async fn load_artifact<T: DeserializeOwned>(path: PathBuf) -> Result<T, PredictError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| PredictError::ArtifactLoad {
            path: path.clone(),
            message: e.to_string(),
        })?;
    serde_json::from_slice(&bytes).map_err(|e| PredictError::ArtifactLoad {
        path,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use ndarray::array;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn scaler_centers_and_scales() {
        let scaler = StandardScaler {
            mean: vec![10.0, 0.0],
            scale: vec![2.0, 1.0],
        };
        let scaled = scaler.transform(&array![14.0, 3.0]).unwrap();
        assert_eq!(scaled, array![2.0, 3.0]);
    }

    #[test]
    fn scaler_rejects_wrong_width() {
        let scaler = StandardScaler {
            mean: vec![0.0, 0.0],
            scale: vec![1.0, 1.0],
        };
        let err = scaler.transform(&array![1.0]).unwrap_err();
        assert!(matches!(err, PredictError::Inference(_)));
    }

    #[test]
    fn zero_score_predicts_the_negative_class() {
        let model = Classifier {
            weights: vec![0.0, 0.0],
            intercept: 0.0,
        };
        let x = array![1.0, -1.0];
        assert_eq!(model.predict(&x).unwrap(), 0);
        assert_eq!(model.predict_proba(&x).unwrap(), 0.5);
    }

    #[test]
    fn positive_score_predicts_asthma() {
        let model = Classifier {
            weights: vec![1.0, 0.0],
            intercept: 1.0,
        };
        let x = array![2.0, 5.0];
        assert_eq!(model.predict(&x).unwrap(), 1);
        let proba = model.predict_proba(&x).unwrap();
        assert!((proba - 1.0 / (1.0 + (-3.0f64).exp())).abs() < 1e-12);
    }

    #[test]
    fn encoder_maps_classes_to_their_index() {
        let encoder = LabelEncoder {
            classes: vec!["Female".to_string(), "Male".to_string()],
        };
        assert_eq!(encoder.transform("Male"), Some(1.0));
        assert_eq!(encoder.transform("Female"), Some(0.0));
        assert_eq!(encoder.transform("Unknown"), None);
    }

    #[tokio::test]
    async fn load_fails_on_missing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let err = Artifacts::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { .. }));
    }

    #[tokio::test]
    async fn load_fails_on_malformed_artifact() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SCALER_FILE), b"{not json").unwrap();
        let err = Artifacts::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, PredictError::ArtifactLoad { .. }));
    }
}
