//! Serialized demand model artifact.
//!
//! The training pipeline exports the fitted regression as a JSON document:
//! the ordered feature list it was trained with, the coefficients, and the
//! evaluation metrics recorded at training time. Inference here is plain
//! linear regression; anything fancier ships as a new artifact format.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use replenish_core::{DemandModel, FeatureVector, ModelOutput};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Model-level evaluation metrics recorded when the artifact was trained.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModelMetrics {
    /// Mean absolute error on the holdout set
    pub mae: f64,
    /// Root mean squared error on the holdout set
    pub rmse: f64,
    /// Coefficient of determination, if recorded
    #[serde(default)]
    pub r2: Option<f64>,
}

/// A trained linear demand model plus its companion feature list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub name: String,
    #[serde(default)]
    pub trained_at: Option<DateTime<Utc>>,
    /// Feature names in training order; the feature selector must project
    /// exactly these, in this order.
    pub feature_names: Vec<String>,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    #[serde(default)]
    pub metrics: Option<ModelMetrics>,
}

impl ModelArtifact {
    /// Loads and validates an artifact from a JSON file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// the coefficient count does not match the feature list.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open model artifact: {}", path.display()))?;
        let artifact: Self = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse model artifact: {}", path.display()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Checks internal consistency of the artifact.
    ///
    /// # Errors
    /// Returns an error on an empty feature list or a coefficient/feature
    /// length mismatch — both mean the artifact was exported against a
    /// different schema generation and must not be used.
    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            anyhow::bail!("model artifact '{}' has an empty feature list", self.name);
        }
        if self.coefficients.len() != self.feature_names.len() {
            anyhow::bail!(
                "model artifact '{}' has {} coefficients for {} features",
                self.name,
                self.coefficients.len(),
                self.feature_names.len()
            );
        }
        Ok(())
    }
}

impl DemandModel for ModelArtifact {
    fn predict(&self, features: &FeatureVector) -> Result<ModelOutput> {
        if !features.names_match(&self.feature_names) {
            anyhow::bail!(
                "feature vector does not match the feature list model '{}' was trained with",
                self.name
            );
        }

        let dot: f64 = features
            .values()
            .zip(self.coefficients.iter())
            .map(|(x, coef)| x * coef)
            .sum();

        // Raw regression output; non-negativity of demand is a domain
        // convention, not enforced here.
        Ok(ModelOutput::Scalar(self.intercept + dot))
    }

    fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    fn artifact() -> ModelArtifact {
        ModelArtifact {
            name: "demand_linear_v3".to_string(),
            trained_at: None,
            feature_names: names(&["DEMANDA_T_1", "DEMANDA_T_2", "MEDIA_MOVIL_4"]),
            intercept: 2.0,
            coefficients: vec![0.5, 0.25, 0.25],
            metrics: Some(ModelMetrics {
                mae: 8.4,
                rmse: 11.9,
                r2: Some(0.81),
            }),
        }
    }

    fn features(values: &[(&str, f64)]) -> FeatureVector {
        FeatureVector::new(
            values
                .iter()
                .map(|(n, v)| ((*n).to_string(), *v))
                .collect(),
        )
    }

    #[test]
    fn predicts_linear_combination() {
        let model = artifact();
        let fv = features(&[
            ("DEMANDA_T_1", 100.0),
            ("DEMANDA_T_2", 80.0),
            ("MEDIA_MOVIL_4", 90.0),
        ]);

        // 2 + 0.5*100 + 0.25*80 + 0.25*90 = 94.5
        let output = model.predict(&fv).unwrap();
        assert_eq!(output, ModelOutput::Scalar(94.5));
    }

    #[test]
    fn nan_sentinel_propagates_instead_of_failing() {
        let model = artifact();
        let fv = features(&[
            ("DEMANDA_T_1", f64::NAN),
            ("DEMANDA_T_2", 80.0),
            ("MEDIA_MOVIL_4", 90.0),
        ]);

        let ModelOutput::Scalar(value) = model.predict(&fv).unwrap() else {
            panic!("expected scalar output");
        };
        assert!(value.is_nan());
    }

    #[test]
    fn rejects_mismatched_feature_order() {
        let model = artifact();
        let fv = features(&[
            ("DEMANDA_T_2", 80.0),
            ("DEMANDA_T_1", 100.0),
            ("MEDIA_MOVIL_4", 90.0),
        ]);

        assert!(model.predict(&fv).is_err());
    }

    #[test]
    fn validate_rejects_coefficient_length_mismatch() {
        let mut model = artifact();
        model.coefficients.pop();
        let err = model.validate().unwrap_err();
        assert!(err.to_string().contains("2 coefficients for 3 features"));
    }

    #[test]
    fn artifact_round_trips_through_json() {
        let json = serde_json::to_string(&artifact()).unwrap();
        let parsed: ModelArtifact = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, "demand_linear_v3");
        assert_eq!(parsed.coefficients, vec![0.5, 0.25, 0.25]);
        assert!(parsed.metrics.is_some());
    }

    #[test]
    fn metrics_block_is_optional() {
        let json = r#"{
            "name": "minimal",
            "feature_names": ["DEMANDA_T_1"],
            "intercept": 0.0,
            "coefficients": [1.0]
        }"#;
        let parsed: ModelArtifact = serde_json::from_str(json).unwrap();
        parsed.validate().unwrap();
        assert!(parsed.metrics.is_none());
        assert!(parsed.trained_at.is_none());
    }
}
