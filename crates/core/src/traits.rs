use crate::types::FeatureVector;
use anyhow::Result;

/// Raw inference output before normalization.
///
/// Trained artifacts differ in what their inference call hands back: some
/// produce a bare scalar, others a one-element batch. The predictor collapses
/// both to a single scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput {
    Scalar(f64),
    Vector(Vec<f64>),
}

/// An opaque trained regression model: one feature row in, one demand
/// prediction out.
pub trait DemandModel: Send + Sync {
    /// Runs inference on a single feature row.
    ///
    /// Implementations must reject a feature vector whose name order does
    /// not match the feature list the model was trained with.
    ///
    /// # Errors
    /// Returns error if inference fails or the feature vector is incompatible.
    fn predict(&self, features: &FeatureVector) -> Result<ModelOutput>;

    /// Ordered list of feature names this model expects.
    fn feature_names(&self) -> &[String];

    /// Returns the name of this model artifact.
    fn name(&self) -> &str;
}
