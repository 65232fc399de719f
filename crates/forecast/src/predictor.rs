use replenish_core::{DemandModel, FeatureVector, ModelOutput, PipelineError};

/// Runs the model on one feature row and normalizes the output to a single
/// finite scalar.
///
/// Artifacts disagree on their output shape — a bare scalar or a one-element
/// batch — so both are collapsed to the first value here, once, instead of
/// in every caller.
///
/// # Errors
/// Returns [`PipelineError::Prediction`] if inference fails, returns an
/// empty batch, or produces a non-finite value (a NaN feature sentinel that
/// reached the output makes the prediction unusable downstream).
pub fn predict_demand(
    model: &dyn DemandModel,
    features: &FeatureVector,
) -> Result<f64, PipelineError> {
    let output = model
        .predict(features)
        .map_err(|e| PipelineError::Prediction {
            reason: e.to_string(),
        })?;

    let value = match output {
        ModelOutput::Scalar(value) => value,
        ModelOutput::Vector(values) => {
            *values.first().ok_or_else(|| PipelineError::Prediction {
                reason: format!("model '{}' returned an empty batch", model.name()),
            })?
        }
    };

    if !value.is_finite() {
        return Err(PipelineError::Prediction {
            reason: format!("model '{}' returned a non-finite value", model.name()),
        });
    }

    Ok(value)
}
