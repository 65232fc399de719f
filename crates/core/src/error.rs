use thiserror::Error;

/// Errors raised while evaluating items through the decision pipeline.
///
/// `Schema` indicates a configuration mismatch between the model and the
/// historical dataset and aborts the whole run; the other variants are
/// scoped to the item that triggered them and never abort the batch.
#[derive(Debug, Clone, Error)]
pub enum PipelineError {
    /// Required feature columns are absent from the historical dataset.
    #[error("missing required columns: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    /// Model inference failed or returned unusable output.
    #[error("prediction failed: {reason}")]
    Prediction { reason: String },

    /// Item has no rows in the historical dataset.
    #[error("no historical records for item '{item}'")]
    NoHistory { item: String },

    /// No current-stock value was supplied for a selected item.
    #[error("no current stock supplied for item '{item}'")]
    NoStock { item: String },
}
