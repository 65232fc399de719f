//! Batch orchestration: runs every selected item through the full
//! prediction-to-requisition chain and assembles the two output artifacts.
//!
//! Items are processed independently and in selection order. A failure
//! scoped to one item (no history, no stock row, unusable prediction) is
//! recorded and the batch continues; a schema mismatch between the model
//! and the dataset is identical for every item and aborts the run instead.

use chrono::{DateTime, Utc};
use replenish_core::{
    DemandModel, PipelineError, PredictionResult, RequisitionOrder,
};
use replenish_data::{ErrorTable, HistoryStore, StockOnHand};
use replenish_forecast::{
    classify_confidence, latest_record, predict_demand, select_features, uncertainty_band,
};
use replenish_requisition::{evaluate_reorder, generate_requisition_orders, suggested_stock};
use rust_decimal::Decimal;

/// An item the batch could not evaluate, with the reason it was skipped.
#[derive(Debug, Clone)]
pub struct SkippedItem {
    pub item: String,
    pub reason: PipelineError,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    pub started_at: DateTime<Utc>,
    pub results: Vec<PredictionResult>,
    pub requisitions: Vec<RequisitionOrder>,
    pub skipped: Vec<SkippedItem>,
}

/// The orchestrator. Holds references to already-loaded collaborators;
/// loading and caching them is the caller's concern.
pub struct Pipeline<'a> {
    model: &'a dyn DemandModel,
    history: &'a HistoryStore,
    errors: &'a ErrorTable,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(
        model: &'a dyn DemandModel,
        history: &'a HistoryStore,
        errors: &'a ErrorTable,
    ) -> Self {
        Self {
            model,
            history,
            errors,
        }
    }

    /// Evaluates the selected items against the supplied current-stock rows.
    ///
    /// # Errors
    /// Returns [`PipelineError::Schema`] when the model's feature list does
    /// not match the historical dataset — a configuration mismatch, not bad
    /// data for one item.
    pub fn execute(
        &self,
        items: &[String],
        stock: &[StockOnHand],
    ) -> Result<PipelineOutcome, PipelineError> {
        let started_at = Utc::now();
        let mut results = Vec::new();
        let mut skipped = Vec::new();

        for item in items {
            match self.evaluate_item(item, stock) {
                Ok(result) => results.push(result),
                Err(err @ PipelineError::Schema { .. }) => {
                    tracing::error!(%item, error = %err, "model/dataset schema mismatch, aborting run");
                    return Err(err);
                }
                Err(reason) => {
                    tracing::warn!(%item, %reason, "item skipped");
                    skipped.push(SkippedItem {
                        item: item.clone(),
                        reason,
                    });
                }
            }
        }

        let requisitions = generate_requisition_orders(&results);

        tracing::info!(
            selected = items.len(),
            evaluated = results.len(),
            skipped = skipped.len(),
            requisitions = requisitions.len(),
            "pipeline run complete"
        );

        Ok(PipelineOutcome {
            started_at,
            results,
            requisitions,
            skipped,
        })
    }

    fn evaluate_item(
        &self,
        item: &str,
        stock: &[StockOnHand],
    ) -> Result<PredictionResult, PipelineError> {
        let records = self.history.records_for(item);
        let Some(latest) = latest_record(records) else {
            return Err(PipelineError::NoHistory {
                item: item.to_string(),
            });
        };

        let current_stock = stock
            .iter()
            .find(|s| s.item == item)
            .map(|s| s.quantity)
            .ok_or_else(|| PipelineError::NoStock {
                item: item.to_string(),
            })?;

        let features = select_features(latest, self.model.feature_names())?;
        let predicted = predict_demand(self.model, &features)?;
        let mean_error = self.lookup_error(&latest.code, predicted);

        let confidence = classify_confidence(predicted, mean_error);
        let (demand_min, demand_max) = uncertainty_band(predicted, mean_error);

        let predicted_dec = to_decimal(predicted)?;
        let error_dec = to_decimal(mean_error)?;
        let min_stock = latest.min_stock;

        let suggested = suggested_stock(predicted_dec, error_dec, current_stock, min_stock);
        let decision = evaluate_reorder(min_stock, predicted_dec, current_stock);

        tracing::debug!(
            %item,
            code = %latest.code,
            predicted,
            mean_error,
            confidence = %confidence,
            needs_requisition = decision.needs_requisition,
            "item evaluated"
        );

        Ok(PredictionResult {
            code: latest.code.clone(),
            item: latest.item.clone(),
            predicted_demand: round2(predicted),
            demand_min: round2(demand_min),
            demand_max: round2(demand_max),
            historical_error: round2(mean_error),
            confidence,
            current_stock,
            min_stock,
            suggested_stock: suggested,
            reorder_point: decision.reorder_point,
            needs_requisition: decision.needs_requisition,
            quantity_to_order: decision.quantity_to_order,
        })
    }

    /// Historical mean error for an item code, falling back to the
    /// predicted demand itself when the code has no error history.
    ///
    /// The fallback pins the relative error at 100%, which forces a `Low`
    /// confidence rating — a tool like this must never report high
    /// confidence for an item it has no track record on.
    fn lookup_error(&self, code: &str, predicted: f64) -> f64 {
        self.errors.get(code).unwrap_or_else(|| {
            tracing::debug!(%code, "no error history, assuming 100% relative error");
            predicted
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_decimal(value: f64) -> Result<Decimal, PipelineError> {
    Decimal::try_from(value).map_err(|e| PipelineError::Prediction {
        reason: format!("value {value} not representable: {e}"),
    })
}
