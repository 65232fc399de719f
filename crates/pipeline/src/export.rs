//! CSV export of the two pipeline artifacts.
//!
//! Column labels are fixed: downstream consumers (warehouse spreadsheets,
//! the purchasing system) import these files by header name, including the
//! space-separated labels in the requisition export.

use crate::runner::PipelineOutcome;
use anyhow::{Context, Result};
use csv::Writer;
use replenish_core::{PredictionResult, RequisitionOrder};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const PREDICTIONS_FILE: &str = "resultados_prediccion.csv";
const REQUISITIONS_FILE: &str = "ordenes_requisicion_sugeridas.csv";

/// Writes the per-item prediction results.
///
/// # Errors
/// Returns error if writing fails.
pub fn write_predictions<W: Write>(writer: W, results: &[PredictionResult]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    csv_writer.write_record([
        "CODITEM",
        "ITEM",
        "DEMANDA_PREDICHA",
        "DEMANDA_MIN",
        "DEMANDA_MAX",
        "ERROR_HISTORICO",
        "CONFIANZA",
        "STOCK_ACTUAL",
        "STOCK_MINIMO",
        "STOCK_SUGERIDO",
        "reorder_point",
        "needs_requisition",
        "quantity_to_order",
    ])?;

    for result in results {
        csv_writer.write_record(&[
            result.code.clone(),
            result.item.clone(),
            result.predicted_demand.to_string(),
            result.demand_min.to_string(),
            result.demand_max.to_string(),
            result.historical_error.to_string(),
            result.confidence.label().to_string(),
            result.current_stock.to_string(),
            result.min_stock.to_string(),
            result.suggested_stock.to_string(),
            result.reorder_point.to_string(),
            result.needs_requisition.to_string(),
            result.quantity_to_order.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes the requisition order list with its fixed user-facing labels.
///
/// # Errors
/// Returns error if writing fails.
pub fn write_requisitions<W: Write>(writer: W, orders: &[RequisitionOrder]) -> Result<()> {
    let mut csv_writer = Writer::from_writer(writer);

    csv_writer.write_record([
        "CODITEM",
        "ITEM",
        "STOCK ACTUAL",
        "STOCK MINIMO",
        "CANTIDAD A REPONER",
    ])?;

    for order in orders {
        csv_writer.write_record(&[
            order.code.clone(),
            order.item.clone(),
            order.current_stock.to_string(),
            order.min_stock.to_string(),
            order.quantity.to_string(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}

/// Writes both artifacts of a run into `dir`, creating it if needed.
///
/// Returns the paths of the predictions and requisitions files.
///
/// # Errors
/// Returns error if the directory or files cannot be created or written.
pub fn export_outcome(dir: &Path, outcome: &PipelineOutcome) -> Result<(PathBuf, PathBuf)> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;

    let predictions_path = dir.join(PREDICTIONS_FILE);
    let file = File::create(&predictions_path)
        .with_context(|| format!("Failed to create {}", predictions_path.display()))?;
    write_predictions(file, &outcome.results)?;

    let requisitions_path = dir.join(REQUISITIONS_FILE);
    let file = File::create(&requisitions_path)
        .with_context(|| format!("Failed to create {}", requisitions_path.display()))?;
    write_requisitions(file, &outcome.requisitions)?;

    tracing::info!(
        predictions = %predictions_path.display(),
        requisitions = %requisitions_path.display(),
        "pipeline artifacts exported"
    );

    Ok((predictions_path, requisitions_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use replenish_core::Confidence;
    use rust_decimal_macros::dec;

    fn result() -> PredictionResult {
        PredictionResult {
            code: "C001".to_string(),
            item: "GUANTE".to_string(),
            predicted_demand: 30.0,
            demand_min: 15.0,
            demand_max: 45.0,
            historical_error: 15.0,
            confidence: Confidence::Low,
            current_stock: dec!(40),
            min_stock: dec!(50),
            suggested_stock: dec!(55),
            reorder_point: dec!(80),
            needs_requisition: true,
            quantity_to_order: dec!(40),
        }
    }

    #[test]
    fn predictions_header_matches_reporting_schema() {
        let mut buf = Vec::new();
        write_predictions(&mut buf, &[result()]).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "CODITEM,ITEM,DEMANDA_PREDICHA,DEMANDA_MIN,DEMANDA_MAX,ERROR_HISTORICO,CONFIANZA,STOCK_ACTUAL,STOCK_MINIMO,STOCK_SUGERIDO,reorder_point,needs_requisition,quantity_to_order"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("C001,GUANTE,30,"));
        assert!(row.contains("BAJA"));
        assert!(row.contains("true"));
    }

    #[test]
    fn requisition_labels_are_preserved_verbatim() {
        let orders = vec![RequisitionOrder {
            code: "C001".to_string(),
            item: "GUANTE".to_string(),
            current_stock: dec!(40),
            min_stock: dec!(50),
            quantity: 40,
        }];

        let mut buf = Vec::new();
        write_requisitions(&mut buf, &orders).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "CODITEM,ITEM,STOCK ACTUAL,STOCK MINIMO,CANTIDAD A REPONER"
        );
        assert_eq!(lines.next().unwrap(), "C001,GUANTE,40,50,40");
    }

    #[test]
    fn empty_requisition_list_writes_header_only() {
        let mut buf = Vec::new();
        write_requisitions(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
