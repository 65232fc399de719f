use anyhow::Result;
use replenish_core::ConfigLoader;
use replenish_data::{build_catalog, ErrorTable, HistoryStore, StockFile};
use replenish_model::ModelStore;
use replenish_pipeline::{export_outcome, Pipeline};
use std::path::Path;

pub struct ForecastArgs {
    pub config: String,
    pub stock: String,
    pub history: Option<String>,
    pub errors: Option<String>,
    pub model: Option<String>,
    pub items: Option<Vec<String>>,
    pub output: Option<String>,
}

pub fn run_forecast(args: &ForecastArgs) -> Result<()> {
    let config = ConfigLoader::load_from(&args.config)?;

    let history_path = args.history.as_deref().unwrap_or(&config.data.history_path);
    let errors_path = args.errors.as_deref().unwrap_or(&config.data.errors_path);
    let model_path = args.model.as_deref().unwrap_or(&config.model.artifact_path);
    let output_dir = args.output.as_deref().unwrap_or(&config.output.dir);

    tracing::info!(
        history = history_path,
        errors = errors_path,
        model = model_path,
        stock = %args.stock,
        "running forecast"
    );

    let history = HistoryStore::from_csv_path(history_path)?;
    let errors = ErrorTable::from_csv_path(errors_path)?;
    let stock = StockFile::from_csv_path(&args.stock)?;

    let store = ModelStore::new();
    let model = store.load(model_path)?;

    let items = match &args.items {
        Some(items) => items.clone(),
        None => stock.items(),
    };
    if items.is_empty() {
        anyhow::bail!("stock file contains no usable items");
    }

    let pipeline = Pipeline::new(model.as_ref(), &history, &errors);
    let outcome = pipeline.execute(&items, stock.entries())?;

    println!("\n{}", "=".repeat(110));
    println!(
        "Forecast Results - model: {} - run started {}",
        model.name,
        outcome.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!(
        "{} item(s) evaluated, {} skipped",
        outcome.results.len(),
        outcome.skipped.len()
    );
    println!("{}", "=".repeat(110));
    println!(
        "{:<28} {:>10} {:>14} {:>12} {:>10} {:>12} {:>10} {:>8}",
        "Item", "Predicted", "Band", "Confidence", "Stock", "Suggested", "Reorder", "Qty"
    );
    println!("{}", "-".repeat(110));

    for result in &outcome.results {
        let reorder_mark = if result.needs_requisition { "✓" } else { "✗" };
        println!(
            "{:<28} {:>10.2} {:>6.1}-{:>7.1} {:>11} {:>10} {:>12} {:>10} {:>8}",
            result.item,
            result.predicted_demand,
            result.demand_min,
            result.demand_max,
            format!("{} {}", result.confidence.icon(), result.confidence.label()),
            result.current_stock,
            result.suggested_stock,
            reorder_mark,
            result.quantity_to_order.ceil()
        );
    }

    if !outcome.skipped.is_empty() {
        println!("\nSkipped items:");
        for skip in &outcome.skipped {
            println!("  - {}: {}", skip.item, skip.reason);
        }
    }

    println!("{}", "=".repeat(110));
    if outcome.requisitions.is_empty() {
        println!("No requisitions needed for the evaluated period");
    } else {
        println!(
            "{} item(s) need reposition, {} units total",
            outcome.requisitions.len(),
            outcome
                .requisitions
                .iter()
                .map(|o| o.quantity)
                .sum::<u64>()
        );
    }

    let (predictions_path, requisitions_path) =
        export_outcome(Path::new(output_dir), &outcome)?;
    println!("\nPredictions written to {}", predictions_path.display());
    println!("Requisitions written to {}", requisitions_path.display());

    Ok(())
}

pub fn run_catalog(config_path: &str, history_override: Option<&str>) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let history_path = history_override.unwrap_or(&config.data.history_path);

    let history = HistoryStore::from_csv_path(history_path)?;
    let catalog = build_catalog(&history);

    println!("\n{}", "=".repeat(80));
    println!("Item Catalog ({} items)", catalog.len());
    println!("{}", "=".repeat(80));
    println!(
        "{:<10} {:<30} {:<15} {:>10} {:>10}",
        "Code", "Item", "Line", "Critical", "Min Stock"
    );
    println!("{}", "-".repeat(80));

    for entry in &catalog {
        let critical_mark = if entry.critical { "✓" } else { "✗" };
        println!(
            "{:<10} {:<30} {:<15} {:>10} {:>10}",
            entry.code, entry.item, entry.line, critical_mark, entry.min_stock
        );
    }
    println!("{}", "=".repeat(80));

    Ok(())
}

pub fn run_model_info(config_path: &str, model_override: Option<&str>) -> Result<()> {
    let config = ConfigLoader::load_from(config_path)?;
    let model_path = model_override.unwrap_or(&config.model.artifact_path);

    let store = ModelStore::new();
    let model = store.load(model_path)?;

    println!("\nModel artifact: {}", model.name);
    if let Some(trained_at) = model.trained_at {
        println!("Trained at:     {}", trained_at.format("%Y-%m-%d %H:%M UTC"));
    }
    println!("Features ({}):", model.feature_names.len());
    for (name, coef) in model.feature_names.iter().zip(&model.coefficients) {
        println!("  {name:<20} {coef:>12.6}");
    }
    println!("Intercept:      {:.6}", model.intercept);

    match model.metrics {
        Some(metrics) => {
            println!("Holdout metrics:");
            println!("  MAE   {:>10.3}", metrics.mae);
            println!("  RMSE  {:>10.3}", metrics.rmse);
            if let Some(r2) = metrics.r2 {
                println!("  R²    {:>10.3}", r2);
            }
        }
        None => println!("No training metrics recorded in this artifact"),
    }

    Ok(())
}
