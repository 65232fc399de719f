//! Loading and indexing of the processed historical dataset.
//!
//! The dataset is row-oriented CSV, one row per (item, week), produced by
//! the offline feature-engineering pipeline. Loading validates the schema up
//! front so a dataset built against a different model generation fails fast
//! instead of corrupting per-item results.

use anyhow::{Context, Result};
use replenish_core::{ItemRecord, PipelineError};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

/// Columns the processed dataset must carry.
const REQUIRED_COLUMNS: [&str; 12] = [
    "CODITEM",
    "ITEM",
    "LINEA",
    "ES_CRITICO",
    "ANIO",
    "SEMANA",
    "DEMANDA",
    "DEMANDA_T_1",
    "DEMANDA_T_2",
    "MEDIA_MOVIL_4",
    "STD_4",
    "STOCK_MINIMO",
];

#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "CODITEM")]
    code: String,
    #[serde(rename = "ITEM")]
    item: String,
    #[serde(rename = "LINEA")]
    line: String,
    #[serde(rename = "ES_CRITICO")]
    critical: u8,
    #[serde(rename = "ANIO")]
    year: i32,
    #[serde(rename = "SEMANA")]
    week: u32,
    #[serde(rename = "DEMANDA")]
    demand: f64,
    #[serde(rename = "DEMANDA_T_1")]
    demand_t1: f64,
    #[serde(rename = "DEMANDA_T_2")]
    demand_t2: f64,
    #[serde(rename = "MEDIA_MOVIL_4")]
    moving_avg_4: f64,
    #[serde(rename = "STD_4")]
    std_4: f64,
    #[serde(rename = "STOCK_MINIMO")]
    min_stock: Decimal,
}

impl From<RawRow> for ItemRecord {
    fn from(raw: RawRow) -> Self {
        Self {
            code: raw.code,
            item: raw.item,
            line: raw.line,
            critical: raw.critical != 0,
            year: raw.year,
            week: raw.week,
            demand: raw.demand,
            demand_t1: raw.demand_t1,
            demand_t2: raw.demand_t2,
            moving_avg_4: raw.moving_avg_4,
            std_4: raw.std_4,
            min_stock: raw.min_stock,
        }
    }
}

/// In-memory historical dataset, indexed per item.
///
/// Read-only after construction; item order follows first appearance in the
/// file so downstream output stays reproducible.
#[derive(Debug)]
pub struct HistoryStore {
    items: Vec<String>,
    by_item: HashMap<String, Vec<ItemRecord>>,
}

impl HistoryStore {
    /// Loads the dataset from a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, required columns are
    /// missing, or a row fails to parse.
    pub fn from_csv_path(path: &str) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open historical dataset: {path}"))?;
        Self::from_reader(file)
    }

    /// Loads the dataset from any CSV reader.
    ///
    /// # Errors
    /// Returns an error if required columns are missing or a row fails to
    /// parse.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()
            .context("Failed to read dataset header row")?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|col| !headers.iter().any(|h| h == *col))
            .map(|col| (*col).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::Schema { missing }.into());
        }

        let mut items = Vec::new();
        let mut by_item: HashMap<String, Vec<ItemRecord>> = HashMap::new();

        for (line, result) in csv_reader.deserialize::<RawRow>().enumerate() {
            let record: ItemRecord = result
                .with_context(|| format!("Failed to parse dataset row {}", line + 2))?
                .into();

            if !by_item.contains_key(&record.item) {
                items.push(record.item.clone());
            }
            by_item.entry(record.item.clone()).or_default().push(record);
        }

        tracing::debug!(
            items = items.len(),
            rows = by_item.values().map(Vec::len).sum::<usize>(),
            "historical dataset loaded"
        );

        Ok(Self { items, by_item })
    }

    /// All rows for one item, in file order. Empty when the item is unknown.
    #[must_use]
    pub fn records_for(&self, item: &str) -> &[ItemRecord] {
        self.by_item.get(item).map_or(&[], Vec::as_slice)
    }

    /// Item identifiers in order of first appearance.
    #[must_use]
    pub fn items(&self) -> &[String] {
        &self.items
    }

    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.by_item.contains_key(item)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_item.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_item.is_empty()
    }
}
