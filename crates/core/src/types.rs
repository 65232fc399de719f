//! Domain records for the replenishment decision pipeline.
//!
//! Everything here is plain data: rows of the processed historical dataset,
//! the feature vector handed to the model, and the two output records the
//! rest of the system consumes (per-item prediction results and the derived
//! requisition orders).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One row of the processed historical dataset: a single (item, week)
/// observation with its lagged demand features and rolling statistics.
///
/// Records are read-only once loaded; the pipeline only ever selects the
/// chronologically latest row per item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRecord {
    /// Item code (CODITEM), the key into the historical error table
    pub code: String,
    /// Item identifier (ITEM), the key users select by
    pub item: String,
    /// Product line / category
    pub line: String,
    /// Whether the item is flagged as critical supply
    pub critical: bool,
    /// Calendar year of the observation
    pub year: i32,
    /// ISO week of the observation
    pub week: u32,
    /// Observed demand for this week
    pub demand: f64,
    /// Demand lagged one week
    pub demand_t1: f64,
    /// Demand lagged two weeks
    pub demand_t2: f64,
    /// 4-week moving average of demand
    pub moving_avg_4: f64,
    /// 4-week rolling standard deviation of demand
    pub std_4: f64,
    /// Minimum stock threshold for the item
    pub min_stock: Decimal,
}

/// A column value as seen by the feature selector: either something that
/// exists numerically or free text that coerces to the NaN sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column<'a> {
    Numeric(f64),
    Text(&'a str),
}

impl ItemRecord {
    /// Chronological ordering key: `(year, week)`, lexicographic.
    #[must_use]
    pub const fn period(&self) -> (i32, u32) {
        (self.year, self.week)
    }

    /// Looks up a column of this record by its dataset name.
    ///
    /// Returns `None` for names that do not exist in the dataset schema —
    /// the caller decides whether that is a schema error. String-typed
    /// columns come back as [`Column::Text`] so the feature selector can
    /// coerce them to the sentinel instead of rejecting the row.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<Column<'_>> {
        match name {
            "CODITEM" => Some(Column::Text(&self.code)),
            "ITEM" => Some(Column::Text(&self.item)),
            "LINEA" => Some(Column::Text(&self.line)),
            "ES_CRITICO" => Some(Column::Numeric(f64::from(u8::from(self.critical)))),
            "ANIO" => Some(Column::Numeric(f64::from(self.year))),
            "SEMANA" => Some(Column::Numeric(f64::from(self.week))),
            "DEMANDA" => Some(Column::Numeric(self.demand)),
            "DEMANDA_T_1" => Some(Column::Numeric(self.demand_t1)),
            "DEMANDA_T_2" => Some(Column::Numeric(self.demand_t2)),
            "MEDIA_MOVIL_4" => Some(Column::Numeric(self.moving_avg_4)),
            "STD_4" => Some(Column::Numeric(self.std_4)),
            "STOCK_MINIMO" => Some(Column::Numeric(
                self.min_stock.to_f64().unwrap_or(f64::NAN),
            )),
            _ => None,
        }
    }
}

/// Deduplicated catalog entry used for item selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub item: String,
    pub line: String,
    pub critical: bool,
    pub min_stock: Decimal,
}

/// Ordered mapping from feature names to numeric values, derived from
/// exactly one [`ItemRecord`].
///
/// The name set and order must match what the model was trained with;
/// [`crate::DemandModel`] implementations are expected to reject any
/// mismatch rather than silently reorder.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pairs: Vec<(String, f64)>,
}

impl FeatureVector {
    #[must_use]
    pub fn new(pairs: Vec<(String, f64)>) -> Self {
        Self { pairs }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(name, _)| name.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.pairs.iter().map(|(_, value)| *value)
    }

    /// Value for a feature name, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        self.pairs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| *value)
    }

    /// True if the names match `expected` exactly, in order.
    #[must_use]
    pub fn names_match(&self, expected: &[String]) -> bool {
        self.pairs.len() == expected.len()
            && self.names().zip(expected.iter()).all(|(a, b)| a == b)
    }
}

/// Three-level confidence classification of a prediction, derived from the
/// relative historical error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl Confidence {
    /// User-facing label, kept identical to the original reporting schema.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "ALTA",
            Self::Medium => "MEDIA",
            Self::Low => "BAJA",
        }
    }

    /// Traffic-light icon shown next to the label in summaries.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::High => "🟢",
            Self::Medium => "🟡",
            Self::Low => "🔴",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One fully evaluated item: forecast, uncertainty, and the reorder
/// decision. Built once per pipeline run and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub code: String,
    pub item: String,
    /// Point forecast of next-period demand, rounded to 2 decimals
    pub predicted_demand: f64,
    /// Lower uncertainty bound (clamped at zero)
    pub demand_min: f64,
    /// Upper uncertainty bound
    pub demand_max: f64,
    /// Historical mean absolute error used for the band
    pub historical_error: f64,
    pub confidence: Confidence,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    /// Forecast + error margin + shortage, rounded to 2 decimals
    pub suggested_stock: Decimal,
    pub reorder_point: Decimal,
    pub needs_requisition: bool,
    pub quantity_to_order: Decimal,
}

/// A suggested requisition for one item that fell below its reorder point.
///
/// Every order satisfies `quantity >= 1` and is derived from a
/// [`PredictionResult`] with `needs_requisition == true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionOrder {
    pub code: String,
    pub item: String,
    pub current_stock: Decimal,
    pub min_stock: Decimal,
    /// Whole units to order (ceiling of the fractional quantity)
    pub quantity: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record() -> ItemRecord {
        ItemRecord {
            code: "C001".to_string(),
            item: "GUANTE NITRILO".to_string(),
            line: "EPP".to_string(),
            critical: true,
            year: 2024,
            week: 37,
            demand: 120.0,
            demand_t1: 110.0,
            demand_t2: 130.0,
            moving_avg_4: 118.5,
            std_4: 9.2,
            min_stock: dec!(50),
        }
    }

    #[test]
    fn period_orders_by_year_then_week() {
        let early = ItemRecord {
            year: 2023,
            week: 52,
            ..record()
        };
        let late = ItemRecord {
            year: 2024,
            week: 1,
            ..record()
        };
        assert!(late.period() > early.period());
    }

    #[test]
    fn column_returns_numeric_for_feature_columns() {
        let rec = record();
        assert_eq!(rec.column("DEMANDA_T_1"), Some(Column::Numeric(110.0)));
        assert_eq!(rec.column("ES_CRITICO"), Some(Column::Numeric(1.0)));
        assert_eq!(rec.column("STOCK_MINIMO"), Some(Column::Numeric(50.0)));
    }

    #[test]
    fn column_returns_text_for_string_columns() {
        let rec = record();
        assert_eq!(rec.column("LINEA"), Some(Column::Text("EPP")));
        assert_eq!(rec.column("CODITEM"), Some(Column::Text("C001")));
    }

    #[test]
    fn column_unknown_name_is_none() {
        assert!(record().column("PRECIO_UNITARIO").is_none());
    }

    #[test]
    fn feature_vector_preserves_order() {
        let fv = FeatureVector::new(vec![
            ("ANIO".to_string(), 2024.0),
            ("SEMANA".to_string(), 37.0),
        ]);
        let names: Vec<&str> = fv.names().collect();
        assert_eq!(names, vec!["ANIO", "SEMANA"]);
        assert_eq!(fv.get("SEMANA"), Some(37.0));
        assert!(fv.get("DEMANDA").is_none());
    }

    #[test]
    fn feature_vector_names_match_is_order_sensitive() {
        let fv = FeatureVector::new(vec![
            ("A".to_string(), 1.0),
            ("B".to_string(), 2.0),
        ]);
        assert!(fv.names_match(&["A".to_string(), "B".to_string()]));
        assert!(!fv.names_match(&["B".to_string(), "A".to_string()]));
        assert!(!fv.names_match(&["A".to_string()]));
    }

    #[test]
    fn confidence_labels_match_reporting_schema() {
        assert_eq!(Confidence::High.label(), "ALTA");
        assert_eq!(Confidence::Medium.label(), "MEDIA");
        assert_eq!(Confidence::Low.label(), "BAJA");
        assert_eq!(Confidence::Low.to_string(), "BAJA");
    }

    #[test]
    fn confidence_serializes_to_json() {
        let json = serde_json::to_string(&Confidence::High).unwrap();
        assert_eq!(json, "\"High\"");
    }
}
