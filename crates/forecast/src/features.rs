//! Feature extraction for the demand model.
//!
//! Exactly one historical row feeds each prediction: the chronologically
//! latest observation for the item. The projection must produce the model's
//! feature names in the model's order; a name the dataset cannot supply at
//! all is a schema mismatch between dataset and artifact, which has to
//! surface rather than default to anything.

use replenish_core::{Column, FeatureVector, ItemRecord, PipelineError};

/// Selects the row with the maximum `(year, week)` period.
///
/// Input order is irrelevant; the dataset is not required to arrive sorted.
#[must_use]
pub fn latest_record(records: &[ItemRecord]) -> Option<&ItemRecord> {
    records.iter().max_by_key(|r| r.period())
}

/// Projects the model's required features, in order, from one record.
///
/// Columns that exist but are not numeric (item codes, category labels)
/// coerce to the NaN sentinel so dirty values degrade a single prediction
/// instead of crashing the model call.
///
/// # Errors
/// Returns [`PipelineError::Schema`] if any required feature name has no
/// counterpart column in the dataset schema.
pub fn select_features(
    record: &ItemRecord,
    feature_names: &[String],
) -> Result<FeatureVector, PipelineError> {
    let missing: Vec<String> = feature_names
        .iter()
        .filter(|name| record.column(name).is_none())
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(PipelineError::Schema { missing });
    }

    let pairs = feature_names
        .iter()
        .map(|name| {
            let value = match record.column(name) {
                Some(Column::Numeric(v)) => v,
                // Text columns coerce to the "unknown" sentinel
                Some(Column::Text(_)) | None => f64::NAN,
            };
            (name.clone(), value)
        })
        .collect();

    Ok(FeatureVector::new(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(year: i32, week: u32, demand_t1: f64) -> ItemRecord {
        ItemRecord {
            code: "C001".to_string(),
            item: "GUANTE".to_string(),
            line: "EPP".to_string(),
            critical: true,
            year,
            week,
            demand: 120.0,
            demand_t1,
            demand_t2: 100.0,
            moving_avg_4: 105.0,
            std_4: 8.0,
            min_stock: dec!(50),
        }
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_string()).collect()
    }

    #[test]
    fn latest_record_picks_max_year_week() {
        let records = vec![
            record(2024, 2, 90.0),
            record(2023, 52, 80.0),
            record(2024, 1, 85.0),
        ];
        let latest = latest_record(&records).unwrap();
        assert_eq!(latest.period(), (2024, 2));
        assert!((latest.demand_t1 - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn latest_record_empty_is_none() {
        assert!(latest_record(&[]).is_none());
    }

    #[test]
    fn projects_features_in_model_order() {
        let rec = record(2024, 10, 110.0);
        let fv = select_features(
            &rec,
            &names(&["SEMANA", "DEMANDA_T_1", "STOCK_MINIMO"]),
        )
        .unwrap();

        let projected: Vec<&str> = fv.names().collect();
        assert_eq!(projected, vec!["SEMANA", "DEMANDA_T_1", "STOCK_MINIMO"]);
        let values: Vec<f64> = fv.values().collect();
        assert_eq!(values, vec![10.0, 110.0, 50.0]);
    }

    #[test]
    fn text_columns_coerce_to_nan_sentinel() {
        let rec = record(2024, 10, 110.0);
        let fv = select_features(&rec, &names(&["LINEA", "DEMANDA_T_1"])).unwrap();

        assert!(fv.get("LINEA").unwrap().is_nan());
        assert_eq!(fv.get("DEMANDA_T_1"), Some(110.0));
    }

    #[test]
    fn unknown_feature_name_is_schema_error() {
        let rec = record(2024, 10, 110.0);
        let err = select_features(&rec, &names(&["DEMANDA_T_1", "TEMPERATURA"])).unwrap_err();

        match err {
            PipelineError::Schema { missing } => {
                assert_eq!(missing, vec!["TEMPERATURA".to_string()]);
            }
            other => panic!("expected Schema error, got {other:?}"),
        }
    }
}
