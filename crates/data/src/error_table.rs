use anyhow::{Context, Result};
use replenish_core::PipelineError;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

#[derive(Debug, Deserialize)]
struct ErrorRow {
    #[serde(rename = "CODITEM")]
    code: String,
    #[serde(rename = "ERROR_MEDIO")]
    mean_error: f64,
}

/// Per-item historical mean absolute forecast error, keyed by item code.
///
/// Produced offline during model evaluation. Absence of a code is a defined
/// fallback case for the error lookup, not a load failure.
#[derive(Debug)]
pub struct ErrorTable {
    by_code: HashMap<String, f64>,
}

impl ErrorTable {
    /// Loads the error table from a CSV file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, required columns are
    /// missing, or a row fails to parse.
    pub fn from_csv_path(path: &str) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("Failed to open error table: {path}"))?;
        Self::from_reader(file)
    }

    /// Loads the error table from any CSV reader.
    ///
    /// # Errors
    /// Returns an error if required columns are missing or a row fails to
    /// parse.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);

        let headers = csv_reader
            .headers()
            .context("Failed to read error table header row")?;
        let missing: Vec<String> = ["CODITEM", "ERROR_MEDIO"]
            .iter()
            .filter(|col| !headers.iter().any(|h| h.trim() == **col))
            .map(|col| (*col).to_string())
            .collect();
        if !missing.is_empty() {
            return Err(PipelineError::Schema { missing }.into());
        }

        let mut by_code = HashMap::new();
        for (line, result) in csv_reader.deserialize::<ErrorRow>().enumerate() {
            let row = result
                .with_context(|| format!("Failed to parse error table row {}", line + 2))?;
            by_code.insert(row.code, row.mean_error);
        }

        Ok(Self { by_code })
    }

    /// Stored mean error for a code, if any.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<f64> {
        self.by_code.get(code).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_by_code() {
        let csv = "CODITEM,ERROR_MEDIO\nC001,12.5\nC002,3.0";
        let table = ErrorTable::from_reader(csv.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("C001"), Some(12.5));
        assert_eq!(table.get("C999"), None);
    }

    #[test]
    fn missing_error_column_is_schema_error() {
        let csv = "CODITEM,MAE\nC001,12.5";
        let err = ErrorTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("ERROR_MEDIO"));
    }
}
