//! User-supplied current-stock file.
//!
//! Unlike the reference datasets, this file comes straight from warehouse
//! staff: headers arrive in mixed case with stray whitespace, the delimiter
//! may be `;` instead of `,`, and stock cells are not always numeric. Loading
//! normalizes what it can and drops the rest with a warning.

use anyhow::{Context, Result};
use replenish_core::PipelineError;
use rust_decimal::Decimal;
use std::fs;
use std::io::Read;
use std::str::FromStr;

/// One cleaned row of the stock file.
#[derive(Debug, Clone, PartialEq)]
pub struct StockOnHand {
    pub item: String,
    pub quantity: Decimal,
}

/// Cleaned, column-validated current-stock input.
#[derive(Debug)]
pub struct StockFile {
    entries: Vec<StockOnHand>,
}

impl StockFile {
    /// Loads and cleans a stock file from disk.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the mandatory `ITEM`
    /// and `STOCK_ACTUAL` columns are absent.
    pub fn from_csv_path(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read stock file: {path}"))?;
        Self::from_csv_str(&content)
    }

    /// Loads and cleans a stock file from any reader.
    ///
    /// # Errors
    /// Returns an error if reading fails or required columns are absent.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut content = String::new();
        reader
            .read_to_string(&mut content)
            .context("Failed to read stock file")?;
        Self::from_csv_str(&content)
    }

    /// Parses stock file content, sniffing the delimiter.
    ///
    /// # Errors
    /// Returns a schema error if `ITEM` or `STOCK_ACTUAL` is missing.
    pub fn from_csv_str(content: &str) -> Result<Self> {
        // Exported spreadsheets in this domain frequently use ';'. A single
        // parsed column that still contains ';' means we guessed wrong.
        let headers = Self::headers(content, b',')?;
        let delimiter = if headers.len() == 1 && headers[0].contains(';') {
            b';'
        } else {
            b','
        };

        let headers = Self::headers(content, delimiter)?;
        let item_idx = headers.iter().position(|h| h == "ITEM");
        let stock_idx = headers.iter().position(|h| h == "STOCK_ACTUAL");

        let (Some(item_idx), Some(stock_idx)) = (item_idx, stock_idx) else {
            let mut missing = Vec::new();
            if item_idx.is_none() {
                missing.push("ITEM".to_string());
            }
            if stock_idx.is_none() {
                missing.push("STOCK_ACTUAL".to_string());
            }
            return Err(PipelineError::Schema { missing }.into());
        };

        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(content.as_bytes());

        let mut entries = Vec::new();
        for (line, result) in csv_reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read stock file row {}", line + 2))?;

            let item = record.get(item_idx).unwrap_or("").trim().to_string();
            if item.is_empty() {
                tracing::warn!(row = line + 2, "stock row without item identifier, skipped");
                continue;
            }

            let raw_stock = record.get(stock_idx).unwrap_or("").trim();
            match Decimal::from_str(raw_stock) {
                Ok(quantity) => entries.push(StockOnHand { item, quantity }),
                Err(_) => {
                    tracing::warn!(
                        %item,
                        value = raw_stock,
                        "non-numeric STOCK_ACTUAL, row skipped"
                    );
                }
            }
        }

        Ok(Self { entries })
    }

    fn headers(content: &str, delimiter: u8) -> Result<Vec<String>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .from_reader(content.as_bytes());
        let headers = csv_reader
            .headers()
            .context("Failed to read stock file header row")?;
        Ok(headers
            .iter()
            .map(|h| h.trim().to_uppercase())
            .collect())
    }

    /// Cleaned rows in file order, duplicates included.
    #[must_use]
    pub fn entries(&self) -> &[StockOnHand] {
        &self.entries
    }

    /// Current stock for an item; the first matching row wins.
    #[must_use]
    pub fn stock_for(&self, item: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|e| e.item == item)
            .map(|e| e.quantity)
    }

    /// Distinct item identifiers in file order.
    #[must_use]
    pub fn items(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.item) {
                seen.push(entry.item.clone());
            }
        }
        seen
    }
}
