use crate::history::HistoryStore;
use replenish_core::CatalogEntry;

/// Builds the deduplicated item catalog from the historical dataset.
///
/// One entry per item, taken from its chronologically latest record so the
/// minimum-stock threshold matches what the pipeline will use. Entries keep
/// the dataset's first-appearance order.
#[must_use]
pub fn build_catalog(history: &HistoryStore) -> Vec<CatalogEntry> {
    history
        .items()
        .iter()
        .filter_map(|item| {
            history
                .records_for(item)
                .iter()
                .max_by_key(|r| r.period())
                .map(|latest| CatalogEntry {
                    code: latest.code.clone(),
                    item: latest.item.clone(),
                    line: latest.line.clone(),
                    critical: latest.critical,
                    min_stock: latest.min_stock,
                })
        })
        .collect()
}
