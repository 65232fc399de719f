pub mod catalog;
pub mod error_table;
pub mod history;
pub mod stock_file;

pub use catalog::build_catalog;
pub use error_table::ErrorTable;
pub use history::HistoryStore;
pub use stock_file::{StockFile, StockOnHand};
