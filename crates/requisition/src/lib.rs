pub mod generator;
pub mod rules;
pub mod stock_policy;

pub use generator::generate_requisition_orders;
pub use rules::{evaluate_reorder, ReorderDecision};
pub use stock_policy::suggested_stock;
