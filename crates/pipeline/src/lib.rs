pub mod export;
pub mod runner;

pub use export::{export_outcome, write_predictions, write_requisitions};
pub use runner::{Pipeline, PipelineOutcome, SkippedItem};
