pub mod confidence;
pub mod features;
pub mod predictor;
pub mod uncertainty;

pub use confidence::classify_confidence;
pub use features::{latest_record, select_features};
pub use predictor::predict_demand;
pub use uncertainty::uncertainty_band;
