pub mod config;
pub mod config_loader;
pub mod error;
pub mod traits;
pub mod types;

pub use config::{AppConfig, DataConfig, ModelConfig, OutputConfig};
pub use config_loader::ConfigLoader;
pub use error::PipelineError;
pub use traits::{DemandModel, ModelOutput};
pub use types::{
    CatalogEntry, Column, Confidence, FeatureVector, ItemRecord, PredictionResult,
    RequisitionOrder,
};
