use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub model: ModelConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub history_path: String,
    pub errors_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    pub artifact_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                history_path: "data/processed/history.csv".to_string(),
                errors_path: "data/processed/item_errors.csv".to_string(),
            },
            model: ModelConfig {
                artifact_path: "models/demand_model.json".to_string(),
            },
            output: OutputConfig {
                dir: "output".to_string(),
            },
        }
    }
}
