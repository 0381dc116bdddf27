pub mod app_config;
pub mod config;
pub mod variants;

pub use app_config::{
    AppConfig, DEFAULT_PRICES_URL, DEFAULT_PRODUCT_URL, DEFAULT_USER_AGENT,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use variants::{VariantRecord, EXPORT_COLUMNS};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
