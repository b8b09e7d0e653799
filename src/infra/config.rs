use std::fs;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::domain::table::{ConfigError, HandConfig};

/// Ошибки загрузки конфигурации раздачи.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("не удалось прочитать конфиг: {0}")]
    Io(#[from] std::io::Error),

    #[error("битый JSON конфига: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

/// Разобрать и проверить конфиг из JSON-строки.
pub fn parse_hand_config(json: &str) -> Result<HandConfig, ConfigLoadError> {
    let config: HandConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Прочитать конфиг раздачи из JSON-файла.
pub fn load_hand_config(path: impl AsRef<Path>) -> Result<HandConfig, ConfigLoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let config = parse_hand_config(&raw)?;
    debug!(?path, button = config.button, "конфиг раздачи загружен");
    Ok(config)
}
