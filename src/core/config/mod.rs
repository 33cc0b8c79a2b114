pub mod paths;

pub use paths::AppPaths;

use std::env;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::ApiError;

const DEFAULT_RAG_BASE_URL: &str = "http://localhost:8000";

/// Service configuration, read from `config.yml` in the data directory and
/// overridable through `RAGDASH_*` environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub rag: RagConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            server: ServerConfig::default(),
            rag: RagConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: 0,
            cors_allowed_origins: Vec::new(),
        }
    }
}

impl Default for RagConfig {
    fn default() -> Self {
        RagConfig {
            base_url: DEFAULT_RAG_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn load(paths: &AppPaths) -> Result<Self, ApiError> {
        let mut config = match read_config_file(config_path(paths)) {
            Some(contents) => serde_yaml::from_str(&contents)
                .map_err(|e| ApiError::internal(format!("invalid config.yml: {}", e)))?,
            None => AppConfig::default(),
        };

        if let Ok(port) = env::var("RAGDASH_PORT") {
            if let Ok(port) = port.parse::<u16>() {
                config.server.port = port;
            }
        }
        if let Ok(url) = env::var("RAGDASH_RAG_BASE_URL") {
            if !url.trim().is_empty() {
                config.rag.base_url = url.trim_end_matches('/').to_string();
            }
        }

        Ok(config)
    }
}

fn config_path(paths: &AppPaths) -> PathBuf {
    if let Ok(path) = env::var("RAGDASH_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    paths.user_data_dir.join("config.yml")
}

fn read_config_file(path: PathBuf) -> Option<String> {
    if !path.exists() {
        return None;
    }
    match fs::read_to_string(&path) {
        Ok(contents) => Some(contents),
        Err(err) => {
            tracing::warn!("Failed to read {}: {}", path.display(), err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_rag_backend() {
        let config = AppConfig::default();
        assert_eq!(config.rag.base_url, "http://localhost:8000");
        assert_eq!(config.server.port, 0);
    }

    #[test]
    fn yaml_overrides_defaults() {
        let config: AppConfig = serde_yaml::from_str(
            "rag:\n  base_url: http://rag.internal:9000\nserver:\n  port: 8080\n",
        )
        .unwrap();
        assert_eq!(config.rag.base_url, "http://rag.internal:9000");
        assert_eq!(config.server.port, 8080);
    }
}
