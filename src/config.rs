use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

use crate::chart::page::DEFAULT_ASSET_URL;

/// Connectivity/transfer logs rendered by default, in render order
pub const DEFAULT_MATRIX_PAGES: [&str; 4] = [
    "zero_host_downloader",
    "zero_client_uploader",
    "five_host_downloader",
    "five_client_uploader",
];

/// Battery logs rendered by default
pub const DEFAULT_BATTERY_PAGES: [&str; 1] = ["battery_measurements"];

/// Report generation and serving configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding `<name>.log` files
    pub logs_dir: PathBuf,
    /// Directory receiving `<name>.html` pages, also the served root
    pub html_dir: PathBuf,
    /// Address the static server listens on
    pub bind: String,
    pub matrix_pages: Vec<String>,
    pub battery_pages: Vec<String>,
    /// ECharts script loaded by every page
    pub asset_url: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            html_dir: PathBuf::from("html"),
            bind: "localhost:8089".to_string(),
            matrix_pages: DEFAULT_MATRIX_PAGES.iter().map(|s| s.to_string()).collect(),
            battery_pages: DEFAULT_BATTERY_PAGES.iter().map(|s| s.to_string()).collect(),
            asset_url: DEFAULT_ASSET_URL.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.logs_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidPath(
                "logs_dir cannot be empty".to_string(),
            ));
        }
        if self.html_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidPath(
                "html_dir cannot be empty".to_string(),
            ));
        }
        if self.bind.trim().is_empty() {
            return Err(ValidationError::InvalidServer(
                "bind address cannot be empty".to_string(),
            ));
        }
        if self.asset_url.trim().is_empty() {
            return Err(ValidationError::InvalidAsset(
                "asset_url cannot be empty".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for name in self.matrix_pages.iter().chain(&self.battery_pages) {
            Self::validate_page_name(name)?;
            if !seen.insert(name.as_str()) {
                return Err(ValidationError::InvalidPage(format!(
                    "page '{}' is listed more than once",
                    name
                )));
            }
        }

        Ok(())
    }

    fn validate_page_name(name: &str) -> Result<(), ValidationError> {
        if name.is_empty() {
            return Err(ValidationError::InvalidPage(
                "page name cannot be empty".to_string(),
            ));
        }
        if name == "index" {
            return Err(ValidationError::InvalidPage(
                "page name 'index' is reserved".to_string(),
            ));
        }
        if name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ValidationError::InvalidPage(format!(
                "page name '{}' must be a plain file name",
                name
            )));
        }
        Ok(())
    }
}

/// Configuration validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid path configuration: {0}")]
    InvalidPath(String),
    #[error("Invalid server configuration: {0}")]
    InvalidServer(String),
    #[error("Invalid page configuration: {0}")]
    InvalidPage(String),
    #[error("Invalid chart asset configuration: {0}")]
    InvalidAsset(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.bind, "localhost:8089");
        assert_eq!(config.matrix_pages.len(), 4);
        assert_eq!(config.battery_pages, vec!["battery_measurements"]);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let yaml = r#"
logs_dir: "/data/logs"
battery_pages: []
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.logs_dir, PathBuf::from("/data/logs"));
        assert_eq!(config.html_dir, PathBuf::from("html"));
        assert_eq!(config.matrix_pages.len(), 4);
        assert!(config.battery_pages.is_empty());
    }

    #[test]
    fn test_duplicate_page_rejected() {
        let config = Config {
            battery_pages: vec!["zero_host_downloader".to_string()],
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidPage(_))));
    }

    #[test]
    fn test_path_like_page_rejected() {
        for name in ["../secret", "a/b", "", "index", ".hidden"] {
            let config = Config {
                matrix_pages: vec![name.to_string()],
                ..Default::default()
            };
            assert!(config.validate().is_err(), "accepted page name {:?}", name);
        }
    }

    #[test]
    fn test_empty_bind_rejected() {
        let config = Config {
            bind: " ".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidServer(_))));
    }

    #[test]
    fn test_empty_asset_url_rejected() {
        let config = Config {
            asset_url: String::new(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAsset(_)));
        assert!(err.to_string().contains("asset_url"));
    }
}
