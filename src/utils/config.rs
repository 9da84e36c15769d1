use crate::error::{ReportError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory holding one JSON file per test
    pub report_dir: PathBuf,

    /// Escape test text when rendering HTML
    pub escape_html: bool,

    /// Sauce Labs credentials used to sign session links
    pub sauce_username: Option<String>,
    pub sauce_access_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_dir: PathBuf::from("./report"),
            escape_html: true,
            sauce_username: None,
            sauce_access_key: None,
        }
    }
}

impl Config {
    /// Load from a YAML file; keys not present keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::io(path, e))?;
        Self::from_yaml(&content).map_err(|source| ReportError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty file deserializes as null
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = Config::from_yaml("sauce_username: ci-bot\nescape_html: false\n").unwrap();
        assert_eq!(config.sauce_username.as_deref(), Some("ci-bot"));
        assert!(!config.escape_html);
        assert_eq!(config.report_dir, PathBuf::from("./report"));
        assert_eq!(config.sauce_access_key, None);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Config::from_yaml("").unwrap(), Config::default());
    }

    #[test]
    fn test_load_reports_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "report_dir: [1, 2").unwrap();

        assert!(matches!(Config::load(&path), Err(ReportError::Config { .. })));
    }
}
