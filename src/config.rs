use std::{fs, path::{Path, PathBuf}};
use serde::{Serialize, Deserialize};
use anyhow::{self, Context};

use crate::backend::DEFAULT_STORAGE_KEY;

pub const DEFAULT_CONFIG_FILE: &str = "budget.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig { dir: PathBuf::from(".budget"), key: DEFAULT_STORAGE_KEY.to_owned() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig { dir: PathBuf::from(".") }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig { color: true }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub export: ExportConfig,
    pub display: DisplayConfig,
}

impl AppConfig {
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str(content)
            .with_context(|| "failed to parse config file")?;
        return Ok(config);
    }

    pub fn read(filepath: impl AsRef<Path>) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(filepath.as_ref())
            .with_context(|| format!("failed to read config file {}", filepath.as_ref().display()))?;
        return Self::parse(&file_content);
    }

    /// Reads the given file, or `budget.toml` if it exists. Only an explicitly
    /// requested file has to exist.
    pub fn locate(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::read(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::read(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default())
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = AppConfig::parse("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.key, "budget_transactions_v1");
        assert_eq!(config.storage.dir, PathBuf::from(".budget"));
        assert!(config.display.color);
    }

    #[test]
    fn partial_sections() {
        let config = AppConfig::parse(r#"
            [storage]
            dir = "/var/lib/budget"

            [display]
            color = false
        "#).unwrap();

        assert_eq!(config.storage.dir, PathBuf::from("/var/lib/budget"));
        assert_eq!(config.storage.key, DEFAULT_STORAGE_KEY);
        assert_eq!(config.export.dir, PathBuf::from("."));
        assert!(!config.display.color);
    }

    #[test]
    fn bad_types_are_errors() {
        assert!(AppConfig::parse("[display]\ncolor = \"maybe\"").is_err());
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let missing = std::env::temp_dir().join("budget-no-such-config.toml");
        assert!(AppConfig::locate(Some(&missing)).is_err());
    }

    #[test]
    fn reads_file() {
        let path = std::env::temp_dir().join(format!("budget-config-{}.toml", std::process::id()));
        fs::write(&path, "[storage]\nkey = \"my_budget\"\n").unwrap();

        let config = AppConfig::read(&path).unwrap();
        assert_eq!(config.storage.key, "my_budget");

        fs::remove_file(&path).unwrap();
    }
}
