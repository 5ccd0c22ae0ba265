use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_NAME: &str = "ebl.config.json";

/// eBL configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory of the chapter JSON store
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Default tracing filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Colored terminal output
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load config from a directory, falling back to defaults when the
    /// directory has no config file.
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| anyhow::anyhow!("Invalid {}: {}", config_path.display(), e))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the chapter store
    pub fn get_data_dir(&self, cwd: &Path) -> PathBuf {
        cwd.join(&self.data_dir)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            color: default_color(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "dataDir": "chapters",
            "logLevel": "debug"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.data_dir, "chapters");
        assert_eq!(config.log_level, "debug");
        assert!(config.color);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{ dataDir").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }

    #[test]
    fn test_data_dir_is_relative_to_cwd() {
        let config = Config {
            data_dir: "store".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.get_data_dir(Path::new("/work")),
            PathBuf::from("/work/store")
        );
    }
}
