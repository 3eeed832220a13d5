//! Configuration file support for acctmgr.
//!
//! Loads optional `.acctmgr/config.toml` from the working directory (or an
//! explicit `--config` path). Command-line flags win over file values.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::types::ColorMode;

/// Directory holding the config file and the default store.
pub const CONFIG_DIR: &str = ".acctmgr";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AcctmgrConfig {
    /// Name recorded as the actor on every store call
    pub actor: Option<String>,
    /// Path of the JSON store document
    pub store: Option<PathBuf>,
    /// Commit without asking for confirmation
    pub immediate: bool,
    /// Color mode for terminal output
    pub color: Option<ColorMode>,
}

impl AcctmgrConfig {
    /// Load config from `.acctmgr/config.toml` in the given root directory.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_DIR).join("config.toml");
        Self::load_from_path(&config_path)
    }

    /// Load config from a specific path.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Store path, defaulting to `.acctmgr/store.json` under `root`.
    pub fn store_path(&self, root: &Path) -> PathBuf {
        self.store
            .clone()
            .unwrap_or_else(|| root.join(CONFIG_DIR).join("store.json"))
    }

    /// Actor name: config value, then `$USER`, then `root`.
    pub fn actor_name(&self) -> String {
        self.actor
            .clone()
            .or_else(|| std::env::var("USER").ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| "root".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AcctmgrConfig::default();
        assert!(config.actor.is_none());
        assert!(config.store.is_none());
        assert!(!config.immediate);
        assert!(config.color.is_none());
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = AcctmgrConfig::load(temp.path());
        assert!(config.actor.is_none());
        assert_eq!(
            config.store_path(temp.path()),
            temp.path().join(".acctmgr").join("store.json")
        );
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_dir = temp.path().join(CONFIG_DIR);
        std::fs::create_dir_all(&config_dir).expect("create .acctmgr");

        let mut file = std::fs::File::create(config_dir.join("config.toml")).expect("create config");
        writeln!(
            file,
            r#"
actor = "slurm"
store = "/var/lib/acctmgr/clusters.json"
immediate = true
color = "never"
"#
        )
        .expect("write config");

        let config = AcctmgrConfig::load(temp.path());
        assert_eq!(config.actor_name(), "slurm");
        assert_eq!(
            config.store_path(temp.path()),
            PathBuf::from("/var/lib/acctmgr/clusters.json")
        );
        assert!(config.immediate);
        assert_eq!(config.color, Some(ColorMode::Never));
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("broken.toml");
        std::fs::write(&path, "immediate = [").expect("write");
        let config = AcctmgrConfig::load_from_path(&path);
        assert!(!config.immediate);
    }
}
