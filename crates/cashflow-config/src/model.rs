use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Stores user-configurable preferences for the cash-flow tools.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Owner used when a command does not name one.
    pub default_owner: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom root for account files. Defaults to `<base>/data`.
    pub data_root: Option<PathBuf>,

    #[serde(default = "Config::default_backup_retention")]
    pub backup_retention: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Tracing filter directive; `RUST_LOG` still wins when set.
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui_color_enabled: Self::default_ui_color_enabled(),
            default_owner: None,
            data_root: None,
            backup_retention: Self::default_backup_retention(),
            log_filter: None,
        }
    }
}

impl Config {
    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn default_backup_retention() -> usize {
        5
    }

    pub fn resolve_data_root(&self, base: &Path) -> PathBuf {
        match &self.data_root {
            Some(path) => path.clone(),
            None => base.join("data"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backup_retention == 0 {
            return Err(ConfigError::Invalid(
                "backup_retention must keep at least one backup".into(),
            ));
        }
        if matches!(&self.default_owner, Some(owner) if owner.trim().is_empty()) {
            return Err(ConfigError::Invalid("default_owner must not be blank".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let cfg: Config = serde_json::from_str(r#"{"ui_color_enabled":false}"#)
            .expect("parse minimal config");
        assert!(!cfg.ui_color_enabled);
        assert_eq!(cfg.backup_retention, 5);
        assert_eq!(cfg.default_owner, None);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut cfg = Config::default();
        cfg.default_owner = Some("  ".into());
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));

        let mut cfg = Config::default();
        cfg.backup_retention = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn data_root_defaults_below_base() {
        let cfg = Config::default();
        assert_eq!(
            cfg.resolve_data_root(Path::new("/tmp/cf")),
            PathBuf::from("/tmp/cf/data")
        );
    }
}
