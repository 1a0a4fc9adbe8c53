use serde::Deserialize;
use std::path::Path;

use crate::core::errors::{NamewatchError, Result};
use crate::core::models::user_lookup::TrackedField;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Optional project configuration read from `.namewatch/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    pub watch: Option<WatchSection>,
    pub api: Option<ApiSection>,
    pub audit: Option<AuditSection>,
}

impl AppConfig {
    /// Load `{config_dir}/config.toml`. A missing file yields the defaults.
    ///
    /// After parsing, validates account IDs and the audit log path so a bad
    /// file fails at startup instead of mid-run.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| NamewatchError::InvalidConfig {
            detail: format!("Failed to parse {CONFIG_FILE}: {e}"),
        })?;

        if let Some(watch) = &config.watch {
            for id in &watch.entities {
                crate::cli::context::validate_entity_id(id)?;
            }
        }

        if let Some(audit) = &config.audit {
            crate::cli::context::validate_log_path(&audit.log_file)?;
        }

        Ok(config)
    }
}

/// The `[watch]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchSection {
    #[serde(default)]
    pub entities: Vec<String>,
    pub interval_secs: Option<u64>,
    #[serde(default)]
    pub run_once: bool,
    pub field: Option<TrackedField>,
}

/// The `[api]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiSection {
    pub host: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// The `[audit]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditSection {
    pub log_file: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = AppConfig::load(tmp.path()).unwrap();
        assert!(config.watch.is_none());
        assert!(config.audit.is_none());
    }

    #[test]
    fn parse_full_config() {
        let config = AppConfig::parse(
            r#"
[watch]
entities = ["2244994945", "783214"]
interval_secs = 300
run_once = true
field = "name"

[api]
host = "http://localhost:8080"
timeout_secs = 5

[audit]
log_file = "logs/changes.log"
"#,
        )
        .unwrap();

        let watch = config.watch.unwrap();
        assert_eq!(watch.entities, vec!["2244994945", "783214"]);
        assert_eq!(watch.interval_secs, Some(300));
        assert!(watch.run_once);
        assert_eq!(watch.field, Some(TrackedField::Name));
        assert_eq!(config.api.unwrap().timeout_secs, Some(5));
        assert_eq!(config.audit.unwrap().log_file, "logs/changes.log");
    }

    #[test]
    fn partial_sections_are_fine() {
        let config = AppConfig::parse("[watch]\ninterval_secs = 60\n").unwrap();
        let watch = config.watch.unwrap();
        assert!(watch.entities.is_empty());
        assert!(!watch.run_once);
        assert!(watch.field.is_none());
    }

    #[test]
    fn rejects_bad_entity_id() {
        let err = AppConfig::parse("[watch]\nentities = [\"has space\"]\n").unwrap_err();
        assert!(matches!(err, NamewatchError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_log_path_traversal() {
        assert!(AppConfig::parse("[audit]\nlog_file = \"../escape.log\"\n").is_err());
        assert!(AppConfig::parse("[audit]\nlog_file = \"/etc/passwd\"\n").is_err());
    }

    #[test]
    fn rejects_unknown_field() {
        assert!(AppConfig::parse("[watch]\nfield = \"email\"\n").is_err());
    }

    #[test]
    fn malformed_toml_is_invalid_config() {
        let err = AppConfig::parse("[watch\n").unwrap_err();
        assert!(err.to_string().contains("Failed to parse config.toml"));
    }
}
