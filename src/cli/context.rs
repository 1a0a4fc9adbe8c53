use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

use crate::core::errors::{NamewatchError, Result};

static CONFIG_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Initialize the global config directory path.
/// If `custom` is provided, uses that path; otherwise defaults to `.namewatch`.
pub fn init(custom: Option<&str>) {
    let dir = custom
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".namewatch"));
    let _ = CONFIG_DIR.set(dir);
}

/// Get the current config directory path.
pub fn config_dir() -> &'static Path {
    CONFIG_DIR
        .get()
        .map(|p| p.as_path())
        .unwrap_or(Path::new(".namewatch"))
}

/// Account IDs are opaque but must be non-empty and free of whitespace,
/// since they appear verbatim in audit lines and request paths.
pub fn validate_entity_id(id: &str) -> Result<()> {
    if id.is_empty() {
        return Err(NamewatchError::InvalidConfig {
            detail: "Account ID must not be empty".into(),
        });
    }
    if id.chars().any(|c| c.is_whitespace() || c == '/' || c == '?' || c == '#') {
        return Err(NamewatchError::InvalidConfig {
            detail: format!("Invalid account ID '{id}': whitespace, '/', '?' and '#' are not allowed"),
        });
    }
    Ok(())
}

/// Audit log paths from a config file must stay inside the working directory.
pub fn validate_log_path(path: &str) -> Result<()> {
    let p = Path::new(path);
    if path.trim().is_empty() {
        return Err(NamewatchError::InvalidConfig {
            detail: "audit log file must not be empty".into(),
        });
    }
    let escapes = p
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(NamewatchError::InvalidConfig {
            detail: format!("audit log file '{path}' must be a relative path without '..'"),
        });
    }
    Ok(())
}
