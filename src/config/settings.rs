use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use tracing::warn;

use crate::adapters::lookup::twitter_lookup::{DEFAULT_API_HOST, DEFAULT_TIMEOUT};
use crate::config::app_config::AppConfig;
use crate::core::errors::{NamewatchError, Result};
use crate::core::models::user_lookup::TrackedField;

pub const TOKEN_VAR: &str = "TWITTER_BEARER_TOKEN";
pub const ENTITIES_VAR: &str = "TARGET_USER_ID";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(900);
pub const DEFAULT_LOG_FILE: &str = "username_changes.log";

/// Values supplied on the command line or through process environment
/// variables (clap merges the two before we see them).
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub entities: Vec<String>,
    pub bearer_token: Option<String>,
    pub api_host: Option<String>,
    pub field: Option<String>,
    pub log_file: Option<String>,
    pub interval_secs: Option<u64>,
    pub once: bool,
    pub cycles: Option<u64>,
}

/// Fully resolved settings for a watch run.
///
/// Precedence: command line / process env, then `.env`, then
/// `config.toml`, then built-in defaults.
#[derive(Debug, Clone)]
pub struct WatchSettings {
    pub entities: Vec<String>,
    pub bearer_token: Option<String>,
    pub api_host: String,
    pub timeout: Duration,
    pub field: TrackedField,
    pub log_path: PathBuf,
    pub interval: Duration,
    pub max_cycles: Option<u64>,
}

impl WatchSettings {
    pub fn resolve(
        overrides: &Overrides,
        dotenv: &HashMap<String, String>,
        config: &AppConfig,
    ) -> Result<Self> {
        let watch = config.watch.clone().unwrap_or_default();
        let api = config.api.clone().unwrap_or_default();

        let entities = if !overrides.entities.is_empty() {
            overrides.entities.clone()
        } else if let Some(list) = dotenv.get(ENTITIES_VAR) {
            split_list(list)
        } else {
            watch.entities.clone()
        };
        let entities = dedupe(entities)?;

        let bearer_token = overrides
            .bearer_token
            .clone()
            .or_else(|| dotenv.get(TOKEN_VAR).cloned())
            .filter(|t| !t.trim().is_empty());

        let field = match &overrides.field {
            Some(f) => f.parse::<TrackedField>()?,
            None => watch.field.unwrap_or_default(),
        };

        let log_path = PathBuf::from(
            overrides
                .log_file
                .clone()
                .or_else(|| config.audit.as_ref().map(|a| a.log_file.clone()))
                .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string()),
        );

        let interval = overrides
            .interval_secs
            .or(watch.interval_secs)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_INTERVAL);

        let max_cycles = if overrides.once || watch.run_once {
            Some(1)
        } else {
            overrides.cycles
        };
        if max_cycles == Some(0) {
            return Err(NamewatchError::InvalidConfig {
                detail: "--cycles must be at least 1".into(),
            });
        }

        Ok(Self {
            entities,
            bearer_token,
            api_host: overrides
                .api_host
                .clone()
                .or(api.host)
                .unwrap_or_else(|| DEFAULT_API_HOST.to_string()),
            timeout: api
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(DEFAULT_TIMEOUT),
            field,
            log_path,
            interval,
            max_cycles,
        })
    }

    /// Whether `watch` stops after its first poll.
    pub fn is_single_poll(&self) -> bool {
        self.max_cycles == Some(1) || self.interval.is_zero()
    }

    /// The token, or a startup-fatal error.
    pub fn require_token(&self) -> Result<&str> {
        self.bearer_token
            .as_deref()
            .ok_or_else(|| NamewatchError::MissingCredential {
                name: TOKEN_VAR.to_string(),
            })
    }

    /// At least one account, or a startup-fatal error.
    pub fn require_entities(&self) -> Result<&[String]> {
        if self.entities.is_empty() {
            return Err(NamewatchError::NoEntities);
        }
        Ok(&self.entities)
    }
}

fn split_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Validate IDs and drop repeats, keeping first-seen order.
fn dedupe(entities: Vec<String>) -> Result<Vec<String>> {
    let mut seen = Vec::with_capacity(entities.len());
    for id in entities {
        let id = id.trim().to_string();
        crate::cli::context::validate_entity_id(&id)?;
        if seen.contains(&id) {
            warn!(entity_id = %id, "account listed more than once, watching it once");
            continue;
        }
        seen.push(id);
    }
    Ok(seen)
}
