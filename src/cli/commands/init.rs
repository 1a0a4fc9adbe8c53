use std::io::Write;
use std::path::Path;

use crate::cli::output;
use crate::config::app_config::CONFIG_FILE;
use crate::core::errors::{NamewatchError, Result};

const DEFAULT_CONFIG: &str = r#"[watch]
# Numeric account IDs to watch. TARGET_USER_ID or --entity take precedence.
entities = []
interval_secs = 900
run_once = false
# "username" (the @handle) or "name" (display name)
field = "username"

[api]
host = "https://api.twitter.com"
timeout_secs = 10

[audit]
log_file = "username_changes.log"
"#;

/// Execute the `namewatch init` command.
///
/// Creates the config directory with a default `config.toml` and keeps
/// `.env` (where the bearer token lives) out of git.
pub fn execute() -> Result<()> {
    let config_dir = crate::cli::context::config_dir();
    let config_path = config_dir.join(CONFIG_FILE);

    if config_path.exists() {
        return Err(NamewatchError::InvalidConfig {
            detail: format!(
                "namewatch is already initialized here ({} exists)",
                config_path.display()
            ),
        });
    }

    output::header("namewatch: initializing");

    std::fs::create_dir_all(config_dir)?;
    std::fs::write(&config_path, DEFAULT_CONFIG)?;
    output::success(&format!("Generated {} with defaults", config_path.display()));

    add_to_gitignore(".env")?;

    output::header("Next steps");
    println!("  1. Put your API token in .env: TWITTER_BEARER_TOKEN=...");
    println!("  2. Add account IDs to [watch] entities in {}", config_path.display());
    println!("  3. Run: namewatch watch");

    Ok(())
}

/// Add an entry to .gitignore if not already present.
fn add_to_gitignore(entry: &str) -> Result<()> {
    let gitignore = Path::new(".gitignore");

    if gitignore.exists() {
        let content = std::fs::read_to_string(gitignore)?;
        if content.lines().any(|l| l.trim() == entry) {
            output::success(&format!("{entry} already in .gitignore"));
            return Ok(());
        }
        let mut file = std::fs::OpenOptions::new().append(true).open(gitignore)?;
        writeln!(file, "\n# namewatch: never commit API credentials\n{entry}")?;
    } else {
        std::fs::write(
            gitignore,
            format!("# namewatch: never commit API credentials\n{entry}\n"),
        )?;
    }

    output::success(&format!("Added {entry} to .gitignore"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::app_config::AppConfig;

    #[test]
    fn default_config_parses() {
        let config = AppConfig::parse(DEFAULT_CONFIG).unwrap();
        let watch = config.watch.unwrap();
        assert!(watch.entities.is_empty());
        assert_eq!(watch.interval_secs, Some(900));
        assert_eq!(config.audit.unwrap().log_file, "username_changes.log");
    }
}
