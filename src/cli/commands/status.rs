use std::path::Path;

use colored::Colorize;

use crate::adapters::audit::text_audit_logger::TextAuditLogger;
use crate::cli::SourceArgs;
use crate::cli::output;
use crate::config::app_config::{AppConfig, CONFIG_FILE};
use crate::config::dotenv;
use crate::config::settings::{TOKEN_VAR, WatchSettings};
use crate::core::errors::Result;
use crate::core::traits::audit::AuditLog;

/// Execute the `namewatch status` command.
///
/// Shows the configuration a `watch` run would use, without contacting
/// the lookup API.
pub fn execute(args: &SourceArgs, env_file: &Path) -> Result<()> {
    let config_dir = crate::cli::context::config_dir();
    let config = AppConfig::load(config_dir)?;
    let dotenv = dotenv::load(env_file)?;
    let settings = WatchSettings::resolve(&args.overrides(), &dotenv, &config)?;

    output::header(&format!("namewatch v{}", env!("CARGO_PKG_VERSION")));
    let config_path = config_dir.join(CONFIG_FILE);
    if config_path.exists() {
        println!("  Config: {}", config_path.display());
    } else {
        println!("  Config: {}", "none (defaults)".dimmed());
    }
    println!("  API: {}", settings.api_host.cyan());
    println!("  Field: {}", settings.field.to_string().cyan());
    if settings.is_single_poll() {
        println!("  Interval: {}", "single poll".cyan());
    } else {
        println!("  Interval: {}", format!("{}s", settings.interval.as_secs()).cyan());
    }

    print_credentials(&settings);
    print_entities(&settings);
    print_audit(&settings);

    Ok(())
}

fn print_credentials(settings: &WatchSettings) {
    println!("\n{}", "  Credentials".bold());
    if settings.bearer_token.is_some() {
        output::success(&format!("{TOKEN_VAR} is set"));
    } else {
        output::warning(&format!("{TOKEN_VAR} is missing; 'watch' will refuse to start"));
    }
}

fn print_entities(settings: &WatchSettings) {
    println!("\n{}", "  Accounts".bold());
    if settings.entities.is_empty() {
        output::warning("No accounts configured");
        return;
    }
    for id in &settings.entities {
        println!("  • {id}");
    }
}

fn print_audit(settings: &WatchSettings) {
    println!("\n{}", "  Audit log".bold());
    let logger = TextAuditLogger::reader(&settings.log_path);
    println!("  File: {}", logger.path().display());

    if !logger.path().exists() {
        println!("  {}", "not created yet".dimmed());
        return;
    }

    match logger.query(None, None) {
        Ok(records) => output::success(&format!("{} change(s) recorded", records.len())),
        Err(e) => output::warning(&format!("Could not read audit log: {e}")),
    }
}
