use std::path::PathBuf;

use chrono::{NaiveDate, TimeZone, Utc};
use colored::Colorize;

use crate::adapters::audit::text_audit_logger::TextAuditLogger;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::config::settings::DEFAULT_LOG_FILE;
use crate::core::errors::{NamewatchError, Result};
use crate::core::models::change_record::ChangeRecord;
use crate::core::traits::audit::AuditLog;

/// Execute the `namewatch log` command.
///
/// Displays recorded changes with optional filters for account, date,
/// and entry count.
pub fn execute(
    entity: Option<&str>,
    since: Option<&str>,
    last: Option<usize>,
    log_file: Option<&str>,
) -> Result<()> {
    let config = AppConfig::load(crate::cli::context::config_dir())?;
    let log_path = log_file
        .map(PathBuf::from)
        .or_else(|| config.audit.as_ref().map(|a| PathBuf::from(&a.log_file)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));

    let logger = TextAuditLogger::reader(&log_path);

    // Parse the --since flag as a date
    let since_dt = since.map(parse_since).transpose()?;

    let records = logger.query(entity, since_dt)?;

    if records.is_empty() {
        output::header("namewatch log");
        output::warning("No changes recorded");
        if entity.is_some() || since.is_some() {
            println!("  Try removing filters to see all entries.");
        }
        return Ok(());
    }

    // Apply --last N (take from the end)
    let skip = last.map_or(0, |n| records.len().saturating_sub(n));
    let display = &records[skip..];

    output::header(&format!("namewatch log ({} entries)", display.len()));
    println!();

    for record in display {
        print_record(record);
    }

    Ok(())
}

/// Parse a date string (ISO 8601: `YYYY-MM-DD`) into a UTC DateTime.
fn parse_since(s: &str) -> Result<chrono::DateTime<Utc>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| NamewatchError::InvalidConfig {
            detail: format!(
                "Invalid date format: '{s}'. Expected ISO 8601 (YYYY-MM-DD), e.g. 2026-01-15"
            ),
        })
        .map(|d| Utc.from_utc_datetime(&d.and_time(chrono::NaiveTime::MIN)))
}

/// Print a single change as a formatted row.
fn print_record(record: &ChangeRecord) {
    let date = record.detected_at.format("%Y-%m-%d %H:%M:%S");
    let from = if record.from_value.is_empty() {
        "(empty)".dimmed().to_string()
    } else {
        record.from_value.red().to_string()
    };
    let to = if record.to_value.is_empty() {
        "(empty)".dimmed().to_string()
    } else {
        record.to_value.green().to_string()
    };

    println!(
        "  {} {} {:<20} {} → {}",
        date.to_string().dimmed(),
        "│".dimmed(),
        record.entity_id.cyan(),
        from,
        to,
    );
}
