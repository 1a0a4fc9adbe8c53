use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::adapters::audit::text_audit_logger::TextAuditLogger;
use crate::adapters::lookup::twitter_lookup::TwitterLookup;
use crate::cli::WatchArgs;
use crate::cli::output;
use crate::config::app_config::AppConfig;
use crate::config::dotenv;
use crate::config::settings::WatchSettings;
use crate::core::errors::{NamewatchError, Result};
use crate::core::services::poll_scheduler::{CycleReport, EntityOutcome, PollScheduler};

/// Execute the `namewatch watch` command.
///
/// Resolves configuration, opens the audit log once, and runs the poll loop
/// until Ctrl-C or the cycle limit. Configuration problems abort before the
/// first poll; errors inside a cycle are reported and never stop the loop.
pub fn execute(args: &WatchArgs, env_file: &Path) -> Result<()> {
    let config = AppConfig::load(crate::cli::context::config_dir())?;
    let dotenv = dotenv::load(env_file)?;
    let settings = WatchSettings::resolve(&args.overrides(), &dotenv, &config)?;

    let entities = settings.require_entities()?.to_vec();
    let token = settings.require_token()?;

    let lookup = TwitterLookup::new(&settings.api_host, token, settings.field, settings.timeout)?;
    let audit = TextAuditLogger::open(&settings.log_path)?;

    output::header(&format!(
        "namewatch: watching {} account(s) for {} changes",
        entities.len(),
        settings.field
    ));
    println!("  Audit log: {}", settings.log_path.display());

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| NamewatchError::InvalidConfig {
            detail: format!("Failed to create async runtime: {e}"),
        })?;

    let mut scheduler = PollScheduler::new(lookup, audit, entities, settings.interval)
        .with_max_cycles(settings.max_cycles);

    let (cycles, changes, errors) = rt.block_on(async {
        let cancel = CancellationToken::new();
        let on_signal = cancel.clone();
        tokio::spawn(async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    info!("interrupt received, finishing current cycle");
                    on_signal.cancel();
                }
                Err(e) => error!(error = %e, "cannot listen for Ctrl-C"),
            }
        });

        let mut changes = 0usize;
        let mut errors = 0usize;
        let cycles = scheduler
            .run(&cancel, |report| {
                print_report(report);
                changes += report.changes().count();
                errors += report.error_count();
            })
            .await;
        (cycles, changes, errors)
    });

    scheduler.audit().close()?;
    let history = scheduler.history();
    let observations: usize = settings.entities.iter().map(|id| history.len(id)).sum();
    info!(
        accounts_seen = history.entity_count(),
        observations, cycles, changes, errors, "poll loop finished"
    );

    output::success(&format!(
        "Stopped after {cycles} poll(s), {changes} change(s) detected"
    ));
    if errors > 0 {
        output::warning(&format!("{errors} lookup or audit error(s) along the way"));
    }
    Ok(())
}

/// Print the user-facing lines for one cycle.
fn print_report(report: &CycleReport) {
    for (entity_id, outcome) in &report.outcomes {
        match outcome {
            EntityOutcome::Changed(record) => output::change(record),
            EntityOutcome::ChangeNotLogged { record, error } => {
                output::change(record);
                output::warning(&format!("Not written to audit log: {error}"));
            }
            EntityOutcome::Skipped(error) => {
                output::warning(&format!("Poll {} skipped {entity_id}: {error}", report.cycle));
            }
            EntityOutcome::Baseline | EntityOutcome::Unchanged => {}
        }
    }
}
