use std::time::Duration;

use futures::future::join_all;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::core::errors::NamewatchError;
use crate::core::models::change_record::ChangeRecord;
use crate::core::models::observation::Observation;
use crate::core::services::change_detector::ChangeDetector;
use crate::core::services::history_store::HistoryStore;
use crate::core::traits::audit::AuditLog;
use crate::core::traits::lookup::Lookup;

/// What happened to one account during one cycle.
#[derive(Debug)]
pub enum EntityOutcome {
    /// First observation of this account in this process.
    Baseline,
    Unchanged,
    Changed(ChangeRecord),
    /// A change was detected but the audit log rejected it.
    /// The observation was still recorded.
    ChangeNotLogged {
        record: ChangeRecord,
        error: NamewatchError,
    },
    /// The lookup failed; history and audit log were left untouched.
    Skipped(NamewatchError),
}

/// Per-account outcomes of a single fetch-detect-record cycle.
#[derive(Debug)]
pub struct CycleReport {
    pub cycle: u64,
    pub outcomes: Vec<(String, EntityOutcome)>,
}

impl CycleReport {
    /// Changes detected this cycle, logged or not.
    pub fn changes(&self) -> impl Iterator<Item = &ChangeRecord> {
        self.outcomes.iter().filter_map(|(_, outcome)| match outcome {
            EntityOutcome::Changed(record) | EntityOutcome::ChangeNotLogged { record, .. } => {
                Some(record)
            }
            _ => None,
        })
    }

    /// Number of accounts that hit an error this cycle.
    pub fn error_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| {
                matches!(
                    o,
                    EntityOutcome::Skipped(_) | EntityOutcome::ChangeNotLogged { .. }
                )
            })
            .count()
    }
}

/// Drives periodic fetch-detect-record cycles for a set of accounts.
///
/// Owns the history store; it is the only writer. Each cycle fetches every
/// account concurrently, then detects, logs and records them one at a time
/// in configuration order, so audit appends never interleave.
pub struct PollScheduler<L: Lookup, A: AuditLog> {
    lookup: L,
    audit: A,
    history: HistoryStore,
    detector: ChangeDetector,
    entities: Vec<String>,
    interval: Duration,
    max_cycles: Option<u64>,
    cycles_run: u64,
}

impl<L: Lookup, A: AuditLog> PollScheduler<L, A> {
    /// A zero `interval` means a single cycle.
    pub fn new(lookup: L, audit: A, entities: Vec<String>, interval: Duration) -> Self {
        Self {
            lookup,
            audit,
            history: HistoryStore::new(),
            detector: ChangeDetector,
            entities,
            interval,
            max_cycles: None,
            cycles_run: 0,
        }
    }

    /// Stop after `max_cycles` cycles instead of running until cancelled.
    pub fn with_max_cycles(mut self, max_cycles: Option<u64>) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn audit(&self) -> &A {
        &self.audit
    }

    /// Run one cycle over all accounts. Never fails; per-account errors
    /// are reported in the returned `CycleReport`.
    pub async fn run_cycle(&mut self) -> CycleReport {
        self.cycles_run += 1;
        let cycle = self.cycles_run;

        let results = join_all(self.entities.iter().map(|id| self.lookup.fetch(id))).await;

        let mut outcomes = Vec::with_capacity(self.entities.len());
        for (entity_id, fetched) in self.entities.iter().zip(results) {
            let outcome = match fetched {
                Ok(observation) => observe(
                    &self.detector,
                    &mut self.history,
                    &self.audit,
                    entity_id,
                    observation,
                ),
                Err(error) => {
                    warn!(cycle, entity_id = %entity_id, %error, "lookup failed, skipping this cycle");
                    EntityOutcome::Skipped(error)
                }
            };
            outcomes.push((entity_id.clone(), outcome));
        }

        CycleReport { cycle, outcomes }
    }

    /// Run cycles on a fixed interval until `cancel` fires or the cycle
    /// limit is reached. Returns the number of cycles completed.
    ///
    /// Cancellation is only observed between cycles; a started cycle always
    /// runs to completion.
    pub async fn run<F>(&mut self, cancel: &CancellationToken, mut on_cycle: F) -> u64
    where
        F: FnMut(&CycleReport),
    {
        let limit = if self.interval.is_zero() {
            Some(1)
        } else {
            self.max_cycles
        };

        let mut ticker = tokio::time::interval(self.interval.max(Duration::from_millis(1)));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            entities = self.entities.len(),
            interval_secs = self.interval.as_secs(),
            "poll loop started"
        );

        let mut completed = 0;
        loop {
            if limit.is_some_and(|n| completed >= n) {
                info!(cycles = completed, "cycle limit reached, stopping poll loop");
                break;
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(cycles = completed, "cancellation requested, stopping poll loop");
                    break;
                }
                _ = ticker.tick() => {}
            }

            let report = self.run_cycle().await;
            on_cycle(&report);
            completed += 1;
        }

        completed
    }
}

/// Detect, log if changed, then record unconditionally under `entity_id`.
fn observe<A: AuditLog>(
    detector: &ChangeDetector,
    history: &mut HistoryStore,
    audit: &A,
    entity_id: &str,
    mut observation: Observation,
) -> EntityOutcome {
    if observation.entity_id != entity_id {
        warn!(
            entity_id,
            reported = %observation.entity_id,
            "lookup reported a different account ID, keeping the requested one"
        );
        observation.entity_id = entity_id.to_string();
    }

    if observation.value.is_empty() {
        warn!(entity_id = %entity_id, "lookup returned an empty value");
    }

    let outcome = match detector.detect(history, &observation) {
        None if history.last(entity_id).is_none() => {
            debug!(entity_id = %entity_id, value = %observation.value, "baseline recorded");
            EntityOutcome::Baseline
        }
        None => {
            debug!(entity_id = %entity_id, value = %observation.value, "no change");
            EntityOutcome::Unchanged
        }
        Some(record) => match audit.append(&record) {
            Ok(()) => {
                info!(
                    entity_id = %entity_id,
                    from = %record.from_value,
                    to = %record.to_value,
                    "change detected"
                );
                EntityOutcome::Changed(record)
            }
            Err(error) => {
                warn!(
                    entity_id = %entity_id,
                    from = %record.from_value,
                    to = %record.to_value,
                    %error,
                    "change detected but not written to the audit log"
                );
                EntityOutcome::ChangeNotLogged { record, error }
            }
        },
    };

    history.record(entity_id, observation);
    outcome
}
