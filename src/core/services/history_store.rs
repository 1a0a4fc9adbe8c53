use std::collections::HashMap;

use tracing::warn;

use crate::core::models::observation::Observation;

/// In-memory, append-only observation history per account.
///
/// Lives only as long as the process. A restart begins with an empty
/// store, so the first cycle afterwards is a fresh baseline.
#[derive(Debug, Default)]
pub struct HistoryStore {
    entries: HashMap<String, Vec<Observation>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an observation to the account's history.
    pub fn record(&mut self, entity_id: &str, observation: Observation) {
        let history = self.entries.entry(entity_id.to_string()).or_default();

        if let Some(last) = history.last()
            && observation.observed_at < last.observed_at
        {
            warn!(
                entity_id,
                previous = %last.observed_at,
                current = %observation.observed_at,
                "observation timestamp went backwards"
            );
        }

        history.push(observation);
    }

    /// The most recent observation, or `None` if never observed.
    pub fn last(&self, entity_id: &str) -> Option<&Observation> {
        self.entries.get(entity_id).and_then(|h| h.last())
    }

    /// Full history for an account, oldest first.
    pub fn history(&self, entity_id: &str) -> &[Observation] {
        self.entries
            .get(entity_id)
            .map(|h| h.as_slice())
            .unwrap_or(&[])
    }

    /// Number of observations recorded for an account.
    pub fn len(&self, entity_id: &str) -> usize {
        self.history(entity_id).len()
    }

    /// Number of accounts observed at least once.
    pub fn entity_count(&self) -> usize {
        self.entries.len()
    }
}
