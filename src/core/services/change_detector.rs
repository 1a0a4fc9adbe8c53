use crate::core::models::change_record::ChangeRecord;
use crate::core::models::observation::Observation;
use crate::core::services::history_store::HistoryStore;

/// Decides whether a fresh observation is a change.
pub struct ChangeDetector;

impl ChangeDetector {
    /// Compare `observation` against the last recorded value of its account.
    ///
    /// - No prior observation: `None` (baseline)
    /// - Same value as the prior observation: `None`
    /// - Different value: a `ChangeRecord` stamped with the new observation's time
    ///
    /// Must be called before `observation` is recorded in `store`.
    pub fn detect(&self, store: &HistoryStore, observation: &Observation) -> Option<ChangeRecord> {
        let last = store.last(&observation.entity_id)?;
        if last.value == observation.value {
            return None;
        }

        Some(ChangeRecord {
            entity_id: observation.entity_id.clone(),
            from_value: last.value.clone(),
            to_value: observation.value.clone(),
            detected_at: observation.observed_at,
        })
    }
}
