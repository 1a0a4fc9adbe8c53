use crate::core::errors::Result;
use crate::core::models::change_record::ChangeRecord;

/// Port for persisting and querying detected changes.
pub trait AuditLog: Send + Sync {
    /// Durably append a change. Returns only once the line has reached the OS.
    fn append(&self, record: &ChangeRecord) -> Result<()>;

    /// Query all recorded changes, optionally filtered.
    fn query(
        &self,
        entity_id: Option<&str>,
        since: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<Vec<ChangeRecord>>;
}
