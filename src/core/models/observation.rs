use chrono::{DateTime, Utc};

/// A single snapshot of an account's tracked attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub entity_id: String,
    /// The tracked value. An empty string is valid.
    pub value: String,
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    pub fn new(entity_id: impl Into<String>, value: impl Into<String>, observed_at: DateTime<Utc>) -> Self {
        Self {
            entity_id: entity_id.into(),
            value: value.into(),
            observed_at,
        }
    }
}
