use std::path::PathBuf;

/// All domain errors for Namewatch.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum NamewatchError {
    #[error("Lookup failed for '{entity_id}': {reason}")]
    FetchFailed { entity_id: String, reason: String },

    #[error(
        "Account '{entity_id}' not found\n\n  \
         The lookup API returned no user for this ID.\n  \
         Check that the ID is a numeric account ID, not a @handle."
    )]
    EntityNotFound { entity_id: String },

    #[error("Audit log write failed: {detail}")]
    AuditWrite { detail: String },

    #[error("Audit log read failed: {detail}")]
    AuditRead { detail: String },

    #[error(
        "Missing credential: {name}\n\n  \
         Solutions:\n    \
         → Export it: export {name}=...\n    \
         → Or add it to .env: {name}=..."
    )]
    MissingCredential { name: String },

    #[error(
        "No accounts to watch\n\n  \
         Solutions:\n    \
         → Pass one on the command line: namewatch watch --entity 12345\n    \
         → Set TARGET_USER_ID in the environment or .env\n    \
         → List them in .namewatch/config.toml under [watch] entities"
    )]
    NoEntities,

    #[error(
        "Parse error in {file}: {detail}\n\n  \
         Expected format: KEY=value (one per line).\n  \
         Comments (#) and blank lines are allowed."
    )]
    ParseError { file: PathBuf, detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, NamewatchError>;
