use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::core::errors::{NamewatchError, Result};
use crate::core::models::change_record::ChangeRecord;
use crate::core::traits::audit::AuditLog;

/// Audit log that appends one human-readable line per change to a file.
///
/// The file is opened once in append mode and held until `close` or drop.
/// All appends go through a single mutex so lines from different accounts
/// never interleave, and each line is flushed and synced before `append`
/// returns.
pub struct TextAuditLogger {
    log_path: PathBuf,
    file: Mutex<Option<File>>,
}

impl TextAuditLogger {
    /// Open (or create) the log at `log_path`. Existing content is kept.
    pub fn open(log_path: &Path) -> Result<Self> {
        if let Some(parent) = log_path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)
            .map_err(|e| NamewatchError::AuditWrite {
                detail: format!("Cannot open audit log at {}: {e}", log_path.display()),
            })?;

        debug!(path = %log_path.display(), "audit log opened");

        Ok(Self {
            log_path: log_path.to_path_buf(),
            file: Mutex::new(Some(file)),
        })
    }

    /// A handle for `query` only, without opening the file for writing.
    /// Every `append` on it fails.
    pub fn reader(log_path: &Path) -> Self {
        Self {
            log_path: log_path.to_path_buf(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    /// Flush, sync and release the file handle. Later appends fail.
    /// Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let Some(file) = self.lock()?.take() else {
            return Ok(());
        };
        file.sync_all().map_err(|e| NamewatchError::AuditWrite {
            detail: format!("Failed to sync audit log on close: {e}"),
        })?;
        debug!(path = %self.log_path.display(), "audit log closed");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<File>>> {
        self.file.lock().map_err(|_| NamewatchError::AuditWrite {
            detail: "audit log lock poisoned".into(),
        })
    }
}

impl AuditLog for TextAuditLogger {
    fn append(&self, record: &ChangeRecord) -> Result<()> {
        let line = format!("{record}\n");

        let mut guard = self.lock()?;
        let file = guard.as_mut().ok_or_else(|| NamewatchError::AuditWrite {
            detail: format!("audit log {} is closed", self.log_path.display()),
        })?;

        file.write_all(line.as_bytes())
            .and_then(|()| file.flush())
            .and_then(|()| file.sync_data())
            .map_err(|e| NamewatchError::AuditWrite {
                detail: format!("Failed to write to {}: {e}", self.log_path.display()),
            })
    }

    fn query(
        &self,
        entity_id: Option<&str>,
        since: Option<DateTime<Utc>>,
    ) -> Result<Vec<ChangeRecord>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.log_path).map_err(|e| NamewatchError::AuditRead {
            detail: format!("Cannot read audit log: {e}"),
        })?;

        let reader = BufReader::new(file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| NamewatchError::AuditRead {
                detail: format!("Error reading audit log line {}: {e}", line_num + 1),
            })?;

            if line.trim().is_empty() {
                continue;
            }

            let Some(record) = ChangeRecord::parse_line(&line) else {
                warn!(line = line_num + 1, "skipping unrecognized audit log line");
                continue;
            };

            if let Some(id) = entity_id
                && record.entity_id != id
            {
                continue;
            }

            if let Some(since_date) = since
                && record.detected_at < since_date
            {
                continue;
            }

            records.push(record);
        }

        Ok(records)
    }
}

impl Drop for TextAuditLogger {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!(error = %e, "failed to close audit log cleanly");
        }
    }
}
