use std::collections::HashMap;
use std::path::Path;

use crate::core::errors::{NamewatchError, Result};

/// Read a `.env` file into a map without touching the process environment.
///
/// A missing file yields an empty map. Later duplicates win.
pub fn load(path: &Path) -> Result<HashMap<String, String>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let parse_error = |e: dotenvy::Error| NamewatchError::ParseError {
        file: path.to_path_buf(),
        detail: e.to_string(),
    };

    dotenvy::from_path_iter(path)
        .map_err(parse_error)?
        .map(|item| item.map_err(parse_error))
        .collect()
}
