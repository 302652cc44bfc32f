//! On-disk store parsing for the two source tools.
//!
//! Both loaders share one tolerance rule: a record that does not parse is
//! skipped, logged, and counted in the returned [`StoreReport`]; one broken
//! entry must not hide a whole library. Only file-level problems (unreadable
//! file, non-array JSON) abort a load. The catalog core never sees a
//! malformed record.

pub mod curated;
pub mod dates;
pub mod explorer;

pub use curated::load_curated_store;
pub use explorer::load_explorer_store;

use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not valid JSON: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{}: expected a JSON array of records", path.display())]
    NotAnArray { path: PathBuf },
}

/// What a load accepted and what it had to leave behind.
#[derive(Debug, Default)]
pub struct StoreReport {
    pub loaded: usize,
    pub skipped: Vec<SkippedRecord>,
}

impl StoreReport {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// One record the loader refused, with enough context to find it on disk.
#[derive(Debug)]
pub struct SkippedRecord {
    /// Store-relative position, e.g. `avatars.json[3]`.
    pub entry: String,
    pub reason: String,
}

/// Read a store file that must hold a JSON array.
pub(crate) fn read_array(path: &Path) -> Result<Vec<Value>, StoreError> {
    let data = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&data).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Array(entries) => Ok(entries),
        _ => Err(StoreError::NotAnArray {
            path: path.to_path_buf(),
        }),
    }
}
