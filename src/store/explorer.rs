//! Reader for the Explorer tool's item store.
//!
//! The store is a single JSON array. Field names are the tool's own
//! PascalCase; the `Type` code arrives as either a string or a bare number
//! depending on which tool version last wrote the file, so both are
//! accepted. Kind and created-date are normalized here, once, so the
//! catalog core never re-parses source quirks.

use crate::catalog::record::{ExplorerItem, ExplorerKind};
use crate::store::{SkippedRecord, StoreError, StoreReport, dates, read_array};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RawItem {
    title: String,
    #[serde(default)]
    author_name: String,
    #[serde(default)]
    item_memo: String,
    item_path: String,
    #[serde(default)]
    image_path: String,
    #[serde(default)]
    supported_avatar: Vec<String>,
    #[serde(rename = "Type", default)]
    type_code: TypeCode,
    #[serde(default)]
    custom_category: String,
    #[serde(default)]
    created_date: String,
    #[serde(default)]
    item_id: Option<u64>,
}

/// The tool has written `"Type": "1"` and `"Type": 1` in different releases.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TypeCode {
    Text(String),
    Number(i64),
}

impl TypeCode {
    fn as_code(&self) -> String {
        match self {
            TypeCode::Text(code) => code.clone(),
            TypeCode::Number(code) => code.to_string(),
        }
    }
}

impl Default for TypeCode {
    fn default() -> Self {
        TypeCode::Text(String::new())
    }
}

fn item_from_raw(raw: RawItem) -> ExplorerItem {
    let kind = ExplorerKind::from_code(&raw.type_code.as_code());
    let created_at_millis = dates::created_at_millis(&raw.created_date);
    ExplorerItem {
        title: raw.title,
        author: raw.author_name,
        memo: raw.item_memo,
        item_path: raw.item_path,
        image_path: raw.image_path,
        supported_avatar_paths: raw.supported_avatar,
        kind,
        category: raw.custom_category,
        created_date: raw.created_date,
        created_at_millis,
        item_id: raw.item_id,
    }
}

/// Load the Explorer store at `path`.
///
/// Entries missing `Title` or `ItemPath` (or otherwise unparseable) are
/// skipped and reported; the file itself failing to read or parse is the
/// only hard error.
pub fn load_explorer_store(path: &Path) -> Result<(Vec<ExplorerItem>, StoreReport), StoreError> {
    let entries = read_array(path)?;
    let mut items = Vec::with_capacity(entries.len());
    let mut report = StoreReport::default();

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawItem>(entry) {
            Ok(raw) => items.push(item_from_raw(raw)),
            Err(err) => {
                warn!(index, error = %err, "skipping unreadable explorer record");
                report.skipped.push(SkippedRecord {
                    entry: format!("items[{index}]"),
                    reason: err.to_string(),
                });
            }
        }
    }

    report.loaded = items.len();
    info!(
        path = %path.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "explorer store read"
    );
    Ok((items, report))
}
