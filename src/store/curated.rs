//! Reader for the curated tool's store directory.
//!
//! The store is a directory of per-class JSON lists. Each class file is
//! independently optional (the tool only writes the files it has data for),
//! and `otherAssets.json` is passed through to the catalog as-is: whether
//! that class is representable is the classifier's call, not the loader's.

use crate::catalog::record::{
    CuratedAvatar, CuratedOther, CuratedSet, CuratedSummary, CuratedWearable, CuratedWorld,
};
use crate::store::{SkippedRecord, StoreError, StoreReport, read_array};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;
use tracing::{info, warn};

const AVATARS_FILE: &str = "avatars.json";
const WEARABLES_FILE: &str = "avatarWearables.json";
const WORLDS_FILE: &str = "worldObjects.json";
const OTHERS_FILE: &str = "otherAssets.json";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSummary {
    name: String,
    #[serde(default)]
    creator: String,
    #[serde(default)]
    image_filename: String,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    memo: Option<String>,
    #[serde(default)]
    item_id: Option<u64>,
    #[serde(default)]
    created_at: i64,
    #[serde(default)]
    published_at: i64,
}

#[derive(Debug, Deserialize)]
struct RawAvatar {
    description: RawSummary,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawWearable {
    description: RawSummary,
    #[serde(default)]
    category: String,
    #[serde(default)]
    supported_avatars: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct RawWorld {
    description: RawSummary,
    #[serde(default)]
    category: String,
}

#[derive(Debug, Deserialize)]
struct RawOther {
    description: RawSummary,
    #[serde(default)]
    category: String,
}

fn summary_from_raw(raw: RawSummary) -> CuratedSummary {
    CuratedSummary {
        name: raw.name,
        creator: raw.creator,
        image_filename: raw.image_filename,
        tags: raw.tags,
        memo: raw.memo,
        item_id: raw.item_id,
        created_at_millis: raw.created_at,
        published_at_millis: raw.published_at,
    }
}

/// Load one class file, absent files mapping to `None`.
fn load_class<R, T>(
    dir: &Path,
    file: &str,
    convert: impl Fn(R) -> T,
    report: &mut StoreReport,
) -> Result<Option<Vec<T>>, StoreError>
where
    R: DeserializeOwned,
{
    let path = dir.join(file);
    if !path.is_file() {
        return Ok(None);
    }

    let entries = read_array(&path)?;
    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<R>(entry) {
            Ok(raw) => records.push(convert(raw)),
            Err(err) => {
                warn!(file, index, error = %err, "skipping unreadable curated record");
                report.skipped.push(SkippedRecord {
                    entry: format!("{file}[{index}]"),
                    reason: err.to_string(),
                });
            }
        }
    }
    Ok(Some(records))
}

/// Load the curated store rooted at `dir`.
///
/// A store with no class files is a valid (empty) library; a missing
/// directory is a configuration error and fails loudly.
pub fn load_curated_store(dir: &Path) -> Result<(CuratedSet, StoreReport), StoreError> {
    if !dir.is_dir() {
        return Err(StoreError::Io {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotFound, "store directory not found"),
        });
    }

    let mut report = StoreReport::default();

    let avatars = load_class(
        dir,
        AVATARS_FILE,
        |raw: RawAvatar| CuratedAvatar {
            summary: summary_from_raw(raw.description),
        },
        &mut report,
    )?;
    let wearables = load_class(
        dir,
        WEARABLES_FILE,
        |raw: RawWearable| CuratedWearable {
            summary: summary_from_raw(raw.description),
            category: raw.category,
            supported_avatars: raw.supported_avatars,
        },
        &mut report,
    )?;
    let worlds = load_class(
        dir,
        WORLDS_FILE,
        |raw: RawWorld| CuratedWorld {
            summary: summary_from_raw(raw.description),
            category: raw.category,
        },
        &mut report,
    )?;
    let others = load_class(
        dir,
        OTHERS_FILE,
        |raw: RawOther| CuratedOther {
            summary: summary_from_raw(raw.description),
            category: raw.category,
        },
        &mut report,
    )?;

    let set = CuratedSet {
        avatars,
        wearables,
        worlds,
        others,
    };
    report.loaded = set.avatars.as_ref().map_or(0, Vec::len)
        + set.wearables.as_ref().map_or(0, Vec::len)
        + set.worlds.as_ref().map_or(0, Vec::len)
        + set.others.as_ref().map_or(0, Vec::len);
    info!(
        dir = %dir.display(),
        loaded = report.loaded,
        skipped = report.skipped.len(),
        "curated store read"
    );
    Ok((set, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_class(dir: &TempDir, file: &str, contents: &serde_json::Value) {
        fs::write(
            dir.path().join(file),
            serde_json::to_string_pretty(contents).unwrap(),
        )
        .unwrap();
    }

    #[test]
    fn absent_class_files_load_as_none() {
        let dir = TempDir::new().expect("temp dir");
        write_class(
            &dir,
            AVATARS_FILE,
            &json!([{ "description": { "name": "Wolf", "creator": "Lupine" } }]),
        );

        let (set, report) = load_curated_store(dir.path()).expect("loads");
        assert_eq!(set.avatars.as_ref().map(Vec::len), Some(1));
        assert!(set.wearables.is_none());
        assert!(set.worlds.is_none());
        assert!(set.others.is_none());
        assert_eq!(report.loaded, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn wearables_keep_category_and_avatar_names() {
        let dir = TempDir::new().expect("temp dir");
        write_class(
            &dir,
            WEARABLES_FILE,
            &json!([{
                "description": {
                    "name": "Hat",
                    "creator": "Acme",
                    "tags": ["headwear"],
                    "createdAt": 1_714_565_445_000u64
                },
                "category": "Tops",
                "supportedAvatars": ["Wolf"]
            }]),
        );

        let (set, _report) = load_curated_store(dir.path()).expect("loads");
        let wearables = set.wearables.expect("wearables present");
        assert_eq!(wearables[0].summary.name, "Hat");
        assert_eq!(wearables[0].summary.tags, ["headwear"]);
        assert_eq!(wearables[0].summary.created_at_millis, 1_714_565_445_000);
        assert_eq!(wearables[0].category, "Tops");
        assert_eq!(wearables[0].supported_avatars, ["Wolf"]);
    }

    #[test]
    fn malformed_entries_skip_with_file_context() {
        let dir = TempDir::new().expect("temp dir");
        write_class(
            &dir,
            WORLDS_FILE,
            &json!([
                { "description": { "name": "Cafe" }, "category": "Interiors" },
                { "category": "no description block" }
            ]),
        );

        let (set, report) = load_curated_store(dir.path()).expect("loads the rest");
        assert_eq!(set.worlds.as_ref().map(Vec::len), Some(1));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].entry, format!("{WORLDS_FILE}[1]"));
    }

    #[test]
    fn other_assets_pass_through_to_the_catalog() {
        let dir = TempDir::new().expect("temp dir");
        write_class(
            &dir,
            OTHERS_FILE,
            &json!([{ "description": { "name": "Mystery" }, "category": "Shaders" }]),
        );

        let (set, _report) = load_curated_store(dir.path()).expect("loads");
        let others = set.others.expect("others present");
        assert_eq!(others[0].summary.name, "Mystery");
    }
}
