//! Partitioning of a record set into the three catalog views.
//!
//! Classification is exhaustive and non-overlapping: every record lands in
//! exactly one bucket or the whole load fails. A record class with no bucket
//! is a data-integrity error, never a silent drop; the user would otherwise
//! own assets the catalog simply never shows.

use crate::catalog::record::{ExplorerKind, Record};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Katakana marker the Explorer tool's users write in world categories.
const WORLD_MARKER_JA: &str = "ワールド";
const WORLD_MARKER_EN: &str = "world";

/// One of the three disjoint catalog views.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Avatars,
    Items,
    Worlds,
}

impl View {
    pub const ALL: [View; 3] = [View::Avatars, View::Items, View::Worlds];

    pub fn as_str(self) -> &'static str {
        match self {
            View::Avatars => "avatars",
            View::Items => "items",
            View::Worlds => "worlds",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "avatars" => Some(View::Avatars),
            "items" => Some(View::Items),
            "worlds" => Some(View::Worlds),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ClassifyError {
    /// A record class the catalog rules do not cover. Fatal for the load.
    #[error("record '{title}' ({class}) has no catalog bucket")]
    Unroutable { title: String, class: &'static str },
}

/// Record references partitioned by view, in input order within each bucket.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub avatars: Vec<&'a Record>,
    pub items: Vec<&'a Record>,
    pub worlds: Vec<&'a Record>,
}

impl<'a> Partition<'a> {
    pub fn bucket(&self, view: View) -> &[&'a Record] {
        match view {
            View::Avatars => &self.avatars,
            View::Items => &self.items,
            View::Worlds => &self.worlds,
        }
    }

    pub fn len(&self) -> usize {
        self.avatars.len() + self.items.len() + self.worlds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether a free-text category names world content.
///
/// Substring match on purpose: the source data holds strings like
/// `ワールドギミック` or `World / Udon`, and users are not consistent about
/// word boundaries. Tightening this to an exact match loses records.
pub fn is_world_category(category: &str) -> bool {
    let lowered = category.to_lowercase();
    lowered.contains(WORLD_MARKER_JA) || lowered.contains(WORLD_MARKER_EN)
}

/// The view a single record belongs to.
pub fn bucket_for(record: &Record) -> Result<View, ClassifyError> {
    match record {
        Record::Explorer(item) => Ok(match item.kind {
            ExplorerKind::Avatar => View::Avatars,
            ExplorerKind::Other if is_world_category(&item.category) => View::Worlds,
            ExplorerKind::Other => View::Items,
        }),
        Record::CuratedAvatar(_) => Ok(View::Avatars),
        Record::CuratedWearable(_) => Ok(View::Items),
        Record::CuratedWorld(_) => Ok(View::Worlds),
        Record::CuratedOther(_) => Err(ClassifyError::Unroutable {
            title: record.title().to_string(),
            class: "curated other-asset",
        }),
    }
}

/// Partition a record set into the three views.
///
/// Input order is preserved within each bucket so downstream sorting stays
/// deterministic for equal keys.
pub fn classify<'a, I>(records: I) -> Result<Partition<'a>, ClassifyError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut partition = Partition::default();
    for record in records {
        match bucket_for(record)? {
            View::Avatars => partition.avatars.push(record),
            View::Items => partition.items.push(record),
            View::Worlds => partition.worlds.push(record),
        }
    }
    Ok(partition)
}
