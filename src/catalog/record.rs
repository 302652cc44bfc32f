//! Normalized item model shared by every catalog component.
//!
//! Records from the two source tools keep their native shapes behind one
//! tagged union so the classifier, search engine, and sorter never branch on
//! source-specific fields themselves. The uniform projections (`title`,
//! `author`, `category_name`, `created_at_millis`, `memo`, `tags`) are total:
//! absent fields project to an empty string, empty slice, or epoch zero.

use serde::Serialize;

/// Explorer type code that marks an item as an avatar. Every other code is a
/// plain item; the world/item split for those comes from the category string.
const AVATAR_TYPE_CODE: &str = "0";

/// Declared kind of an Explorer item, parsed once at the store boundary from
/// the tool's string type code.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExplorerKind {
    Avatar,
    Other,
}

impl ExplorerKind {
    /// Map a raw type code onto the kind. Codes are not trusted to be tidy;
    /// surrounding whitespace is ignored.
    pub fn from_code(code: &str) -> Self {
        if code.trim() == AVATAR_TYPE_CODE {
            ExplorerKind::Avatar
        } else {
            ExplorerKind::Other
        }
    }
}

#[derive(Clone, Debug, Serialize)]
/// One item from the Explorer store.
///
/// `item_path` is the folder location and doubles as the join key other items
/// use in `supported_avatar_paths`. `created_date` keeps the raw
/// locale-dependent string the tool wrote; `created_at_millis` is its
/// normalized form, computed once at load.
pub struct ExplorerItem {
    pub title: String,
    pub author: String,
    pub memo: String,
    pub item_path: String,
    pub image_path: String,
    pub supported_avatar_paths: Vec<String>,
    pub kind: ExplorerKind,
    pub category: String,
    pub created_date: String,
    pub created_at_millis: i64,
    pub item_id: Option<u64>,
}

#[derive(Clone, Debug, Default, Serialize)]
/// Description block shared by every curated-store record class.
pub struct CuratedSummary {
    pub name: String,
    pub creator: String,
    pub image_filename: String,
    pub tags: Vec<String>,
    pub memo: Option<String>,
    pub item_id: Option<u64>,
    pub created_at_millis: i64,
    pub published_at_millis: i64,
}

#[derive(Clone, Debug, Serialize)]
/// Curated avatar. Avatars carry no user-facing category.
pub struct CuratedAvatar {
    pub summary: CuratedSummary,
}

#[derive(Clone, Debug, Serialize)]
/// Curated wearable. `supported_avatars` holds display names, already
/// resolved by the source tool, unlike the Explorer path references.
pub struct CuratedWearable {
    pub summary: CuratedSummary,
    pub category: String,
    pub supported_avatars: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
/// Curated world object.
pub struct CuratedWorld {
    pub summary: CuratedSummary,
    pub category: String,
}

#[derive(Clone, Debug, Serialize)]
/// Curated record class newer tool versions emit for anything that is neither
/// an avatar, wearable, nor world object. The catalog has no bucket for it;
/// classification reports it instead of guessing.
pub struct CuratedOther {
    pub summary: CuratedSummary,
    pub category: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
/// One asset, from either source tool.
pub enum Record {
    Explorer(ExplorerItem),
    CuratedAvatar(CuratedAvatar),
    CuratedWearable(CuratedWearable),
    CuratedWorld(CuratedWorld),
    CuratedOther(CuratedOther),
}

/// Supported-avatar references carried by a record.
///
/// Explorer items reference other items by path; those resolve to display
/// names through [`crate::catalog::AvatarNameIndex`]. Curated wearables carry
/// literal names that compare as-is.
#[derive(Clone, Copy, Debug)]
pub enum AvatarRefs<'a> {
    None,
    Paths(&'a [String]),
    Names(&'a [String]),
}

impl Record {
    pub fn title(&self) -> &str {
        match self {
            Record::Explorer(item) => &item.title,
            Record::CuratedAvatar(a) => &a.summary.name,
            Record::CuratedWearable(w) => &w.summary.name,
            Record::CuratedWorld(w) => &w.summary.name,
            Record::CuratedOther(o) => &o.summary.name,
        }
    }

    pub fn author(&self) -> &str {
        match self {
            Record::Explorer(item) => &item.author,
            Record::CuratedAvatar(a) => &a.summary.creator,
            Record::CuratedWearable(w) => &w.summary.creator,
            Record::CuratedWorld(w) => &w.summary.creator,
            Record::CuratedOther(o) => &o.summary.creator,
        }
    }

    /// User-facing category string. Curated avatars have none and project the
    /// empty string.
    pub fn category_name(&self) -> &str {
        match self {
            Record::Explorer(item) => &item.category,
            Record::CuratedAvatar(_) => "",
            Record::CuratedWearable(w) => &w.category,
            Record::CuratedWorld(w) => &w.category,
            Record::CuratedOther(o) => &o.category,
        }
    }

    /// Creation time in epoch milliseconds; zero when the source never
    /// recorded a usable date.
    pub fn created_at_millis(&self) -> i64 {
        match self {
            Record::Explorer(item) => item.created_at_millis,
            Record::CuratedAvatar(a) => a.summary.created_at_millis,
            Record::CuratedWearable(w) => w.summary.created_at_millis,
            Record::CuratedWorld(w) => w.summary.created_at_millis,
            Record::CuratedOther(o) => o.summary.created_at_millis,
        }
    }

    pub fn memo(&self) -> &str {
        match self {
            Record::Explorer(item) => &item.memo,
            Record::CuratedAvatar(a) => a.summary.memo.as_deref().unwrap_or(""),
            Record::CuratedWearable(w) => w.summary.memo.as_deref().unwrap_or(""),
            Record::CuratedWorld(w) => w.summary.memo.as_deref().unwrap_or(""),
            Record::CuratedOther(o) => o.summary.memo.as_deref().unwrap_or(""),
        }
    }

    /// Tag list; Explorer items have no tags.
    pub fn tags(&self) -> &[String] {
        match self {
            Record::Explorer(_) => &[],
            Record::CuratedAvatar(a) => &a.summary.tags,
            Record::CuratedWearable(w) => &w.summary.tags,
            Record::CuratedWorld(w) => &w.summary.tags,
            Record::CuratedOther(o) => &o.summary.tags,
        }
    }

    pub fn avatar_refs(&self) -> AvatarRefs<'_> {
        match self {
            Record::Explorer(item) => AvatarRefs::Paths(&item.supported_avatar_paths),
            Record::CuratedWearable(w) => AvatarRefs::Names(&w.supported_avatars),
            _ => AvatarRefs::None,
        }
    }

    /// Path or filename of the preview image, as the source tool stored it.
    pub fn image_ref(&self) -> &str {
        match self {
            Record::Explorer(item) => &item.image_path,
            Record::CuratedAvatar(a) => &a.summary.image_filename,
            Record::CuratedWearable(w) => &w.summary.image_filename,
            Record::CuratedWorld(w) => &w.summary.image_filename,
            Record::CuratedOther(o) => &o.summary.image_filename,
        }
    }

    pub fn item_id(&self) -> Option<u64> {
        match self {
            Record::Explorer(item) => item.item_id,
            Record::CuratedAvatar(a) => a.summary.item_id,
            Record::CuratedWearable(w) => w.summary.item_id,
            Record::CuratedWorld(w) => w.summary.item_id,
            Record::CuratedOther(o) => o.summary.item_id,
        }
    }
}

#[derive(Clone, Debug, Default)]
/// The curated store's record lists, each independently optional because the
/// tool only writes the class files it has data for.
pub struct CuratedSet {
    pub avatars: Option<Vec<CuratedAvatar>>,
    pub wearables: Option<Vec<CuratedWearable>>,
    pub worlds: Option<Vec<CuratedWorld>>,
    pub others: Option<Vec<CuratedOther>>,
}

impl CuratedSet {
    /// Flatten the class lists into records, preserving per-file order.
    pub fn into_records(self) -> Vec<Record> {
        let mut records = Vec::new();
        if let Some(avatars) = self.avatars {
            records.extend(avatars.into_iter().map(Record::CuratedAvatar));
        }
        if let Some(wearables) = self.wearables {
            records.extend(wearables.into_iter().map(Record::CuratedWearable));
        }
        if let Some(worlds) = self.worlds {
            records.extend(worlds.into_iter().map(Record::CuratedWorld));
        }
        if let Some(others) = self.others {
            records.extend(others.into_iter().map(Record::CuratedOther));
        }
        records
    }
}
