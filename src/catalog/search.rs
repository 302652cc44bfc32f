//! Keyword matching over records.
//!
//! Two layers gate every record: the basic free-text query (AND across
//! keywords, OR across fields per keyword) and the advanced per-field
//! keyword lists (AND across keywords, no cross-field fallback). Both layers
//! must pass. Matching is case-insensitive substring comparison throughout;
//! the catalog promises predictable boolean composition, not ranking.
//!
//! A [`Query`] is the compiled form of [`Criteria`]: tokenized and lowercased
//! once, then applied to any number of records.

use crate::catalog::classify::View;
use crate::catalog::lookup::AvatarNameIndex;
use crate::catalog::record::{AvatarRefs, Record};

/// Raw search input as the display layer edits it.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Criteria {
    /// Free-text query, split into keywords on whitespace.
    pub basic: String,
    pub advanced: Advanced,
}

/// Per-field keyword lists. An empty list leaves that field unconstrained.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Advanced {
    pub title: Vec<String>,
    pub author: Vec<String>,
    pub category: Vec<String>,
    pub supported_avatars: Vec<String>,
    pub tags: Vec<String>,
    pub memo: Vec<String>,
}

impl Criteria {
    pub fn basic(text: impl Into<String>) -> Self {
        Self {
            basic: text.into(),
            advanced: Advanced::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        keywords(&self.basic).is_empty() && self.advanced.is_empty()
    }
}

impl Advanced {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.author.is_empty()
            && self.category.is_empty()
            && self.supported_avatars.is_empty()
            && self.tags.is_empty()
            && self.memo.is_empty()
    }
}

/// Split free text into search keywords.
///
/// `split_whitespace` covers the full-width space (U+3000) the source tools'
/// users type alongside ASCII spaces; empty tokens never survive.
pub fn keywords(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

/// Compiled, lowercased form of [`Criteria`].
#[derive(Clone, Debug, Default)]
pub struct Query {
    basic: Vec<String>,
    title: Vec<String>,
    author: Vec<String>,
    category: Vec<String>,
    supported_avatars: Vec<String>,
    tags: Vec<String>,
    memo: Vec<String>,
}

impl Query {
    pub fn compile(criteria: &Criteria) -> Self {
        Self {
            basic: lowered(keywords(&criteria.basic)),
            title: lowered(criteria.advanced.title.clone()),
            author: lowered(criteria.advanced.author.clone()),
            category: lowered(criteria.advanced.category.clone()),
            supported_avatars: lowered(criteria.advanced.supported_avatars.clone()),
            tags: lowered(criteria.advanced.tags.clone()),
            memo: lowered(criteria.advanced.memo.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.basic.is_empty()
            && self.title.is_empty()
            && self.author.is_empty()
            && self.category.is_empty()
            && self.supported_avatars.is_empty()
            && self.tags.is_empty()
            && self.memo.is_empty()
    }

    /// Whether a record satisfies both query layers.
    ///
    /// `view` only gates the two basic-layer exclusions: the category field
    /// is skipped in the avatars view (avatar records have no user-facing
    /// category) and supported-avatar names are consulted only in the items
    /// view. The advanced layer sees every field on every view.
    pub fn matches(&self, record: &Record, view: View, names: &AvatarNameIndex) -> bool {
        if self.is_empty() {
            return true;
        }
        let hay = Haystacks::of(record, names);
        self.basic_matches(&hay, view) && self.advanced_matches(&hay)
    }

    fn basic_matches(&self, hay: &Haystacks, view: View) -> bool {
        self.basic.iter().all(|keyword| hay.any_field(keyword, view))
    }

    fn advanced_matches(&self, hay: &Haystacks) -> bool {
        field_holds(std::slice::from_ref(&hay.title), &self.title)
            && field_holds(std::slice::from_ref(&hay.author), &self.author)
            && field_holds(std::slice::from_ref(&hay.category), &self.category)
            && field_holds(&hay.avatars, &self.supported_avatars)
            && field_holds(&hay.tags, &self.tags)
            && field_holds(std::slice::from_ref(&hay.memo), &self.memo)
    }
}

/// All keywords found, against a field that actually has data.
///
/// An empty field never satisfies a constrained search: a tag query must not
/// pass records that have no tags at all.
fn field_holds(values: &[String], query_keywords: &[String]) -> bool {
    if query_keywords.is_empty() {
        return true;
    }
    let values: Vec<&str> = values
        .iter()
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .collect();
    if values.is_empty() {
        return false;
    }
    query_keywords
        .iter()
        .all(|keyword| values.iter().any(|value| value.contains(keyword.as_str())))
}

/// Lowercased field projections of one record, computed once per match.
struct Haystacks {
    title: String,
    author: String,
    category: String,
    memo: String,
    tags: Vec<String>,
    avatars: Vec<String>,
}

impl Haystacks {
    fn of(record: &Record, names: &AvatarNameIndex) -> Self {
        let avatars = match record.avatar_refs() {
            AvatarRefs::None => Vec::new(),
            AvatarRefs::Paths(paths) => paths
                .iter()
                .map(|path| names.display_name(path).to_lowercase())
                .collect(),
            AvatarRefs::Names(literal) => {
                literal.iter().map(|name| name.to_lowercase()).collect()
            }
        };
        Self {
            title: record.title().to_lowercase(),
            author: record.author().to_lowercase(),
            category: record.category_name().to_lowercase(),
            memo: record.memo().to_lowercase(),
            tags: record.tags().iter().map(|tag| tag.to_lowercase()).collect(),
            avatars,
        }
    }

    fn any_field(&self, keyword: &str, view: View) -> bool {
        if self.title.contains(keyword) || self.author.contains(keyword) {
            return true;
        }
        if view != View::Avatars && self.category.contains(keyword) {
            return true;
        }
        if view == View::Items && self.avatars.iter().any(|name| name.contains(keyword)) {
            return true;
        }
        self.tags.iter().any(|tag| tag.contains(keyword)) || self.memo.contains(keyword)
    }
}

fn lowered(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .map(|keyword| keyword.trim().to_lowercase())
        .filter(|keyword| !keyword.is_empty())
        .collect()
}
