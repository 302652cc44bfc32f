//! Deterministic ordering of filtered records.
//!
//! Every method is a stable total order: equal keys keep their input order,
//! so an unchanged record set paginates identically across repeated calls.

use crate::catalog::record::Record;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMethod {
    CreatedAsc,
    /// Newest first; the default the display layer opens with.
    #[default]
    CreatedDesc,
    TitleAsc,
    TitleDesc,
    AuthorAsc,
    AuthorDesc,
}

impl SortMethod {
    pub const ALL: [SortMethod; 6] = [
        SortMethod::CreatedAsc,
        SortMethod::CreatedDesc,
        SortMethod::TitleAsc,
        SortMethod::TitleDesc,
        SortMethod::AuthorAsc,
        SortMethod::AuthorDesc,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortMethod::CreatedAsc => "created-asc",
            SortMethod::CreatedDesc => "created-desc",
            SortMethod::TitleAsc => "title-asc",
            SortMethod::TitleDesc => "title-desc",
            SortMethod::AuthorAsc => "author-asc",
            SortMethod::AuthorDesc => "author-desc",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        SortMethod::ALL.into_iter().find(|m| m.as_str() == raw)
    }
}

/// Order records by the given method.
///
/// Titles and authors compare case-sensitively, exactly as projected; dates
/// compare on normalized epoch millis, so records with an unknown date group
/// at epoch zero rather than dropping out.
pub fn sort_records(records: &mut [&Record], method: SortMethod) {
    match method {
        SortMethod::CreatedAsc => records.sort_by_key(|r| r.created_at_millis()),
        SortMethod::CreatedDesc => {
            records.sort_by(|a, b| b.created_at_millis().cmp(&a.created_at_millis()))
        }
        SortMethod::TitleAsc => records.sort_by(|a, b| a.title().cmp(b.title())),
        SortMethod::TitleDesc => records.sort_by(|a, b| b.title().cmp(a.title())),
        SortMethod::AuthorAsc => records.sort_by(|a, b| a.author().cmp(b.author())),
        SortMethod::AuthorDesc => records.sort_by(|a, b| b.author().cmp(a.author())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::{CuratedAvatar, CuratedSummary};

    fn record(title: &str, author: &str, created: i64) -> Record {
        Record::CuratedAvatar(CuratedAvatar {
            summary: CuratedSummary {
                name: title.to_string(),
                creator: author.to_string(),
                created_at_millis: created,
                ..CuratedSummary::default()
            },
        })
    }

    fn titles(records: &[&Record]) -> Vec<String> {
        records.iter().map(|r| r.title().to_string()).collect()
    }

    #[test]
    fn created_orders_ascending_and_descending() {
        let a = record("a", "", 300);
        let b = record("b", "", 100);
        let c = record("c", "", 200);
        let mut refs = vec![&a, &b, &c];
        sort_records(&mut refs, SortMethod::CreatedAsc);
        assert_eq!(titles(&refs), ["b", "c", "a"]);
        sort_records(&mut refs, SortMethod::CreatedDesc);
        assert_eq!(titles(&refs), ["a", "c", "b"]);
    }

    #[test]
    fn unknown_dates_sort_as_epoch_zero() {
        let dated = record("dated", "", 100);
        let undated = record("undated", "", 0);
        let mut refs = vec![&dated, &undated];
        sort_records(&mut refs, SortMethod::CreatedAsc);
        assert_eq!(titles(&refs), ["undated", "dated"]);
    }

    #[test]
    fn title_sort_is_case_sensitive_lexicographic() {
        let upper = record("Zebra", "", 0);
        let lower = record("apple", "", 0);
        let mut refs = vec![&lower, &upper];
        // ASCII uppercase orders before lowercase under byte-wise Ord.
        sort_records(&mut refs, SortMethod::TitleAsc);
        assert_eq!(titles(&refs), ["Zebra", "apple"]);
    }

    #[test]
    fn sort_is_idempotent_and_desc_reverses_distinct_keys() {
        let a = record("a", "", 0);
        let b = record("b", "", 0);
        let c = record("c", "", 0);
        let mut refs = vec![&b, &c, &a];
        sort_records(&mut refs, SortMethod::TitleAsc);
        let once = titles(&refs);
        sort_records(&mut refs, SortMethod::TitleAsc);
        assert_eq!(titles(&refs), once, "re-sorting must not reorder");

        sort_records(&mut refs, SortMethod::TitleDesc);
        let mut reversed = once.clone();
        reversed.reverse();
        assert_eq!(titles(&refs), reversed);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let first = record("same", "x", 0);
        let second = record("same", "y", 0);
        let third = record("same", "z", 0);
        let mut refs = vec![&first, &second, &third];
        sort_records(&mut refs, SortMethod::TitleAsc);
        let authors: Vec<&str> = refs.iter().map(|r| r.author()).collect();
        assert_eq!(authors, ["x", "y", "z"]);
    }

    #[test]
    fn method_labels_round_trip() {
        for method in SortMethod::ALL {
            assert_eq!(SortMethod::parse(method.as_str()), Some(method));
        }
        assert_eq!(SortMethod::parse("shuffled"), None);
    }
}
