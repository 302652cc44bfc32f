//! Path-to-title resolution for Explorer avatar references.
//!
//! Explorer items reference the avatars they support by item path rather than
//! by name. The index is built once per catalog load from the full Explorer
//! set and consulted by search and display. An unknown path is an expected
//! outcome (the referenced item was deleted or lives in another library) and
//! falls back to the path's last segment so the reference still renders and
//! still matches substring queries.

use crate::catalog::record::Record;
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
/// Item-path → title map for one catalog load.
pub struct AvatarNameIndex {
    by_path: BTreeMap<String, String>,
}

impl AvatarNameIndex {
    /// Build the index from a load's records. Only Explorer records carry
    /// item paths; everything else is ignored.
    pub fn build<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut by_path = BTreeMap::new();
        for record in records {
            if let Record::Explorer(item) = record {
                if !item.item_path.is_empty() {
                    by_path.insert(item.item_path.clone(), item.title.clone());
                }
            }
        }
        Self { by_path }
    }

    /// Resolve a path reference to a display name.
    ///
    /// Falls back to the last path segment when the path is not in the index;
    /// the Explorer tool writes Windows-style separators, so both `/` and `\`
    /// split segments.
    pub fn display_name<'a>(&'a self, path: &'a str) -> &'a str {
        match self.by_path.get(path) {
            Some(title) => title.as_str(),
            None => last_segment(path),
        }
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::{ExplorerItem, ExplorerKind};

    fn explorer(title: &str, path: &str) -> Record {
        Record::Explorer(ExplorerItem {
            title: title.to_string(),
            author: String::new(),
            memo: String::new(),
            item_path: path.to_string(),
            image_path: String::new(),
            supported_avatar_paths: Vec::new(),
            kind: ExplorerKind::Avatar,
            category: String::new(),
            created_date: String::new(),
            created_at_millis: 0,
            item_id: None,
        })
    }

    #[test]
    fn resolves_known_paths_to_titles() {
        let records = vec![explorer("Fox", r"Datas\Items\FoxFolder")];
        let index = AvatarNameIndex::build(&records);
        assert_eq!(index.display_name(r"Datas\Items\FoxFolder"), "Fox");
    }

    #[test]
    fn unknown_path_falls_back_to_last_segment() {
        let index = AvatarNameIndex::build(&[]);
        assert_eq!(index.display_name(r"Datas\Items\GoneFolder"), "GoneFolder");
        assert_eq!(index.display_name("unix/style/Gone"), "Gone");
        assert_eq!(index.display_name("bare-name"), "bare-name");
    }

    #[test]
    fn empty_paths_are_not_indexed() {
        let records = vec![explorer("Untracked", "")];
        let index = AvatarNameIndex::build(&records);
        assert!(index.is_empty());
    }
}
