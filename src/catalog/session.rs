//! Catalog session: snapshot ownership and the query pipeline.
//!
//! A session holds the current [`Snapshot`] behind an `Arc`. Loading or
//! clearing a source builds a complete replacement snapshot, records plus
//! the avatar-name index, and swaps the `Arc` in one assignment. Readers
//! that cloned the `Arc` keep the pre-swap state in full; nothing ever
//! observes a half-reloaded catalog. Classification is validated when a
//! source loads, so an unroutable record fails that load loudly and the
//! previous snapshot stays active.
//!
//! Queries run Classifier → SearchEngine → Sorter → Paginator in that fixed
//! order on every call. Criteria change call-to-call, so no filtered result
//! is ever cached across calls.

use crate::catalog::classify::{self, ClassifyError, View};
use crate::catalog::lookup::AvatarNameIndex;
use crate::catalog::page::{self, BrowseState};
use crate::catalog::record::{CuratedSet, ExplorerItem, Record};
use crate::catalog::search::{Criteria, Query};
use crate::catalog::sort::{self, SortMethod};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Immutable catalog state for one load: the two independently-optional
/// record sets and the name index derived from the Explorer set.
#[derive(Debug, Default)]
pub struct Snapshot {
    explorer: Option<Vec<Record>>,
    curated: Option<Vec<Record>>,
    names: AvatarNameIndex,
}

/// One page of query results plus the navigation totals the display needs.
#[derive(Debug, Serialize)]
pub struct ViewPage {
    pub records: Vec<Record>,
    pub page_index: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl Snapshot {
    fn assemble(explorer: Option<Vec<Record>>, curated: Option<Vec<Record>>) -> Arc<Self> {
        let names = AvatarNameIndex::build(explorer.iter().flatten());
        Arc::new(Self {
            explorer,
            curated,
            names,
        })
    }

    /// Every record in the snapshot, Explorer set first.
    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.explorer.iter().flatten().chain(self.curated.iter().flatten())
    }

    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    pub fn has_explorer(&self) -> bool {
        self.explorer.is_some()
    }

    pub fn has_curated(&self) -> bool {
        self.curated.is_some()
    }

    /// True when neither source is loaded.
    pub fn is_empty(&self) -> bool {
        self.explorer.is_none() && self.curated.is_none()
    }

    pub fn names(&self) -> &AvatarNameIndex {
        &self.names
    }

    /// Resolve a supported-avatar path reference for display.
    pub fn display_avatar_name<'a>(&'a self, path: &'a str) -> &'a str {
        self.names.display_name(path)
    }

    /// Run the full query pipeline for one view.
    pub fn view(
        &self,
        view: View,
        criteria: &Criteria,
        sort: SortMethod,
        page_index: usize,
        page_size: usize,
    ) -> Result<ViewPage, ClassifyError> {
        let partition = classify::classify(self.records())?;
        let query = Query::compile(criteria);
        let mut filtered: Vec<&Record> = partition
            .bucket(view)
            .iter()
            .copied()
            .filter(|record| query.matches(record, view, &self.names))
            .collect();
        sort::sort_records(&mut filtered, sort);

        let total_count = filtered.len();
        let total_pages = page::total_pages(total_count, page_size);
        let records = page::page_slice(&filtered, page_index, page_size)
            .iter()
            .map(|record| (*record).clone())
            .collect();
        Ok(ViewPage {
            records,
            page_index,
            total_count,
            total_pages,
        })
    }

    /// Pipeline entry for a display-owned [`BrowseState`].
    pub fn browse(&self, state: &BrowseState) -> Result<ViewPage, ClassifyError> {
        self.view(
            state.view(),
            state.criteria(),
            state.sort(),
            state.page_index(),
            state.page_size(),
        )
    }
}

/// Owner of the active snapshot. Single writer; readers clone the `Arc`.
#[derive(Debug, Default)]
pub struct CatalogSession {
    snapshot: Arc<Snapshot>,
}

impl CatalogSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current snapshot. Queries against the clone stay coherent across
    /// a concurrent reload.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    /// Replace the Explorer set, keeping the curated set as loaded.
    ///
    /// Fails without touching the active snapshot when the incoming set
    /// cannot be classified.
    pub fn load_explorer(&mut self, items: Vec<ExplorerItem>) -> Result<(), ClassifyError> {
        let records: Vec<Record> = items.into_iter().map(Record::Explorer).collect();
        classify::classify(&records)?;
        self.swap(Some(records), self.snapshot.curated.clone());
        Ok(())
    }

    /// Replace the curated set, keeping the Explorer set as loaded.
    pub fn load_curated(&mut self, set: CuratedSet) -> Result<(), ClassifyError> {
        let records = set.into_records();
        classify::classify(&records)?;
        self.swap(self.snapshot.explorer.clone(), Some(records));
        Ok(())
    }

    pub fn clear_explorer(&mut self) {
        self.swap(None, self.snapshot.curated.clone());
    }

    pub fn clear_curated(&mut self) {
        self.swap(self.snapshot.explorer.clone(), None);
    }

    fn swap(&mut self, explorer: Option<Vec<Record>>, curated: Option<Vec<Record>>) {
        let next = Snapshot::assemble(explorer, curated);
        info!(
            explorer = next.explorer.as_ref().map_or(0, Vec::len),
            curated = next.curated.as_ref().map_or(0, Vec::len),
            avatar_paths = next.names.len(),
            "catalog snapshot replaced"
        );
        self.snapshot = next;
    }

    /// See [`Snapshot::view`]; runs against the current snapshot.
    pub fn view(
        &self,
        view: View,
        criteria: &Criteria,
        sort: SortMethod,
        page_index: usize,
        page_size: usize,
    ) -> Result<ViewPage, ClassifyError> {
        self.snapshot.view(view, criteria, sort, page_index, page_size)
    }

    /// See [`Snapshot::browse`]; runs against the current snapshot.
    pub fn browse(&self, state: &BrowseState) -> Result<ViewPage, ClassifyError> {
        self.snapshot.browse(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::record::{
        CuratedAvatar, CuratedOther, CuratedSummary, CuratedWearable, ExplorerKind,
    };

    fn explorer_item(title: &str, kind: ExplorerKind) -> ExplorerItem {
        ExplorerItem {
            title: title.to_string(),
            author: String::new(),
            memo: String::new(),
            item_path: format!(r"Datas\Items\{title}"),
            image_path: String::new(),
            supported_avatar_paths: Vec::new(),
            kind,
            category: String::new(),
            created_date: String::new(),
            created_at_millis: 0,
            item_id: None,
        }
    }

    fn summary(name: &str) -> CuratedSummary {
        CuratedSummary {
            name: name.to_string(),
            ..CuratedSummary::default()
        }
    }

    #[test]
    fn sources_load_independently() {
        let mut session = CatalogSession::new();
        assert!(session.is_empty());

        session
            .load_curated(CuratedSet {
                avatars: Some(vec![CuratedAvatar {
                    summary: summary("Wolf"),
                }]),
                ..CuratedSet::default()
            })
            .expect("curated loads");
        let page = session
            .view(View::Avatars, &Criteria::default(), SortMethod::TitleAsc, 0, 10)
            .expect("queries without the explorer source");
        assert_eq!(page.total_count, 1);

        session
            .load_explorer(vec![explorer_item("Fox", ExplorerKind::Avatar)])
            .expect("explorer loads");
        let page = session
            .view(View::Avatars, &Criteria::default(), SortMethod::TitleAsc, 0, 10)
            .expect("queries both sources");
        assert_eq!(page.total_count, 2);
    }

    #[test]
    fn failed_load_keeps_the_previous_snapshot() {
        let mut session = CatalogSession::new();
        session
            .load_curated(CuratedSet {
                avatars: Some(vec![CuratedAvatar {
                    summary: summary("Wolf"),
                }]),
                ..CuratedSet::default()
            })
            .expect("first load is clean");

        let err = session.load_curated(CuratedSet {
            others: Some(vec![CuratedOther {
                summary: summary("Mystery"),
                category: String::new(),
            }]),
            ..CuratedSet::default()
        });
        assert!(err.is_err(), "unroutable records are fatal for the load");

        let page = session
            .view(View::Avatars, &Criteria::default(), SortMethod::TitleAsc, 0, 10)
            .expect("previous snapshot still queries");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.records[0].title(), "Wolf");
    }

    #[test]
    fn reload_rebuilds_the_name_index() {
        let mut session = CatalogSession::new();
        session
            .load_explorer(vec![explorer_item("Fox", ExplorerKind::Avatar)])
            .expect("loads");
        assert_eq!(
            session.snapshot().display_avatar_name(r"Datas\Items\Fox"),
            "Fox"
        );

        let mut renamed = explorer_item("Arctic Fox", ExplorerKind::Avatar);
        renamed.item_path = r"Datas\Items\Fox".to_string();
        session.load_explorer(vec![renamed]).expect("reloads");
        assert_eq!(
            session.snapshot().display_avatar_name(r"Datas\Items\Fox"),
            "Arctic Fox"
        );
    }

    #[test]
    fn readers_keep_their_snapshot_across_a_reload() {
        let mut session = CatalogSession::new();
        session
            .load_explorer(vec![explorer_item("Fox", ExplorerKind::Avatar)])
            .expect("loads");
        let before = session.snapshot();

        session
            .load_explorer(vec![
                explorer_item("Fox", ExplorerKind::Avatar),
                explorer_item("Wolf", ExplorerKind::Avatar),
            ])
            .expect("reloads");

        assert_eq!(before.record_count(), 1, "old snapshot is unchanged");
        assert_eq!(session.snapshot().record_count(), 2);
    }

    #[test]
    fn clearing_both_sources_empties_the_session() {
        let mut session = CatalogSession::new();
        session
            .load_explorer(vec![explorer_item("Fox", ExplorerKind::Avatar)])
            .expect("loads");
        session
            .load_curated(CuratedSet {
                wearables: Some(vec![CuratedWearable {
                    summary: summary("Hat"),
                    category: "Tops".to_string(),
                    supported_avatars: Vec::new(),
                }]),
                ..CuratedSet::default()
            })
            .expect("loads");

        session.clear_explorer();
        assert!(!session.is_empty(), "curated source still loaded");
        let page = session
            .view(View::Items, &Criteria::default(), SortMethod::TitleAsc, 0, 10)
            .expect("queries");
        assert_eq!(page.total_count, 1);

        session.clear_curated();
        assert!(session.is_empty());
        let page = session
            .view(View::Items, &Criteria::default(), SortMethod::TitleAsc, 0, 10)
            .expect("an empty catalog still pages");
        assert_eq!(page.total_count, 0);
        assert_eq!(page.total_pages, 1);
    }
}
