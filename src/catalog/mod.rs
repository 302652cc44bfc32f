//! The unified asset catalog.
//!
//! Everything query-shaped lives here: the normalized [`Record`] model, the
//! view classifier, the two-layer search engine, the sorter, pagination, and
//! the session that snapshots a load and runs the pipeline. Store parsing
//! stays in [`crate::store`]; this module never touches the filesystem.

pub mod classify;
pub mod lookup;
pub mod page;
pub mod record;
pub mod search;
pub mod session;
pub mod sort;

pub use classify::{ClassifyError, Partition, View, bucket_for, classify, is_world_category};
pub use lookup::AvatarNameIndex;
pub use page::{BrowseState, effective_page_size, page_slice, total_pages};
pub use record::{
    AvatarRefs, CuratedAvatar, CuratedOther, CuratedSet, CuratedSummary, CuratedWearable,
    CuratedWorld, ExplorerItem, ExplorerKind, Record,
};
pub use search::{Advanced, Criteria, Query, keywords};
pub use session::{CatalogSession, Snapshot, ViewPage};
pub use sort::{SortMethod, sort_records};
