//! Shared library for the assetdeck catalog tools.
//!
//! The crate turns two asset managers' on-disk metadata stores into one
//! queryable catalog. [`store`] reads the source files and normalizes their
//! quirks at the boundary; [`catalog`] owns everything after that
//! (classification into the three views, keyword search, sorting, and
//! pagination) behind an immutable per-load snapshot. The helper binaries
//! and the test suite both drive the same public surface, which is the
//! contract this library keeps stable.

pub mod catalog;
pub mod config;
pub mod logging;
pub mod store;

pub use catalog::{
    AvatarNameIndex, BrowseState, CatalogSession, ClassifyError, Criteria, CuratedSet, ExplorerItem,
    ExplorerKind, Partition, Query, Record, Snapshot, SortMethod, View, ViewPage, classify,
    keywords,
};
pub use config::Settings;
pub use store::{StoreError, StoreReport, load_curated_store, load_explorer_store};
