//! Settings persistence for the helper binaries.
//!
//! Settings live in one JSON file whose location the caller chooses; a
//! missing file means defaults, never an error, so first runs work without
//! setup. The `DECK_*` environment variables override the stored store
//! locations, which keeps scripted invocations independent of whatever the
//! settings file currently says.

use crate::catalog::sort::SortMethod;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPLORER_STORE_ENV: &str = "DECK_EXPLORER_STORE";
pub const CURATED_STORE_ENV: &str = "DECK_CURATED_STORE";

/// Matches the page length the display layer renders by default.
pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub explorer_store: Option<PathBuf>,
    pub curated_store: Option<PathBuf>,
    pub page_size: usize,
    pub sort: SortMethod,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            explorer_store: None,
            curated_store: None,
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortMethod::default(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults when the file
    /// does not exist. A file that exists but fails to parse is an error;
    /// silently discarding a user's settings hides real breakage.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        serde_json::from_str(&data)
            .with_context(|| format!("parsing settings {}", path.display()))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating settings dir {}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(self)?;
        fs::write(path, data).with_context(|| format!("writing settings {}", path.display()))
    }

    /// Apply `DECK_EXPLORER_STORE` / `DECK_CURATED_STORE` on top of the
    /// stored locations. Empty values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(path) = env_path(EXPLORER_STORE_ENV) {
            self.explorer_store = Some(path);
        }
        if let Some(path) = env_path(CURATED_STORE_ENV) {
            self.curated_store = Some(path);
        }
        self
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    let value = env::var_os(var)?;
    if value.is_empty() {
        return None;
    }
    Some(PathBuf::from(value))
}
