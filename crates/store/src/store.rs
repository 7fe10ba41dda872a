//! The page store — the set of pages known to this session.
//!
//! Storage layout: one `<stem>.py` script per page inside the pages
//! directory, where `<stem>` is [`page_stem`] of the page name.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use pagewright_core::content::Page;
use pagewright_core::error::StoreError;
use tracing::{debug, info, warn};

use crate::render::render_page;
use crate::sanitize::page_stem;

/// How a page came to be known to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Found on disk when the store was opened.
    Discovered,
    /// Written by a build in this session.
    Saved,
}

#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
    pages: BTreeMap<String, PageStatus>,
}

impl PageStore {
    /// An empty store rooted at `dir`. Nothing is read or created.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            pages: BTreeMap::new(),
        }
    }

    /// Open a store, registering every `*.py` file already in `dir`.
    ///
    /// Discovered pages are named by their title-cased stem
    /// (`space_facts.py` → `Space Facts`). A missing directory is an
    /// empty store.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self::new(dir);
        if !store.dir.exists() {
            debug!(dir = %store.dir.display(), "Pages directory does not exist yet");
            return Ok(store);
        }

        let read_failed = |e: std::io::Error| StoreError::ReadFailed {
            path: store.dir.clone(),
            reason: e.to_string(),
        };
        let entries = std::fs::read_dir(&store.dir).map_err(read_failed)?;

        let mut found = Vec::new();
        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable pages directory entry");
                    continue;
                }
            };
            if path.extension().and_then(|e| e.to_str()) != Some("py") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                found.push(title_case(&stem.replace('_', " ")));
            }
        }

        for name in found {
            store.pages.insert(name, PageStatus::Discovered);
        }
        info!(dir = %store.dir.display(), count = store.pages.len(), "Loaded pages");
        Ok(store)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the script for a page name.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.py", page_stem(name)))
    }

    /// Render and write a page, replacing any previous file of the same stem.
    pub fn save(&mut self, page: &Page) -> Result<PathBuf, StoreError> {
        let path = self.path_for(&page.name);
        let write_failed = |reason: String| StoreError::WriteFailed {
            path: path.clone(),
            reason,
        };

        std::fs::create_dir_all(&self.dir).map_err(|e| write_failed(e.to_string()))?;
        std::fs::write(&path, render_page(page)).map_err(|e| write_failed(e.to_string()))?;

        self.pages.insert(page.name.clone(), PageStatus::Saved);
        info!(page = %page.name, path = %path.display(), "Page saved");
        Ok(path)
    }

    /// All known page names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.pages.keys().map(|s| s.as_str()).collect()
    }

    pub fn status(&self, name: &str) -> Option<PageStatus> {
        self.pages.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// One-line description of where a known page lives.
    pub fn describe(&self, name: &str) -> Result<String, StoreError> {
        let path = self.path_for(name);
        if self.status(name).is_none() || !path.exists() {
            return Err(StoreError::PageNotFound(name.to_string()));
        }
        Ok(format!(
            "This is the {name} page. Its content is defined in the {} file.",
            path.display()
        ))
    }
}

/// Uppercase the first letter of each word, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
