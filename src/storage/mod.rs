//! # Storage
//!
//! Imported pages are kept as plain records attached to an arbitrary host
//! entity. `PageStore` is the seam a host application implements for its
//! own persistence; `MemoryStore` is the in-process implementation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};

use crate::parsers::{GalleryImage, SisterProjectLink};

/// Generic reference to the host entity a page belongs to
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ObjectRef {
    pub content_type: String,
    pub object_id: u64,
}

impl ObjectRef {
    pub fn new(content_type: &str, object_id: u64) -> ObjectRef {
        ObjectRef {
            content_type: content_type.to_string(),
            object_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Wikipage {
    /// Assigned by the store; 0 until saved
    pub id: u64,
    pub lang: String,
    pub project: String,
    pub title: String,
    /// Cleaned HTML fragment
    pub content: String,
    pub sister_projects: Vec<SisterProjectLink>,
    pub images: Vec<GalleryImage>,
    pub updated: DateTime<Utc>,
    pub object: Option<ObjectRef>,
}

impl Wikipage {
    fn same_identity(&self, other: &Wikipage) -> bool {
        self.lang == other.lang
            && self.project == other.project
            && self.title == other.title
            && self.object == other.object
    }
}

/// Criteria for selecting pages; unset fields match anything
#[derive(Clone, Debug, Default)]
pub struct PageFilter {
    project: Option<String>,
    lang: Option<String>,
    object: Option<Option<ObjectRef>>,
}

impl PageFilter {
    pub fn new() -> PageFilter {
        PageFilter::default()
    }

    pub fn project(mut self, project: &str) -> PageFilter {
        self.project = Some(project.to_string());
        self
    }

    pub fn lang(mut self, lang: &str) -> PageFilter {
        self.lang = Some(lang.to_string());
        self
    }

    /// `None` selects pages not attached to any object
    pub fn object(mut self, object: Option<&ObjectRef>) -> PageFilter {
        self.object = Some(object.cloned());
        self
    }

    pub fn matches(&self, page: &Wikipage) -> bool {
        self.project.as_ref().map_or(true, |p| &page.project == p)
            && self.lang.as_ref().map_or(true, |l| &page.lang == l)
            && self.object.as_ref().map_or(true, |o| &page.object == o)
    }
}

/// Key-value record store for imported pages
pub trait PageStore {
    /// Inserts the page, or replaces the record with the same
    /// (lang, project, title, object) identity, keeping its id
    fn save(&self, page: Wikipage) -> Wikipage;

    /// Matching pages, most recently updated first
    fn find(&self, filter: &PageFilter) -> Vec<Wikipage>;

    /// Deletes matching pages except the one with id `keep`; returns how
    /// many were deleted
    fn delete(&self, filter: &PageFilter, keep: Option<u64>) -> usize;

    fn count(&self) -> usize;

    fn latest(&self, filter: &PageFilter) -> Option<Wikipage> {
        self.find(filter).into_iter().next()
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: RwLock<Vec<Wikipage>>,
    next_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl PageStore for MemoryStore {
    fn save(&self, mut page: Wikipage) -> Wikipage {
        let mut pages = self.pages.write().unwrap_or_else(|e| e.into_inner());

        if let Some(existing) = pages.iter_mut().find(|p| p.same_identity(&page)) {
            page.id = existing.id;
            *existing = page.clone();
        } else {
            page.id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            pages.push(page.clone());
        }

        page
    }

    fn find(&self, filter: &PageFilter) -> Vec<Wikipage> {
        let pages = self.pages.read().unwrap_or_else(|e| e.into_inner());
        let mut found: Vec<Wikipage> = pages.iter().filter(|p| filter.matches(p)).cloned().collect();
        // Newest first, insertion order breaks ties in favour of the last save
        found.sort_by(|a, b| b.updated.cmp(&a.updated).then(b.id.cmp(&a.id)));
        found
    }

    fn delete(&self, filter: &PageFilter, keep: Option<u64>) -> usize {
        let mut pages = self.pages.write().unwrap_or_else(|e| e.into_inner());
        let before = pages.len();
        pages.retain(|p| !filter.matches(p) || Some(p.id) == keep);
        before - pages.len()
    }

    fn count(&self) -> usize {
        self.pages.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}
