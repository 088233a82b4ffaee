//! # Wikimedia
//!
//! Imports rendered pages from Wikipedia and its sister projects, strips the
//! wiki chrome around the article body and keeps the links to the same
//! article on the other projects.
//!
//! ## Modules
//!
//! - `core` - processing of one rendered page
//! - `parsers` - the page tree, its sanitizer and extractors
//! - `projects` - registry of the known wikis
//! - `network` - page download
//! - `storage` - imported page records
//! - `manager` - imports with cascading sister project pages
//! - `env` - configuration from environment variables
//! - `utils` - URL helpers

pub mod core;
pub mod env;
pub mod error;
pub mod manager;
pub mod network;
pub mod parsers;
pub mod projects;
pub mod storage;
pub mod utils;

pub use crate::core::{process_content, request_headers, ProcessedContent};
pub use crate::error::{FetchError, Result, WikimediaError};
pub use crate::manager::{PageKey, UpdateRequest, WikipageManager};
pub use crate::network::{Fetcher, Session};
pub use crate::parsers::*;
pub use crate::projects::{ProjectRegistry, WikiProject};
pub use crate::storage::{MemoryStore, ObjectRef, PageFilter, PageStore, Wikipage};
