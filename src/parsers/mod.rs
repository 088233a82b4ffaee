//! # Parsers
//!
//! Everything that works on the parsed page tree:
//!
//! - `html` - parsing, traversal and serialization primitives
//! - `garbage` - configuration of the removal categories
//! - `blocks` - heading-delimited sections
//! - `sanitizer` - ordered removal of wiki chrome
//! - `sister_projects` - links to the same article on sister projects
//! - `gallery` - image galleries

pub mod blocks;
pub mod gallery;
pub mod garbage;
pub mod html;
pub mod sanitizer;
pub mod sister_projects;

pub use blocks::{compile_titles, find_block_contents, remove_blocks};
pub use gallery::{parse_gallery_images, GalleryImage};
pub use garbage::{GarbageRules, SectionTitles};
pub use html::{serialize_document, DocumentTree};
pub use sanitizer::{sanitize, ContentSanitizer};
pub use sister_projects::{extract_sister_projects, resolve_project_url, SisterProjectLink};
