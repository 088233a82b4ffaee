//! # Utilities
//!
//! - `url` - render URLs, referers and page title decoding

pub mod url;

pub use url::{decode_title, get_referer_url, get_render_url, Url};
