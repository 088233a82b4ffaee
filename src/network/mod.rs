//! # Network
//!
//! Downloading rendered pages:
//!
//! - `session` - the `Fetcher` seam and its blocking HTTP implementation

pub mod session;

pub use session::{Fetcher, Session, DEFAULT_USER_AGENT};
