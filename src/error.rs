//! Error types shared by the importer, the parsers and the CLI.

use std::str::Utf8Error;

use thiserror::Error;

/// Failure reported by a [`Fetcher`](crate::network::Fetcher).
///
/// `status` is `None` when the request never produced an HTTP response
/// (DNS failure, refused connection, timeout).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{url}{}: {message}", status_suffix(.status))]
pub struct FetchError {
    pub url: String,
    pub status: Option<u16>,
    pub message: String,
}

impl FetchError {
    pub fn new(url: &str, status: Option<u16>, message: &str) -> FetchError {
        FetchError {
            url: url.to_string(),
            status,
            message: message.to_string(),
        }
    }

    /// True for 4xx responses, which the wikis return for unknown titles
    pub fn is_not_found(&self) -> bool {
        matches!(self.status, Some(code) if (400..500).contains(&code))
    }
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|code| format!(" ({code})")).unwrap_or_default()
}

/// Errors produced while importing and processing wiki pages
#[derive(Error, Debug)]
pub enum WikimediaError {
    /// Language code is not two characters long or not in the allowed set
    #[error("invalid language \"{0}\"")]
    InvalidLanguage(String),

    /// No project with this code is registered
    #[error("there is no wikiproject with code \"{0}\"")]
    UnknownProject(String),

    /// The wiki answered "not found" for this title
    #[error("incorrect {project} title ({title}) with lang \"{lang}\"")]
    InvalidTitle {
        project: String,
        title: String,
        lang: String,
    },

    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Percent-decoded sister project title is not valid UTF-8
    #[error("cannot decode page title: {0}")]
    TitleDecode(#[from] Utf8Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl WikimediaError {
    /// Whether a cascading import may skip this failure and carry on
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WikimediaError::InvalidTitle { .. })
    }
}

pub type Result<T> = std::result::Result<T, WikimediaError>;
