use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::{debug, warn};
use url::Url;

use crate::error::{FetchError, Result, WikimediaError};

pub const DEFAULT_USER_AGENT: &str = concat!(
    "wikimedia/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/wikimedia-import/wikimedia)"
);

/// Anything able to download a page.
///
/// Implementations fail with a [`FetchError`] on transport errors and
/// non-2xx responses.
pub trait Fetcher {
    fn fetch(&self, url: &Url, headers: &BTreeMap<String, String>) -> std::result::Result<Vec<u8>, FetchError>;
}

impl<T: Fetcher + ?Sized> Fetcher for &T {
    fn fetch(&self, url: &Url, headers: &BTreeMap<String, String>) -> std::result::Result<Vec<u8>, FetchError> {
        (**self).fetch(url, headers)
    }
}

/// Blocking HTTP session shared by every page of an import
pub struct Session {
    client: Client,
}

impl Session {
    pub fn new(user_agent: Option<&str>, timeout: Duration) -> Result<Session> {
        let client = Client::builder()
            .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .timeout(timeout)
            .build()
            .map_err(|err| WikimediaError::Config(format!("cannot build HTTP client: {err}")))?;

        Ok(Session { client })
    }
}

fn header_map(headers: &BTreeMap<String, String>) -> HeaderMap {
    let mut header_map = HeaderMap::new();

    for (name, value) in headers {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                header_map.insert(name, value);
            }
            _ => warn!(header = %name, "skipping invalid request header"),
        }
    }

    header_map
}

impl Fetcher for Session {
    fn fetch(&self, url: &Url, headers: &BTreeMap<String, String>) -> std::result::Result<Vec<u8>, FetchError> {
        debug!(%url, "fetching");

        let response = self
            .client
            .get(url.as_str())
            .headers(header_map(headers))
            .send()
            .map_err(|err| {
                warn!(%url, error = %err, "request failed");
                FetchError::new(url.as_str(), err.status().map(|s| s.as_u16()), &err.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "unexpected response status");
            return Err(FetchError::new(
                url.as_str(),
                Some(status.as_u16()),
                status.canonical_reason().unwrap_or("unexpected status"),
            ));
        }

        response
            .bytes()
            .map(|body| body.to_vec())
            .map_err(|err| FetchError::new(url.as_str(), Some(status.as_u16()), &err.to_string()))
    }
}
