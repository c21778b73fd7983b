//! Blocking network retrieval for downloads and style files.
//!
//! The original host toolkit made these fetches "synchronous" by
//! re-entering its own event loop, which blocked the UI forever on a
//! hung request. Here the fetch is a genuinely blocking HTTP call with
//! an explicit timeout; the collaborator trait keeps tests offline.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Errors raised while fetching a remote resource.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("could not build the HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("request to '{url}' failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{url}' answered with status {status}")]
    Status { url: String, status: u16 },
}

/// Blocking fetch of a full response body.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Production fetcher: blocking HTTP client with a per-request timeout
/// and an optional proxy taken from the settings store.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

/// Applied when the settings carry no `fetch_timeout_secs`.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(60);

impl HttpFetcher {
    pub fn new(timeout: Duration, proxy: Option<&str>) -> Result<Self, FetchError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
        if let Some(proxy_url) = proxy {
            let proxy = reqwest::Proxy::all(proxy_url).map_err(FetchError::Client)?;
            builder = builder.proxy(proxy);
        }
        let client = builder.build().map_err(FetchError::Client)?;
        Ok(Self { client })
    }

    /// Build a fetcher from the settings store: timeout, plus the host's
    /// HTTP proxy when enabled.
    pub fn from_settings(settings: &geopanel_config::Settings) -> Result<Self, FetchError> {
        let timeout = settings
            .fetch_timeout_secs
            .map_or(DEFAULT_FETCH_TIMEOUT, Duration::from_secs);
        let proxy = match (settings.proxy_enabled, &settings.proxy_host) {
            (Some(true), Some(host)) if !host.is_empty() => {
                let port = settings.proxy_port.unwrap_or(8080);
                Some(format!("http://{host}:{port}"))
            }
            _ => None,
        };
        Self::new(timeout, proxy.as_deref())
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        debug!(url, "fetching");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_owned(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_owned(),
                status: status.as_u16(),
            });
        }
        let body = response
            .bytes()
            .map_err(|source| FetchError::Transport {
                url: url.to_owned(),
                source,
            })?;
        debug!(url, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}

/// Local file name for a remote resource: everything after the last
/// scheme separator, with path separators flattened to underscores.
pub fn derived_local_file_name(url: &str) -> String {
    let tail = url.rsplit("://").next().unwrap_or(url);
    tail.replace('/', "_")
}

/// Local file name for a downloaded style definition: the last path
/// segment of the URL plus the style extension.
pub fn style_file_name(style_url: &str) -> String {
    let segment = style_url.rsplit('/').next().unwrap_or(style_url);
    format!("{segment}.qml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_name_flattens_path_separators() {
        assert_eq!(
            derived_local_file_name("https://host/path/to/file.zip"),
            "host_path_to_file.zip"
        );
    }

    #[test]
    fn derived_name_without_scheme_is_flattened_verbatim() {
        assert_eq!(derived_local_file_name("host/file.zip"), "host_file.zip");
    }

    #[test]
    fn style_name_appends_extension_to_last_segment() {
        assert_eq!(
            style_file_name("https://styles.example/catalog/roads"),
            "roads.qml"
        );
    }

    #[test]
    fn default_timeout_is_applied_when_unset() {
        let settings = geopanel_config::Settings::default();
        assert!(HttpFetcher::from_settings(&settings).is_ok());
    }
}
