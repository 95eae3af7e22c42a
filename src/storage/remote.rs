use std::time::Duration;

use reqwest::{
    StatusCode, Url,
    blocking::Client,
    header::{CACHE_CONTROL, HeaderValue},
};

use crate::domain::{Config, Document, DocumentError};

/// Something that can produce the published copy of the document.
pub trait Fetch {
    /// Retrieves and parses the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be retrieved, or is not a
    /// valid document.
    fn fetch(&self) -> Result<Document, FetchError>;
}

/// Errors retrieving the published copy.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// HTTP request failed (network, DNS, TLS, timeout, etc.).
    #[error("http request failed for {url}: {source}")]
    Http {
        /// The requested address.
        url: Url,
        /// The underlying error.
        source: reqwest::Error,
    },

    /// Server returned a non-success HTTP status code.
    #[error("unexpected status {status} for {url}")]
    UnexpectedStatus {
        /// The requested address.
        url: Url,
        /// The status returned.
        status: StatusCode,
    },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    ResponseBody {
        /// The requested address.
        url: Url,
        /// The underlying error.
        source: reqwest::Error,
    },

    /// The body is not a valid document.
    #[error("invalid document at {url}: {source}")]
    Document {
        /// The requested address.
        url: Url,
        /// Why the document was rejected.
        source: DocumentError,
    },
}

/// Works out where the published copy lives.
///
/// Absolute `http`/`https` addresses are used as they are. Relative paths
/// are resolved against `base_url`. A `file:` address, or a relative path
/// with no base to resolve it against, means the schedule is being used
/// straight from the filesystem; there is nothing to fetch and `None` is
/// returned.
#[must_use]
pub fn resolve_location(data_path: &str, base_url: Option<&str>) -> Option<Url> {
    if let Ok(url) = Url::parse(data_path) {
        return match url.scheme() {
            "http" | "https" => Some(url),
            "file" => {
                tracing::warn!(
                    "Data path {url} is a local file; serve the schedule over HTTP to load it"
                );
                None
            }
            scheme => {
                tracing::warn!("Unsupported scheme '{scheme}' in data path {url}");
                None
            }
        };
    }

    let Some(base) = base_url else {
        tracing::warn!(
            "No base URL configured; skipping the published copy at '{data_path}'"
        );
        return None;
    };

    match Url::parse(base).and_then(|base| base.join(data_path)) {
        Ok(url) => Some(url),
        Err(e) => {
            tracing::warn!("Cannot resolve '{data_path}' against '{base}': {e}");
            None
        }
    }
}

/// Fetches the published copy over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteFetcher {
    url: Url,
    client: Client,
}

impl RemoteFetcher {
    /// Creates a fetcher for `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: Url, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self { url, client })
    }

    /// Creates the fetcher described by `config`, with `data_path` taking
    /// the place of the configured path when given.
    ///
    /// Returns `Ok(None)` when there is no remote location to fetch from.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(config: &Config, data_path: Option<&str>) -> Result<Option<Self>, FetchError> {
        let data_path = data_path.unwrap_or(&config.data_path);
        resolve_location(data_path, config.base_url.as_deref())
            .map(|url| Self::new(url, config.fetch_timeout()))
            .transpose()
    }

    /// The address fetched from.
    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }
}

impl Fetch for RemoteFetcher {
    fn fetch(&self) -> Result<Document, FetchError> {
        let url = self.url.clone();
        tracing::debug!("Fetching {url}");

        let response = self
            .client
            .get(url.clone())
            .header(CACHE_CONTROL, HeaderValue::from_static("no-store"))
            .send()
            .map_err(|source| FetchError::Http {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus { url, status });
        }

        let body = response.text().map_err(|source| FetchError::ResponseBody {
            url: url.clone(),
            source,
        })?;

        Document::from_json(&body).map_err(|source| FetchError::Document { url, source })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{RemoteFetcher, resolve_location};
    use crate::domain::Config;

    #[test]
    fn absolute_http_urls_are_used_directly() {
        let url = resolve_location("https://example.org/data.json", None).unwrap();
        assert_eq!(url.as_str(), "https://example.org/data.json");
    }

    #[test]
    fn file_urls_are_skipped() {
        assert_eq!(resolve_location("file:///srv/data.json", None), None);
        assert_eq!(
            resolve_location("file:///srv/data.json", Some("https://example.org/")),
            None
        );
    }

    #[test]
    fn relative_paths_need_a_base() {
        assert_eq!(resolve_location("JSON/data.json", None), None);

        let url = resolve_location(
            "Estilos completos/JSON/datasite-data.json",
            Some("https://example.org/interclasse/"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/interclasse/Estilos%20completos/JSON/datasite-data.json"
        );
    }

    #[test]
    fn unsupported_schemes_are_skipped() {
        assert_eq!(resolve_location("ftp://example.org/data.json", None), None);
    }

    #[test]
    fn override_replaces_configured_path() {
        let config = Config {
            base_url: Some("https://example.org/site/".to_string()),
            ..Config::default()
        };

        let fetcher = RemoteFetcher::from_config(&config, Some("JSON/00.json"))
            .unwrap()
            .unwrap();
        assert_eq!(fetcher.url().as_str(), "https://example.org/site/JSON/00.json");

        let default = RemoteFetcher::from_config(&Config::default(), None).unwrap();
        assert!(default.is_none());
    }

    #[test]
    fn timeout_is_taken_from_config() {
        let config = Config {
            base_url: Some("https://example.org/".to_string()),
            fetch_timeout_secs: Some(3),
            ..Config::default()
        };
        assert_eq!(config.fetch_timeout(), Some(Duration::from_secs(3)));
        assert!(RemoteFetcher::from_config(&config, None).unwrap().is_some());
    }
}
