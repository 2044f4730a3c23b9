//! Port to the remote JSON-document host.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, LOCATION, USER_AGENT};

use crate::error::{Result, SyncError};

/// Default document host endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://jsonblob.com/api/jsonBlob";

/// HTTP request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// User-agent sent with every request.
const AGENT: &str = concat!("tatame/", env!("CARGO_PKG_VERSION"));

/// A generic JSON-document host.
///
/// The identifier returned by [`create`](Self::create) is the only
/// credential: anyone holding it has full read/write access to the
/// document. Implementations must treat `put` as an atomic full replace.
pub trait DocumentHost {
    /// Create a new document with the given body; returns its identifier.
    fn create(&self, body: &str) -> Result<String>;

    /// Replace the document wholesale.
    fn put(&self, id: &str, body: &str) -> Result<()>;

    /// Fetch the current document body.
    fn get(&self, id: &str) -> Result<String>;
}

/// `DocumentHost` over HTTP: `POST {base}` to create (identifier taken
/// from the `Location` header), `PUT {base}/{id}` to replace,
/// `GET {base}/{id}` to read.
pub struct HttpDocumentHost {
    client: Client,
    base_url: String,
}

impl HttpDocumentHost {
    /// Build a host client against the given endpoint.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|source| SyncError::Network {
                operation: "client setup",
                source,
            })?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a host client against [`DEFAULT_ENDPOINT`].
    pub fn default_endpoint() -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT)
    }

    fn document_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }
}

/// Extract the identifier from a `Location` header value: the trailing
/// non-empty path segment.
fn id_from_location(location: &str) -> Option<String> {
    location
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(String::from)
}

impl DocumentHost for HttpDocumentHost {
    fn create(&self, body: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.base_url)
            .header(USER_AGENT, AGENT)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|source| SyncError::Network {
                operation: "create",
                source,
            })?;

        if !response.status().is_success() {
            return Err(SyncError::Http {
                status: response.status().as_u16(),
            });
        }

        response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .and_then(id_from_location)
            .ok_or(SyncError::MissingLocation)
    }

    fn put(&self, id: &str, body: &str) -> Result<()> {
        let response = self
            .client
            .put(self.document_url(id))
            .header(USER_AGENT, AGENT)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_string())
            .send()
            .map_err(|source| SyncError::Network {
                operation: "push",
                source,
            })?;

        if !response.status().is_success() {
            return Err(SyncError::Http {
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    fn get(&self, id: &str) -> Result<String> {
        let response = self
            .client
            .get(self.document_url(id))
            .header(USER_AGENT, AGENT)
            .send()
            .map_err(|source| SyncError::Network {
                operation: "pull",
                source,
            })?;

        if !response.status().is_success() {
            return Err(SyncError::Http {
                status: response.status().as_u16(),
            });
        }

        response.text().map_err(|source| SyncError::Network {
            operation: "pull",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_location() {
        assert_eq!(
            id_from_location("https://host/api/jsonBlob/abc-123").as_deref(),
            Some("abc-123")
        );
        assert_eq!(
            id_from_location("https://host/api/jsonBlob/abc-123/").as_deref(),
            Some("abc-123")
        );
        assert_eq!(id_from_location("/api/jsonBlob/xyz").as_deref(), Some("xyz"));
        assert!(id_from_location("").is_none());
        assert!(id_from_location("///").is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_normalized() {
        let host = HttpDocumentHost::new("https://host/api/jsonBlob/").unwrap();
        assert_eq!(host.document_url("abc"), "https://host/api/jsonBlob/abc");
    }
}
