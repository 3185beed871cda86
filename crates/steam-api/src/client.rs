//! Relayed HTTP transport.
//!
//! Async HTTP client using `reqwest`. Every upstream URL is optionally
//! wrapped by a [`Relay`] before the request goes out.

use serde::de::DeserializeOwned;

use crate::relay::Relay;

/// Errors from the transport layer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status of a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Json(_) => None,
        }
    }

    /// True for failures that happened before a body could be decoded.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Api { .. })
    }
}

/// HTTP client bound to an optional relay.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    relay: Option<Relay>,
}

impl Client {
    /// Creates a client that routes through `relay` when set.
    pub fn new(relay: Option<Relay>) -> Result<Self, Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self { http, relay })
    }

    /// Creates a client on top of an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, relay: Option<Relay>) -> Self {
        Self { http, relay }
    }

    /// Returns the URL actually requested for `upstream`.
    pub fn request_url(&self, upstream: &str) -> String {
        match &self.relay {
            Some(relay) => relay.wrap(upstream),
            None => upstream.to_string(),
        }
    }

    /// Performs a GET and returns the raw body.
    pub async fn get(&self, upstream: &str) -> Result<Vec<u8>, Error> {
        let url = self.request_url(upstream);
        let resp = self.http.get(&url).send().await?;
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(resp.bytes().await?.to_vec())
    }

    /// Performs a GET and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, upstream: &str) -> Result<T, Error> {
        let body = self.get(upstream).await?;
        Ok(serde_json::from_slice(&body)?)
    }
}
