//! CORS relay URL wrapping.
//!
//! The relay takes the full upstream URL as a single query parameter, so the
//! upstream URL is percent-encoded the same way `encodeURIComponent` does it.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Public relay used when none is configured.
pub const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/raw?url=";

/// Characters left intact by `encodeURIComponent`.
pub(crate) const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A pass-through relay addressed by URL prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relay {
    prefix: String,
}

impl Relay {
    /// Creates a relay from its prefix, e.g. `https://relay.example/raw?url=`.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the relay prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Wraps an upstream URL into a relay request URL.
    pub fn wrap(&self, upstream: &str) -> String {
        format!("{}{}", self.prefix, encode_component(upstream))
    }
}

impl Default for Relay {
    fn default() -> Self {
        Self::new(DEFAULT_RELAY_URL)
    }
}

/// Percent-encodes a single URL component.
pub(crate) fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}
