//! Gateway configuration.

use crate::relay::{DEFAULT_RELAY_URL, Relay};

/// Steam Web API base URL.
pub const DEFAULT_STEAM_API_BASE: &str = "https://api.steampowered.com";

/// Steam Store API base URL.
pub const DEFAULT_STORE_API_BASE: &str = "https://store.steampowered.com";

/// Settings injected into a [`crate::Gateway`] at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    /// Steam Web API key, sent to the profile and library endpoints.
    pub api_key: String,

    /// Relay to route requests through; `None` talks to Steam directly.
    pub relay: Option<Relay>,

    pub steam_api_base: String,
    pub store_api_base: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            relay: Some(Relay::new(DEFAULT_RELAY_URL)),
            steam_api_base: DEFAULT_STEAM_API_BASE.to_string(),
            store_api_base: DEFAULT_STORE_API_BASE.to_string(),
        }
    }
}

impl GatewayConfig {
    /// Creates a configuration with the given API key and default endpoints.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Sets the relay prefix. An empty prefix disables relaying.
    pub fn with_relay(mut self, prefix: &str) -> Self {
        self.relay = if prefix.is_empty() {
            None
        } else {
            Some(Relay::new(prefix))
        };
        self
    }

    /// Sets the Steam Web API base URL.
    pub fn with_steam_api_base(mut self, base: impl Into<String>) -> Self {
        self.steam_api_base = trim_base(base.into());
        self
    }

    /// Sets the Steam Store API base URL.
    pub fn with_store_api_base(mut self, base: impl Into<String>) -> Self {
        self.store_api_base = trim_base(base.into());
        self
    }
}

fn trim_base(mut base: String) -> String {
    while base.ends_with('/') {
        base.pop();
    }
    base
}
