//! Explorer configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/steam-explorer/explorer.toml`
//! - Windows: `%APPDATA%/steam-explorer/explorer.toml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use steam_explorer_api::GatewayConfig;
use steam_explorer_api::config::{DEFAULT_STEAM_API_BASE, DEFAULT_STORE_API_BASE};
use steam_explorer_api::relay::DEFAULT_RELAY_URL;

/// Explorer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerConfig {
    /// Steam Web API key.
    #[serde(default)]
    pub api_key: String,

    /// CORS relay prefix; empty talks to Steam directly.
    #[serde(default = "default_relay_url")]
    pub relay_url: String,

    #[serde(default = "default_steam_api_base")]
    pub steam_api_base: String,

    #[serde(default = "default_store_api_base")]
    pub store_api_base: String,
}

fn default_relay_url() -> String {
    DEFAULT_RELAY_URL.into()
}

fn default_steam_api_base() -> String {
    DEFAULT_STEAM_API_BASE.into()
}

fn default_store_api_base() -> String {
    DEFAULT_STORE_API_BASE.into()
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            relay_url: default_relay_url(),
            steam_api_base: default_steam_api_base(),
            store_api_base: default_store_api_base(),
        }
    }
}

impl ExplorerConfig {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&config_path()?)
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: ExplorerConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = ExplorerConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Writes the configuration to `path`.
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix (contains the API key).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Gateway settings derived from this configuration.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig::new(self.api_key.clone())
            .with_relay(&self.relay_url)
            .with_steam_api_base(self.steam_api_base.clone())
            .with_store_api_base(self.store_api_base.clone())
    }
}

/// Returns the platform-specific configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("steam-explorer")
            .join("explorer.toml"))
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata)
            .join("steam-explorer")
            .join("explorer.toml"))
    }

    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Ok(PathBuf::from("/tmp/steam-explorer/explorer.toml"))
    }
}
