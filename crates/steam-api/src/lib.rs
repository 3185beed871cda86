//! Steam Web API gateway for the explorer.
//!
//! Wraps the four read-only lookups the explorer needs (player summary,
//! owned games, store app details, most-played ranking), routes every
//! request through a URL-encoding CORS relay, and memoizes app details
//! for the lifetime of the [`Gateway`].
//!
//! # Operations
//!
//! - **Profile** — player summary for a Steam ID
//! - **Library** — owned games for a Steam ID
//! - **Details** — store page data for an app ID (cached)
//! - **Trending** — most-played ranking merged with a static fallback list

pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod relay;
pub mod trending;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export primary types for convenience.
pub use cache::DetailCache;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::Gateway;
pub use relay::Relay;
pub use trending::{TrendingGames, TrendingWarning};
pub use types::{Game, GameDetail, PlayerSummary};
