//! Error types surfaced to the presentation layer.

/// Errors produced by gateway lookups.
///
/// The `Display` text is the message shown to the user; callers that need
/// to branch on the category match on the variant instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Access to Steam API is currently restricted. Please try again later.")]
    AccessRestricted,

    #[error("Failed to connect to Steam. Please try again later.")]
    ConnectionFailed,

    #[error("{0}")]
    FetchFailed(String),

    #[error("{0}")]
    Unexpected(String),
}

impl GatewayError {
    pub(crate) fn invalid_steam_id() -> Self {
        Self::InvalidInput("Please enter a valid Steam ID".into())
    }

    pub(crate) fn invalid_app_id() -> Self {
        Self::InvalidInput("Please provide a valid game ID".into())
    }

    pub(crate) fn profile_not_found() -> Self {
        Self::NotFound("Steam profile not found. Please check your Steam ID and try again.".into())
    }

    pub(crate) fn games_not_found() -> Self {
        Self::NotFound("No games found or game library is private.".into())
    }

    pub(crate) fn details_not_found() -> Self {
        Self::NotFound("Game details not found.".into())
    }

    /// Short category name, used in log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::NotFound(_) => "not_found",
            Self::AccessRestricted => "access_restricted",
            Self::ConnectionFailed => "connection_failed",
            Self::FetchFailed(_) => "fetch_failed",
            Self::Unexpected(_) => "unexpected",
        }
    }
}
