//! Formatting of profile and game fields for display.

use std::fmt;

use chrono::DateTime;
use steam_explorer_api::PlayerSummary;

/// Steam presence state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PersonaState {
    Offline,
    Online,
    Busy,
    Away,
    Snooze,
    LookingToTrade,
    LookingToPlay,
    Unknown,
}

impl PersonaState {
    /// Maps a raw `personastate` code; codes outside 0–6 are `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Offline,
            1 => Self::Online,
            2 => Self::Busy,
            3 => Self::Away,
            4 => Self::Snooze,
            5 => Self::LookingToTrade,
            6 => Self::LookingToPlay,
            _ => Self::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
            Self::Busy => "Busy",
            Self::Away => "Away",
            Self::Snooze => "Snooze",
            Self::LookingToTrade => "Looking to Trade",
            Self::LookingToPlay => "Looking to Play",
            Self::Unknown => "Unknown",
        }
    }

    pub fn of(player: &PlayerSummary) -> Self {
        Self::from_code(player.persona_state)
    }
}

impl fmt::Display for PersonaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whole hours, rounded half up.
fn rounded_hours(minutes: u64) -> u64 {
    (minutes + 30) / 60
}

/// Formats total playtime, e.g. `125` minutes as `"2 hrs"`.
pub fn format_playtime(minutes: u64) -> String {
    format!("{} hrs", rounded_hours(minutes))
}

/// Formats two-week playtime, e.g. `"1 hrs (2 weeks)"`.
pub fn format_recent_playtime(minutes: u64) -> String {
    format!("{} hrs (2 weeks)", rounded_hours(minutes))
}

/// Joins state and country codes, skipping empty parts.
///
/// Returns `None` when neither is present.
pub fn format_location(state: Option<&str>, country: Option<&str>) -> Option<String> {
    let parts: Vec<&str> = [state, country]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Formats an account creation timestamp as a UTC calendar date.
pub fn format_member_since(time_created: i64) -> Option<String> {
    DateTime::from_timestamp(time_created, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}
