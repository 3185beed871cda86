//! Steam API response types.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

const HEADER_CDN: &str = "https://cdn.cloudflare.steamstatic.com/steam/apps";
const ICON_CDN: &str = "https://media.steampowered.com/steamcommunity/public/images/apps";

/// A player summary from `ISteamUser/GetPlayerSummaries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    #[serde(rename = "steamid")]
    pub steam_id: String,
    #[serde(rename = "personaname", default)]
    pub persona_name: String,
    #[serde(rename = "profileurl", default)]
    pub profile_url: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(rename = "avatarmedium", default)]
    pub avatar_medium: String,
    #[serde(rename = "avatarfull", default)]
    pub avatar_full: String,
    /// Raw presence code, 0–6 for known states.
    #[serde(rename = "personastate", default)]
    pub persona_state: i64,
    #[serde(rename = "communityvisibilitystate", default)]
    pub visibility: i64,
    #[serde(rename = "profilestate", default)]
    pub profile_state: i64,
    #[serde(rename = "lastlogoff", default)]
    pub last_logoff: i64,
    #[serde(rename = "commentpermission", default)]
    pub comment_permission: Option<i64>,
    #[serde(rename = "realname", default)]
    pub real_name: Option<String>,
    #[serde(rename = "primaryclanid", default)]
    pub primary_clan_id: Option<String>,
    /// Account creation time, seconds since the Unix epoch.
    #[serde(rename = "timecreated", default)]
    pub time_created: Option<i64>,
    #[serde(rename = "gameid", default)]
    pub game_id: Option<String>,
    /// Title of the game currently being played.
    #[serde(rename = "gameextrainfo", default)]
    pub game_extra_info: Option<String>,
    #[serde(rename = "loccountrycode", default)]
    pub country_code: Option<String>,
    #[serde(rename = "locstatecode", default)]
    pub state_code: Option<String>,
    #[serde(rename = "loccityid", default)]
    pub city_id: Option<i64>,
}

/// A game entry, either from a user's library or the trending list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub appid: u32,
    #[serde(default)]
    pub name: String,
    /// Total playtime in minutes.
    #[serde(default)]
    pub playtime_forever: u64,
    /// Playtime over the last two weeks in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playtime_2weeks: Option<u64>,
    #[serde(default)]
    pub img_icon_url: String,
    #[serde(default)]
    pub has_community_visible_stats: bool,
}

impl Game {
    /// Builds an entry with no playtime or icon, as used for catalog listings.
    pub fn catalog(appid: u32, name: impl Into<String>, playtime_forever: u64) -> Self {
        Self {
            appid,
            name: name.into(),
            playtime_forever,
            playtime_2weeks: None,
            img_icon_url: String::new(),
            has_community_visible_stats: true,
        }
    }

    /// Store header image on the Steam CDN.
    pub fn header_image_url(&self) -> String {
        format!("{HEADER_CDN}/{}/header.jpg", self.appid)
    }

    /// Community icon image, if the entry carries an icon hash.
    pub fn icon_url(&self) -> Option<String> {
        if self.img_icon_url.is_empty() {
            return None;
        }
        Some(format!("{ICON_CDN}/{}/{}.jpg", self.appid, self.img_icon_url))
    }
}

/// Store page data from `api/appdetails`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameDetail {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub steam_appid: u32,
    #[serde(default, deserialize_with = "u32_lenient")]
    pub required_age: u32,
    #[serde(default)]
    pub is_free: bool,
    #[serde(default)]
    pub detailed_description: String,
    #[serde(default)]
    pub about_the_game: String,
    #[serde(default)]
    pub short_description: String,
    #[serde(default)]
    pub supported_languages: String,
    #[serde(default)]
    pub header_image: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub developers: Vec<String>,
    #[serde(default)]
    pub publishers: Vec<String>,
    #[serde(default)]
    pub platforms: Platforms,
    #[serde(default)]
    pub metacritic: Option<Metacritic>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub screenshots: Vec<Screenshot>,
    #[serde(default)]
    pub background: String,
    #[serde(default)]
    pub release_date: ReleaseDate,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platforms {
    #[serde(default)]
    pub windows: bool,
    #[serde(default)]
    pub mac: bool,
    #[serde(default)]
    pub linux: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metacritic {
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub description: String,
}

/// Store genre; the store sends genre ids as strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub path_thumbnail: String,
    #[serde(default)]
    pub path_full: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
    #[serde(default)]
    pub coming_soon: bool,
    /// Free-form, localized date text.
    #[serde(default)]
    pub date: String,
}

// ---------------------------------------------------------------------------
// Response envelopes (internal).
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlayerSummariesResponse {
    #[serde(default)]
    pub response: PlayerSummariesBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct PlayerSummariesBody {
    #[serde(default)]
    pub players: Vec<PlayerSummary>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnedGamesResponse {
    #[serde(default)]
    pub response: OwnedGamesBody,
}

/// Private libraries come back as an empty `response` object.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OwnedGamesBody {
    #[serde(default)]
    pub games: Option<Vec<Game>>,
}

/// One entry of the `appdetails` map, keyed by app id.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AppDetailsEntry {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<GameDetail>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MostPlayedResponse {
    #[serde(default)]
    pub response: MostPlayedBody,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct MostPlayedBody {
    #[serde(default)]
    pub ranks: Option<Vec<RankEntry>>,
}

/// A ranked title. A missing `appid` decodes as 0 and is rejected per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub(crate) struct RankEntry {
    #[serde(default)]
    pub appid: u32,
    #[serde(default)]
    pub concurrent_in_game: Option<u64>,
}

/// Accepts either a number or a numeric string; anything else becomes 0.
fn u32_lenient<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let val: serde_json::Value = Deserialize::deserialize(deserializer)?;
    match val {
        serde_json::Value::Number(num) => num
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| de::Error::custom("expected u32")),
        serde_json::Value::String(s) => Ok(s.trim().parse().unwrap_or(0)),
        serde_json::Value::Null => Ok(0),
        _ => Err(de::Error::custom("expected u32 or stringified u32")),
    }
}
