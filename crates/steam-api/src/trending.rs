//! Trending list assembly: static fallback titles and merge rules.

use std::collections::HashSet;
use std::fmt;

use crate::types::Game;

/// Number of ranked titles resolved per trending load.
pub const TRENDING_LIMIT: usize = 12;

/// Known popular titles, shown when the live ranking is unavailable and
/// appended after the live entries otherwise.
pub const POPULAR_GAMES: &[(u32, &str)] = &[
    (1091500, "Cyberpunk 2077"),
    (1174180, "Red Dead Redemption 2"),
    (1551360, "Forza Horizon 5"),
    (1245620, "Elden Ring"),
    (271590, "Grand Theft Auto V"),
    (990080, "Hogwarts Legacy"),
    (1817190, "Marvel's Spider-Man: Miles Morales"),
    (1593500, "God of War"),
    (1888930, "The Last of Us Part I"),
    (2138710, "Marvel's Spider-Man 2"),
    (1938090, "Call of Duty: Modern Warfare III"),
    (2050650, "Resident Evil 4"),
    (1538590, "Alan Wake 2"),
    (870780, "Control Ultimate Edition"),
    (268500, "Quantum Break"),
    (108710, "Alan Wake"),
    (220240, "Assassin's Creed IV Black Flag"),
    (582160, "Assassin's Creed Origins"),
    (812140, "Assassin's Creed Odyssey"),
    (2208920, "Assassin's Creed Mirage"),
    (359550, "Tom Clancy's Rainbow Six Siege"),
];

/// The static fallback list as game entries.
pub fn popular_games() -> Vec<Game> {
    POPULAR_GAMES
        .iter()
        .map(|&(appid, name)| Game::catalog(appid, name, 0))
        .collect()
}

/// Something that went wrong while building the trending list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrendingWarning {
    /// The ranking could not be loaded; only the fallback list was used.
    RankingUnavailable(String),
    /// A ranked title was dropped because its details failed to load.
    DetailUnavailable { app_id: u32, reason: String },
}

impl fmt::Display for TrendingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RankingUnavailable(reason) => {
                write!(f, "most played ranking unavailable: {reason}")
            }
            Self::DetailUnavailable { app_id, reason } => {
                write!(f, "details for app {app_id} unavailable: {reason}")
            }
        }
    }
}

/// Result of a trending load. Always carries a usable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendingGames {
    pub games: Vec<Game>,
    pub warnings: Vec<TrendingWarning>,
}

impl TrendingGames {
    /// The fallback list with a single ranking warning.
    pub(crate) fn fallback(reason: impl Into<String>) -> Self {
        Self {
            games: popular_games(),
            warnings: vec![TrendingWarning::RankingUnavailable(reason.into())],
        }
    }

    /// True when the live ranking contributed nothing.
    pub fn is_fallback(&self) -> bool {
        self.warnings
            .iter()
            .any(|w| matches!(w, TrendingWarning::RankingUnavailable(_)))
    }
}

/// Concatenates `live` and `fallback`, keeping the first entry per app id.
pub fn merge_unique(live: Vec<Game>, fallback: Vec<Game>) -> Vec<Game> {
    let mut seen = HashSet::new();
    live.into_iter()
        .chain(fallback)
        .filter(|game| seen.insert(game.appid))
        .collect()
}
