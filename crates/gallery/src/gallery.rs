//! Trending gallery state: shuffled once on load, filtered by search text.

use rand::Rng;
use rand::seq::SliceRandom;
use steam_explorer_api::Game;

/// True when `game` matches the search `query`.
///
/// A blank query matches everything; otherwise the query is matched as a
/// case-insensitive substring of the game name.
pub fn matches_query(game: &Game, query: &str) -> bool {
    if query.trim().is_empty() {
        return true;
    }
    game.name.to_lowercase().contains(&query.to_lowercase())
}

/// Games matching `query`, in their original order.
pub fn filter_games<'a>(games: &'a [Game], query: &str) -> Vec<&'a Game> {
    games.iter().filter(|g| matches_query(g, query)).collect()
}

/// The trending gallery as shown to the user.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    games: Vec<Game>,
    query: String,
}

impl Gallery {
    /// Loads `games` in a random order drawn from `rng`.
    pub fn load<R: Rng + ?Sized>(mut games: Vec<Game>, rng: &mut R) -> Self {
        games.shuffle(rng);
        Self {
            games,
            query: String::new(),
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// All loaded games in display order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Games matching the current query.
    pub fn visible(&self) -> Vec<&Game> {
        filter_games(&self.games, &self.query)
    }
}
