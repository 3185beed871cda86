//! Plain-text rendering of gateway results.

use std::fmt::Write;

use steam_explorer_api::{Game, GameDetail, PlayerSummary, TrendingWarning};
use steam_explorer_gallery::{
    PersonaState, format_location, format_member_since, format_playtime, format_recent_playtime,
};

pub fn render_profile(player: &PlayerSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}  [{}]", player.persona_name, PersonaState::of(player));
    if let Some(real_name) = player.real_name.as_deref().filter(|n| !n.is_empty()) {
        let _ = writeln!(out, "  {real_name}");
    }
    if let Some(location) =
        format_location(player.state_code.as_deref(), player.country_code.as_deref())
    {
        let _ = writeln!(out, "  {location}");
    }
    if let Some(since) = player.time_created.and_then(format_member_since) {
        let _ = writeln!(out, "  Member since {since}");
    }
    if let Some(game) = player.game_extra_info.as_deref().filter(|g| !g.is_empty()) {
        let _ = writeln!(out, "  Currently playing: {game}");
    }
    if !player.avatar_full.is_empty() {
        let _ = writeln!(out, "  {}", player.avatar_full);
    }
    out
}

/// One line per game: name, total playtime and recent playtime.
pub fn render_games<'a, I>(games: I) -> String
where
    I: IntoIterator<Item = &'a Game>,
{
    let mut out = String::new();
    let mut count = 0;
    for game in games {
        count += 1;
        let _ = write!(
            out,
            "{:>8}  {}  ({})",
            game.appid,
            game.name,
            format_playtime(game.playtime_forever)
        );
        if let Some(recent) = game.playtime_2weeks.filter(|m| *m > 0) {
            let _ = write!(out, " {}", format_recent_playtime(recent));
        }
        out.push('\n');
    }
    if count == 0 {
        out.push_str("No games found\n");
    }
    out
}

pub fn render_detail(detail: &GameDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", detail.name, detail.steam_appid);
    if let Some(meta) = &detail.metacritic {
        let _ = writeln!(out, "Metacritic: {}", meta.score);
    }
    if !detail.short_description.is_empty() {
        let _ = writeln!(out, "\n{}\n", detail.short_description);
    }
    let _ = writeln!(out, "Developers: {}", detail.developers.join(", "));
    let _ = writeln!(out, "Publishers: {}", detail.publishers.join(", "));

    let genres: Vec<&str> = detail.genres.iter().map(|g| g.description.as_str()).collect();
    if !genres.is_empty() {
        let _ = writeln!(out, "Genres: {}", genres.join(", "));
    }

    let platforms: Vec<&str> = [
        (detail.platforms.windows, "Windows"),
        (detail.platforms.mac, "macOS"),
        (detail.platforms.linux, "Linux"),
    ]
    .into_iter()
    .filter_map(|(supported, name)| supported.then_some(name))
    .collect();
    if !platforms.is_empty() {
        let _ = writeln!(out, "Platforms: {}", platforms.join(", "));
    }

    if !detail.release_date.date.is_empty() {
        let _ = writeln!(out, "Release date: {}", detail.release_date.date);
    }
    if !detail.screenshots.is_empty() {
        let _ = writeln!(out, "Screenshots:");
        for shot in &detail.screenshots {
            let _ = writeln!(out, "  {}", shot.path_full);
        }
    }
    out
}

pub fn render_warnings(warnings: &[TrendingWarning]) -> String {
    let mut out = String::new();
    for warning in warnings {
        let _ = writeln!(out, "warning: {warning}");
    }
    out
}
