//! The four lookups the explorer shell calls.
//!
//! Each lookup issues at most one relayed request per call and maps
//! transport failures onto [`GatewayError`]. App details are memoized in a
//! [`DetailCache`] owned by the gateway. The trending lookup never fails: it
//! degrades to the static fallback list and reports what went wrong as
//! [`TrendingWarning`]s.

use std::collections::HashMap;
use std::sync::Arc;

use futures_util::future::join_all;
use tracing::{debug, info, warn};

use crate::cache::DetailCache;
use crate::client::{self, Client};
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::relay::encode_component;
use crate::trending::{
    TRENDING_LIMIT, TrendingGames, TrendingWarning, merge_unique, popular_games,
};
use crate::types::{
    AppDetailsEntry, Game, GameDetail, MostPlayedResponse, OwnedGamesResponse, PlayerSummariesResponse,
    PlayerSummary,
};

/// Gateway to the Steam Web and Store APIs.
pub struct Gateway {
    client: Client,
    config: GatewayConfig,
    cache: DetailCache,
}

impl Gateway {
    /// Creates a gateway with a fresh detail cache.
    pub fn new(config: GatewayConfig) -> Result<Self, client::Error> {
        Self::with_cache(config, DetailCache::new())
    }

    /// Creates a gateway that shares an existing detail cache.
    pub fn with_cache(config: GatewayConfig, cache: DetailCache) -> Result<Self, client::Error> {
        let client = Client::new(config.relay.clone())?;
        Ok(Self {
            client,
            config,
            cache,
        })
    }

    /// The session cache of app details.
    pub fn cache(&self) -> &DetailCache {
        &self.cache
    }

    /// Looks up the player summary for a Steam ID.
    pub async fn player_summary(&self, steam_id: &str) -> Result<PlayerSummary, GatewayError> {
        let steam_id = steam_id.trim();
        if steam_id.is_empty() {
            return Err(GatewayError::invalid_steam_id());
        }

        let url = format!(
            "{}/ISteamUser/GetPlayerSummaries/v2/?key={}&steamids={}",
            self.config.steam_api_base,
            encode_component(&self.config.api_key),
            encode_component(steam_id),
        );

        let resp: PlayerSummariesResponse = self.client.get_json(&url).await.map_err(|e| {
            let mapped = match e.status() {
                Some(403) => GatewayError::AccessRestricted,
                Some(404) => GatewayError::profile_not_found(),
                _ if e.is_transport() => GatewayError::ConnectionFailed,
                _ => GatewayError::Unexpected("An unexpected error occurred. Please try again.".into()),
            };
            warn!(status = ?e.status(), kind = mapped.kind(), "player summary lookup failed");
            mapped
        })?;

        let player = resp
            .response
            .players
            .into_iter()
            .next()
            .ok_or_else(GatewayError::profile_not_found)?;

        debug!(steam_id, persona = %player.persona_name, "player summary loaded");
        Ok(player)
    }

    /// Looks up the owned games for a Steam ID.
    ///
    /// An empty or private library both surface as `NotFound`; the API does
    /// not tell them apart.
    pub async fn owned_games(&self, steam_id: &str) -> Result<Vec<Game>, GatewayError> {
        let steam_id = steam_id.trim();
        if steam_id.is_empty() {
            return Err(GatewayError::invalid_steam_id());
        }

        let url = format!(
            "{}/IPlayerService/GetOwnedGames/v1/?key={}&steamid={}&include_appinfo=true&include_played_free_games=true",
            self.config.steam_api_base,
            encode_component(&self.config.api_key),
            encode_component(steam_id),
        );

        let resp: OwnedGamesResponse = self.client.get_json(&url).await.map_err(|e| {
            let mapped = if e.is_transport() {
                GatewayError::FetchFailed(
                    "Failed to fetch games. Make sure your game details are public.".into(),
                )
            } else {
                GatewayError::Unexpected(
                    "An unexpected error occurred while fetching games.".into(),
                )
            };
            warn!(status = ?e.status(), kind = mapped.kind(), "owned games lookup failed");
            mapped
        })?;

        let games = resp
            .response
            .games
            .ok_or_else(GatewayError::games_not_found)?;

        debug!(steam_id, count = games.len(), "owned games loaded");
        Ok(games)
    }

    /// Looks up store details for an app, serving repeats from the cache.
    pub async fn game_details(&self, app_id: u32) -> Result<Arc<GameDetail>, GatewayError> {
        if app_id == 0 {
            return Err(GatewayError::invalid_app_id());
        }

        if let Some(cached) = self.cache.get(app_id) {
            debug!(app_id, "game details served from cache");
            return Ok(cached);
        }

        let url = format!(
            "{}/api/appdetails?appids={app_id}",
            self.config.store_api_base
        );

        // The store answers `null` for ids it has never heard of.
        let resp: Option<HashMap<String, AppDetailsEntry>> =
            self.client.get_json(&url).await.map_err(|e| {
                let mapped = if e.is_transport() {
                    GatewayError::FetchFailed(
                        "Failed to fetch game details. Please try again later.".into(),
                    )
                } else {
                    GatewayError::Unexpected(
                        "An unexpected error occurred while fetching game details.".into(),
                    )
                };
                warn!(app_id, error = %e, kind = mapped.kind(), "game details lookup failed");
                mapped
            })?;

        let detail = resp
            .and_then(|mut entries| entries.remove(&app_id.to_string()))
            .filter(|entry| entry.success)
            .and_then(|entry| entry.data)
            .ok_or_else(GatewayError::details_not_found)?;

        let detail = self.cache.insert(app_id, detail);
        debug!(app_id, name = %detail.name, "game details cached");
        Ok(detail)
    }

    /// Loads the most-played ranking merged with the fallback list.
    ///
    /// The top ranked titles are resolved concurrently; titles whose details
    /// fail are dropped and reported. If the ranking itself is unavailable,
    /// the fallback list is returned as-is.
    pub async fn trending_games(&self) -> TrendingGames {
        let url = format!(
            "{}/ISteamChartsService/GetMostPlayedGames/v1/",
            self.config.steam_api_base
        );

        let ranks = match self.client.get_json::<MostPlayedResponse>(&url).await {
            Ok(resp) => match resp.response.ranks {
                Some(ranks) => ranks,
                None => {
                    warn!("most played response had no ranks, using fallback list");
                    return TrendingGames::fallback("response contained no ranks");
                }
            },
            Err(e) => {
                warn!(error = %e, "failed to fetch most played games, using fallback list");
                return TrendingGames::fallback(e.to_string());
            }
        };

        let top: Vec<_> = ranks.into_iter().take(TRENDING_LIMIT).collect();
        let results = join_all(top.iter().map(|rank| self.game_details(rank.appid))).await;

        let mut live = Vec::with_capacity(top.len());
        let mut warnings = Vec::new();
        for (rank, result) in top.iter().zip(results) {
            match result {
                Ok(detail) => live.push(Game::catalog(
                    rank.appid,
                    detail.name.clone(),
                    rank.concurrent_in_game.unwrap_or(0),
                )),
                Err(e) => {
                    debug!(app_id = rank.appid, error = %e, "dropping ranked title");
                    warnings.push(TrendingWarning::DetailUnavailable {
                        app_id: rank.appid,
                        reason: e.to_string(),
                    });
                }
            }
        }

        let resolved = live.len();
        let games = merge_unique(live, popular_games());
        info!(
            resolved,
            dropped = warnings.len(),
            total = games.len(),
            "trending games loaded"
        );

        TrendingGames { games, warnings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockRelay;
    use crate::trending::POPULAR_GAMES;
    use std::collections::HashSet;

    fn gateway(server: &MockRelay) -> Gateway {
        let config = GatewayConfig::new("test-key").with_relay(server.relay().prefix());
        Gateway::new(config).unwrap()
    }

    fn detail_body(app_id: u32, name: &str) -> String {
        format!(r#"{{"{app_id}":{{"success":true,"data":{{"name":"{name}","steam_appid":{app_id}}}}}}}"#)
    }

    fn missing_detail_body(app_id: u32) -> String {
        format!(r#"{{"{app_id}":{{"success":false}}}}"#)
    }

    // -----------------------------------------------------------------------
    // player_summary
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn player_summary_empty_id_skips_network() {
        let server = MockRelay::start(vec![]).await;
        let gw = gateway(&server);

        let err = gw.player_summary("").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidInput(_)));
        let err = gw.player_summary("   ").await.unwrap_err();
        assert!(matches!(err, GatewayError::InvalidInput(_)));
        assert!(server.hits().is_empty());
    }

    #[tokio::test]
    async fn player_summary_returns_first_player() {
        let json = r#"{"response":{"players":[
            {"steamid":"76561197960435530","personaname":"Robin","personastate":1,"avatarfull":"full.jpg"}
        ]}}"#;
        let server = MockRelay::start(vec![("GetPlayerSummaries", 200, json)]).await;
        let gw = gateway(&server);

        let player = gw.player_summary("76561197960435530").await.unwrap();
        assert_eq!(player.persona_name, "Robin");
        assert_eq!(player.avatar_full, "full.jpg");

        let hits = server.hits();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].starts_with("https://api.steampowered.com/ISteamUser/GetPlayerSummaries/v2/"));
        assert!(hits[0].contains("key=test-key"));
        assert!(hits[0].contains("steamids=76561197960435530"));
    }

    #[tokio::test]
    async fn player_summary_zero_players_is_not_found() {
        let server =
            MockRelay::start(vec![("GetPlayerSummaries", 200, r#"{"response":{"players":[]}}"#)]).await;
        let gw = gateway(&server);

        let err = gw.player_summary("123").await.unwrap_err();
        assert_eq!(err, GatewayError::profile_not_found());
    }

    #[tokio::test]
    async fn player_summary_status_mapping() {
        let cases = [
            (403, GatewayError::AccessRestricted),
            (404, GatewayError::profile_not_found()),
            (500, GatewayError::ConnectionFailed),
            (502, GatewayError::ConnectionFailed),
        ];
        for (status, expected) in cases {
            let server = MockRelay::start(vec![("GetPlayerSummaries", status, "{}")]).await;
            let gw = gateway(&server);
            let err = gw.player_summary("123").await.unwrap_err();
            assert_eq!(err, expected, "status {status}");
        }
    }

    #[tokio::test]
    async fn player_summary_bad_body_is_unexpected() {
        let server = MockRelay::start(vec![("GetPlayerSummaries", 200, "<html></html>")]).await;
        let gw = gateway(&server);

        let err = gw.player_summary("123").await.unwrap_err();
        assert!(matches!(err, GatewayError::Unexpected(_)));
    }

    #[tokio::test]
    async fn player_summary_unreachable_relay_is_connection_failed() {
        let config = GatewayConfig::new("k").with_relay("http://127.0.0.1:1/raw?url=");
        let gw = Gateway::new(config).unwrap();

        let err = gw.player_summary("123").await.unwrap_err();
        assert_eq!(err, GatewayError::ConnectionFailed);
    }

    // -----------------------------------------------------------------------
    // owned_games
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn owned_games_empty_id_skips_network() {
        let server = MockRelay::start(vec![]).await;
        let gw = gateway(&server);

        let err = gw.owned_games("").await.unwrap_err();
        assert_eq!(err, GatewayError::invalid_steam_id());
        assert!(server.hits().is_empty());
    }

    #[tokio::test]
    async fn owned_games_returns_library() {
        let json = r#"{"response":{"game_count":2,"games":[
            {"appid":440,"name":"Team Fortress 2","playtime_forever":125,"img_icon_url":"e3f5","has_community_visible_stats":true},
            {"appid":570,"name":"Dota 2","playtime_forever":30,"playtime_2weeks":12}
        ]}}"#;
        let server = MockRelay::start(vec![("GetOwnedGames", 200, json)]).await;
        let gw = gateway(&server);

        let games = gw.owned_games("76561197960435530").await.unwrap();
        assert_eq!(games.len(), 2);
        assert_eq!(games[0].playtime_forever, 125);
        assert_eq!(games[1].playtime_2weeks, Some(12));

        let hits = server.hits();
        assert!(hits[0].contains("include_appinfo=true"));
        assert!(hits[0].contains("include_played_free_games=true"));
        assert!(hits[0].contains("steamid=76561197960435530"));
    }

    #[tokio::test]
    async fn owned_games_private_library_is_not_found() {
        let server = MockRelay::start(vec![("GetOwnedGames", 200, r#"{"response":{}}"#)]).await;
        let gw = gateway(&server);

        let err = gw.owned_games("123").await.unwrap_err();
        assert_eq!(err, GatewayError::games_not_found());
    }

    #[tokio::test]
    async fn owned_games_http_failure_is_fetch_failed() {
        let server = MockRelay::start(vec![("GetOwnedGames", 500, "oops")]).await;
        let gw = gateway(&server);

        let err = gw.owned_games("123").await.unwrap_err();
        assert!(matches!(err, GatewayError::FetchFailed(_)));
        assert!(err.to_string().contains("public"));
    }

    #[tokio::test]
    async fn owned_games_bad_body_is_unexpected() {
        let server = MockRelay::start(vec![("GetOwnedGames", 200, "not json")]).await;
        let gw = gateway(&server);

        let err = gw.owned_games("123").await.unwrap_err();
        assert!(matches!(err, GatewayError::Unexpected(_)));
    }

    // -----------------------------------------------------------------------
    // game_details
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn game_details_zero_is_invalid() {
        let server = MockRelay::start(vec![]).await;
        let gw = gateway(&server);

        let err = gw.game_details(0).await.unwrap_err();
        assert_eq!(err, GatewayError::invalid_app_id());
        assert!(server.hits().is_empty());
    }

    #[tokio::test]
    async fn game_details_second_call_is_cached() {
        let body = detail_body(730, "Counter-Strike 2");
        let server = MockRelay::start(vec![("appids=730", 200, body.as_str())]).await;
        let gw = gateway(&server);

        let first = gw.game_details(730).await.unwrap();
        let second = gw.game_details(730).await.unwrap();

        assert_eq!(first.name, "Counter-Strike 2");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(server.hits_matching("appdetails"), 1);
        assert!(gw.cache().contains(730));
    }

    #[tokio::test]
    async fn game_details_unsuccessful_is_not_found_and_uncached() {
        let body = missing_detail_body(999);
        let server = MockRelay::start(vec![("appids=999", 200, body.as_str())]).await;
        let gw = gateway(&server);

        let err = gw.game_details(999).await.unwrap_err();
        assert_eq!(err, GatewayError::details_not_found());
        assert!(!gw.cache().contains(999));

        // Failures are not memoized.
        let _ = gw.game_details(999).await;
        assert_eq!(server.hits_matching("appids=999"), 2);
    }

    #[tokio::test]
    async fn game_details_null_body_is_not_found() {
        let server = MockRelay::start(vec![("appids=730", 200, "null")]).await;
        let gw = gateway(&server);

        let err = gw.game_details(730).await.unwrap_err();
        assert_eq!(err, GatewayError::details_not_found());
        assert!(!gw.cache().contains(730));
    }

    #[tokio::test]
    async fn game_details_sparse_listing_is_cached() {
        let body = r#"{"730":{"success":true,"data":{"name":"Counter-Strike 2","metacritic":{"url":"x"}}}}"#;
        let server = MockRelay::start(vec![("appids=730", 200, body)]).await;
        let gw = gateway(&server);

        let detail = gw.game_details(730).await.unwrap();
        assert_eq!(detail.name, "Counter-Strike 2");
        assert_eq!(detail.metacritic.as_ref().map(|m| m.url.as_str()), Some("x"));
        assert!(gw.cache().contains(730));
    }

    #[tokio::test]
    async fn game_details_http_failure_is_fetch_failed() {
        let server = MockRelay::start(vec![("appids=440", 503, "busy")]).await;
        let gw = gateway(&server);

        let err = gw.game_details(440).await.unwrap_err();
        assert!(matches!(err, GatewayError::FetchFailed(_)));
    }

    #[tokio::test]
    async fn game_details_shared_cache_skips_network() {
        let cache = DetailCache::new();
        cache.insert(
            570,
            GameDetail {
                name: "Dota 2".into(),
                steam_appid: 570,
                ..Default::default()
            },
        );
        let server = MockRelay::start(vec![]).await;
        let config = GatewayConfig::new("k").with_relay(server.relay().prefix());
        let gw = Gateway::with_cache(config, cache).unwrap();

        let detail = gw.game_details(570).await.unwrap();
        assert_eq!(detail.name, "Dota 2");
        assert!(server.hits().is_empty());
    }

    // -----------------------------------------------------------------------
    // trending_games
    // -----------------------------------------------------------------------

    fn assert_unique(games: &[Game]) {
        let ids: HashSet<u32> = games.iter().map(|g| g.appid).collect();
        assert_eq!(ids.len(), games.len(), "duplicate app ids in trending list");
    }

    #[tokio::test]
    async fn trending_ranking_failure_falls_back() {
        let server = MockRelay::start(vec![("GetMostPlayedGames", 500, "down")]).await;
        let gw = gateway(&server);

        let report = gw.trending_games().await;
        assert!(report.games.len() >= POPULAR_GAMES.len());
        assert_eq!(report.games, popular_games());
        assert_unique(&report.games);
        assert!(report.is_fallback());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(server.hits_matching("appdetails"), 0);
    }

    #[tokio::test]
    async fn trending_unreachable_relay_falls_back() {
        let config = GatewayConfig::new("k").with_relay("http://127.0.0.1:1/raw?url=");
        let gw = Gateway::new(config).unwrap();

        let report = gw.trending_games().await;
        assert_eq!(report.games, popular_games());
        assert!(report.is_fallback());
    }

    #[tokio::test]
    async fn trending_without_ranks_falls_back() {
        let server =
            MockRelay::start(vec![("GetMostPlayedGames", 200, r#"{"response":{"rollup_date":1}}"#)]).await;
        let gw = gateway(&server);

        let report = gw.trending_games().await;
        assert_eq!(report.games, popular_games());
        assert_eq!(
            report.warnings,
            vec![TrendingWarning::RankingUnavailable("response contained no ranks".into())]
        );
    }

    #[tokio::test]
    async fn trending_drops_failed_details_and_keeps_rank_order() {
        // Thirteen ranks; only the first twelve are resolved. The fifth
        // fails, the sixth duplicates a fallback title.
        let ranked: [(u32, &str); 13] = [
            (730, "Counter-Strike 2"),
            (570, "Dota 2"),
            (578080, "PUBG: BATTLEGROUNDS"),
            (440, "Team Fortress 2"),
            (252490, "Rust"),
            (271590, "Grand Theft Auto V Legacy"),
            (1172470, "Apex Legends"),
            (1085660, "Destiny 2"),
            (381210, "Dead by Daylight"),
            (2923300, "Banana"),
            (1623730, "Palworld"),
            (252950, "Rocket League"),
            (105600, "Terraria"),
        ];

        let ranks_json = ranked
            .iter()
            .enumerate()
            .map(|(i, (id, _))| {
                format!(
                    r#"{{"rank":{},"appid":{id},"concurrent_in_game":{}}}"#,
                    i + 1,
                    1000 - i
                )
            })
            .collect::<Vec<_>>()
            .join(",");
        let ranking = format!(r#"{{"response":{{"rollup_date":1,"ranks":[{ranks_json}]}}}}"#);

        let mut routes: Vec<(String, u16, String)> =
            vec![("GetMostPlayedGames".into(), 200, ranking)];
        for &(id, name) in &ranked {
            let body = if id == 252490 {
                missing_detail_body(id)
            } else {
                detail_body(id, name)
            };
            routes.push((format!("appids={id}"), 200, body));
        }
        let server = MockRelay::start(
            routes
                .iter()
                .map(|(n, s, b)| (n.as_str(), *s, b.as_str()))
                .collect(),
        )
        .await;
        let gw = gateway(&server);

        let report = gw.trending_games().await;

        let expected_live: Vec<u32> = ranked[..12]
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| *id != 252490)
            .collect();
        let got_live: Vec<u32> = report.games[..expected_live.len()]
            .iter()
            .map(|g| g.appid)
            .collect();
        assert_eq!(got_live, expected_live);

        // Live entry wins over the fallback duplicate.
        let gta = report.games.iter().find(|g| g.appid == 271590).unwrap();
        assert_eq!(gta.name, "Grand Theft Auto V Legacy");
        assert_eq!(gta.playtime_forever, 995);

        // Fallback titles follow, minus the duplicate.
        let tail: Vec<u32> = report.games[expected_live.len()..]
            .iter()
            .map(|g| g.appid)
            .collect();
        let expected_tail: Vec<u32> = POPULAR_GAMES
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| *id != 271590)
            .collect();
        assert_eq!(tail, expected_tail);
        assert_unique(&report.games);

        assert_eq!(
            report.warnings,
            vec![TrendingWarning::DetailUnavailable {
                app_id: 252490,
                reason: "Game details not found.".into(),
            }]
        );
        assert!(!report.is_fallback());
        assert_eq!(server.hits_matching("appids=105600"), 0);
    }

    #[tokio::test]
    async fn trending_drops_rank_without_appid() {
        let ranking = r#"{"response":{"ranks":[
            {"rank":1,"appid":730,"concurrent_in_game":42},
            {"rank":2}
        ]}}"#;
        let body = detail_body(730, "Counter-Strike 2");
        let server = MockRelay::start(vec![
            ("GetMostPlayedGames", 200, ranking),
            ("appids=730", 200, body.as_str()),
        ])
        .await;
        let gw = gateway(&server);

        let report = gw.trending_games().await;

        assert!(!report.is_fallback());
        assert_eq!(report.games[0].appid, 730);
        assert_eq!(report.games[0].playtime_forever, 42);
        assert_eq!(
            report.warnings,
            vec![TrendingWarning::DetailUnavailable {
                app_id: 0,
                reason: GatewayError::invalid_app_id().to_string(),
            }]
        );
        assert_eq!(server.hits_matching("appdetails"), 1);
        assert_unique(&report.games);
    }

    #[tokio::test]
    async fn trending_reuses_cached_details() {
        let ranking = r#"{"response":{"ranks":[{"rank":1,"appid":730,"concurrent_in_game":5}]}}"#;
        let body = detail_body(730, "Counter-Strike 2");
        let server = MockRelay::start(vec![
            ("GetMostPlayedGames", 200, ranking),
            ("appids=730", 200, body.as_str()),
        ])
        .await;
        let gw = gateway(&server);

        gw.game_details(730).await.unwrap();
        let report = gw.trending_games().await;

        assert_eq!(report.games[0].appid, 730);
        assert_eq!(report.games[0].playtime_forever, 5);
        assert!(report.warnings.is_empty());
        assert_eq!(server.hits_matching("appdetails"), 1);
    }
}
