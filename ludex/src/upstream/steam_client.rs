use crate::domain::{AppId, DetailRecord, OwnedGame};
use crate::ports::{DetailSource, LibrarySource};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::Deserialize;
use serde_json::Value;
use shared::config::SteamConfig;
use shared::{Error, Result};
use tracing::debug;

/// Steam Web API + store API client
///
/// Implements both the library lookups that seed an aggregation and the
/// per-app detail lookup. Connection pooling is handled by `reqwest`.
#[derive(Clone)]
pub struct SteamClient {
    http: ReqwestClient,
    config: SteamConfig,
}

#[derive(Deserialize)]
struct GamesEnvelope {
    #[serde(default)]
    response: Option<GamesResponse>,
}

#[derive(Deserialize)]
struct GamesResponse {
    // Steam sends `"games": null` as well as omitting the field.
    #[serde(default)]
    games: Option<Vec<OwnedGame>>,
}

impl SteamClient {
    pub fn new(config: SteamConfig) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| Error::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, config })
    }

    async fn get_json(&self, url: String, query: &[(&str, &str)], context: &str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| Error::Transport(format!("{context}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UpstreamStatus {
                context: context.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(format!("{context}: {e}")))?;

        serde_json::from_slice(&body).map_err(|e| Error::InvalidPayload(format!("{context}: {e}")))
    }

    async fn games_list(&self, endpoint: &str, context: &str) -> Result<Vec<OwnedGame>> {
        let url = format!("{}/IPlayerService/{}/v0001/", self.config.api_base_url, endpoint);
        let body = self
            .get_json(
                url,
                &[
                    ("key", self.config.api_key.as_str()),
                    ("steamid", self.config.steam_id.as_str()),
                    ("format", "json"),
                ],
                context,
            )
            .await?;

        let envelope: GamesEnvelope = serde_json::from_value(body)
            .map_err(|e| Error::InvalidPayload(format!("{context}: {e}")))?;

        Ok(envelope
            .response
            .and_then(|r| r.games)
            .unwrap_or_default())
    }
}

#[async_trait]
impl LibrarySource for SteamClient {
    async fn owned_games(&self) -> Result<Vec<OwnedGame>> {
        self.games_list("GetOwnedGames", "Failed to fetch owned games")
            .await
    }

    async fn recently_played_games(&self) -> Result<Vec<OwnedGame>> {
        self.games_list("GetRecentlyPlayedGames", "Failed to fetch recently played games")
            .await
    }

    async fn player_summary(&self) -> Result<Value> {
        let url = format!("{}/ISteamUser/GetPlayerSummaries/v2/", self.config.api_base_url);
        self.get_json(
            url,
            &[
                ("key", self.config.api_key.as_str()),
                ("steamids", self.config.steam_id.as_str()),
                ("format", "json"),
                ("l", self.config.language.as_str()),
            ],
            "Failed to fetch user data",
        )
        .await
    }
}

#[async_trait]
impl DetailSource for SteamClient {
    async fn fetch_detail(&self, id: AppId) -> Result<DetailRecord> {
        let url = format!("{}/api/appdetails", self.config.store_base_url);
        let appids = id.to_string();
        let context = format!("Failed to fetch details for app {id}");

        let body = self
            .get_json(
                url,
                &[("appids", appids.as_str()), ("l", self.config.language.as_str())],
                &context,
            )
            .await?;

        extract_detail(body, id)
    }
}

/// Pull the `{ success, data }` object for `id` out of an appdetails body.
fn extract_detail(mut body: Value, id: AppId) -> Result<DetailRecord> {
    let key = id.to_string();
    let entry = body
        .get_mut(key.as_str())
        .map(Value::take)
        .ok_or(Error::Unsuccessful(id.0))?;

    if is_truthy(entry.get("success")) {
        Ok(entry)
    } else {
        Err(Error::Unsuccessful(id.0))
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

impl std::fmt::Debug for SteamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SteamClient")
            .field("api_base_url", &self.config.api_base_url)
            .field("store_base_url", &self.config.store_base_url)
            .field("language", &self.config.language)
            .finish()
    }
}
