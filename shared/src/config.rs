use std::time::Duration;
use tracing::warn;

/// Upstream Steam endpoints and credentials
#[derive(Clone, Debug)]
pub struct SteamConfig {
    pub api_key: String,
    pub steam_id: String,
    pub language: String,
    pub api_base_url: String,
    pub store_base_url: String,
    pub timeout: Duration,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub steam: SteamConfig,
    pub cache_ttl: Duration,
    pub fetch_concurrency: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    const DEFAULT_HOST: &str = "0.0.0.0";
    const DEFAULT_PORT: u16 = 3333;
    const DEFAULT_LANGUAGE: &str = "portuguese";
    const DEFAULT_API_BASE_URL: &str = "https://api.steampowered.com";
    const DEFAULT_STORE_BASE_URL: &str = "https://store.steampowered.com";
    const DEFAULT_CACHE_TTL_HOURS: u64 = 24;
    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_FETCH_CONCURRENCY: usize = 16;

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source.
    /// Unparsable numbers fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port = var("PORT", "")
            .parse::<u16>()
            .unwrap_or(Self::DEFAULT_PORT);
        let ttl_hours = var("CACHE_TTL_HOURS", "")
            .parse::<u64>()
            .unwrap_or(Self::DEFAULT_CACHE_TTL_HOURS);
        let timeout_secs = var("UPSTREAM_TIMEOUT_SECS", "")
            .parse::<u64>()
            .unwrap_or(Self::DEFAULT_TIMEOUT_SECS);
        let fetch_concurrency = var("DETAIL_FETCH_CONCURRENCY", "")
            .parse::<usize>()
            .unwrap_or(Self::DEFAULT_FETCH_CONCURRENCY)
            .max(1);

        let api_key = lookup("STEAM_API_KEY").unwrap_or_else(|| {
            warn!("STEAM_API_KEY not set, upstream library requests will be rejected");
            String::new()
        });
        let steam_id = lookup("STEAM_API_ID").unwrap_or_else(|| {
            warn!("STEAM_API_ID not set, no player library can be resolved");
            String::new()
        });

        Self {
            host: var("HOST", Self::DEFAULT_HOST),
            port,
            steam: SteamConfig {
                api_key,
                steam_id,
                language: var("STEAM_LANGUAGE", Self::DEFAULT_LANGUAGE),
                api_base_url: trim_base_url(var("STEAM_API_BASE_URL", Self::DEFAULT_API_BASE_URL)),
                store_base_url: trim_base_url(var(
                    "STEAM_STORE_BASE_URL",
                    Self::DEFAULT_STORE_BASE_URL,
                )),
                timeout: Duration::from_secs(timeout_secs),
            },
            cache_ttl: Duration::from_secs(ttl_hours.saturating_mul(3600)),
            fetch_concurrency,
            allowed_origins: var("ALLOWED_ORIGINS", "*")
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
