use std::time::Duration;

/// Process-wide configuration for the catalog providers.
///
/// The upstream credentials (Marvel key pair, TMDB key, IGDB/Twitch client
/// credentials) are read from the environment once and passed by reference to
/// the providers that need them. Providers whose credentials are missing are
/// simply not registered, so the rest of the catalog keeps working.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub marvel_public_key: Option<String>,
    pub marvel_private_key: Option<String>,
    pub tmdb_api_key: Option<String>,
    pub igdb_client_id: Option<String>,
    pub igdb_client_secret: Option<String>,

    /// Upper bound on items fetched per provider page
    pub catalog_page_limit: usize,
    /// TTL for cached catalog pages
    pub catalog_cache_ttl: Duration,
    /// Language hint forwarded to providers that localize (TMDB)
    pub content_language: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            marvel_public_key: None,
            marvel_private_key: None,
            tmdb_api_key: None,
            igdb_client_id: None,
            igdb_client_secret: None,
            catalog_page_limit: 100,
            catalog_cache_ttl: Duration::from_secs(15 * 60),
            content_language: "es-ES".to_string(),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment. `.env` files are
    /// honored the same way the rest of the stack does it.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let read = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        Self {
            marvel_public_key: read("MARVEL_PUBLIC_KEY"),
            marvel_private_key: read("MARVEL_PRIVATE_KEY"),
            tmdb_api_key: read("TMDB_API_KEY"),
            igdb_client_id: read("IGDB_CLIENT_ID"),
            igdb_client_secret: read("IGDB_CLIENT_SECRET"),
            catalog_page_limit: read("CATALOG_PAGE_LIMIT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(100),
            catalog_cache_ttl: read("CATALOG_CACHE_TTL_MINUTES")
                .and_then(|v| v.parse::<u64>().ok())
                .map(|m| Duration::from_secs(m * 60))
                .unwrap_or(Duration::from_secs(15 * 60)),
            content_language: read("CONTENT_LANGUAGE").unwrap_or_else(|| "es-ES".to_string()),
        }
    }

    pub fn has_marvel_credentials(&self) -> bool {
        self.marvel_public_key.is_some() && self.marvel_private_key.is_some()
    }

    pub fn has_igdb_credentials(&self) -> bool {
        self.igdb_client_id.is_some() && self.igdb_client_secret.is_some()
    }
}
