//! IGDB adapter. Authenticates against Twitch's OAuth client-credentials
//! flow; the access token is cached inside the provider instance and
//! refreshed with a one-minute margin before expiry.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

const TOKEN_URL: &str = "https://id.twitch.tv/oauth2/token";
const GAMES_URL: &str = "https://api.igdb.com/v4/games";
const NO_COVER: &str = "https://images.igdb.com/igdb/image/upload/t_cover_big/nocover.png";
const DEFAULT_DESCRIPTION: &str = "Sin descripción disponible";
const TOKEN_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: Instant,
}

#[derive(Debug, Deserialize)]
struct Game {
    id: i64,
    name: String,
    summary: Option<String>,
    storyline: Option<String>,
    rating: Option<f64>,
    cover: Option<Cover>,
    #[serde(default)]
    genres: Vec<Named>,
    #[serde(default)]
    platforms: Vec<Named>,
}

#[derive(Debug, Deserialize)]
struct Cover {
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Named {
    name: String,
}

pub struct IgdbProvider {
    client: ApiClient,
    client_id: String,
    client_secret: String,
    token: RwLock<Option<CachedToken>>,
    page_limit: usize,
}

impl IgdbProvider {
    pub fn new(client_id: String, client_secret: String, page_limit: usize) -> Self {
        Self {
            // IGDB allows 4 req/sec per client
            client: ApiClient::new("IGDB", 4.0, 4),
            client_id,
            client_secret,
            token: RwLock::new(None),
            page_limit,
        }
    }

    async fn access_token(&self) -> AppResult<String> {
        if let Some(cached) = self.token.read().await.as_ref() {
            if Instant::now() < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        let url = format!(
            "{}?client_id={}&client_secret={}&grant_type=client_credentials",
            TOKEN_URL, self.client_id, self.client_secret
        );
        let response: TokenResponse = self.client.post_empty(&url).await?;

        let expires_at = Instant::now() + Duration::from_secs(response.expires_in)
            - TOKEN_MARGIN.min(Duration::from_secs(response.expires_in));
        *self.token.write().await = Some(CachedToken {
            token: response.access_token.clone(),
            expires_at,
        });

        log::debug!("IGDB: refreshed access token");
        Ok(response.access_token)
    }

    fn query(&self) -> String {
        format!(
            "fields name, cover.url, summary, storyline, rating, genres.name, platforms.name; \
             limit {}; where rating > 70; sort rating desc;",
            self.page_limit
        )
    }

    fn map_game(game: Game) -> CatalogItem {
        let image = game
            .cover
            .and_then(|c| c.url)
            .map(|url| format!("https:{}", url.replace("t_thumb", "t_cover_big")))
            .unwrap_or_else(|| NO_COVER.to_string());

        let mut item = CatalogItem::new(game.id.to_string(), Category::Games, game.name, image)
            .with_description(
                game.summary
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            );
        if let Some(rating) = game.rating {
            item = item.with_rating(rating.round() as f32);
        }
        if let Some(storyline) = game.storyline {
            item = item.with_attribute("storyline", json!(storyline));
        }
        if !game.genres.is_empty() {
            let names: Vec<_> = game.genres.into_iter().map(|g| g.name).collect();
            item = item.with_attribute("genres", json!(names));
        }
        if !game.platforms.is_empty() {
            let names: Vec<_> = game.platforms.into_iter().map(|p| p.name).collect();
            item = item.with_attribute("platforms", json!(names));
        }
        item
    }
}

#[async_trait]
impl CatalogProvider for IgdbProvider {
    fn name(&self) -> &'static str {
        "IGDB"
    }

    fn category(&self) -> Category {
        Category::Games
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let token = self.access_token().await?;
        let headers = [
            ("Client-ID", self.client_id.clone()),
            ("Authorization", format!("Bearer {}", token)),
            ("Content-Type", "text/plain".to_string()),
        ];

        let games: Vec<Game> = self
            .client
            .post_text(GAMES_URL, &self.query(), &headers)
            .await?;
        Ok(games.into_iter().map(Self::map_game).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_game_upgrades_cover_size() {
        let game: Game = serde_json::from_value(json!({
            "id": 1942,
            "name": "The Witcher 3",
            "summary": "Monster hunter.",
            "rating": 93.4,
            "cover": {"url": "//images.igdb.com/t_thumb/co1wyy.jpg"},
            "genres": [{"name": "RPG"}],
            "platforms": [{"name": "PC"}]
        }))
        .unwrap();

        let item = IgdbProvider::map_game(game);
        assert_eq!(
            item.image_url,
            "https://images.igdb.com/t_cover_big/co1wyy.jpg"
        );
        assert_eq!(item.rating, Some(93.0));
        assert_eq!(item.genres(), vec!["RPG"]);
        assert_eq!(item.attr_str_list("platforms"), vec!["PC"]);
    }

    #[test]
    fn test_map_game_without_cover_uses_nocover_art() {
        let game: Game = serde_json::from_value(json!({"id": 1, "name": "Mystery"})).unwrap();
        let item = IgdbProvider::map_game(game);
        assert_eq!(item.image_url, NO_COVER);
        assert_eq!(item.description.as_deref(), Some(DEFAULT_DESCRIPTION));
    }

    #[test]
    fn test_query_carries_limit() {
        let provider = IgdbProvider::new("id".to_string(), "secret".to_string(), 50);
        assert!(provider.query().contains("limit 50;"));
    }
}
