//! Jikan (MyAnimeList) adapter, top-anime listing.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const BASE_URL: &str = "https://api.jikan.moe/v4";
const DEFAULT_DESCRIPTION: &str = "Sin descripción disponible";
const PLACEHOLDER: &str = "https://via.placeholder.com/400x300/CCCCCC/666666?text=Anime";

// Jikan caps top-anime pages at 25 entries
const PAGE_CAP: usize = 25;

#[derive(Debug, Deserialize)]
struct TopAnimeResponse {
    data: Vec<AnimeEntry>,
}

#[derive(Debug, Deserialize)]
struct AnimeEntry {
    mal_id: i64,
    title: String,
    synopsis: Option<String>,
    score: Option<f32>,
    images: Option<Images>,
    #[serde(default)]
    genres: Vec<MalEntity>,
}

#[derive(Debug, Deserialize)]
struct Images {
    jpg: Option<ImageSet>,
}

#[derive(Debug, Deserialize)]
struct ImageSet {
    image_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MalEntity {
    name: String,
}

pub struct JikanProvider {
    client: ApiClient,
    page_limit: usize,
}

impl JikanProvider {
    pub fn new(page_limit: usize) -> Self {
        Self {
            // Jikan v4: 60 req/min sustained, 3 req/sec burst
            client: ApiClient::new("Jikan", 1.0, 3),
            page_limit: page_limit.min(PAGE_CAP),
        }
    }

    fn map_entry(entry: AnimeEntry) -> CatalogItem {
        let image = entry
            .images
            .and_then(|i| i.jpg)
            .and_then(|j| j.image_url)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let mut item = CatalogItem::new(entry.mal_id.to_string(), Category::Anime, entry.title, image)
            .with_description(
                entry
                    .synopsis
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            );
        if let Some(score) = entry.score {
            item = item.with_rating(score);
        }
        if !entry.genres.is_empty() {
            let names: Vec<_> = entry.genres.into_iter().map(|g| g.name).collect();
            item = item.with_attribute("genres", json!(names));
        }
        item
    }
}

#[async_trait]
impl CatalogProvider for JikanProvider {
    fn name(&self) -> &'static str {
        "Jikan"
    }

    fn category(&self) -> Category {
        Category::Anime
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let url = format!("{}/top/anime?limit={}", BASE_URL, self.page_limit);
        let response: TopAnimeResponse = self.client.get_json(&url).await?;
        Ok(response.data.into_iter().map(Self::map_entry).collect())
    }
}
