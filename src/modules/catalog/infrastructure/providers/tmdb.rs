//! TMDB adapter: popular movies, localized.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;

const BASE_URL: &str = "https://api.themoviedb.org/3";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const PLACEHOLDER: &str = "https://via.placeholder.com/500x750/CCCCCC/666666?text=Sin+imagen";
const DEFAULT_DESCRIPTION: &str = "Sin descripción disponible";

#[derive(Debug, Deserialize)]
struct MoviePage {
    results: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
struct Movie {
    id: i64,
    title: String,
    overview: Option<String>,
    poster_path: Option<String>,
    vote_average: Option<f32>,
    release_date: Option<String>,
}

pub struct TmdbProvider {
    client: ApiClient,
    api_key: String,
    language: String,
    page_limit: usize,
}

impl TmdbProvider {
    pub fn new(api_key: String, language: String, page_limit: usize) -> Self {
        Self {
            client: ApiClient::new("TMDB", 10.0, 5),
            api_key,
            language,
            page_limit,
        }
    }

    fn map_movie(movie: Movie) -> CatalogItem {
        let image = movie
            .poster_path
            .map(|p| format!("{}{}", IMAGE_BASE, p))
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let mut item = CatalogItem::new(movie.id.to_string(), Category::Movies, movie.title, image)
            .with_description(
                movie
                    .overview
                    .filter(|o| !o.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            );
        if let Some(vote) = movie.vote_average {
            // One decimal, as displayed
            item = item.with_rating((vote * 10.0).round() / 10.0);
        }
        if let Some(date) = movie.release_date.filter(|d| !d.is_empty()) {
            item = item.with_attribute("releaseDate", serde_json::json!(date));
        }
        item
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    fn name(&self) -> &'static str {
        "TMDB"
    }

    fn category(&self) -> Category {
        Category::Movies
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let url = format!(
            "{}/movie/popular?api_key={}&language={}&page=1",
            BASE_URL,
            self.api_key,
            urlencoding::encode(&self.language)
        );
        let page: MoviePage = self.client.get_json(&url).await?;
        Ok(page
            .results
            .into_iter()
            .take(self.page_limit)
            .map(Self::map_movie)
            .collect())
    }
}
