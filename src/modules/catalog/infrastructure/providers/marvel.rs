//! Marvel Comics API adapter. Requests are signed with the documented
//! `md5(ts + privateKey + publicKey)` scheme; the key pair comes from
//! configuration, never from source.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use md5::{Digest, Md5};
use serde::Deserialize;

const BASE_URL: &str = "https://gateway.marvel.com/v1/public";

#[derive(Debug, Deserialize)]
struct CharactersResponse {
    data: CharactersData,
}

#[derive(Debug, Deserialize)]
struct CharactersData {
    results: Vec<Character>,
}

#[derive(Debug, Deserialize)]
struct Character {
    id: i64,
    name: String,
    description: Option<String>,
    thumbnail: Thumbnail,
}

#[derive(Debug, Deserialize)]
struct Thumbnail {
    path: String,
    extension: String,
}

pub struct MarvelProvider {
    client: ApiClient,
    public_key: String,
    private_key: String,
    page_limit: usize,
}

impl MarvelProvider {
    pub fn new(public_key: String, private_key: String, page_limit: usize) -> Self {
        Self {
            client: ApiClient::new("Marvel", 3.0, 2),
            public_key,
            private_key,
            page_limit: page_limit.min(100), // API hard limit per page
        }
    }

    fn sign(&self, ts: i64) -> String {
        let digest = Md5::digest(format!("{}{}{}", ts, self.private_key, self.public_key));
        digest.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn map_character(character: Character) -> CatalogItem {
        let image = format!(
            "{}.{}",
            character.thumbnail.path, character.thumbnail.extension
        );
        let mut item = CatalogItem::new(
            character.id.to_string(),
            Category::Marvel,
            character.name,
            image,
        );
        if let Some(description) = character.description.filter(|d| !d.trim().is_empty()) {
            item = item.with_description(description);
        }
        item
    }
}

#[async_trait]
impl CatalogProvider for MarvelProvider {
    fn name(&self) -> &'static str {
        "Marvel"
    }

    fn category(&self) -> Category {
        Category::Marvel
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let ts = chrono::Utc::now().timestamp_millis();
        let url = format!(
            "{}/characters?ts={}&apikey={}&hash={}&limit={}",
            BASE_URL,
            ts,
            self.public_key,
            self.sign(ts),
            self.page_limit
        );

        let response: CharactersResponse = self.client.get_json(&url).await?;
        Ok(response
            .data
            .results
            .into_iter()
            .map(Self::map_character)
            .collect())
    }
}
