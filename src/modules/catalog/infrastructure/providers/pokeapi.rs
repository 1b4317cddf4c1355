//! PokeAPI adapter: list endpoint plus a detail fetch per entry for the
//! official artwork and typing.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const BASE_URL: &str = "https://pokeapi.co/api/v2";
const PLACEHOLDER: &str = "https://via.placeholder.com/400x300/CCCCCC/666666?text=Pokemon";

#[derive(Debug, Deserialize)]
struct PokemonPage {
    results: Vec<PokemonRef>,
}

#[derive(Debug, Deserialize)]
struct PokemonRef {
    url: String,
}

#[derive(Debug, Deserialize)]
struct PokemonDetail {
    id: i64,
    name: String,
    height: Option<i64>,
    weight: Option<i64>,
    #[serde(default)]
    types: Vec<TypeSlot>,
    sprites: Sprites,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(rename = "type")]
    type_ref: NamedResource,
}

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Sprites {
    other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork")]
    official_artwork: Option<Artwork>,
}

#[derive(Debug, Deserialize)]
struct Artwork {
    front_default: Option<String>,
}

pub struct PokeApiProvider {
    client: ApiClient,
    page_limit: usize,
}

impl PokeApiProvider {
    pub fn new(page_limit: usize) -> Self {
        Self {
            // PokeAPI has no hard published limit; stay polite given the
            // per-item detail fan-out
            client: ApiClient::new("PokeAPI", 10.0, 5),
            page_limit,
        }
    }

    fn map_detail(detail: PokemonDetail) -> CatalogItem {
        let image = detail
            .sprites
            .other
            .and_then(|o| o.official_artwork)
            .and_then(|a| a.front_default)
            .unwrap_or_else(|| PLACEHOLDER.to_string());

        let mut item = CatalogItem::new(detail.id.to_string(), Category::Pokemon, detail.name, image);
        if let Some(first_type) = detail.types.first() {
            item = item.with_subtitle(first_type.type_ref.name.clone());
        }
        if let Some(height) = detail.height {
            item = item.with_attribute("height", json!(height));
        }
        if let Some(weight) = detail.weight {
            item = item.with_attribute("weight", json!(weight));
        }
        item
    }
}

#[async_trait]
impl CatalogProvider for PokeApiProvider {
    fn name(&self) -> &'static str {
        "PokeAPI"
    }

    fn category(&self) -> Category {
        Category::Pokemon
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let url = format!("{}/pokemon?limit={}", BASE_URL, self.page_limit);
        let page: PokemonPage = self.client.get_json(&url).await?;

        let details = futures::future::join_all(
            page.results
                .iter()
                .map(|entry| self.client.get_json::<PokemonDetail>(&entry.url)),
        )
        .await;

        // A failed detail fetch drops that one entry, not the whole page
        let items = details
            .into_iter()
            .filter_map(|result| match result {
                Ok(detail) => Some(Self::map_detail(detail)),
                Err(err) => {
                    log::warn!("PokeAPI: skipping entry: {}", err);
                    None
                }
            })
            .collect();

        Ok(items)
    }
}
