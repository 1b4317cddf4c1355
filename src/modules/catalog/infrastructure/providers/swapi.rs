//! SWAPI adapter. The API exposes no character portraits, so ids are
//! synthesized from the listing position and images come from a seeded
//! placeholder service, entry by entry, same as the original app shipped.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

const BASE_URL: &str = "https://swapi.dev/api";

#[derive(Debug, Deserialize)]
struct PeoplePage {
    results: Vec<Person>,
}

#[derive(Debug, Deserialize)]
struct Person {
    name: String,
    height: Option<String>,
    mass: Option<String>,
    #[serde(default)]
    films: Vec<String>,
}

pub struct SwapiProvider {
    client: ApiClient,
    page_limit: usize,
}

impl SwapiProvider {
    pub fn new(page_limit: usize) -> Self {
        Self {
            client: ApiClient::new("SWAPI", 4.0, 2),
            page_limit,
        }
    }

    fn map_page(page: PeoplePage, limit: usize) -> Vec<CatalogItem> {
        page.results
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(i, person)| {
                let subtitle = person
                    .height
                    .as_deref()
                    .filter(|h| !h.is_empty() && *h != "unknown")
                    .map(|h| format!("Altura: {} cm", h));

                let mut item = CatalogItem::new(
                    format!("sw-{}", i),
                    Category::StarWars,
                    person.name,
                    format!("https://picsum.photos/seed/sw{}/400/300", i),
                );
                if let Some(subtitle) = subtitle {
                    item = item.with_subtitle(subtitle);
                }
                if let Some(mass) = person.mass {
                    item = item.with_attribute("mass", json!(mass));
                }
                if !person.films.is_empty() {
                    item = item.with_attribute("films", json!(person.films));
                }
                item
            })
            .collect()
    }
}

#[async_trait]
impl CatalogProvider for SwapiProvider {
    fn name(&self) -> &'static str {
        "SWAPI"
    }

    fn category(&self) -> Category {
        Category::StarWars
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let url = format!("{}/people/", BASE_URL);
        let page: PeoplePage = self.client.get_json(&url).await?;
        Ok(Self::map_page(page, self.page_limit))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_page_synthesizes_ids_and_images() {
        let page: PeoplePage = serde_json::from_value(json!({
            "results": [
                {"name": "Luke Skywalker", "height": "172", "mass": "77", "films": ["f1"]},
                {"name": "C-3PO", "height": "unknown"}
            ]
        }))
        .unwrap();

        let items = SwapiProvider::map_page(page, 100);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "sw-0");
        assert_eq!(items[0].subtitle.as_deref(), Some("Altura: 172 cm"));
        assert!(items[0].image_url.contains("seed/sw0"));
        assert_eq!(items[1].id, "sw-1");
        assert!(items[1].subtitle.is_none());
    }

    #[test]
    fn test_map_page_honors_limit() {
        let page: PeoplePage = serde_json::from_value(json!({
            "results": [{"name": "a"}, {"name": "b"}, {"name": "c"}]
        }))
        .unwrap();
        assert_eq!(SwapiProvider::map_page(page, 2).len(), 2);
    }
}
