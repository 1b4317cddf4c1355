//! TheDogAPI adapter: random images, numbered titles, breed name as
//! subtitle when the API includes one.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;

const BASE_URL: &str = "https://api.thedogapi.com/v1";
const PAGE_SIZE: usize = 8;

#[derive(Debug, Deserialize)]
struct DogImage {
    url: String,
    #[serde(default)]
    breeds: Vec<Breed>,
}

#[derive(Debug, Deserialize)]
struct Breed {
    name: String,
    temperament: Option<String>,
}

pub struct DogApiProvider {
    client: ApiClient,
}

impl DogApiProvider {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new("TheDogAPI", 5.0, 3),
        }
    }

    fn map_images(images: Vec<DogImage>) -> Vec<CatalogItem> {
        images
            .into_iter()
            .enumerate()
            .map(|(i, image)| {
                let mut item = CatalogItem::new(
                    format!("dog-{}", i),
                    Category::Dogs,
                    format!("Dog #{}", i + 1),
                    image.url,
                );
                if let Some(breed) = image.breeds.into_iter().next() {
                    item = item.with_subtitle(breed.name);
                    if let Some(temperament) = breed.temperament {
                        item = item.with_attribute("temperament", serde_json::json!(temperament));
                    }
                }
                item
            })
            .collect()
    }
}

impl Default for DogApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for DogApiProvider {
    fn name(&self) -> &'static str {
        "TheDogAPI"
    }

    fn category(&self) -> Category {
        Category::Dogs
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let url = format!("{}/images/search?limit={}", BASE_URL, PAGE_SIZE);
        let images: Vec<DogImage> = self.client.get_json(&url).await?;
        Ok(Self::map_images(images))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_map_images_numbers_entries() {
        let images: Vec<DogImage> = serde_json::from_value(json!([
            {"url": "https://dog/1.jpg", "breeds": [{"name": "Beagle", "temperament": "Merry"}]},
            {"url": "https://dog/2.jpg"}
        ]))
        .unwrap();

        let items = DogApiProvider::map_images(images);
        assert_eq!(items[0].id, "dog-0");
        assert_eq!(items[0].title, "Dog #1");
        assert_eq!(items[0].subtitle.as_deref(), Some("Beagle"));
        assert_eq!(items[1].title, "Dog #2");
        assert!(items[1].subtitle.is_none());
    }
}
