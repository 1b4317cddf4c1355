//! TheCatAPI adapter: breed listing joined with a parallel image search.
//! When the breeds endpoint fails, falls back to images with a generic
//! description before giving up.

use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::http_client::ApiClient;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use serde::Deserialize;

const BASE_URL: &str = "https://api.thecatapi.com/v1";
const PAGE_SIZE: usize = 15;
const FALLBACK_SIZE: usize = 8;
const GENERIC_DESCRIPTION: &str =
    "Un adorable felino compañero. Los gatos son mascotas independientes y cariñosas.";

#[derive(Debug, Deserialize)]
struct CatBreed {
    name: String,
    origin: Option<String>,
    temperament: Option<String>,
    life_span: Option<String>,
    weight: Option<BreedWeight>,
}

#[derive(Debug, Deserialize)]
struct BreedWeight {
    metric: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

pub struct CatApiProvider {
    client: ApiClient,
}

impl CatApiProvider {
    pub fn new() -> Self {
        Self {
            client: ApiClient::new("TheCatAPI", 5.0, 3),
        }
    }

    /// Assemble a description from whatever breed fields are present,
    /// never rendering a literal "unknown"
    fn describe(breed: &CatBreed) -> String {
        let origin = breed
            .origin
            .as_deref()
            .filter(|o| !o.is_empty())
            .map(|o| format!("originaria de {}", o))
            .unwrap_or_default();
        let temperament = breed
            .temperament
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| format!("Temperamento: {}.", t))
            .unwrap_or_default();
        let life_span = breed
            .life_span
            .as_deref()
            .filter(|l| !l.is_empty())
            .map(|l| format!("Expectativa de vida: {} años.", l))
            .unwrap_or_default();
        let weight = breed
            .weight
            .as_ref()
            .and_then(|w| w.metric.as_deref())
            .filter(|w| !w.is_empty())
            .map(|w| format!("Peso: {} kg.", w))
            .unwrap_or_default();

        let description = format!(
            "{} es una raza de gato {}. {} {} {}",
            breed.name, origin, temperament, life_span, weight
        );
        let description = description.split_whitespace().collect::<Vec<_>>().join(" ");
        if description.is_empty() {
            GENERIC_DESCRIPTION.to_string()
        } else {
            description
        }
    }

    fn map_breeds(breeds: Vec<CatBreed>, images: Vec<CatImage>) -> Vec<CatalogItem> {
        breeds
            .into_iter()
            .enumerate()
            .map(|(i, breed)| {
                let image = images
                    .get(i)
                    .map(|img| img.url.clone())
                    .unwrap_or_else(|| format!("https://picsum.photos/seed/cat{}/400/300", i));
                let description = Self::describe(&breed);
                CatalogItem::new(format!("cat-{}", i), Category::Cats, breed.name, image)
                    .with_description(description)
            })
            .collect()
    }

    fn map_fallback(images: Vec<CatImage>) -> Vec<CatalogItem> {
        images
            .into_iter()
            .enumerate()
            .map(|(i, image)| {
                CatalogItem::new(
                    format!("cat-{}", i),
                    Category::Cats,
                    format!("Gato #{}", i + 1),
                    image.url,
                )
                .with_description(GENERIC_DESCRIPTION)
            })
            .collect()
    }
}

impl Default for CatApiProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogProvider for CatApiProvider {
    fn name(&self) -> &'static str {
        "TheCatAPI"
    }

    fn category(&self) -> Category {
        Category::Cats
    }

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>> {
        let breeds_url = format!("{}/breeds?limit={}", BASE_URL, PAGE_SIZE);
        let images_url = format!("{}/images/search?limit={}", BASE_URL, PAGE_SIZE);

        let joined = tokio::try_join!(
            self.client.get_json::<Vec<CatBreed>>(&breeds_url),
            self.client.get_json::<Vec<CatImage>>(&images_url),
        );

        match joined {
            Ok((breeds, images)) => Ok(Self::map_breeds(breeds, images)),
            Err(err) => {
                log::warn!("TheCatAPI: breed listing failed ({}), using image fallback", err);
                let fallback_url = format!("{}/images/search?limit={}", BASE_URL, FALLBACK_SIZE);
                let images: Vec<CatImage> = self.client.get_json(&fallback_url).await?;
                Ok(Self::map_fallback(images))
            }
        }
    }
}
