use crate::modules::catalog::domain::{CatalogItem, CatalogProvider, Category};
use crate::modules::catalog::infrastructure::providers::{
    CatApiProvider, DogApiProvider, IgdbProvider, JikanProvider, MarvelProvider, PokeApiProvider,
    SwapiProvider, TmdbProvider,
};
use crate::modules::catalog::infrastructure::CatalogCache;
use crate::shared::config::AppConfig;
use crate::{log_debug, log_warn};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Aggregates the registered providers into one catalog.
///
/// Degrade-gracefully policy: a provider failure yields an empty list for
/// that category (with a warning), never an error, so one upstream outage
/// cannot block assembly of the rest of the catalog. Successful pages are
/// cached per category with a TTL.
pub struct CatalogService {
    providers: HashMap<Category, Arc<dyn CatalogProvider>>,
    cache: CatalogCache,
}

impl CatalogService {
    pub fn new(providers: Vec<Arc<dyn CatalogProvider>>, cache_ttl: Duration) -> Self {
        let providers = providers
            .into_iter()
            .map(|provider| (provider.category(), provider))
            .collect();
        Self {
            providers,
            cache: CatalogCache::new(cache_ttl),
        }
    }

    /// Register every provider whose credentials are available. Keyless
    /// upstreams are always on; Marvel, TMDB and IGDB only when configured.
    pub fn from_config(config: &AppConfig) -> Self {
        let limit = config.catalog_page_limit;
        let mut providers: Vec<Arc<dyn CatalogProvider>> = vec![
            Arc::new(PokeApiProvider::new(limit)),
            Arc::new(SwapiProvider::new(limit)),
            Arc::new(JikanProvider::new(limit)),
            Arc::new(DogApiProvider::new()),
            Arc::new(CatApiProvider::new()),
        ];

        if let (Some(public), Some(private)) = (
            config.marvel_public_key.clone(),
            config.marvel_private_key.clone(),
        ) {
            providers.push(Arc::new(MarvelProvider::new(public, private, limit)));
        } else {
            log_warn!("Catalog: Marvel credentials missing, provider not registered");
        }

        if let Some(key) = config.tmdb_api_key.clone() {
            providers.push(Arc::new(TmdbProvider::new(
                key,
                config.content_language.clone(),
                limit,
            )));
        } else {
            log_warn!("Catalog: TMDB key missing, provider not registered");
        }

        if let (Some(id), Some(secret)) = (
            config.igdb_client_id.clone(),
            config.igdb_client_secret.clone(),
        ) {
            providers.push(Arc::new(IgdbProvider::new(id, secret, limit)));
        } else {
            log_warn!("Catalog: IGDB credentials missing, provider not registered");
        }

        Self::new(providers, config.catalog_cache_ttl)
    }

    /// Categories a provider is registered for
    pub fn categories(&self) -> Vec<Category> {
        let mut categories: Vec<_> = self.providers.keys().copied().collect();
        categories.sort_by_key(|c| c.slug());
        categories
    }

    /// Fetch one category. An unregistered category or a provider failure
    /// both yield an empty list.
    pub async fn fetch_catalog(&self, category: Category) -> Vec<CatalogItem> {
        if let Some(cached) = self.cache.get(category) {
            log_debug!("Catalog: cache hit for {}", category);
            return cached;
        }

        let Some(provider) = self.providers.get(&category) else {
            log_warn!("Catalog: no provider registered for {}", category);
            return Vec::new();
        };

        match provider.fetch_catalog().await {
            Ok(items) => {
                log_debug!(
                    "Catalog: {} returned {} items for {}",
                    provider.name(),
                    items.len(),
                    category
                );
                self.cache.insert(category, items.clone());
                items
            }
            Err(err) => {
                log_warn!(
                    "Catalog: {} failed for {}: {}, returning empty list",
                    provider.name(),
                    category,
                    err
                );
                Vec::new()
            }
        }
    }

    /// Fetch every registered category concurrently and flatten the result
    pub async fn fetch_all(&self) -> Vec<CatalogItem> {
        let pages =
            futures::future::join_all(self.categories().into_iter().map(|c| self.fetch_catalog(c)))
                .await;
        pages.into_iter().flatten().collect()
    }

    pub fn invalidate_cache(&self, category: Category) {
        self.cache.invalidate(category);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::repositories::catalog_provider::MockProvider;
    use crate::shared::errors::AppError;

    fn item(id: &str, category: Category) -> CatalogItem {
        CatalogItem::new(id, category, format!("item-{}", id), "https://img/x.png")
    }

    fn ok_provider(category: Category, ids: &'static [&'static str]) -> Arc<dyn CatalogProvider> {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("Mock");
        provider.expect_category().return_const(category);
        provider
            .expect_fetch_catalog()
            .returning(move || Ok(ids.iter().map(|id| item(id, category)).collect()));
        Arc::new(provider)
    }

    fn failing_provider(category: Category) -> Arc<dyn CatalogProvider> {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("Broken");
        provider.expect_category().return_const(category);
        provider
            .expect_fetch_catalog()
            .returning(|| Err(AppError::ApiError("boom".to_string())));
        Arc::new(provider)
    }

    #[tokio::test]
    async fn test_fetch_catalog_returns_provider_items() {
        let service = CatalogService::new(
            vec![ok_provider(Category::Pokemon, &["1", "2"])],
            Duration::from_secs(60),
        );
        let items = service.fetch_catalog(Category::Pokemon).await;
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_provider_failure_degrades_to_empty() {
        let service = CatalogService::new(
            vec![failing_provider(Category::Anime)],
            Duration::from_secs(60),
        );
        assert!(service.fetch_catalog(Category::Anime).await.is_empty());
    }

    #[tokio::test]
    async fn test_unregistered_category_is_empty() {
        let service = CatalogService::new(vec![], Duration::from_secs(60));
        assert!(service.fetch_catalog(Category::Dogs).await.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_survives_one_outage() {
        let service = CatalogService::new(
            vec![
                ok_provider(Category::Pokemon, &["1"]),
                failing_provider(Category::Anime),
                ok_provider(Category::Marvel, &["9"]),
            ],
            Duration::from_secs(60),
        );
        let items = service.fetch_all().await;
        assert_eq!(items.len(), 2);
    }

    #[tokio::test]
    async fn test_second_fetch_hits_cache() {
        let mut provider = MockProvider::new();
        provider.expect_name().return_const("Once");
        provider.expect_category().return_const(Category::Pokemon);
        provider
            .expect_fetch_catalog()
            .times(1)
            .returning(|| Ok(vec![item("1", Category::Pokemon)]));

        let service = CatalogService::new(vec![Arc::new(provider)], Duration::from_secs(60));
        assert_eq!(service.fetch_catalog(Category::Pokemon).await.len(), 1);
        assert_eq!(service.fetch_catalog(Category::Pokemon).await.len(), 1);
    }
}
