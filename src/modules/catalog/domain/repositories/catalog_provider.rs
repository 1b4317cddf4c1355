use crate::modules::catalog::domain::{entities::CatalogItem, value_objects::Category};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Port for one upstream content API.
///
/// Each adapter owns exactly one category and returns items already
/// normalized to the `CatalogItem` shape, optional fields filled with safe
/// defaults.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Provider name, for logging
    fn name(&self) -> &'static str;

    /// The single category this provider serves
    fn category(&self) -> Category;

    async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>>;
}

#[cfg(test)]
mockall::mock! {
    pub Provider {}

    #[async_trait]
    impl CatalogProvider for Provider {
        fn name(&self) -> &'static str;
        fn category(&self) -> Category;
        async fn fetch_catalog(&self) -> AppResult<Vec<CatalogItem>>;
    }
}
