pub mod cache;
pub mod http_client;
pub mod providers;

pub use cache::CatalogCache;
pub use http_client::ApiClient;
