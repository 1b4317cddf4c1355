pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::CatalogService;
pub use domain::{CatalogItem, CatalogProvider, Category, CategoryKind};
