pub mod entities;
pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use entities::CatalogItem;
pub use repositories::CatalogProvider;
pub use value_objects::{Category, CategoryKind};
