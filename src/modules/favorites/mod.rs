pub mod application;
pub mod domain;

// Re-exports for easy external access
pub use application::service::FavoritesService;
pub use domain::FavoriteEntry;
