pub mod entities;

pub use entities::FavoriteEntry;
