pub mod favorite_entry;

pub use favorite_entry::FavoriteEntry;
