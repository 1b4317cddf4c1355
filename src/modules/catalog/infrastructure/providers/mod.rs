pub mod catapi;
pub mod dogapi;
pub mod igdb;
pub mod jikan;
pub mod marvel;
pub mod pokeapi;
pub mod swapi;
pub mod tmdb;

pub use catapi::CatApiProvider;
pub use dogapi::DogApiProvider;
pub use igdb::IgdbProvider;
pub use jikan::JikanProvider;
pub use marvel::MarvelProvider;
pub use pokeapi::PokeApiProvider;
pub use swapi::SwapiProvider;
pub use tmdb::TmdbProvider;
