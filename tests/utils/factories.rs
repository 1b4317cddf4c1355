/// Test data factories with sensible defaults
use frikidex::modules::catalog::{CatalogItem, Category};
use serde_json::json;

pub fn pikachu() -> CatalogItem {
    CatalogItem::new(
        "25",
        Category::Pokemon,
        "Pikachu",
        "https://img.example/pikachu.png",
    )
    .with_subtitle("Tipo: electric")
    .with_attribute("types", json!(["electric"]))
}

pub fn charizard() -> CatalogItem {
    CatalogItem::new(
        "6",
        Category::Pokemon,
        "Charizard",
        "https://img.example/charizard.png",
    )
    .with_subtitle("Tipo: fire")
}

pub fn pokemon(id: u32, name: &str) -> CatalogItem {
    CatalogItem::new(
        id.to_string(),
        Category::Pokemon,
        name,
        format!("https://img.example/{id}.png"),
    )
}

pub fn iron_man() -> CatalogItem {
    CatalogItem::new(
        "1009368",
        Category::Marvel,
        "Iron Man",
        "https://img.example/ironman.jpg",
    )
    .with_description("Genius, billionaire.")
}

pub fn luke_skywalker() -> CatalogItem {
    CatalogItem::new(
        "sw-1",
        Category::StarWars,
        "Luke Skywalker",
        "https://img.example/luke.jpg",
    )
}

pub fn one_piece() -> CatalogItem {
    CatalogItem::new("21", Category::Anime, "One Piece", "https://img.example/op.jpg")
        .with_rating(8.7)
}
