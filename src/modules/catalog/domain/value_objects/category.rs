//! Content category enum and grouping

use serde::{Deserialize, Serialize};

/// Fixed set of content categories, one per upstream provider.
///
/// The serde names match the `tag` strings the original mobile app stored in
/// its realtime database, accents included, so existing per-user documents
/// deserialize unchanged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Category {
    #[serde(rename = "Pokémon")]
    Pokemon,
    #[serde(rename = "Star Wars")]
    StarWars,
    #[serde(rename = "Marvel")]
    Marvel,
    #[serde(rename = "Anime")]
    Anime,
    #[serde(rename = "Juegos")]
    Games,
    #[serde(rename = "Películas")]
    Movies,
    #[serde(rename = "Perros")]
    Dogs,
    #[serde(rename = "Gatos")]
    Cats,
}

/// Coarse grouping used by the query helpers (the original app grouped its
/// screens the same way).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CategoryKind {
    Characters,
    Media,
    Animals,
}

impl Category {
    pub const ALL: [Category; 8] = [
        Category::Pokemon,
        Category::StarWars,
        Category::Marvel,
        Category::Anime,
        Category::Games,
        Category::Movies,
        Category::Dogs,
        Category::Cats,
    ];

    /// Human-facing name, as displayed by the app
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Pokemon => "Pokémon",
            Category::StarWars => "Star Wars",
            Category::Marvel => "Marvel",
            Category::Anime => "Anime",
            Category::Games => "Juegos",
            Category::Movies => "Películas",
            Category::Dogs => "Perros",
            Category::Cats => "Gatos",
        }
    }

    /// ASCII identifier, safe for storage paths and log lines
    pub fn slug(&self) -> &'static str {
        match self {
            Category::Pokemon => "pokemon",
            Category::StarWars => "star-wars",
            Category::Marvel => "marvel",
            Category::Anime => "anime",
            Category::Games => "games",
            Category::Movies => "movies",
            Category::Dogs => "dogs",
            Category::Cats => "cats",
        }
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::Pokemon | Category::StarWars | Category::Marvel => CategoryKind::Characters,
            Category::Anime | Category::Games | Category::Movies => CategoryKind::Media,
            Category::Dogs | Category::Cats => CategoryKind::Animals,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_stored_tags() {
        let json = serde_json::to_string(&Category::Pokemon).unwrap();
        assert_eq!(json, "\"Pokémon\"");
        let back: Category = serde_json::from_str("\"Películas\"").unwrap();
        assert_eq!(back, Category::Movies);
    }

    #[test]
    fn test_slugs_are_path_safe() {
        for category in Category::ALL {
            let slug = category.slug();
            assert!(slug
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '-'), "bad slug: {}", slug);
        }
    }

    #[test]
    fn test_kind_grouping() {
        assert_eq!(Category::Marvel.kind(), CategoryKind::Characters);
        assert_eq!(Category::Movies.kind(), CategoryKind::Media);
        assert_eq!(Category::Cats.kind(), CategoryKind::Animals);
    }
}
