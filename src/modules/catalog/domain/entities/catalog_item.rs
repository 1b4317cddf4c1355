use super::super::value_objects::Category;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Normalized representation of one displayable entity from any provider.
///
/// `id` is unique within `category`; the `(category, id)` pair identifies the
/// entity across the whole system. Field names on the wire (`tag`, `image`)
/// match what the original app persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: String,
    #[serde(rename = "tag")]
    pub category: Category,
    pub title: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,

    /// Category-specific passthrough fields (genres, platforms, filmography,
    /// height/weight, ...). Opaque to the core; read through the capability
    /// accessors instead of presence-checking arbitrary properties.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CatalogItem {
    pub fn new(
        id: impl Into<String>,
        category: Category,
        title: impl Into<String>,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            category,
            title: title.into(),
            image_url: image_url.into(),
            subtitle: None,
            description: None,
            rating: None,
            attributes: Map::new(),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Two items are the same entity when their `(category, id)` pairs match,
    /// regardless of display-field drift between fetches.
    pub fn same_entity(&self, other: &CatalogItem) -> bool {
        self.category == other.category && self.id == other.id
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attributes.get(name).map_or(false, |v| !v.is_null())
    }

    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }

    pub fn attr_str_list(&self, name: &str) -> Vec<&str> {
        self.attributes
            .get(name)
            .and_then(Value::as_array)
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn genres(&self) -> Vec<&str> {
        self.attr_str_list("genres")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pikachu() -> CatalogItem {
        CatalogItem::new("25", Category::Pokemon, "pikachu", "https://img/25.png")
            .with_subtitle("electric")
    }

    #[test]
    fn test_same_entity_ignores_display_fields() {
        let a = pikachu();
        let b = CatalogItem::new("25", Category::Pokemon, "PIKACHU", "https://other/25.png");
        assert!(a.same_entity(&b));

        let other_category = CatalogItem::new("25", Category::Marvel, "pikachu", "x");
        assert!(!a.same_entity(&other_category));
    }

    #[test]
    fn test_wire_shape_uses_original_field_names() {
        let value = serde_json::to_value(pikachu()).unwrap();
        assert_eq!(value["tag"], "Pokémon");
        assert_eq!(value["image"], "https://img/25.png");
        assert!(value.get("imageUrl").is_none());
    }

    #[test]
    fn test_attribute_capability_accessors() {
        let item = pikachu()
            .with_attribute("genres", json!(["Action", "RPG"]))
            .with_attribute("storyline", Value::Null);

        assert!(item.has_attr("genres"));
        assert!(!item.has_attr("storyline"));
        assert!(!item.has_attr("platforms"));
        assert_eq!(item.genres(), vec!["Action", "RPG"]);
    }

    #[test]
    fn test_attributes_round_trip_through_flatten() {
        let item = pikachu().with_attribute("height", json!(4));
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["height"], 4);

        let back: CatalogItem = serde_json::from_value(value).unwrap();
        assert_eq!(back.attributes["height"], 4);
    }
}
