use crate::modules::catalog::domain::CatalogItem;
use crate::modules::identity::ItemKey;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One saved favorite, owned by a single user.
///
/// Holds a snapshot of the item's display fields at favoriting time, not a
/// live reference. Entries are created whole and destroyed whole; a
/// re-favorite after removal is a fresh entry with a fresh `added_at`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntry {
    pub key: ItemKey,
    #[serde(flatten)]
    pub item: CatalogItem,
    pub added_at: DateTime<Utc>,
}

impl FavoriteEntry {
    pub fn new(key: ItemKey, item: CatalogItem) -> Self {
        Self {
            key,
            item,
            added_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::Category;

    #[test]
    fn test_wire_shape_flattens_item_fields() {
        let item = CatalogItem::new("25", Category::Pokemon, "pikachu", "https://img/25.png");
        let entry = FavoriteEntry::new(ItemKey::resolve(&item), item);

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["key"], "25-pokemon");
        assert_eq!(value["title"], "pikachu");
        assert_eq!(value["tag"], "Pokémon");
        assert!(value.get("addedAt").is_some());

        let back: FavoriteEntry = serde_json::from_value(value).unwrap();
        assert_eq!(back, entry);
    }
}
