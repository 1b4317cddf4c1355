//! Storage-safe item identity.
//!
//! Maps a `(id, category)` pair to the key used for favorites entries and
//! team roster members in the remote document store.

use crate::modules::catalog::domain::CatalogItem;
use serde::{Deserialize, Serialize};

/// Characters a hierarchical document store rejects in path segments
const FORBIDDEN: [char; 6] = ['.', '#', '$', '/', '[', ']'];

/// Storage-safe key identifying one catalog item within a user's documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    /// Derive the key for an item. Deterministic and pure for items that
    /// carry an id: equal `(id, category)` always yields an equal key.
    ///
    /// Known limitation: an item with an empty id falls back to a
    /// millisecond-timestamp key, so adding the same id-less item twice
    /// produces two distinct keys (and thus duplicate entries). The original
    /// app behaves the same way and stored data may depend on it, so the
    /// ambiguity is kept rather than papered over.
    pub fn resolve(item: &CatalogItem) -> ItemKey {
        let id = item.id.trim();
        if id.is_empty() {
            let millis = chrono::Utc::now().timestamp_millis();
            return ItemKey(format!("{}-t{}", item.category.slug(), millis));
        }
        ItemKey(sanitize(&format!("{}-{}", id, item.category.slug())))
    }

    /// Wrap a key read back from storage. Segments coming out of the store
    /// are already safe; this does not re-sanitize.
    pub fn from_stored(raw: impl Into<String>) -> ItemKey {
        ItemKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Replace forbidden path characters and whitespace with `-`, collapsing runs.
fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_dash = false;
    for c in raw.chars() {
        if FORBIDDEN.contains(&c) || c.is_whitespace() {
            if !last_dash {
                out.push('-');
                last_dash = true;
            }
        } else {
            out.push(c);
            last_dash = false;
        }
    }
    out.trim_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::catalog::domain::Category;

    fn item(id: &str, category: Category) -> CatalogItem {
        CatalogItem::new(id, category, "title", "https://img/x.png")
    }

    #[test]
    fn test_resolve_is_deterministic_for_equal_inputs() {
        let a = item("25", Category::Pokemon);
        let b = item("25", Category::Pokemon).with_subtitle("electric");
        assert_eq!(ItemKey::resolve(&a), ItemKey::resolve(&b));
    }

    #[test]
    fn test_resolve_distinguishes_categories() {
        let a = item("1", Category::Pokemon);
        let b = item("1", Category::Marvel);
        assert_ne!(ItemKey::resolve(&a), ItemKey::resolve(&b));
    }

    #[test]
    fn test_key_contains_no_forbidden_characters() {
        let weird = item("a.b#c$d/e[f]g", Category::StarWars);
        let key = ItemKey::resolve(&weird);
        assert!(!key.as_str().contains(&FORBIDDEN[..]), "key: {}", key);
        assert_eq!(key.as_str(), "a-b-c-d-e-f-g-star-wars");
    }

    #[test]
    fn test_empty_id_falls_back_to_timestamp_key() {
        let a = item("  ", Category::Dogs);
        let key = ItemKey::resolve(&a);
        assert!(key.as_str().starts_with("dogs-t"));
        // Not asserting inequality of two consecutive resolves: same-millisecond
        // collisions make that flaky, which is exactly the documented limitation.
    }
}
