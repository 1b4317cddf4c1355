//! TTL cache for normalized catalog pages, one entry per category.

use crate::modules::catalog::domain::{CatalogItem, Category};
use dashmap::DashMap;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct CacheEntry {
    items: Vec<CatalogItem>,
    created_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

#[derive(Debug)]
pub struct CatalogCache {
    entries: DashMap<Category, CacheEntry>,
    ttl: Duration,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, category: Category) -> Option<Vec<CatalogItem>> {
        let entry = self.entries.get(&category)?;
        if entry.is_expired(self.ttl) {
            drop(entry);
            self.entries.remove(&category);
            return None;
        }
        Some(entry.items.clone())
    }

    pub fn insert(&self, category: Category, items: Vec<CatalogItem>) {
        self.entries.insert(
            category,
            CacheEntry {
                items,
                created_at: Instant::now(),
            },
        );
    }

    pub fn invalidate(&self, category: Category) {
        self.entries.remove(&category);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<CatalogItem> {
        vec![CatalogItem::new(
            "25",
            Category::Pokemon,
            "pikachu",
            "https://img/25.png",
        )]
    }

    #[test]
    fn test_hit_within_ttl() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        cache.insert(Category::Pokemon, items());
        assert_eq!(cache.get(Category::Pokemon).unwrap().len(), 1);
        assert!(cache.get(Category::Anime).is_none());
    }

    #[test]
    fn test_expired_entry_is_evicted() {
        let cache = CatalogCache::new(Duration::from_millis(0));
        cache.insert(Category::Pokemon, items());
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(Category::Pokemon).is_none());
    }

    #[test]
    fn test_invalidate() {
        let cache = CatalogCache::new(Duration::from_secs(60));
        cache.insert(Category::Pokemon, items());
        cache.invalidate(Category::Pokemon);
        assert!(cache.get(Category::Pokemon).is_none());
    }
}
