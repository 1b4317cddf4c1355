use crate::modules::catalog::domain::{CatalogItem, Category};
use crate::modules::identity::ItemKey;
use crate::shared::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Upper bound on concurrent roster members
pub const TEAM_CAPACITY: usize = 6;

/// One roster entry: a snapshot of the item at join time
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    #[serde(flatten)]
    pub item: CatalogItem,
    pub added_at: DateTime<Utc>,
}

impl TeamMember {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            added_at: Utc::now(),
        }
    }
}

/// A user-scoped, category-locked named roster of up to six items.
///
/// `category` is fixed at creation; the roster is keyed by the identity
/// resolver's storage-safe key so duplicates are impossible by construction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub items: BTreeMap<ItemKey, TeamMember>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Team {
    pub fn new(name: String, category: Category) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            items: BTreeMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn rename(&mut self, new_name: String) {
        self.name = new_name;
        self.updated_at = Utc::now();
    }

    pub fn contains_member(&self, key: &ItemKey) -> bool {
        self.items.contains_key(key)
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= TEAM_CAPACITY
    }

    pub fn roster_size(&self) -> usize {
        self.items.len()
    }

    /// Add a member. Returns `Ok(false)` when the key is already on the
    /// roster (no-op), `TeamFull` when the roster is at capacity.
    pub fn add_member(&mut self, key: ItemKey, member: TeamMember) -> AppResult<bool> {
        if self.items.contains_key(&key) {
            return Ok(false);
        }
        if self.is_full() {
            return Err(AppError::TeamFull(TEAM_CAPACITY));
        }
        self.items.insert(key, member);
        self.updated_at = Utc::now();
        Ok(true)
    }

    /// Remove a member; returns whether anything was removed
    pub fn remove_member(&mut self, key: &ItemKey) -> bool {
        let removed = self.items.remove(key).is_some();
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }
}
