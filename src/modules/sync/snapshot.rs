//! Shared in-memory snapshots of the user's remote collections.
//!
//! The snapshots are only ever written by the sync coordinator's subscription
//! pumps, which replace a whole collection at a time; services read them when
//! answering queries or deciding a toggle branch. Whole-map replacement under
//! one lock keeps each collection internally consistent at all times.

use crate::modules::favorites::domain::FavoriteEntry;
use crate::modules::identity::ItemKey;
use crate::modules::teams::domain::entities::Team;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

#[derive(Default)]
pub struct SnapshotStore {
    favorites: RwLock<HashMap<ItemKey, FavoriteEntry>>,
    teams: RwLock<HashMap<Uuid, Team>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Favorites

    pub fn is_favorite(&self, key: &ItemKey) -> bool {
        self.favorites.read().unwrap().contains_key(key)
    }

    pub fn favorite(&self, key: &ItemKey) -> Option<FavoriteEntry> {
        self.favorites.read().unwrap().get(key).cloned()
    }

    pub fn favorites(&self) -> Vec<FavoriteEntry> {
        self.favorites.read().unwrap().values().cloned().collect()
    }

    pub fn favorites_len(&self) -> usize {
        self.favorites.read().unwrap().len()
    }

    pub fn replace_favorites(&self, entries: HashMap<ItemKey, FavoriteEntry>) {
        *self.favorites.write().unwrap() = entries;
    }

    // Teams

    pub fn team(&self, team_id: &Uuid) -> Option<Team> {
        self.teams.read().unwrap().get(team_id).cloned()
    }

    pub fn teams(&self) -> Vec<Team> {
        self.teams.read().unwrap().values().cloned().collect()
    }

    pub fn replace_teams(&self, teams: HashMap<Uuid, Team>) {
        *self.teams.write().unwrap() = teams;
    }

    /// Sign-out teardown: both collections revert to empty
    pub fn clear(&self) {
        self.favorites.write().unwrap().clear();
        self.teams.write().unwrap().clear();
    }
}
