use crate::modules::auth::AuthProvider;
use crate::modules::catalog::domain::{CatalogItem, Category, CategoryKind};
use crate::modules::favorites::domain::FavoriteEntry;
use crate::modules::identity::ItemKey;
use crate::modules::storage::{DocumentStore, StorePath};
use crate::modules::sync::SnapshotStore;
use crate::shared::domain::{ToggleAction, ToggleOutcome};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use std::sync::Arc;

/// The authenticated user's favorites set.
///
/// Every mutation issues exactly one write (or delete) against the remote
/// store under `users/{uid}/favorites`; the in-memory snapshot is only
/// updated by the sync coordinator when the store confirms the change, so the
/// local view is eventually consistent with the remote one.
pub struct FavoritesService {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    snapshots: Arc<SnapshotStore>,
}

impl FavoritesService {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        snapshots: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            auth,
            store,
            snapshots,
        }
    }

    fn current_user(&self) -> AppResult<String> {
        self.auth
            .current_user()
            .map(|uid| uid.as_str().to_string())
            .ok_or(AppError::Unauthenticated)
    }

    /// Pure lookup against the current snapshot
    pub fn is_favorite(&self, item: &CatalogItem) -> bool {
        self.snapshots.is_favorite(&ItemKey::resolve(item))
    }

    /// Add `item` to the favorites set. Idempotent: when the resolver key is
    /// already present the existing entry is returned and no write is issued.
    pub async fn add_favorite(&self, item: &CatalogItem) -> AppResult<FavoriteEntry> {
        let uid = self.current_user()?;
        Validator::validate_persistable_item(&item.title, &item.image_url)?;

        let key = ItemKey::resolve(item);
        if let Some(existing) = self.snapshots.favorite(&key) {
            log_debug!("Favorites: '{}' already present, no-op", item.title);
            return Ok(existing);
        }

        let entry = FavoriteEntry::new(key.clone(), item.clone());
        let path = StorePath::favorite_entry(&uid, key.as_str())?;
        self.store
            .set(&path, serde_json::to_value(&entry)?)
            .await
            .map_err(AppError::into_remote_write)?;

        log_info!("Favorites: added '{}' ({})", item.title, key);
        Ok(entry)
    }

    /// Remove the entry for `key`. No-op when absent.
    pub async fn remove_favorite(&self, key: &ItemKey) -> AppResult<()> {
        let uid = self.current_user()?;
        if !self.snapshots.is_favorite(key) {
            return Ok(());
        }

        let path = StorePath::favorite_entry(&uid, key.as_str())?;
        self.store.remove(&path).await.map_err(AppError::into_remote_write)?;

        log_info!("Favorites: removed {}", key);
        Ok(())
    }

    /// Flip membership for `item`. The branch is decided against the snapshot
    /// as of the call; a subscription delivery racing with the decision can
    /// make the write redundant, in which case the store's last-write-wins
    /// semantics and the next delivery settle the authoritative state.
    pub async fn toggle_favorite(&self, item: &CatalogItem) -> AppResult<ToggleOutcome> {
        let key = ItemKey::resolve(item);
        if self.snapshots.is_favorite(&key) {
            self.remove_favorite(&key).await?;
            Ok(ToggleOutcome {
                action: ToggleAction::Removed,
                item: item.clone(),
            })
        } else {
            self.add_favorite(item).await?;
            Ok(ToggleOutcome {
                action: ToggleAction::Added,
                item: item.clone(),
            })
        }
    }

    /// Remove every favorite of the current user
    pub async fn clear_all_favorites(&self) -> AppResult<()> {
        let uid = self.current_user()?;
        let path = StorePath::favorites(&uid)?;
        self.store.remove(&path).await.map_err(AppError::into_remote_write)?;

        log_info!("Favorites: cleared all entries");
        Ok(())
    }

    pub fn all(&self) -> Vec<FavoriteEntry> {
        self.snapshots.favorites()
    }

    pub fn by_category(&self, category: Category) -> Vec<FavoriteEntry> {
        self.snapshots
            .favorites()
            .into_iter()
            .filter(|entry| entry.item.category == category)
            .collect()
    }

    pub fn by_kind(&self, kind: CategoryKind) -> Vec<FavoriteEntry> {
        self.snapshots
            .favorites()
            .into_iter()
            .filter(|entry| entry.item.category.kind() == kind)
            .collect()
    }
}
