use crate::modules::auth::AuthProvider;
use crate::modules::catalog::domain::{CatalogItem, Category};
use crate::modules::identity::ItemKey;
use crate::modules::rules::MembershipRules;
use crate::modules::storage::{DocumentStore, StorePath};
use crate::modules::sync::SnapshotStore;
use crate::modules::teams::domain::{Team, TeamMember};
use crate::shared::domain::{ToggleAction, ToggleOutcome};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use crate::{log_debug, log_info};
use serde_json::{json, Map};
use std::sync::Arc;
use uuid::Uuid;

/// The authenticated user's named teams.
///
/// Same write discipline as the favorites store: one remote write per
/// mutation under `users/{uid}/teams`, snapshot updates arrive only through
/// the sync coordinator. Every membership mutation is gated by the rules
/// engine; capacity is enforced by the `Team` entity itself.
pub struct TeamService {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    snapshots: Arc<SnapshotStore>,
}

impl TeamService {
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

    /// Create a team locked to `category`. The category cannot change later.
    pub async fn create_team(&self, name: &str, category: Category) -> AppResult<Team> {
        let uid = self.current_user()?;
        Validator::validate_team_name(name)?;
        if !MembershipRules::is_team_eligible(category) {
            return Err(AppError::NotEligible(category.display_name().to_string()));
        }

        let team = Team::new(name.trim().to_string(), category);
        let path = StorePath::team(&uid, &team.id.to_string())?;
        self.store
            .set(&path, serde_json::to_value(&team)?)
            .await
            .map_err(AppError::into_remote_write)?;

        log_info!("Teams: created '{}' ({})", team.name, team.category);
        Ok(team)
    }

    /// Rename an existing team. Unlike removals, a missing team is a hard
    /// `NotFound` here.
    pub async fn rename_team(&self, team_id: &Uuid, new_name: &str) -> AppResult<()> {
        let uid = self.current_user()?;
        Validator::validate_team_name(new_name)?;
        let team = self
            .snapshots
            .team(team_id)
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;

        let mut partial = Map::new();
        partial.insert("name".to_string(), json!(new_name.trim()));
        partial.insert(
            "updatedAt".to_string(),
            serde_json::to_value(chrono::Utc::now())?,
        );

        let path = StorePath::team(&uid, &team.id.to_string())?;
        self.store
            .update(&path, partial)
            .await
            .map_err(AppError::into_remote_write)?;

        log_info!("Teams: renamed '{}' to '{}'", team.name, new_name.trim());
        Ok(())
    }

    /// Delete a team and its whole roster. Idempotent when already absent.
    pub async fn delete_team(&self, team_id: &Uuid) -> AppResult<()> {
        let uid = self.current_user()?;
        if self.snapshots.team(team_id).is_none() {
            return Ok(());
        }

        let path = StorePath::team(&uid, &team_id.to_string())?;
        self.store
            .remove(&path)
            .await
            .map_err(AppError::into_remote_write)?;

        log_info!("Teams: deleted {}", team_id);
        Ok(())
    }

    /// Add `item` to a team's roster. No-op when the resolver key is already
    /// a member; `CategoryMismatch`/`NotEligible` and `TeamFull` surface to
    /// the caller with the roster unchanged.
    pub async fn add_member(&self, team_id: &Uuid, item: &CatalogItem) -> AppResult<()> {
        let uid = self.current_user()?;
        let mut team = self
            .snapshots
            .team(team_id)
            .ok_or_else(|| AppError::NotFound(format!("Team {} not found", team_id)))?;
        MembershipRules::can_join(item, &team)?;
        Validator::validate_persistable_item(&item.title, &item.image_url)?;

        let key = ItemKey::resolve(item);
        let member = TeamMember::new(item.clone());
        if !team.add_member(key.clone(), member.clone())? {
            log_debug!("Teams: '{}' already on roster, no-op", item.title);
            return Ok(());
        }

        let path = StorePath::team_member(&uid, &team_id.to_string(), key.as_str())?;
        self.store
            .set(&path, serde_json::to_value(&member)?)
            .await
            .map_err(AppError::into_remote_write)?;

        log_info!("Teams: added '{}' to {}", item.title, team_id);
        Ok(())
    }

    /// Remove a roster member. No-op when the team or the member is absent.
    pub async fn remove_member(&self, team_id: &Uuid, key: &ItemKey) -> AppResult<()> {
        let uid = self.current_user()?;
        let team = match self.snapshots.team(team_id) {
            Some(team) => team,
            None => return Ok(()),
        };
        if !team.contains_member(key) {
            return Ok(());
        }

        let path = StorePath::team_member(&uid, &team_id.to_string(), key.as_str())?;
        self.store
            .remove(&path)
            .await
            .map_err(AppError::into_remote_write)?;

        log_info!("Teams: removed {} from {}", key, team_id);
        Ok(())
    }

    /// Flip roster membership. Same snapshot-race caveat as
    /// `FavoritesService::toggle_favorite`.
    pub async fn toggle_member(&self, team_id: &Uuid, item: &CatalogItem) -> AppResult<ToggleOutcome> {
        let key = ItemKey::resolve(item);
        let is_member = self
            .snapshots
            .team(team_id)
            .map_or(false, |team| team.contains_member(&key));

        if is_member {
            self.remove_member(team_id, &key).await?;
            Ok(ToggleOutcome {
                action: ToggleAction::Removed,
                item: item.clone(),
            })
        } else {
            self.add_member(team_id, item).await?;
            Ok(ToggleOutcome {
                action: ToggleAction::Added,
                item: item.clone(),
            })
        }
    }

    pub fn get_team(&self, team_id: &Uuid) -> Option<Team> {
        self.snapshots.team(team_id)
    }

    pub fn all(&self) -> Vec<Team> {
        self.snapshots.teams()
    }

    pub fn list_by_category(&self, category: Category) -> Vec<Team> {
        self.snapshots
            .teams()
            .into_iter()
            .filter(|team| team.category == category)
            .collect()
    }
}
