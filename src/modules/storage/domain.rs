//! Remote document store port.
//!
//! The cloud database the app syncs with is a hierarchical key-value store
//! with per-path last-write-wins writes and `onValue`-style subscriptions
//! that deliver the full subtree at the subscribed path on every change.

use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::mpsc::UnboundedReceiver;

/// Characters the store rejects inside a path segment
const FORBIDDEN_SEGMENT_CHARS: [char; 6] = ['.', '#', '$', '/', '[', ']'];

/// Validated path into the document tree, e.g. `users/u1/favorites/25-pokemon`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StorePath {
    segments: Vec<String>,
}

impl StorePath {
    pub fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn child(mut self, segment: impl Into<String>) -> AppResult<Self> {
        let segment = segment.into();
        if segment.is_empty() {
            return Err(AppError::ValidationError(
                "Store path segment cannot be empty".to_string(),
            ));
        }
        if segment.contains(&FORBIDDEN_SEGMENT_CHARS[..]) {
            return Err(AppError::ValidationError(format!(
                "Store path segment '{}' contains forbidden characters",
                segment
            )));
        }
        self.segments.push(segment);
        Ok(self)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// True when `self` is equal to `other` or an ancestor of it
    pub fn is_prefix_of(&self, other: &StorePath) -> bool {
        self.segments.len() <= other.segments.len()
            && self.segments.iter().zip(&other.segments).all(|(a, b)| a == b)
    }

    // Path shapes used by the sync core. User ids come from the auth
    // provider and item keys from the identity resolver, both already safe.

    pub fn favorites(user_id: &str) -> AppResult<Self> {
        Self::root().child("users")?.child(user_id)?.child("favorites")
    }

    pub fn favorite_entry(user_id: &str, key: &str) -> AppResult<Self> {
        Self::favorites(user_id)?.child(key)
    }

    pub fn teams(user_id: &str) -> AppResult<Self> {
        Self::root().child("users")?.child(user_id)?.child("teams")
    }

    pub fn team(user_id: &str, team_id: &str) -> AppResult<Self> {
        Self::teams(user_id)?.child(team_id)
    }

    pub fn team_member(user_id: &str, team_id: &str, item_key: &str) -> AppResult<Self> {
        Self::team(user_id, team_id)?.child("items")?.child(item_key)
    }
}

impl std::fmt::Display for StorePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}

/// Change notifications for one subscription. Each delivery carries the full
/// current value of the subtree at the subscribed path (`None` when absent).
pub type SubtreeReceiver = UnboundedReceiver<Option<Value>>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, path: &StorePath) -> AppResult<Option<Value>>;

    /// Replace the value at `path`
    async fn set(&self, path: &StorePath, value: Value) -> AppResult<()>;

    /// Shallow-merge `partial` into the object at `path`, creating it if absent
    async fn update(&self, path: &StorePath, partial: Map<String, Value>) -> AppResult<()>;

    /// Delete the subtree at `path`; succeeds when already absent
    async fn remove(&self, path: &StorePath) -> AppResult<()>;

    /// Open a subscription at `path`. The current value is delivered
    /// immediately, then again after every change touching the subtree.
    /// Dropping the receiver unsubscribes.
    fn subscribe(&self, path: &StorePath) -> SubtreeReceiver;
}
