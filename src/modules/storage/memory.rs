//! In-memory reference implementation of the document store port.
//!
//! Used by the test suites and by embedders that want the core running
//! without a cloud backend. Mirrors the remote store's observable behavior:
//! last-write-wins per path, empty parents pruned on delete, and full-subtree
//! delivery to every overlapping subscription.

use super::domain::{DocumentStore, StorePath, SubtreeReceiver};
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, RwLock};
use tokio::sync::mpsc;

struct Watcher {
    path: StorePath,
    tx: mpsc::UnboundedSender<Option<Value>>,
}

#[derive(Default)]
pub struct InMemoryDocumentStore {
    tree: RwLock<Value>,
    watchers: Mutex<Vec<Watcher>>,
    /// Test hook: when set, every write fails with `RemoteWriteFailure`
    fail_writes: AtomicBool,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self {
            tree: RwLock::new(Value::Object(Map::new())),
            watchers: Mutex::new(Vec::new()),
            fail_writes: AtomicBool::new(false),
        }
    }

    /// Make subsequent writes fail, simulating a rejected remote write
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check_writable(&self) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::RemoteWriteFailure(
                "store rejected the write".to_string(),
            ));
        }
        Ok(())
    }

    fn value_at<'a>(tree: &'a Value, path: &StorePath) -> Option<&'a Value> {
        let mut current = tree;
        for segment in path.segments() {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    fn set_at(tree: &mut Value, path: &StorePath, value: Value) {
        let mut current = tree;
        let segments = path.segments();
        for segment in &segments[..segments.len().saturating_sub(1)] {
            if !current.is_object() {
                *current = Value::Object(Map::new());
            }
            current = current
                .as_object_mut()
                .unwrap()
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
        }
        match segments.last() {
            Some(last) => {
                if !current.is_object() {
                    *current = Value::Object(Map::new());
                }
                current.as_object_mut().unwrap().insert(last.clone(), value);
            }
            None => *current = value,
        }
    }

    /// Remove the subtree at `path`, pruning parents left empty
    fn remove_at(tree: &mut Value, segments: &[String]) {
        match segments {
            [] => *tree = Value::Object(Map::new()),
            [last] => {
                if let Some(map) = tree.as_object_mut() {
                    map.remove(last);
                }
            }
            [first, rest @ ..] => {
                if let Some(map) = tree.as_object_mut() {
                    if let Some(child) = map.get_mut(first) {
                        Self::remove_at(child, rest);
                        if child.as_object().map_or(false, Map::is_empty) {
                            map.remove(first);
                        }
                    }
                }
            }
        }
    }

    /// Deliver the current subtree to every watcher overlapping `changed`,
    /// dropping watchers whose receiver has gone away.
    fn notify(&self, changed: &StorePath) {
        let tree = self.tree.read().unwrap();
        let mut watchers = self.watchers.lock().unwrap();
        watchers.retain(|watcher| {
            if !watcher.path.is_prefix_of(changed) && !changed.is_prefix_of(&watcher.path) {
                return true;
            }
            let snapshot = Self::value_at(&tree, &watcher.path).cloned();
            watcher.tx.send(snapshot).is_ok()
        });
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &StorePath) -> AppResult<Option<Value>> {
        let tree = self.tree.read().unwrap();
        Ok(Self::value_at(&tree, path).cloned())
    }

    async fn set(&self, path: &StorePath, value: Value) -> AppResult<()> {
        self.check_writable()?;
        {
            let mut tree = self.tree.write().unwrap();
            Self::set_at(&mut tree, path, value);
        }
        self.notify(path);
        Ok(())
    }

    async fn update(&self, path: &StorePath, partial: Map<String, Value>) -> AppResult<()> {
        self.check_writable()?;
        {
            let mut tree = self.tree.write().unwrap();
            let mut merged = Self::value_at(&tree, path)
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            merged.extend(partial);
            Self::set_at(&mut tree, path, Value::Object(merged));
        }
        self.notify(path);
        Ok(())
    }

    async fn remove(&self, path: &StorePath) -> AppResult<()> {
        self.check_writable()?;
        {
            let mut tree = self.tree.write().unwrap();
            Self::remove_at(&mut tree, path.segments());
        }
        self.notify(path);
        Ok(())
    }

    fn subscribe(&self, path: &StorePath) -> SubtreeReceiver {
        let (tx, rx) = mpsc::unbounded_channel();
        let initial = {
            let tree = self.tree.read().unwrap();
            Self::value_at(&tree, path).cloned()
        };
        let _ = tx.send(initial);
        self.watchers.lock().unwrap().push(Watcher {
            path: path.clone(),
            tx,
        });
        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(segments: &[&str]) -> StorePath {
        segments
            .iter()
            .fold(StorePath::root(), |p, s| p.child(*s).unwrap())
    }

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let store = InMemoryDocumentStore::new();
        let p = path(&["users", "u1", "favorites", "25-pokemon"]);
        store.set(&p, json!({"title": "pikachu"})).await.unwrap();

        let value = store.get(&p).await.unwrap().unwrap();
        assert_eq!(value["title"], "pikachu");
    }

    #[tokio::test]
    async fn test_subscribe_delivers_initial_then_full_subtree_on_change() {
        let store = InMemoryDocumentStore::new();
        let favorites = path(&["users", "u1", "favorites"]);
        let mut rx = store.subscribe(&favorites);

        assert_eq!(rx.recv().await.unwrap(), None);

        store
            .set(&favorites.clone().child("a").unwrap(), json!({"title": "a"}))
            .await
            .unwrap();
        let delivered = rx.recv().await.unwrap().unwrap();
        assert!(delivered.get("a").is_some());

        store
            .set(&favorites.clone().child("b").unwrap(), json!({"title": "b"}))
            .await
            .unwrap();
        let delivered = rx.recv().await.unwrap().unwrap();
        assert!(delivered.get("a").is_some() && delivered.get("b").is_some());
    }

    #[tokio::test]
    async fn test_remove_prunes_empty_parents() {
        let store = InMemoryDocumentStore::new();
        let entry = path(&["users", "u1", "favorites", "a"]);
        store.set(&entry, json!({"title": "a"})).await.unwrap();
        store.remove(&entry).await.unwrap();

        assert_eq!(
            store.get(&path(&["users", "u1", "favorites"])).await.unwrap(),
            None
        );
        // Removing again is a no-op
        store.remove(&entry).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_shallow_merges() {
        let store = InMemoryDocumentStore::new();
        let team = path(&["users", "u1", "teams", "t1"]);
        store
            .set(&team, json!({"name": "Gen1", "category": "Pokémon"}))
            .await
            .unwrap();

        let mut partial = Map::new();
        partial.insert("name".to_string(), json!("Gen2"));
        store.update(&team, partial).await.unwrap();

        let value = store.get(&team).await.unwrap().unwrap();
        assert_eq!(value["name"], "Gen2");
        assert_eq!(value["category"], "Pokémon");
    }

    #[tokio::test]
    async fn test_fail_writes_surfaces_remote_write_failure() {
        let store = InMemoryDocumentStore::new();
        store.set_fail_writes(true);
        let p = path(&["users", "u1", "favorites", "a"]);
        let err = store.set(&p, json!({})).await.unwrap_err();
        assert!(matches!(err, AppError::RemoteWriteFailure(_)));
    }
}
