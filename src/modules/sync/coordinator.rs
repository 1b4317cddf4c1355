//! Drives the in-memory snapshots from the remote store across the auth
//! lifecycle.
//!
//! One driver task follows the auth change stream. On sign-in it opens one
//! subscription per collection at the user's scoped path, applies the initial
//! delivery, then keeps a pump task per subscription that replaces the
//! affected snapshot wholesale on every change. On sign-out the pumps are
//! cancelled and both snapshots revert to empty. In-flight writes are never
//! cancelled; whatever they did is overridden by the next delivery of the
//! session that owns the path.

use super::snapshot::SnapshotStore;
use crate::modules::auth::{AuthProvider, UserId};
use crate::modules::favorites::domain::FavoriteEntry;
use crate::modules::identity::ItemKey;
use crate::modules::storage::{DocumentStore, StorePath, SubtreeReceiver};
use crate::modules::teams::domain::entities::Team;
use crate::shared::errors::AppResult;
use crate::{log_debug, log_info, log_warn};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncState {
    SignedOut,
    Loading,
    SignedIn(UserId),
}

pub struct SyncCoordinator {
    auth: Arc<dyn AuthProvider>,
    store: Arc<dyn DocumentStore>,
    snapshots: Arc<SnapshotStore>,
    state: Arc<RwLock<SyncState>>,
}

struct Session {
    cancel: CancellationToken,
    pumps: Vec<JoinHandle<()>>,
}

impl Session {
    fn tear_down(self) {
        self.cancel.cancel();
        for pump in self.pumps {
            pump.abort();
        }
    }
}

impl SyncCoordinator {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
        snapshots: Arc<SnapshotStore>,
    ) -> Self {
        Self {
            auth,
            store,
            snapshots,
            state: Arc::new(RwLock::new(SyncState::SignedOut)),
        }
    }

    pub fn state(&self) -> SyncState {
        self.state.read().unwrap().clone()
    }

    pub fn snapshots(&self) -> Arc<SnapshotStore> {
        Arc::clone(&self.snapshots)
    }

    /// Spawn the driver task. Runs until the auth provider goes away.
    pub fn start(&self) -> JoinHandle<()> {
        let auth = Arc::clone(&self.auth);
        let store = Arc::clone(&self.store);
        let snapshots = Arc::clone(&self.snapshots);
        let state = Arc::clone(&self.state);

        tokio::spawn(async move {
            let mut auth_rx = auth.watch();
            let mut session: Option<Session> = None;

            loop {
                let user = auth_rx.borrow_and_update().clone();

                if let Some(old) = session.take() {
                    old.tear_down();
                }

                match user {
                    Some(uid) => {
                        *state.write().unwrap() = SyncState::Loading;
                        match Self::open_session(&store, &snapshots, &uid).await {
                            Ok(new_session) => {
                                session = Some(new_session);
                                *state.write().unwrap() = SyncState::SignedIn(uid.clone());
                                log_info!("Sync: session open for {}", uid);
                            }
                            Err(err) => {
                                log_warn!("Sync: failed to open session for {}: {}", uid, err);
                                snapshots.clear();
                                *state.write().unwrap() = SyncState::SignedOut;
                            }
                        }
                    }
                    None => {
                        snapshots.clear();
                        *state.write().unwrap() = SyncState::SignedOut;
                        log_debug!("Sync: signed out, snapshots cleared");
                    }
                }

                if auth_rx.changed().await.is_err() {
                    if let Some(old) = session.take() {
                        old.tear_down();
                    }
                    break;
                }
            }
        })
    }

    /// Subscribe both collections, apply their initial deliveries, and leave
    /// a pump running per subscription.
    async fn open_session(
        store: &Arc<dyn DocumentStore>,
        snapshots: &Arc<SnapshotStore>,
        uid: &UserId,
    ) -> AppResult<Session> {
        let mut favorites_rx = store.subscribe(&StorePath::favorites(uid.as_str())?);
        let mut teams_rx = store.subscribe(&StorePath::teams(uid.as_str())?);

        // Initial deliveries arrive before the session is reported signed in
        if let Some(initial) = favorites_rx.recv().await {
            snapshots.replace_favorites(parse_favorites(initial));
        }
        if let Some(initial) = teams_rx.recv().await {
            snapshots.replace_teams(parse_teams(initial));
        }

        let cancel = CancellationToken::new();
        let favorites_pump = {
            let snapshots = Arc::clone(snapshots);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                pump(&mut favorites_rx, cancel, |value| {
                    snapshots.replace_favorites(parse_favorites(value));
                })
                .await;
            })
        };
        let teams_pump = {
            let snapshots = Arc::clone(snapshots);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                pump(&mut teams_rx, cancel, |value| {
                    snapshots.replace_teams(parse_teams(value));
                })
                .await;
            })
        };

        Ok(Session {
            cancel,
            pumps: vec![favorites_pump, teams_pump],
        })
    }
}

async fn pump(
    rx: &mut SubtreeReceiver,
    cancel: CancellationToken,
    mut apply: impl FnMut(Option<Value>),
) {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            delivery = rx.recv() => match delivery {
                Some(value) => apply(value),
                None => break,
            },
        }
    }
}

/// Decode one favorites subtree delivery. Malformed entries are skipped with
/// a warning instead of poisoning the whole snapshot.
fn parse_favorites(value: Option<Value>) -> HashMap<ItemKey, FavoriteEntry> {
    let Some(Value::Object(map)) = value else {
        return HashMap::new();
    };
    map.into_iter()
        .filter_map(|(key, raw)| match serde_json::from_value(raw) {
            Ok(entry) => Some((ItemKey::from_stored(key), entry)),
            Err(err) => {
                log_warn!("Sync: skipping malformed favorite '{}': {}", key, err);
                None
            }
        })
        .collect()
}

/// Decode one teams subtree delivery, keyed by each team's id
fn parse_teams(value: Option<Value>) -> HashMap<Uuid, Team> {
    let Some(Value::Object(map)) = value else {
        return HashMap::new();
    };
    map.into_iter()
        .filter_map(|(key, raw)| match serde_json::from_value::<Team>(raw) {
            Ok(team) => Some((team.id, team)),
            Err(err) => {
                log_warn!("Sync: skipping malformed team '{}': {}", key, err);
                None
            }
        })
        .collect()
}
