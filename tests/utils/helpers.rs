/// Test helper functions and service builders
use frikidex::modules::{
    auth::{AuthProvider, LocalAuthGateway, UserId},
    favorites::FavoritesService,
    storage::{DocumentStore, InMemoryDocumentStore},
    sync::{SnapshotStore, SyncCoordinator, SyncState},
    teams::TeamService,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct TestServices {
    pub auth: Arc<LocalAuthGateway>,
    pub store: Arc<InMemoryDocumentStore>,
    pub favorites: FavoritesService,
    pub teams: TeamService,
    pub sync: SyncCoordinator,
    driver: JoinHandle<()>,
}

impl Drop for TestServices {
    fn drop(&mut self) {
        self.driver.abort();
    }
}

/// Build the favorites/teams/sync stack over an in-memory store and a
/// local auth gateway, with the coordinator's driver task running.
pub fn build_test_services() -> TestServices {
    let auth = Arc::new(LocalAuthGateway::new());
    let store = Arc::new(InMemoryDocumentStore::new());
    let snapshots = Arc::new(SnapshotStore::new());

    let auth_dyn: Arc<dyn AuthProvider> = auth.clone();
    let store_dyn: Arc<dyn DocumentStore> = store.clone();

    let favorites = FavoritesService::new(
        auth_dyn.clone(),
        store_dyn.clone(),
        Arc::clone(&snapshots),
    );
    let teams = TeamService::new(auth_dyn.clone(), store_dyn.clone(), Arc::clone(&snapshots));
    let sync = SyncCoordinator::new(auth_dyn, store_dyn, snapshots);
    let driver = sync.start();

    TestServices {
        auth,
        store,
        favorites,
        teams,
        sync,
        driver,
    }
}

/// Sign in and wait for the coordinator to finish loading the snapshot.
pub async fn sign_in_and_sync(services: &TestServices, uid: &str) {
    services.auth.sign_in(UserId::new(uid));
    let sync = &services.sync;
    wait_until(|| sync.state() == SyncState::SignedIn(UserId::new(uid))).await;
}

/// Poll `condition` until it holds, panicking after one second.
pub async fn wait_until(condition: impl Fn() -> bool) {
    for _ in 0..200 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition not reached within 1s");
}
