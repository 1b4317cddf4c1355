pub mod modules;
pub mod shared;

use std::sync::Arc;

use modules::{
    auth::AuthProvider,
    catalog::CatalogService,
    favorites::FavoritesService,
    storage::DocumentStore,
    sync::{SnapshotStore, SyncCoordinator},
    teams::TeamService,
};
use shared::utils::logger::init_logger;

pub use modules::auth::{LocalAuthGateway, UserId};
pub use modules::catalog::{CatalogItem, CatalogProvider, Category, CategoryKind};
pub use modules::favorites::FavoriteEntry;
pub use modules::identity::ItemKey;
pub use modules::rules::MembershipRules;
pub use modules::storage::InMemoryDocumentStore;
pub use modules::sync::SyncState;
pub use modules::teams::{Team, TeamMember, TEAM_CAPACITY};
pub use shared::config::AppConfig;
pub use shared::domain::{ToggleAction, ToggleOutcome};
pub use shared::errors::AppError;

/// Fully wired application: catalog fetching, favorites, teams and the
/// sync coordinator, all sharing one snapshot store.
pub struct App {
    pub catalog: CatalogService,
    pub favorites: FavoritesService,
    pub teams: TeamService,
    pub sync: SyncCoordinator,
}

impl App {
    /// Wire the services over concrete auth and storage backends.
    pub fn new(
        config: &AppConfig,
        auth: Arc<dyn AuthProvider>,
        store: Arc<dyn DocumentStore>,
    ) -> Self {
        let snapshots = Arc::new(SnapshotStore::new());

        Self {
            catalog: CatalogService::from_config(config),
            favorites: FavoritesService::new(
                Arc::clone(&auth),
                Arc::clone(&store),
                Arc::clone(&snapshots),
            ),
            teams: TeamService::new(
                Arc::clone(&auth),
                Arc::clone(&store),
                Arc::clone(&snapshots),
            ),
            sync: SyncCoordinator::new(auth, store, snapshots),
        }
    }

    /// Convenience bootstrap: env config, local auth and an in-memory store.
    pub fn bootstrap() -> (Self, Arc<LocalAuthGateway>) {
        init_logger();
        let config = AppConfig::from_env();
        let auth = Arc::new(LocalAuthGateway::new());
        let store = Arc::new(InMemoryDocumentStore::new());
        let app = Self::new(&config, Arc::clone(&auth) as Arc<dyn AuthProvider>, store);
        (app, auth)
    }
}
