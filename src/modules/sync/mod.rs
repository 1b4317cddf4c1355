pub mod coordinator;
pub mod snapshot;

pub use coordinator::{SyncCoordinator, SyncState};
pub use snapshot::SnapshotStore;
