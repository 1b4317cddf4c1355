pub mod domain;
pub mod memory;

pub use domain::{DocumentStore, StorePath, SubtreeReceiver};
pub use memory::InMemoryDocumentStore;
