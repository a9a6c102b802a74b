//! SnapshotStore adapters

mod json_snapshot;
mod memory;

pub use json_snapshot::JsonSnapshotStore;
pub use memory::MemorySnapshotStore;
