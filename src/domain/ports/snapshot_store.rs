//! SnapshotStore port - abstraction for collection persistence
//!
//! Each of the inventory store's three collections persists as an
//! independent serialized snapshot, rewritten in full on every mutation to
//! it (no deltas). This trait keeps the store ignorant of where and how
//! those snapshots live.

use thiserror::Error;

use crate::domain::entities::{GroceryItem, Ingredient};

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Snapshot persistence errors
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// I/O failure reading or writing a snapshot
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot exists but does not parse
    #[error("malformed snapshot: {0}")]
    Malformed(String),
}

/// Abstract persistence for the three inventory collections
///
/// Loads happen once at startup. A missing snapshot is not an error - it
/// loads as the empty collection.
pub trait SnapshotStore {
    fn load_ingredients(&self) -> SnapshotResult<Vec<Ingredient>>;
    fn save_ingredients(&self, items: &[Ingredient]) -> SnapshotResult<()>;

    fn load_grocery_list(&self) -> SnapshotResult<Vec<GroceryItem>>;
    fn save_grocery_list(&self, items: &[GroceryItem]) -> SnapshotResult<()>;

    fn load_recently_bought(&self) -> SnapshotResult<Vec<GroceryItem>>;
    fn save_recently_bought(&self, items: &[GroceryItem]) -> SnapshotResult<()>;
}
