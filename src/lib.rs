//! Larder - kitchen inventory and shopping-list tracker
//!
//! Larder keeps the authoritative state of a kitchen: which perishable
//! ingredients are on hand, when they expire, and the shopping-list workflow
//! that turns a bought grocery item into a tracked ingredient. The
//! time-based views (expiring soon, ripeness recheck, low stock) are derived
//! on demand from the same source of truth, never cached.
//!
//! The crate is layered hexagonally:
//!
//! - [`domain`] - entities, value objects, ports, and the pure freshness
//!   derivations
//! - [`application`] - the [`InventoryStore`], the only sanctioned mutation
//!   path
//! - [`infrastructure`] - adapters for the ports: JSON snapshot files,
//!   in-memory snapshots, and the Open Food Facts lookup client

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::inventory::InventoryStore;
pub use config::Config;
pub use domain::entities::{GroceryItem, Ingredient, IngredientDraft, OpenState};
pub use domain::ports::{
    Clock, FixedClock, LookupError, Product, ProductLookup, SnapshotError, SnapshotStore,
    SystemClock,
};
pub use domain::services::freshness::{
    expiring_soon, low_stock, needs_ripeness_check, ExpiringItem, ExpiryDetail,
    DEFAULT_EXPIRING_DAYS,
};
pub use domain::value_objects::{Quantity, Ripeness, RipenessStatus};
pub use error::{LarderError, LarderResult};
pub use infrastructure::lookup::OpenFoodFactsClient;
pub use infrastructure::repositories::{JsonSnapshotStore, MemorySnapshotStore};
