//! Domain ports (interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! The infrastructure layer provides the concrete implementations.

pub mod clock;
pub mod product_lookup;
pub mod snapshot_store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use product_lookup::{LookupError, Product, ProductLookup};
pub use snapshot_store::{SnapshotError, SnapshotResult, SnapshotStore};
