//! GroceryItem entity - a to-buy entry
//!
//! A grocery item lives in exactly one of the inventory store's two lists
//! (active shopping list or recently bought) at any time; the move between
//! them is the store's job, never the item's.

use serde::{Deserialize, Serialize};

/// An entry on the shopping list or the recently-bought list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroceryItem {
    /// Unique identifier, assigned at creation
    pub id: String,
    pub name: String,
}
