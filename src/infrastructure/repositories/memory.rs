//! In-memory snapshot store
//!
//! A non-persistent SnapshotStore for tests and embedding. Single-threaded,
//! like the store that owns it.

use std::cell::RefCell;

use crate::domain::entities::{GroceryItem, Ingredient};
use crate::domain::ports::{SnapshotResult, SnapshotStore};

/// SnapshotStore that keeps the serialized state in memory
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    ingredients: RefCell<Vec<Ingredient>>,
    grocery_list: RefCell<Vec<GroceryItem>>,
    recently_bought: RefCell<Vec<GroceryItem>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-seed the persisted ingredient snapshot.
    pub fn seed_ingredients(self, items: Vec<Ingredient>) -> Self {
        *self.ingredients.borrow_mut() = items;
        self
    }

    /// Builder: pre-seed the persisted grocery-list snapshot.
    pub fn seed_grocery_list(self, items: Vec<GroceryItem>) -> Self {
        *self.grocery_list.borrow_mut() = items;
        self
    }

    /// Builder: pre-seed the persisted recently-bought snapshot.
    pub fn seed_recently_bought(self, items: Vec<GroceryItem>) -> Self {
        *self.recently_bought.borrow_mut() = items;
        self
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn load_ingredients(&self) -> SnapshotResult<Vec<Ingredient>> {
        Ok(self.ingredients.borrow().clone())
    }

    fn save_ingredients(&self, items: &[Ingredient]) -> SnapshotResult<()> {
        *self.ingredients.borrow_mut() = items.to_vec();
        Ok(())
    }

    fn load_grocery_list(&self) -> SnapshotResult<Vec<GroceryItem>> {
        Ok(self.grocery_list.borrow().clone())
    }

    fn save_grocery_list(&self, items: &[GroceryItem]) -> SnapshotResult<()> {
        *self.grocery_list.borrow_mut() = items.to_vec();
        Ok(())
    }

    fn load_recently_bought(&self) -> SnapshotResult<Vec<GroceryItem>> {
        Ok(self.recently_bought.borrow().clone())
    }

    fn save_recently_bought(&self, items: &[GroceryItem]) -> SnapshotResult<()> {
        *self.recently_bought.borrow_mut() = items.to_vec();
        Ok(())
    }
}
