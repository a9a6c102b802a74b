//! JSON snapshot repository
//!
//! Implements the SnapshotStore port as one pretty-printed JSON file per
//! collection under a data directory. A missing file loads as the empty
//! collection; every save rewrites the whole file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::entities::{GroceryItem, Ingredient};
use crate::domain::ports::{SnapshotError, SnapshotResult, SnapshotStore};

const INGREDIENTS_FILE: &str = "ingredients.json";
const GROCERY_LIST_FILE: &str = "grocery_list.json";
const RECENTLY_BOUGHT_FILE: &str = "recently_bought.json";

/// File-backed snapshot store
pub struct JsonSnapshotStore {
    dir: PathBuf,
}

impl JsonSnapshotStore {
    /// Snapshots live as `*.json` files directly under `dir`. The directory
    /// is created on first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> SnapshotResult<Vec<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|err| SnapshotError::Malformed(err.to_string()))
    }

    fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> SnapshotResult<()> {
        fs::create_dir_all(&self.dir)?;
        let json = serde_json::to_string_pretty(items)
            .map_err(|err| SnapshotError::Malformed(err.to_string()))?;
        fs::write(self.dir.join(file), json)?;
        Ok(())
    }
}

impl SnapshotStore for JsonSnapshotStore {
    fn load_ingredients(&self) -> SnapshotResult<Vec<Ingredient>> {
        self.load_collection(INGREDIENTS_FILE)
    }

    fn save_ingredients(&self, items: &[Ingredient]) -> SnapshotResult<()> {
        self.save_collection(INGREDIENTS_FILE, items)
    }

    fn load_grocery_list(&self) -> SnapshotResult<Vec<GroceryItem>> {
        self.load_collection(GROCERY_LIST_FILE)
    }

    fn save_grocery_list(&self, items: &[GroceryItem]) -> SnapshotResult<()> {
        self.save_collection(GROCERY_LIST_FILE, items)
    }

    fn load_recently_bought(&self) -> SnapshotResult<Vec<GroceryItem>> {
        self.load_collection(RECENTLY_BOUGHT_FILE)
    }

    fn save_recently_bought(&self, items: &[GroceryItem]) -> SnapshotResult<()> {
        self.save_collection(RECENTLY_BOUGHT_FILE, items)
    }
}
