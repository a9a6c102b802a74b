//! Inventory store - the authoritative owner of the three collections
//!
//! All mutation goes through here; the freshness derivations read
//! `ingredients()` snapshots. Collaborators are injected: a
//! [`SnapshotStore`] for persistence and a [`Clock`] so date-dependent
//! behavior stays testable.
//!
//! Two contracts shape the API:
//!
//! - **Not-found is a silent no-op.** The caller holds the only
//!   authoritative reference to an id, so an id-keyed mutator that misses
//!   simply does nothing; retrying is always safe and nothing escalates.
//! - **In-memory state is the source of truth.** Every mutator updates the
//!   collection first and then rewrites the affected snapshot(s). A failed
//!   write is logged and absorbed; the in-memory state stays authoritative
//!   for the rest of the session and only durability is lost.
//!
//! The store requires `&mut self` for every mutator, which makes it its own
//! serialization point: no reader can observe a move half-done.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{GroceryItem, Ingredient, IngredientDraft};
use crate::domain::ports::snapshot_store::SnapshotResult;
use crate::domain::ports::{Clock, SnapshotStore};

/// Authoritative state of the kitchen: ingredients, the shopping list, and
/// recently bought items
pub struct InventoryStore<S, C> {
    snapshots: S,
    clock: C,
    ingredients: Vec<Ingredient>,
    grocery_list: Vec<GroceryItem>,
    recently_bought: Vec<GroceryItem>,
    loaded: bool,
}

impl<S: SnapshotStore, C: Clock> InventoryStore<S, C> {
    /// Create an empty, not-yet-loaded store.
    ///
    /// Saves are suppressed until [`load`](Self::load) completes, so a
    /// half-initialized store can never clobber persisted snapshots.
    pub fn new(snapshots: S, clock: C) -> Self {
        Self {
            snapshots,
            clock,
            ingredients: Vec::new(),
            grocery_list: Vec::new(),
            recently_bought: Vec::new(),
            loaded: false,
        }
    }

    /// Create a store and immediately load all three collections.
    pub fn open(snapshots: S, clock: C) -> Self {
        let mut store = Self::new(snapshots, clock);
        store.load();
        store
    }

    /// Load all three collections from the snapshot store.
    ///
    /// A collection whose snapshot fails to load starts empty; the failure
    /// is logged and the store proceeds without that collection's history.
    pub fn load(&mut self) {
        self.ingredients = recover(self.snapshots.load_ingredients(), "ingredients");
        self.grocery_list = recover(self.snapshots.load_grocery_list(), "grocery_list");
        self.recently_bought = recover(self.snapshots.load_recently_bought(), "recently_bought");
        self.loaded = true;
    }

    /// True once the initial load of all three collections has completed.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// All tracked ingredients, in insertion order.
    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// The active shopping list, in insertion order.
    pub fn grocery_list(&self) -> &[GroceryItem] {
        &self.grocery_list
    }

    /// Items bought but not yet turned into tracked ingredients.
    pub fn recently_bought(&self) -> &[GroceryItem] {
        &self.recently_bought
    }

    pub fn find_ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|item| item.id == id)
    }

    pub fn find_recently_bought(&self, id: &str) -> Option<&GroceryItem> {
        self.recently_bought.iter().find(|item| item.id == id)
    }

    /// The injected snapshot store.
    pub fn snapshots(&self) -> &S {
        &self.snapshots
    }

    /// Track a new ingredient.
    ///
    /// Assigns a fresh unique id, stamps `added_on` from the clock, and
    /// appends. Returns the stored record so the caller learns the id.
    pub fn add_ingredient(&mut self, draft: IngredientDraft) -> Ingredient {
        let ingredient = draft.into_ingredient(fresh_id(), self.clock.now());
        debug!(id = %ingredient.id, name = %ingredient.name, "adding ingredient");
        self.ingredients.push(ingredient.clone());
        self.persist_ingredients();
        ingredient
    }

    /// Replace the ingredient whose id matches `updated.id` with the full
    /// new record. Silent no-op when no such ingredient exists.
    pub fn update_ingredient(&mut self, updated: Ingredient) {
        match self.ingredients.iter().position(|item| item.id == updated.id) {
            Some(index) => {
                self.ingredients[index] = updated;
                self.persist_ingredients();
            }
            None => debug!(id = %updated.id, "update for unknown ingredient ignored"),
        }
    }

    /// Quick-add an item to the shopping list.
    ///
    /// An active item with the same name (case-insensitive) already present
    /// means the add is silently rejected - not merged.
    pub fn add_to_grocery_list(&mut self, name: &str) {
        let needle = name.to_lowercase();
        if self
            .grocery_list
            .iter()
            .any(|item| item.name.to_lowercase() == needle)
        {
            debug!(name, "duplicate grocery item ignored");
            return;
        }
        self.grocery_list.push(GroceryItem {
            id: fresh_id(),
            name: name.to_string(),
        });
        self.persist_grocery_list();
    }

    /// Move an active shopping-list item to recently-bought.
    ///
    /// The move is atomic with respect to any reader: the item is never
    /// absent from both lists or present in both. Silent no-op when the id
    /// is not on the active list.
    pub fn buy_from_grocery_list(&mut self, item_id: &str) {
        let Some(index) = self.grocery_list.iter().position(|item| item.id == item_id) else {
            debug!(id = item_id, "buy for unknown grocery item ignored");
            return;
        };
        let item = self.grocery_list.remove(index);
        self.recently_bought.push(item);
        self.persist_grocery_list();
        self.persist_recently_bought();
    }

    /// Turn a bought grocery item into a tracked ingredient.
    ///
    /// Composes [`add_ingredient`](Self::add_ingredient) with removal of the
    /// source item from recently-bought; both effects land in the same
    /// observable step. The ingredient is added even when the source item is
    /// no longer on the recently-bought list (a retry after a partial
    /// earlier call must not lose the purchase).
    pub fn add_ingredient_from_bought(
        &mut self,
        source: &GroceryItem,
        draft: IngredientDraft,
    ) -> Ingredient {
        let ingredient = self.add_ingredient(draft);
        if let Some(index) = self
            .recently_bought
            .iter()
            .position(|item| item.id == source.id)
        {
            self.recently_bought.remove(index);
            self.persist_recently_bought();
        }
        ingredient
    }

    fn persist_ingredients(&self) {
        if !self.loaded {
            return;
        }
        log_write_failure(
            self.snapshots.save_ingredients(&self.ingredients),
            "ingredients",
        );
    }

    fn persist_grocery_list(&self) {
        if !self.loaded {
            return;
        }
        log_write_failure(
            self.snapshots.save_grocery_list(&self.grocery_list),
            "grocery_list",
        );
    }

    fn persist_recently_bought(&self) {
        if !self.loaded {
            return;
        }
        log_write_failure(
            self.snapshots.save_recently_bought(&self.recently_bought),
            "recently_bought",
        );
    }
}

fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

fn recover<T>(result: SnapshotResult<Vec<T>>, collection: &str) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(err) => {
            warn!(collection, %err, "snapshot load failed; starting empty");
            Vec::new()
        }
    }
}

fn log_write_failure(result: SnapshotResult<()>, collection: &str) {
    if let Err(err) = result {
        warn!(
            collection,
            %err,
            "snapshot write failed; in-memory state remains authoritative"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::OpenState;
    use crate::domain::ports::snapshot_store::SnapshotError;
    use crate::domain::ports::FixedClock;
    use crate::infrastructure::repositories::MemorySnapshotStore;
    use chrono::{DateTime, TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap())
    }

    fn store() -> InventoryStore<MemorySnapshotStore, FixedClock> {
        InventoryStore::open(MemorySnapshotStore::new(), clock())
    }

    fn stranger(id: &str, added_on: DateTime<Utc>) -> Ingredient {
        Ingredient {
            id: id.to_string(),
            name: "Stranger".to_string(),
            brand: None,
            category: None,
            location: None,
            confection_type: None,
            added_on,
            expiration_date: None,
            is_frozen: false,
            open: None,
            ripeness: None,
            quantity: None,
        }
    }

    #[test]
    fn add_ingredient_assigns_distinct_ids_and_stamps_added_on() {
        let mut store = store();
        let a = store.add_ingredient(IngredientDraft::new("Milk"));
        let b = store.add_ingredient(IngredientDraft::new("Milk"));

        assert_ne!(a.id, b.id);
        assert_eq!(a.added_on, clock().0);
        assert_eq!(store.ingredients().len(), 2);
    }

    #[test]
    fn add_ingredient_preserves_insertion_order() {
        let mut store = store();
        store.add_ingredient(IngredientDraft::new("First"));
        store.add_ingredient(IngredientDraft::new("Second"));
        store.add_ingredient(IngredientDraft::new("Third"));

        let names: Vec<_> = store.ingredients().iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn update_ingredient_replaces_the_full_record() {
        let mut store = store();
        let added = store.add_ingredient(IngredientDraft::new("Milk"));

        let mut updated = added.clone();
        updated.name = "Whole Milk".to_string();
        updated.open = Some(OpenState {
            status: true,
            opened_on: Some(clock().0),
        });
        store.update_ingredient(updated.clone());

        assert_eq!(store.ingredients(), &[updated]);
    }

    #[test]
    fn update_with_unknown_id_changes_nothing() {
        let mut store = store();
        store.add_ingredient(IngredientDraft::new("Milk"));
        store.add_to_grocery_list("Bread");

        let before_ingredients = store.ingredients().to_vec();
        let before_grocery = store.grocery_list().to_vec();
        let before_bought = store.recently_bought().to_vec();

        store.update_ingredient(stranger("no-such-id", clock().0));

        assert_eq!(store.ingredients(), &before_ingredients[..]);
        assert_eq!(store.grocery_list(), &before_grocery[..]);
        assert_eq!(store.recently_bought(), &before_bought[..]);
    }

    #[test]
    fn duplicate_quick_add_is_rejected_case_insensitively() {
        let mut store = store();
        store.add_to_grocery_list("Milk");
        store.add_to_grocery_list("milk");
        store.add_to_grocery_list("MILK");

        assert_eq!(store.grocery_list().len(), 1);
        assert_eq!(store.grocery_list()[0].name, "Milk");
    }

    #[test]
    fn buy_moves_the_item_to_exactly_one_list() {
        let mut store = store();
        store.add_to_grocery_list("Milk");
        store.add_to_grocery_list("Bread");
        let milk_id = store.grocery_list()[0].id.clone();

        store.buy_from_grocery_list(&milk_id);

        assert!(store.grocery_list().iter().all(|i| i.id != milk_id));
        assert_eq!(store.recently_bought().len(), 1);
        assert_eq!(store.recently_bought()[0].id, milk_id);
        assert_eq!(store.grocery_list().len(), 1);
    }

    #[test]
    fn buy_with_unknown_id_changes_nothing() {
        let mut store = store();
        store.add_to_grocery_list("Milk");
        let before = store.grocery_list().to_vec();

        store.buy_from_grocery_list("no-such-id");

        assert_eq!(store.grocery_list(), &before[..]);
        assert!(store.recently_bought().is_empty());
    }

    #[test]
    fn buying_twice_is_idempotent() {
        let mut store = store();
        store.add_to_grocery_list("Milk");
        let id = store.grocery_list()[0].id.clone();

        store.buy_from_grocery_list(&id);
        store.buy_from_grocery_list(&id);

        assert!(store.grocery_list().is_empty());
        assert_eq!(store.recently_bought().len(), 1);
    }

    #[test]
    fn stocking_a_bought_item_adds_and_removes_together() {
        let mut store = store();
        store.add_to_grocery_list("Milk");
        let id = store.grocery_list()[0].id.clone();
        store.buy_from_grocery_list(&id);
        let source = store.find_recently_bought(&id).cloned().unwrap();

        let ingredient =
            store.add_ingredient_from_bought(&source, IngredientDraft::new("Milk").with_brand("Acme"));

        assert!(store.find_recently_bought(&id).is_none());
        assert_eq!(store.ingredients().len(), 1);
        assert_eq!(store.ingredients()[0].id, ingredient.id);
        assert_eq!(store.ingredients()[0].brand.as_deref(), Some("Acme"));
    }

    #[test]
    fn stocking_with_a_gone_source_still_adds_the_ingredient() {
        let mut store = store();
        let ghost = GroceryItem {
            id: "gone".to_string(),
            name: "Milk".to_string(),
        };

        store.add_ingredient_from_bought(&ghost, IngredientDraft::new("Milk"));

        assert_eq!(store.ingredients().len(), 1);
        assert!(store.recently_bought().is_empty());
    }

    #[test]
    fn mutations_persist_through_the_snapshot_store() {
        let mut store = store();
        store.add_ingredient(IngredientDraft::new("Milk"));
        store.add_to_grocery_list("Bread");

        assert_eq!(store.snapshots().load_ingredients().unwrap().len(), 1);
        assert_eq!(store.snapshots().load_grocery_list().unwrap().len(), 1);
    }

    #[test]
    fn saves_are_suppressed_until_loaded() {
        let mut store = InventoryStore::new(MemorySnapshotStore::new(), clock());
        store.add_ingredient(IngredientDraft::new("Milk"));

        assert!(!store.is_loaded());
        assert!(store.snapshots().load_ingredients().unwrap().is_empty());
    }

    #[test]
    fn load_restores_persisted_collections() {
        let mut first = InventoryStore::open(MemorySnapshotStore::new(), clock());
        first.add_ingredient(IngredientDraft::new("Milk"));
        first.add_to_grocery_list("Bread");

        let reopened = InventoryStore::open(
            MemorySnapshotStore::new()
                .seed_ingredients(first.snapshots().load_ingredients().unwrap())
                .seed_grocery_list(first.snapshots().load_grocery_list().unwrap()),
            clock(),
        );

        assert!(reopened.is_loaded());
        assert_eq!(reopened.ingredients(), first.ingredients());
        assert_eq!(reopened.grocery_list(), first.grocery_list());
    }

    struct FailingStore;

    impl SnapshotStore for FailingStore {
        fn load_ingredients(&self) -> SnapshotResult<Vec<Ingredient>> {
            Err(SnapshotError::Malformed("broken".to_string()))
        }
        fn save_ingredients(&self, _items: &[Ingredient]) -> SnapshotResult<()> {
            Err(SnapshotError::Malformed("broken".to_string()))
        }
        fn load_grocery_list(&self) -> SnapshotResult<Vec<GroceryItem>> {
            Ok(vec![GroceryItem {
                id: "seeded".to_string(),
                name: "Bread".to_string(),
            }])
        }
        fn save_grocery_list(&self, _items: &[GroceryItem]) -> SnapshotResult<()> {
            Err(SnapshotError::Malformed("broken".to_string()))
        }
        fn load_recently_bought(&self) -> SnapshotResult<Vec<GroceryItem>> {
            Ok(Vec::new())
        }
        fn save_recently_bought(&self, _items: &[GroceryItem]) -> SnapshotResult<()> {
            Err(SnapshotError::Malformed("broken".to_string()))
        }
    }

    #[test]
    fn failed_load_recovers_empty_and_proceeds() {
        let store = InventoryStore::open(FailingStore, clock());

        assert!(store.is_loaded());
        assert!(store.ingredients().is_empty());
        // Collections that loaded fine are unaffected by the broken one.
        assert_eq!(store.grocery_list().len(), 1);
    }

    #[test]
    fn failed_save_leaves_memory_authoritative() {
        let mut store = InventoryStore::open(FailingStore, clock());
        let added = store.add_ingredient(IngredientDraft::new("Milk"));

        assert_eq!(store.ingredients().len(), 1);
        assert_eq!(store.find_ingredient(&added.id).unwrap().name, "Milk");
    }
}
