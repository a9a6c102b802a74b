//! Ingredient entity - a perishable item tracked in the kitchen
//!
//! Ingredients are owned exclusively by the inventory store; everything else
//! reads them through it. The state transitions with bookkeeping invariants
//! (freezing, opening, ripeness checks) live here as methods so callers
//! cannot get the stamps wrong.
//!
//! Serialized field names are camelCase to match the snapshot layout
//! (`addedOn`, `expirationDate`, `isFrozen`, ...).

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{Quantity, Ripeness, RipenessStatus};

/// How far out freezing is assumed to pause spoilage.
const FREEZER_EXTENSION_MONTHS: u32 = 6;

/// Open/unopened state of a packaged ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OpenState {
    pub status: bool,
    /// Set the instant `status` first flips to true, never reset afterwards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opened_on: Option<DateTime<Utc>>,
}

/// A tracked perishable kitchen item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    /// Unique identifier, assigned at creation and never reassigned
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confection_type: Option<String>,
    /// Creation timestamp, immutable after creation
    pub added_on: DateTime<Utc>,
    /// Absent means "no known expiry"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_frozen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open: Option<OpenState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ripeness: Option<Ripeness>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
}

impl Ingredient {
    /// Freeze the ingredient.
    ///
    /// Freezing pauses spoilage: when the expiration date is absent or closer
    /// than six months out, it is pushed to `now + 6 months`. A longer expiry
    /// is left alone, and freezing an already-frozen item never re-extends.
    pub fn freeze(&mut self, now: DateTime<Utc>) {
        if self.is_frozen {
            return;
        }
        self.is_frozen = true;
        if let Some(extended) = now.checked_add_months(Months::new(FREEZER_EXTENSION_MONTHS)) {
            match self.expiration_date {
                Some(current) if current >= extended => {}
                _ => self.expiration_date = Some(extended),
            }
        }
    }

    /// Thaw the ingredient. Has no expiry side effect.
    pub fn unfreeze(&mut self) {
        self.is_frozen = false;
    }

    /// Mark the ingredient opened.
    ///
    /// `opened_on` is stamped on the first false→true transition only and is
    /// never reset, even if the item is closed and opened again.
    pub fn mark_opened(&mut self, now: DateTime<Utc>) {
        let open = self.open.get_or_insert_with(OpenState::default);
        open.status = true;
        if open.opened_on.is_none() {
            open.opened_on = Some(now);
        }
    }

    /// Record a ripeness assessment, stamping `last_checked`.
    pub fn set_ripeness(&mut self, status: RipenessStatus, now: DateTime<Utc>) {
        self.ripeness = Some(Ripeness {
            status,
            last_checked: now,
        });
    }

    pub fn is_open(&self) -> bool {
        self.open.is_some_and(|open| open.status)
    }

    pub fn is_ripe(&self) -> bool {
        self.ripeness
            .is_some_and(|ripeness| ripeness.status == RipenessStatus::Ripe)
    }
}

/// The caller-supplied shape of an ingredient: everything except the fields
/// the inventory store assigns (`id` and `added_on`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IngredientDraft {
    pub name: String,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub confection_type: Option<String>,
    pub expiration_date: Option<DateTime<Utc>>,
    pub is_frozen: bool,
    pub open: Option<OpenState>,
    pub ripeness: Option<Ripeness>,
    pub quantity: Option<Quantity>,
}

impl IngredientDraft {
    /// Create a draft with just a name.
    ///
    /// Name emptiness is the caller's contract - the draft does not reject
    /// it, the store does not re-check it, and the CLI enforces it at its
    /// own boundary.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Builder: set the brand
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Builder: set the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Builder: set the storage location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder: set the confection type
    pub fn with_confection_type(mut self, confection_type: impl Into<String>) -> Self {
        self.confection_type = Some(confection_type.into());
        self
    }

    /// Builder: set the expiration date
    pub fn with_expiration_date(mut self, expiration_date: DateTime<Utc>) -> Self {
        self.expiration_date = Some(expiration_date);
        self
    }

    /// Builder: set the quantity
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Materialize the draft with the store-assigned identity fields.
    pub(crate) fn into_ingredient(self, id: String, added_on: DateTime<Utc>) -> Ingredient {
        Ingredient {
            id,
            name: self.name,
            brand: self.brand,
            category: self.category,
            location: self.location,
            confection_type: self.confection_type,
            added_on,
            expiration_date: self.expiration_date,
            is_frozen: self.is_frozen,
            open: self.open,
            ripeness: self.ripeness,
            quantity: self.quantity,
        }
    }
}
