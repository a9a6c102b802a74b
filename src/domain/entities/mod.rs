//! Core domain entities

mod grocery;
mod ingredient;

pub use grocery::GroceryItem;
pub use ingredient::{Ingredient, IngredientDraft, OpenState};
