//! Command handlers for the Larder CLI
//!
//! Handlers call the inventory store and the freshness derivations; output
//! formatting lives here and business logic does not. Caller-side contracts
//! (non-empty names, date formats) are enforced at this boundary before
//! anything reaches the store.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

use larder::{
    expiring_soon, low_stock as low_stock_view, needs_ripeness_check, GroceryItem, IngredientDraft,
    InventoryStore, JsonSnapshotStore, OpenState, ProductLookup, Quantity, RipenessStatus,
    SystemClock,
};

use crate::{AddArgs, DraftArgs, EditArgs, GroceryCommands};

pub type Store = InventoryStore<JsonSnapshotStore, SystemClock>;

pub fn add(store: &mut Store, args: AddArgs, now: DateTime<Utc>) -> Result<()> {
    let draft = build_draft(args.name, &args.draft, now)?;
    let ingredient = store.add_ingredient(draft);
    println!("Added {} ({})", ingredient.name, ingredient.id);
    Ok(())
}

pub fn list(store: &Store) {
    if store.ingredients().is_empty() {
        println!("Your kitchen is empty.");
        return;
    }
    for item in store.ingredients() {
        let brand = item.brand.as_deref().unwrap_or("-");
        let quantity = item
            .quantity
            .as_ref()
            .map_or_else(|| "-".to_string(), Quantity::to_string);
        println!("{}  {:<24} {:<16} {}", item.id, item.name, brand, quantity);
    }
}

#[derive(Serialize)]
struct ExpiringRow<'a> {
    id: &'a str,
    name: &'a str,
    detail: String,
    urgent: bool,
}

pub fn expiring(store: &Store, now: DateTime<Utc>, days: i64, json: bool) -> Result<()> {
    let entries = expiring_soon(store.ingredients(), now, days);

    if json {
        let rows: Vec<ExpiringRow<'_>> = entries
            .iter()
            .map(|entry| ExpiringRow {
                id: &entry.ingredient.id,
                name: &entry.ingredient.name,
                detail: entry.detail.to_string(),
                urgent: entry.detail.is_urgent(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Expiring in next {days} days");
    if entries.is_empty() {
        println!("  Nothing is expiring soon.");
        return Ok(());
    }
    for entry in entries {
        let marker = if entry.detail.is_urgent() {
            "  [urgent]"
        } else {
            ""
        };
        println!("  {:<24} {}{}", entry.ingredient.name, entry.detail, marker);
    }
    Ok(())
}

#[derive(Serialize)]
struct RecheckRow<'a> {
    id: &'a str,
    name: &'a str,
    status: String,
    last_checked: DateTime<Utc>,
}

pub fn recheck(store: &Store, now: DateTime<Utc>, json: bool) -> Result<()> {
    let items = needs_ripeness_check(store.ingredients(), now);

    if json {
        let rows: Vec<RecheckRow<'_>> = items
            .iter()
            .filter_map(|item| {
                item.ripeness.map(|ripeness| RecheckRow {
                    id: &item.id,
                    name: &item.name,
                    status: ripeness.status.to_string(),
                    last_checked: ripeness.last_checked,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Ripeness check needed");
    if items.is_empty() {
        println!("  All items are up to date.");
        return Ok(());
    }
    for item in items {
        if let Some(ripeness) = item.ripeness {
            println!(
                "  {:<24} {} (last checked {})",
                item.name,
                ripeness.status,
                ripeness.last_checked.format("%Y-%m-%d")
            );
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct LowStockRow<'a> {
    id: &'a str,
    name: &'a str,
    value: f64,
    unit: &'a str,
}

pub fn low_stock(store: &Store, json: bool) -> Result<()> {
    let items = low_stock_view(store.ingredients());

    if json {
        let rows: Vec<LowStockRow<'_>> = items
            .iter()
            .filter_map(|item| {
                item.quantity.as_ref().map(|quantity| LowStockRow {
                    id: &item.id,
                    name: &item.name,
                    value: quantity.value,
                    unit: &quantity.unit,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!("Low stock items");
    if items.is_empty() {
        println!("  No items are low on stock.");
        return Ok(());
    }
    for item in items {
        if let Some(quantity) = &item.quantity {
            println!("  {:<24} {}", item.name, quantity);
        }
    }
    Ok(())
}

pub fn edit(store: &mut Store, args: EditArgs, now: DateTime<Utc>) -> Result<()> {
    let Some(original) = store.find_ingredient(&args.id) else {
        bail!("no ingredient with id {}", args.id);
    };
    let mut updated = original.clone();

    if let Some(name) = args.name {
        let name = name.trim().to_string();
        if name.is_empty() {
            bail!("ingredient name is required");
        }
        updated.name = name;
    }
    if let Some(brand) = args.brand {
        updated.brand = Some(brand);
    }
    if let Some(category) = args.category {
        updated.category = Some(category);
    }
    if let Some(location) = args.location {
        updated.location = Some(location);
    }
    if let Some(confection) = args.confection {
        updated.confection_type = Some(confection);
    }
    if let Some(expires) = &args.expires {
        updated.expiration_date = Some(parse_date(expires)?);
    }

    match (args.quantity, args.unit) {
        (Some(value), unit) => {
            let unit = unit
                .or_else(|| updated.quantity.as_ref().map(|q| q.unit.clone()))
                .unwrap_or_else(|| "items".to_string());
            updated.quantity = Some(Quantity::new(value, unit)?);
        }
        (None, Some(unit)) => match updated.quantity.as_mut() {
            Some(quantity) => quantity.unit = unit,
            None => bail!("--unit requires --quantity when no quantity is tracked yet"),
        },
        (None, None) => {}
    }

    if let Some(status) = &args.ripeness {
        updated.set_ripeness(status.parse::<RipenessStatus>()?, now);
    }
    if args.open {
        updated.mark_opened(now);
    }
    if args.freeze {
        updated.freeze(now);
    }
    if args.unfreeze {
        updated.unfreeze();
    }

    store.update_ingredient(updated);
    println!("Updated {}", args.id);
    Ok(())
}

pub fn grocery(store: &mut Store, command: GroceryCommands, now: DateTime<Utc>) -> Result<()> {
    match command {
        GroceryCommands::Add { name } => grocery_add(store, &name),
        GroceryCommands::List => {
            grocery_list(store);
            Ok(())
        }
        GroceryCommands::Buy { id } => grocery_buy(store, &id),
        GroceryCommands::Stock { id, name, draft } => grocery_stock(store, &id, name, &draft, now),
    }
}

fn grocery_add(store: &mut Store, name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("item name is required");
    }
    let before = store.grocery_list().len();
    store.add_to_grocery_list(name);
    if store.grocery_list().len() == before {
        println!("{name} is already on the list.");
    } else {
        println!("Added {name} to the shopping list.");
    }
    Ok(())
}

fn grocery_list(store: &Store) {
    println!("Shopping list");
    print_grocery_items(store.grocery_list(), "The shopping list is empty.");
    println!("Recently bought");
    print_grocery_items(store.recently_bought(), "No recently bought items.");
}

fn print_grocery_items(items: &[GroceryItem], empty_message: &str) {
    if items.is_empty() {
        println!("  {empty_message}");
        return;
    }
    for item in items {
        println!("  {}  {}", item.id, item.name);
    }
}

fn grocery_buy(store: &mut Store, id: &str) -> Result<()> {
    if store.grocery_list().iter().all(|item| item.id != id) {
        bail!("no shopping-list item with id {id}");
    }
    store.buy_from_grocery_list(id);
    println!("Bought.");
    Ok(())
}

fn grocery_stock(
    store: &mut Store,
    id: &str,
    name: Option<String>,
    draft_args: &DraftArgs,
    now: DateTime<Utc>,
) -> Result<()> {
    let Some(source) = store.find_recently_bought(id).cloned() else {
        bail!("no recently bought item with id {id}");
    };
    let name = name.unwrap_or_else(|| source.name.clone());
    let draft = build_draft(name, draft_args, now)?;
    let ingredient = store.add_ingredient_from_bought(&source, draft);
    println!("Stocked {} ({})", ingredient.name, ingredient.id);
    Ok(())
}

pub fn scan(
    store: &mut Store,
    lookup: &impl ProductLookup,
    barcode: &str,
    name: Option<String>,
    draft_args: &DraftArgs,
    now: DateTime<Utc>,
) -> Result<()> {
    let product = lookup
        .lookup(barcode)?
        .with_context(|| format!("no product found for barcode {barcode}"))?;

    let name = name
        .or(product.name)
        .context("the product has no name on record; pass --name")?;
    let mut draft = build_draft(name, draft_args, now)?;
    if draft.brand.is_none() {
        draft.brand = product.brand;
    }

    let ingredient = store.add_ingredient(draft);
    println!("Added {} ({})", ingredient.name, ingredient.id);
    Ok(())
}

/// Build an `IngredientDraft` from CLI flags, enforcing the caller-side
/// contracts the store itself does not re-check.
fn build_draft(name: String, args: &DraftArgs, now: DateTime<Utc>) -> Result<IngredientDraft> {
    let name = name.trim().to_string();
    if name.is_empty() {
        bail!("ingredient name is required");
    }

    let mut draft = IngredientDraft::new(name);
    draft.brand = args.brand.clone();
    draft.category = args.category.clone();
    draft.location = args.location.clone();
    draft.confection_type = args.confection.clone();
    if let Some(expires) = &args.expires {
        draft.expiration_date = Some(parse_date(expires)?);
    }
    if let Some(value) = args.quantity {
        draft.quantity = Some(Quantity::new(value, args.unit.clone())?);
    }
    draft.is_frozen = args.frozen;
    if args.opened {
        draft.open = Some(OpenState {
            status: true,
            opened_on: Some(now),
        });
    }
    Ok(draft)
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("invalid date '{s}', expected YYYY-MM-DD"))?;
    Ok(date.and_time(NaiveTime::MIN).and_utc())
}
