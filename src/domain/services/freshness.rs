//! Freshness derivations - the read-only views over the ingredient collection
//!
//! Pure functions of `(ingredients, now)`. The inventory store owns the
//! collection; these functions only answer questions about it:
//! what is expiring soon, which ripeness assessments have gone stale, and
//! what is running low.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::domain::entities::Ingredient;
use crate::domain::value_objects::Quantity;

/// Default look-ahead window for the expiring-soon view, in days.
pub const DEFAULT_EXPIRING_DAYS: i64 = 7;

/// A ripeness assessment older than this many days is stale.
pub const RIPENESS_RECHECK_DAYS: i64 = 3;

/// Days-left at or below which an upcoming expiry counts as urgent.
const URGENT_DAYS: i64 = 3;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Why an ingredient shows up in the expiring-soon view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpiryDetail {
    /// Ripe and ready - needs eating regardless of any date
    Ripe,
    /// Opened packaging - needs eating regardless of any date
    Opened,
    /// The expiry date has passed
    Expired,
    /// Expires in this many days (always positive)
    ExpiresIn(i64),
}

impl ExpiryDetail {
    /// True for items that should be dealt with in the next few days.
    pub fn is_urgent(&self) -> bool {
        matches!(self, ExpiryDetail::ExpiresIn(days) if *days <= URGENT_DAYS)
    }
}

impl fmt::Display for ExpiryDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryDetail::Ripe => write!(f, "Ripe"),
            ExpiryDetail::Opened => write!(f, "Opened"),
            ExpiryDetail::Expired => write!(f, "Expired!"),
            ExpiryDetail::ExpiresIn(days) => write!(f, "Expires in {days} day(s)"),
        }
    }
}

/// An expiring-soon member together with its display detail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiringItem<'a> {
    pub ingredient: &'a Ingredient,
    pub detail: ExpiryDetail,
}

/// Ingredients needing attention within `days_threshold` days of `now`,
/// in collection order.
///
/// Membership is the union of:
/// - frozen items whose expiry falls inside `[now, now + threshold]`
///   (freezing has paused spoilage outside that window, so frozen items
///   with no expiry or an already-passed one stay out);
/// - ripe items and opened items, regardless of any date;
/// - unfrozen items whose expiry is at or before `now + threshold`,
///   including expiries already behind us.
pub fn expiring_soon(
    ingredients: &[Ingredient],
    now: DateTime<Utc>,
    days_threshold: i64,
) -> Vec<ExpiringItem<'_>> {
    let threshold = now + Duration::days(days_threshold);
    ingredients
        .iter()
        .filter(|item| is_expiring(item, now, threshold))
        .map(|item| ExpiringItem {
            ingredient: item,
            detail: expiry_detail(item, now),
        })
        .collect()
}

fn is_expiring(item: &Ingredient, now: DateTime<Utc>, threshold: DateTime<Utc>) -> bool {
    if item.is_frozen
        && item
            .expiration_date
            .is_some_and(|expiry| now <= expiry && expiry <= threshold)
    {
        return true;
    }
    if item.is_ripe() || item.is_open() {
        return true;
    }
    !item.is_frozen && item.expiration_date.is_some_and(|expiry| expiry <= threshold)
}

/// Display reason, first match wins: ripe, then opened, then the date math.
fn expiry_detail(item: &Ingredient, now: DateTime<Utc>) -> ExpiryDetail {
    if item.is_ripe() {
        return ExpiryDetail::Ripe;
    }
    if item.is_open() {
        return ExpiryDetail::Opened;
    }
    let days = item
        .expiration_date
        .map_or(0, |expiry| days_until(expiry, now));
    if days <= 0 {
        ExpiryDetail::Expired
    } else {
        ExpiryDetail::ExpiresIn(days)
    }
}

/// Whole days from `now` until `expiry`, rounded up.
fn days_until(expiry: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    // Equivalent to `i64::div_ceil`, which is still unstable for signed
    // integers. `MILLIS_PER_DAY` is always positive, so rounding toward
    // positive infinity reduces to "bump up when there is a positive
    // remainder".
    let ms = (expiry - now).num_milliseconds();
    let quotient = ms / MILLIS_PER_DAY;
    let remainder = ms % MILLIS_PER_DAY;
    if remainder > 0 {
        quotient + 1
    } else {
        quotient
    }
}

/// Ingredients whose last ripeness assessment is more than
/// [`RIPENESS_RECHECK_DAYS`] days old, in collection order.
///
/// Items without a ripeness record never need a recheck.
pub fn needs_ripeness_check(ingredients: &[Ingredient], now: DateTime<Utc>) -> Vec<&Ingredient> {
    let stale_before = now - Duration::days(RIPENESS_RECHECK_DAYS);
    ingredients
        .iter()
        .filter(|item| {
            item.ripeness
                .is_some_and(|ripeness| ripeness.last_checked < stale_before)
        })
        .collect()
}

/// Ingredients with some stock left but no more than one unit, in
/// collection order. Zero or absent quantity is excluded.
pub fn low_stock(ingredients: &[Ingredient]) -> Vec<&Ingredient> {
    ingredients
        .iter()
        .filter(|item| item.quantity.as_ref().is_some_and(Quantity::is_low))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{IngredientDraft, OpenState};
    use crate::domain::value_objects::RipenessStatus;
    use chrono::TimeZone;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    fn now() -> DateTime<Utc> {
        at(2024, 1, 1)
    }

    fn item(name: &str) -> Ingredient {
        IngredientDraft::new(name).into_ingredient(format!("id-{name}"), now())
    }

    fn expiring(items: &[Ingredient]) -> Vec<(String, ExpiryDetail)> {
        expiring_soon(items, now(), DEFAULT_EXPIRING_DAYS)
            .into_iter()
            .map(|entry| (entry.ingredient.name.clone(), entry.detail))
            .collect()
    }

    #[test]
    fn unfrozen_inside_window_expires_in_days() {
        let mut milk = item("Milk");
        milk.expiration_date = Some(at(2024, 1, 5));

        let result = expiring(&[milk]);
        assert_eq!(
            result,
            vec![("Milk".to_string(), ExpiryDetail::ExpiresIn(4))]
        );
        assert_eq!(result[0].1.to_string(), "Expires in 4 day(s)");
    }

    #[test]
    fn unfrozen_past_expiry_is_included_as_expired() {
        let mut yogurt = item("Yogurt");
        yogurt.expiration_date = Some(at(2023, 12, 20));

        let result = expiring(&[yogurt]);
        assert_eq!(result, vec![("Yogurt".to_string(), ExpiryDetail::Expired)]);
        assert_eq!(result[0].1.to_string(), "Expired!");
    }

    #[test]
    fn unfrozen_beyond_window_is_excluded() {
        let mut cheese = item("Cheese");
        cheese.expiration_date = Some(at(2024, 2, 1));

        assert!(expiring(&[cheese]).is_empty());
    }

    #[test]
    fn expiry_exactly_at_threshold_is_included() {
        let mut eggs = item("Eggs");
        eggs.expiration_date = Some(at(2024, 1, 8));

        let result = expiring(&[eggs]);
        assert_eq!(result, vec![("Eggs".to_string(), ExpiryDetail::ExpiresIn(7))]);
    }

    #[test]
    fn expiry_exactly_now_reads_expired() {
        let mut tofu = item("Tofu");
        tofu.expiration_date = Some(now());

        let result = expiring(&[tofu]);
        assert_eq!(result, vec![("Tofu".to_string(), ExpiryDetail::Expired)]);
    }

    #[test]
    fn no_signals_means_excluded() {
        assert!(expiring(&[item("Salt")]).is_empty());
    }

    #[test]
    fn frozen_inside_window_is_included() {
        let mut peas = item("Peas");
        peas.is_frozen = true;
        peas.expiration_date = Some(at(2024, 1, 6));

        let result = expiring(&[peas]);
        assert_eq!(result, vec![("Peas".to_string(), ExpiryDetail::ExpiresIn(5))]);
    }

    #[test]
    fn frozen_already_expired_is_excluded() {
        let mut peas = item("Peas");
        peas.is_frozen = true;
        peas.expiration_date = Some(at(2023, 12, 20));

        assert!(expiring(&[peas]).is_empty());
    }

    #[test]
    fn frozen_without_expiry_is_excluded() {
        let mut bread = item("Bread");
        bread.is_frozen = true;

        assert!(expiring(&[bread]).is_empty());
    }

    #[test]
    fn frozen_beyond_window_is_excluded() {
        let mut stock = item("Stock");
        stock.is_frozen = true;
        stock.expiration_date = Some(at(2024, 3, 1));

        assert!(expiring(&[stock]).is_empty());
    }

    #[test]
    fn ripe_is_included_regardless_of_dates() {
        let mut avocado = item("Avocado");
        avocado.set_ripeness(RipenessStatus::Ripe, now());

        let result = expiring(&[avocado]);
        assert_eq!(result, vec![("Avocado".to_string(), ExpiryDetail::Ripe)]);
        assert_eq!(result[0].1.to_string(), "Ripe");
    }

    #[test]
    fn frozen_but_ripe_is_still_included() {
        let mut mango = item("Mango");
        mango.is_frozen = true;
        mango.set_ripeness(RipenessStatus::Ripe, now());

        let result = expiring(&[mango]);
        assert_eq!(result, vec![("Mango".to_string(), ExpiryDetail::Ripe)]);
    }

    #[test]
    fn non_ripe_statuses_do_not_qualify() {
        let mut banana = item("Banana");
        banana.set_ripeness(RipenessStatus::Green, now());
        let mut plum = item("Plum");
        plum.set_ripeness(RipenessStatus::TooRipe, now());

        assert!(expiring(&[banana, plum]).is_empty());
    }

    #[test]
    fn opened_is_included_regardless_of_dates() {
        let mut jam = item("Jam");
        jam.mark_opened(now());

        let result = expiring(&[jam]);
        assert_eq!(result, vec![("Jam".to_string(), ExpiryDetail::Opened)]);
        assert_eq!(result[0].1.to_string(), "Opened");
    }

    #[test]
    fn closed_open_record_does_not_qualify() {
        let mut jar = item("Jar");
        jar.open = Some(OpenState::default());

        assert!(expiring(&[jar]).is_empty());
    }

    #[test]
    fn detail_precedence_is_ripe_then_opened_then_date() {
        let mut everything = item("Everything");
        everything.expiration_date = Some(at(2024, 1, 3));
        everything.mark_opened(now());
        everything.set_ripeness(RipenessStatus::Ripe, now());

        let result = expiring(&[everything]);
        assert_eq!(result[0].1, ExpiryDetail::Ripe);

        let mut opened_dated = item("OpenedDated");
        opened_dated.expiration_date = Some(at(2024, 1, 3));
        opened_dated.mark_opened(now());

        let result = expiring(&[opened_dated]);
        assert_eq!(result[0].1, ExpiryDetail::Opened);
    }

    #[test]
    fn urgency_kicks_in_at_three_days() {
        assert!(ExpiryDetail::ExpiresIn(3).is_urgent());
        assert!(ExpiryDetail::ExpiresIn(1).is_urgent());
        assert!(!ExpiryDetail::ExpiresIn(4).is_urgent());
        assert!(!ExpiryDetail::Expired.is_urgent());
        assert!(!ExpiryDetail::Ripe.is_urgent());
    }

    #[test]
    fn partial_days_round_up() {
        let mut soup = item("Soup");
        soup.expiration_date = Some(Utc.with_ymd_and_hms(2024, 1, 2, 6, 0, 0).unwrap());

        let result = expiring(&[soup]);
        assert_eq!(result, vec![("Soup".to_string(), ExpiryDetail::ExpiresIn(2))]);
    }

    #[test]
    fn results_preserve_collection_order() {
        let mut first = item("First");
        first.expiration_date = Some(at(2024, 1, 2));
        let mut second = item("Second");
        second.expiration_date = Some(at(2024, 1, 3));

        let names: Vec<_> = expiring(&[first, second])
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["First", "Second"]);
    }

    #[test]
    fn recheck_needs_strictly_older_than_three_days() {
        let mut stale = item("Pear");
        stale.set_ripeness(
            RipenessStatus::Green,
            Utc.with_ymd_and_hms(2023, 12, 28, 23, 0, 0).unwrap(),
        );
        let mut exactly = item("Kiwi");
        exactly.set_ripeness(RipenessStatus::Green, at(2023, 12, 29));
        let mut fresh = item("Fig");
        fresh.set_ripeness(RipenessStatus::Green, at(2023, 12, 31));
        let unassessed = item("Rice");

        let items = [stale, exactly, fresh, unassessed];
        let names: Vec<_> = needs_ripeness_check(&items, now())
            .into_iter()
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(names, vec!["Pear"]);
    }

    #[test]
    fn low_stock_is_the_half_open_unit_interval() {
        let mut none_left = item("Flour");
        none_left.quantity = Some(Quantity::new(0.0, "kg").unwrap());
        let mut last_one = item("Butter");
        last_one.quantity = Some(Quantity::new(1.0, "items").unwrap());
        let mut half = item("Oil");
        half.quantity = Some(Quantity::new(0.5, "L").unwrap());
        let mut plenty = item("Pasta");
        plenty.quantity = Some(Quantity::new(2.0, "items").unwrap());
        let untracked = item("Honey");

        let items = [none_left, last_one, half, plenty, untracked];
        let names: Vec<_> = low_stock(&items).into_iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Butter", "Oil"]);
    }
}
