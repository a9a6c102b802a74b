//! Domain services
//!
//! Stateless functions over entity snapshots. Services never mutate and
//! never cache - callers recompute whenever their inputs change.

pub mod freshness;
