//! Application layer
//!
//! The inventory store: the only sanctioned mutation path over the
//! collections the domain services derive their views from.

pub mod inventory;
