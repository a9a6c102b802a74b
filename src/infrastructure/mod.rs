//! Infrastructure layer
//!
//! Concrete adapters for the domain ports.

pub mod lookup;
pub mod repositories;
