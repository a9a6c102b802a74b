//! Clock port - injectable time source
//!
//! Expiry windows, the freezer extension, and ripeness staleness all hinge
//! on "now", so nothing in the domain reads the wall clock directly. Tests
//! pin time with [`FixedClock`].

use chrono::{DateTime, Utc};

/// Abstract time source
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to a fixed instant, for deterministic tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
