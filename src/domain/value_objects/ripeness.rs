//! Ripeness value object - how far along a ripening item is
//!
//! Statuses read the way a person would jot them on a fridge note. The
//! `last_checked` stamp feeds the recheck-needed derivation: an assessment
//! goes stale after a few days.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LarderError;

/// Ripening stage of an ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RipenessStatus {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "green")]
    Green,
    /// Ready to eat - surfaces the item in the expiring-soon view
    #[serde(rename = "ripe/mature")]
    Ripe,
    #[serde(rename = "advanced")]
    Advanced,
    #[serde(rename = "too ripe")]
    TooRipe,
}

impl RipenessStatus {
    /// All statuses, in ripening order.
    pub const ALL: [RipenessStatus; 5] = [
        RipenessStatus::None,
        RipenessStatus::Green,
        RipenessStatus::Ripe,
        RipenessStatus::Advanced,
        RipenessStatus::TooRipe,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RipenessStatus::None => "none",
            RipenessStatus::Green => "green",
            RipenessStatus::Ripe => "ripe/mature",
            RipenessStatus::Advanced => "advanced",
            RipenessStatus::TooRipe => "too ripe",
        }
    }
}

impl fmt::Display for RipenessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RipenessStatus {
    type Err = LarderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RipenessStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| LarderError::InvalidArgument {
                what: "ripeness",
                message: format!("unknown status '{s}' (expected one of: none, green, ripe/mature, advanced, too ripe)"),
            })
    }
}

/// A ripeness assessment together with the time it was last made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ripeness {
    pub status: RipenessStatus,
    /// Stamped on every (re)assignment of `status`
    pub last_checked: DateTime<Utc>,
}
