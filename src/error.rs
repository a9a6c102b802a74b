//! Error types for Larder
//!
//! Library errors are typed with `thiserror`; the CLI aggregates them with
//! `anyhow`. Note that the inventory store's mutators never return errors at
//! all - see the no-op and persistence-recovery contracts on
//! [`crate::application::inventory::InventoryStore`].

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{LookupError, SnapshotError};

/// Result type alias for Larder operations
pub type LarderResult<T> = Result<T, LarderError>;

/// Main error type for Larder operations
#[derive(Error, Debug)]
pub enum LarderError {
    /// Caller handed us a value outside the domain
    #[error("invalid {what}: {message}")]
    InvalidArgument { what: &'static str, message: String },

    /// Config file exists but could not be read or parsed
    #[error("invalid config {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Snapshot persistence failure
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),

    /// Barcode lookup failure
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display() {
        let err = LarderError::InvalidArgument {
            what: "ripeness",
            message: "unknown status 'mushy'".to_string(),
        };
        assert_eq!(err.to_string(), "invalid ripeness: unknown status 'mushy'");
    }

    #[test]
    fn config_display_includes_path() {
        let err = LarderError::Config {
            path: PathBuf::from("/etc/larder/config.toml"),
            message: "expected a table".to_string(),
        };
        assert!(err.to_string().contains("/etc/larder/config.toml"));
        assert!(err.to_string().contains("expected a table"));
    }
}
