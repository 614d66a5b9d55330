//! Store backend selection from the `STORE_BACKEND` environment variable.

use crate::errors::{Error, Result};
use std::str::FromStr;

/// Which persistence adapter the application runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Catalog and purchases live in process memory and vanish on restart
    Memory,
    /// Catalog and purchases are persisted through `SeaORM`
    #[default]
    Database,
}

impl FromStr for StoreBackend {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "database" | "db" => Ok(Self::Database),
            other => Err(Error::Config {
                message: format!("Unknown STORE_BACKEND '{other}', expected 'memory' or 'database'"),
            }),
        }
    }
}

/// Reads `STORE_BACKEND`, defaulting to [`StoreBackend::Database`] when unset.
///
/// # Errors
/// Returns [`Error::Config`] if the variable holds an unknown value.
pub fn get_store_backend() -> Result<StoreBackend> {
    std::env::var("STORE_BACKEND").map_or_else(|_| Ok(StoreBackend::default()), |v| v.parse())
}
