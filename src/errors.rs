//! Unified error type for `RefreshBuddy`.
//!
//! Every fallible operation in the crate returns [`Result`]. Errors are caught at the
//! command boundary, logged, and shown to the user as a single reply.

use thiserror::Error;

/// All errors that can occur in `RefreshBuddy`.
#[derive(Debug, Error)]
pub enum Error {
    /// Input failed validation (empty name, bad price, bad date).
    #[error("Invalid input: {message}")]
    Validation {
        /// What was wrong with the input
        message: String,
    },

    /// A catalog item id is unknown or the item was deleted.
    #[error("Item not found: {id}")]
    ItemNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// A catalog item name did not match any active item.
    #[error("No item named '{name}' in the catalog")]
    ItemNameNotFound {
        /// The name that was looked up
        name: String,
    },

    /// Checkout was requested with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// A confirm is already being recorded for this cart.
    #[error("A purchase is already being recorded, please wait")]
    CheckoutInProgress,

    /// Confirm or cancel was requested without an open checkout.
    #[error("There is no checkout waiting for confirmation")]
    CheckoutNotOpen,

    /// The persistence layer failed.
    #[error("Storage error: {message}")]
    Persistence {
        /// Store-specific failure description
        message: String,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A required environment variable is missing.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    /// Discord / poise framework failure.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),
}

impl From<sea_orm::DbErr> for Error {
    fn from(value: sea_orm::DbErr) -> Self {
        Self::Persistence {
            message: value.to_string(),
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
