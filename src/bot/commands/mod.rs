//! Discord command implementations organized by view.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Catalog management commands
pub mod catalog;

/// General utility commands
pub mod general;

/// Cart and checkout commands
pub mod purchase;

/// Daily sales report command
pub mod report;

// Export commands
pub use catalog::*;
pub use general::*;
pub use purchase::*;
pub use report::*;
