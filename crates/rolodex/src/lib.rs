//! Rolodex - local contact book library.
//!
//! This crate provides a unified interface to the Rolodex crates.
//!
//! # Crates
//!
//! - [`rolodex_store`] - Contact records persisted in an indented XML file
//! - [`rolodex_export`] - Comma-separated table export
//!
//! # Example
//!
//! ```no_run
//! use rolodex::prelude::*;
//!
//! let store = ContactStore::open("contacts.xml")?;
//! store.add("Ana", "555-1111", "Calle 1")?;
//!
//! let rows = TableExporter::new(&store).export_to_path("contacts.csv")?;
//! println!("Exported {} contacts", rows);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export all sub-crates
pub use rolodex_export as export;
pub use rolodex_store as store;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use rolodex_export::TableExporter;
    pub use rolodex_store::{Contact, ContactBook, ContactStore};
}

// Re-export commonly used types at the crate root
pub use rolodex_export::TableExporter;
pub use rolodex_store::{Contact, ContactStore};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
