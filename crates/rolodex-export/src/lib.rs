//! Table export for Rolodex contacts.
//!
//! Writes a header line followed by one comma-separated line per contact:
//!
//! ```text
//! Name, Phone, Address
//! 0, Ana, 555-1111, Calle 1
//! 1, Beto, 555-2222, Calle 2
//! ```
//!
//! Each data line starts with a 0-based row number. Field values are written
//! as-is; commas or newlines inside a value are not quoted.

mod error;
mod table;

pub use error::{Error, Result};
pub use table::{write_rows, TableExporter, HEADER};
