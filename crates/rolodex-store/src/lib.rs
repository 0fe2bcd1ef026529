//! File-backed contact records for Rolodex.
//!
//! Contacts live in a single XML document:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <contacts>
//!     <contact>
//!         <name>Ana</name>
//!         <phone>555-1111</phone>
//!         <address>Calle 1</address>
//!     </contact>
//! </contacts>
//! ```
//!
//! [`ContactStore`] owns the file. Each operation loads the whole document,
//! changes it and writes it back; nothing is cached between calls.
//! [`ContactBook`] is the parsed document and can be used on its own.
//!
//! # Example
//!
//! ```no_run
//! use rolodex_store::ContactStore;
//!
//! let store = ContactStore::open("contacts.xml")?;
//! store.add("Ana", "555-1111", "Calle 1")?;
//!
//! match store.find("ana")? {
//!     Some(contact) => println!("{}", contact),
//!     None => println!("not found"),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod book;
mod contact;
mod error;
mod from_xml;
mod store;
mod to_xml;

pub use book::ContactBook;
pub use contact::Contact;
pub use error::{Error, Result};
pub use store::ContactStore;
pub use to_xml::INDENT_WIDTH;
