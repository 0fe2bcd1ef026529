//! Delimited table writer.

use std::fmt::Display;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use rolodex_store::{Contact, ContactStore};
use tracing::{info, warn};

use crate::{Error, Result};

/// First line of every export.
pub const HEADER: &str = "Name, Phone, Address";

/// Write the header and one line per contact to `writer`.
///
/// Returns the number of data lines written.
pub fn write_rows<W: Write>(contacts: &[Contact], mut writer: W) -> io::Result<usize> {
    writeln!(writer, "{}", HEADER)?;
    for (index, contact) in contacts.iter().enumerate() {
        writeln!(
            writer,
            "{}, {}, {}, {}",
            index, contact.name, contact.phone, contact.address
        )?;
    }
    writer.flush()?;
    Ok(contacts.len())
}

/// Exports the current contents of a [`ContactStore`] as a table.
pub struct TableExporter<'a> {
    store: &'a ContactStore,
}

impl<'a> TableExporter<'a> {
    /// Create a new exporter reading from `store`.
    pub fn new(store: &'a ContactStore) -> Self {
        Self { store }
    }

    /// Export all contacts to a file, replacing it if it exists.
    ///
    /// The store is loaded before `destination` is opened, so a store failure
    /// leaves the destination untouched. Returns the number of data lines.
    pub fn export_to_path<P: AsRef<Path>>(&self, destination: P) -> Result<usize> {
        let destination = destination.as_ref();
        reported(destination.display(), self.write_file(destination))
    }

    /// Export all contacts to an arbitrary writer.
    pub fn write_table<W: Write>(&self, writer: W) -> Result<usize> {
        let written = self
            .store
            .load()
            .map_err(Error::from)
            .and_then(|book| Ok(write_rows(book.contacts(), writer)?));
        reported("<writer>", written)
    }

    fn write_file(&self, destination: &Path) -> Result<usize> {
        let book = self.store.load()?;

        let write_error = |source: io::Error| Error::Write {
            path: destination.to_path_buf(),
            source,
        };

        let file = File::create(destination).map_err(write_error)?;
        write_rows(book.contacts(), BufWriter::new(file)).map_err(write_error)
    }
}

fn reported(target: impl Display, result: Result<usize>) -> Result<usize> {
    match &result {
        Ok(rows) => info!(path = %target, rows, "contacts exported"),
        Err(e) => warn!(path = %target, "export failed: {}", e),
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(temp_dir: &TempDir, contacts: &[(&str, &str, &str)]) -> ContactStore {
        let store = ContactStore::open(temp_dir.path().join("contacts.xml")).unwrap();
        for (name, phone, address) in contacts {
            store.add(name, phone, address).unwrap();
        }
        store
    }

    #[test]
    fn test_write_rows() {
        let contacts = vec![
            Contact::new("Ana", "555-1111", "Calle 1"),
            Contact::new("Beto", "555-2222", "Calle 2"),
        ];
        let mut output = Vec::new();
        let rows = write_rows(&contacts, &mut output).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Name, Phone, Address\n0, Ana, 555-1111, Calle 1\n1, Beto, 555-2222, Calle 2\n"
        );
    }

    #[test]
    fn test_write_rows_no_escaping() {
        let contacts = vec![Contact::new("Doe, Jane", "", "Main St, 5")];
        let mut output = Vec::new();
        write_rows(&contacts, &mut output).unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "Name, Phone, Address\n0, Doe, Jane, , Main St, 5\n"
        );
    }

    #[test]
    fn test_export_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[]);
        let destination = temp_dir.path().join("contacts.csv");

        let rows = TableExporter::new(&store).export_to_path(&destination).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(fs::read_to_string(&destination).unwrap(), "Name, Phone, Address\n");
    }

    #[test]
    fn test_export_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[("Ana", "1", "a")]);
        let destination = temp_dir.path().join("contacts.csv");
        fs::write(&destination, "old content that is longer than the export\n".repeat(10)).unwrap();

        TableExporter::new(&store).export_to_path(&destination).unwrap();
        assert_eq!(
            fs::read_to_string(&destination).unwrap(),
            "Name, Phone, Address\n0, Ana, 1, a\n"
        );
    }

    #[test]
    fn test_export_does_not_modify_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[("Ana", "1", "a"), ("Beto", "2", "b")]);
        let before = fs::read_to_string(store.path()).unwrap();

        TableExporter::new(&store)
            .export_to_path(temp_dir.path().join("out.csv"))
            .unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap(), before);
    }

    #[test]
    fn test_export_missing_store_leaves_no_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = ContactStore::new(temp_dir.path().join("missing.xml"));
        let destination = temp_dir.path().join("contacts.csv");

        let err = TableExporter::new(&store).export_to_path(&destination).unwrap_err();
        assert!(matches!(
            err,
            Error::Store(rolodex_store::Error::NotFoundOrEmpty { .. })
        ));
        assert!(!destination.exists());
    }

    #[test]
    fn test_export_unwritable_destination() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[("Ana", "1", "a")]);
        let destination = temp_dir.path().join("no-such-dir").join("contacts.csv");

        let err = TableExporter::new(&store).export_to_path(&destination).unwrap_err();
        match err {
            Error::Write { path, .. } => assert_eq!(path, destination),
            other => panic!("expected write error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_table() {
        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[("Ana", "1", "a")]);

        let mut output = Vec::new();
        let rows = TableExporter::new(&store).write_table(&mut output).unwrap();
        assert_eq!(rows, 1);
        assert_eq!(output, b"Name, Phone, Address\n0, Ana, 1, a\n");
    }

    #[test]
    fn test_write_table_missing_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = ContactStore::new(temp_dir.path().join("missing.xml"));

        let mut output = Vec::new();
        let err = TableExporter::new(&store).write_table(&mut output).unwrap_err();
        assert!(matches!(
            err,
            Error::Store(rolodex_store::Error::NotFoundOrEmpty { .. })
        ));
        assert!(output.is_empty());
    }

    #[test]
    fn test_write_table_writer_failure() {
        struct Broken;

        impl Write for Broken {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let temp_dir = TempDir::new().unwrap();
        let store = store_with(&temp_dir, &[("Ana", "1", "a")]);

        let err = TableExporter::new(&store).write_table(Broken).unwrap_err();
        match err {
            Error::Io(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
            other => panic!("expected io error, got {:?}", other),
        }
    }
}
