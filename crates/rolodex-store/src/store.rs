//! File-backed contact store.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::{Contact, ContactBook, Error, Result};

/// Contact store backed by a single XML document on disk.
///
/// The store keeps no state besides the path. Every operation reads the
/// document fresh, applies its change and writes the whole document back
/// before returning, so sequential calls always observe each other.
///
/// There is no file locking: two processes mutating the same file can
/// lose each other's changes. Use one store per file and process.
#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    /// Create a store for `path` without touching the filesystem.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a store and make sure a valid document exists at `path`.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use rolodex_store::ContactStore;
    ///
    /// let store = ContactStore::open("contacts.xml")?;
    /// store.add("Ana", "555-1111", "Calle 1")?;
    ///
    /// for contact in store.list()? {
    ///     println!("{}", contact);
    /// }
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self::new(path);
        store.initialize()?;
        Ok(store)
    }

    /// Path of the backing document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write an empty document if the file is missing or zero-length.
    ///
    /// Returns `true` if a new document was written. An existing non-empty
    /// file is left untouched, even if it does not parse.
    pub fn initialize(&self) -> Result<bool> {
        match fs::metadata(&self.path) {
            Ok(metadata) if metadata.len() > 0 => return Ok(false),
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(reported(
                    "initialize",
                    Error::Read {
                        path: self.path.clone(),
                        source,
                    },
                ))
            }
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| {
                reported(
                    "initialize",
                    Error::Write {
                        path: parent.to_path_buf(),
                        source,
                    },
                )
            })?;
        }

        self.save(&ContactBook::new())
            .map_err(|e| reported("initialize", e))?;
        info!(path = %self.path.display(), "initialized empty contact file");
        Ok(true)
    }

    /// Read and parse the document.
    pub fn load(&self) -> Result<ContactBook> {
        let data = match fs::read(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFoundOrEmpty {
                    path: self.path.clone(),
                })
            }
            Err(source) => {
                return Err(Error::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if data.is_empty() {
            return Err(Error::NotFoundOrEmpty {
                path: self.path.clone(),
            });
        }

        let book = ContactBook::from_xml_bytes(&data).map_err(|e| match e {
            Error::Xml(message) => Error::Parse {
                path: self.path.clone(),
                message,
            },
            other => other,
        })?;

        debug!(path = %self.path.display(), contacts = book.len(), "loaded contact file");
        Ok(book)
    }

    /// Replace the document on disk with `book`.
    ///
    /// The new content goes to a sibling temporary file which is synced and
    /// then renamed over the target, so a later load sees either the old or
    /// the new document. An existing target keeps its permissions.
    pub fn save(&self, book: &ContactBook) -> Result<()> {
        let xml = book.to_xml_string()?;
        let temp_path = self.temp_path();

        let write = || -> io::Result<()> {
            let mut file = File::create(&temp_path)?;
            file.write_all(xml.as_bytes())?;
            match fs::metadata(&self.path) {
                Ok(metadata) => file.set_permissions(metadata.permissions())?,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
            file.sync_all()?;
            fs::rename(&temp_path, &self.path)
        };

        if let Err(source) = write() {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::Write {
                path: self.path.clone(),
                source,
            });
        }

        debug!(path = %self.path.display(), contacts = book.len(), "saved contact file");
        Ok(())
    }

    /// Append a new contact at the end of the document.
    pub fn add(&self, name: &str, phone: &str, address: &str) -> Result<Contact> {
        let result = self.load().and_then(|mut book| {
            let contact = Contact::new(name, phone, address);
            book.push(contact.clone());
            self.save(&book)?;
            Ok(contact)
        });

        let contact = result.map_err(|e| reported("add", e))?;
        info!(name = %contact.name, "contact added");
        Ok(contact)
    }

    /// All contacts in document order.
    pub fn list(&self) -> Result<Vec<Contact>> {
        self.load()
            .map(ContactBook::into_contacts)
            .map_err(|e| reported("list", e))
    }

    /// First contact whose name matches `name`, ignoring case.
    pub fn find(&self, name: &str) -> Result<Option<Contact>> {
        let book = self.load().map_err(|e| reported("find", e))?;
        let found = book.find(name).cloned();
        debug!(name, found = found.is_some(), "contact lookup");
        Ok(found)
    }

    /// Overwrite all fields of the first contact matching `original_name`.
    ///
    /// The new name is not validated: it may be empty or equal to another
    /// contact's name. Nothing is written if no contact matches.
    pub fn update(
        &self,
        original_name: &str,
        name: &str,
        phone: &str,
        address: &str,
    ) -> Result<Contact> {
        let result = self.load().and_then(|mut book| {
            let contact = book
                .find_mut(original_name)
                .ok_or_else(|| Error::ContactNotFound {
                    name: original_name.to_string(),
                })?;
            contact.overwrite(name, phone, address);
            let updated = contact.clone();
            self.save(&book)?;
            Ok(updated)
        });

        let contact = result.map_err(|e| reported("update", e))?;
        info!(original = original_name, name = %contact.name, "contact updated");
        Ok(contact)
    }

    /// Remove the first contact matching `name` and return it.
    ///
    /// Later contacts with the same name stay. Nothing is written if no
    /// contact matches.
    pub fn delete(&self, name: &str) -> Result<Contact> {
        let result = self.load().and_then(|mut book| {
            let removed = book.remove_first(name).ok_or_else(|| Error::ContactNotFound {
                name: name.to_string(),
            })?;
            self.save(&book)?;
            Ok(removed)
        });

        let contact = result.map_err(|e| reported("delete", e))?;
        info!(name = %contact.name, "contact deleted");
        Ok(contact)
    }

    fn temp_path(&self) -> PathBuf {
        let mut file_name = OsString::from(".");
        file_name.push(self.path.file_name().unwrap_or(OsStr::new("contacts")));
        file_name.push(".tmp");
        self.path.with_file_name(file_name)
    }
}

/// Log a failed operation and hand the error back to the caller.
fn reported(operation: &str, error: Error) -> Error {
    if error.is_not_found() {
        info!(operation, "{}", error);
    } else {
        warn!(operation, "{}", error);
    }
    error
}
