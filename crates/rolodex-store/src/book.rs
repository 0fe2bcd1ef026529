//! The in-memory contact document.

use crate::Contact;

/// Tag of the document root element.
pub(crate) const ROOT_TAG: &str = "contacts";

/// Tag of each contact element under the root.
pub(crate) const CONTACT_TAG: &str = "contact";

/// Ordered collection of contacts, as stored in one document.
///
/// Order is insertion order. Names are not unique; lookups return the first
/// case-insensitive match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactBook {
    contacts: Vec<Contact>,
}

impl ContactBook {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Whether the book holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// All contacts in document order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Iterate over contacts in document order.
    pub fn iter(&self) -> std::slice::Iter<'_, Contact> {
        self.contacts.iter()
    }

    /// Append a contact at the end.
    pub fn push(&mut self, contact: Contact) {
        self.contacts.push(contact);
    }

    /// Index of the first contact whose name matches.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.contacts.iter().position(|c| c.matches_name(name))
    }

    /// First contact whose name matches.
    pub fn find(&self, name: &str) -> Option<&Contact> {
        self.position(name).map(|i| &self.contacts[i])
    }

    /// Mutable access to the first contact whose name matches.
    pub fn find_mut(&mut self, name: &str) -> Option<&mut Contact> {
        let index = self.position(name)?;
        self.contacts.get_mut(index)
    }

    /// Remove and return the first contact whose name matches.
    ///
    /// Later contacts with the same name are kept.
    pub fn remove_first(&mut self, name: &str) -> Option<Contact> {
        let index = self.position(name)?;
        Some(self.contacts.remove(index))
    }

    /// Consume the book, returning its contacts.
    pub fn into_contacts(self) -> Vec<Contact> {
        self.contacts
    }
}

impl From<Vec<Contact>> for ContactBook {
    fn from(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }
}

impl FromIterator<Contact> for ContactBook {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        Self {
            contacts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ContactBook {
    type Item = &'a Contact;
    type IntoIter = std::slice::Iter<'a, Contact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ContactBook {
        ContactBook::from(vec![
            Contact::new("Ana", "1", "a"),
            Contact::new("Beto", "2", "b"),
            Contact::new("ana", "3", "c"),
        ])
    }

    #[test]
    fn test_find_first_match() {
        let book = sample();
        assert_eq!(book.position("ANA"), Some(0));
        assert_eq!(book.find("beto").map(|c| c.phone.as_str()), Some("2"));
        assert!(book.find("Carla").is_none());
    }

    #[test]
    fn test_remove_first_keeps_duplicates() {
        let mut book = sample();
        let removed = book.remove_first("Ana").unwrap();
        assert_eq!(removed.phone, "1");
        assert_eq!(book.len(), 2);
        assert_eq!(book.find("ana").map(|c| c.phone.as_str()), Some("3"));
    }

    #[test]
    fn test_remove_missing() {
        let mut book = sample();
        assert!(book.remove_first("Zoe").is_none());
        assert_eq!(book, sample());
    }

    #[test]
    fn test_find_mut() {
        let mut book = sample();
        book.find_mut("beto").unwrap().overwrite("Roberto", "22", "bb");
        assert_eq!(book.contacts()[1], Contact::new("Roberto", "22", "bb"));
        assert_eq!(book.len(), 3);
    }
}
