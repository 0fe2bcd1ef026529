//! The contact record.

use std::fmt;

/// A single contact entry.
///
/// All three fields are always present; an unknown value is an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Contact {
    /// Display name, also the case-insensitive lookup key.
    pub name: String,
    /// Phone number, stored as typed.
    pub phone: String,
    /// Free-form postal address.
    pub address: String,
}

impl Contact {
    /// Create a new contact.
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Case-insensitive exact comparison against `name`.
    ///
    /// Characters are folded one at a time, so the context-dependent final
    /// sigma does not affect the result.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name == name
            || self
                .name
                .chars()
                .flat_map(fold)
                .eq(name.chars().flat_map(fold))
    }

    /// Replace all three fields at once.
    pub fn overwrite(&mut self, name: &str, phone: &str, address: &str) {
        name.clone_into(&mut self.name);
        phone.clone_into(&mut self.phone);
        address.clone_into(&mut self.address);
    }

    /// Field values in document order, paired with their kind.
    pub(crate) fn fields(&self) -> [(Field, &str); 3] {
        [
            (Field::Name, self.name.as_str()),
            (Field::Phone, self.phone.as_str()),
            (Field::Address, self.address.as_str()),
        ]
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}, Phone: {}, Address: {}",
            self.name, self.phone, self.address
        )
    }
}

fn fold(c: char) -> impl Iterator<Item = char> {
    c.to_uppercase().flat_map(char::to_lowercase)
}

/// The three named child elements of a contact node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Field {
    Name,
    Phone,
    Address,
}

impl Field {
    pub(crate) fn tag(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Phone => "phone",
            Field::Address => "address",
        }
    }

    pub(crate) fn from_tag(tag: &[u8]) -> Option<Self> {
        match tag {
            b"name" => Some(Field::Name),
            b"phone" => Some(Field::Phone),
            b"address" => Some(Field::Address),
            _ => None,
        }
    }
}
