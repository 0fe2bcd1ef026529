//! Parse XML text into a contact document.

use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

use crate::book::{CONTACT_TAG, ROOT_TAG};
use crate::contact::Field;
use crate::{Contact, ContactBook, Error, Result};

impl ContactBook {
    /// Parse a contact document from XML text.
    ///
    /// # Example
    ///
    /// ```
    /// use rolodex_store::ContactBook;
    ///
    /// let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
    /// <contacts>
    ///     <contact>
    ///         <name>Ana</name>
    ///         <phone>555-1111</phone>
    ///         <address>Calle 1</address>
    ///     </contact>
    /// </contacts>"#;
    ///
    /// let book = ContactBook::from_xml(xml).unwrap();
    /// assert_eq!(book.len(), 1);
    /// assert_eq!(book.contacts()[0].phone, "555-1111");
    /// ```
    pub fn from_xml(xml: &str) -> Result<Self> {
        parse_book(xml)
    }

    /// Parse a contact document from UTF-8 bytes.
    pub fn from_xml_bytes(xml: &[u8]) -> Result<Self> {
        let xml = std::str::from_utf8(xml)
            .map_err(|e| Error::Xml(format!("document is not valid UTF-8: {}", e)))?;
        Self::from_xml(xml)
    }
}

/// Where the reader is in the document.
#[derive(Debug, Clone, Copy)]
enum State {
    Prolog,
    Root,
    Contact,
    Field(Field),
    Epilog,
}

/// Fields collected so far for the contact being read.
#[derive(Default)]
struct PendingContact {
    name: Option<String>,
    phone: Option<String>,
    address: Option<String>,
}

impl PendingContact {
    fn set(&mut self, field: Field, value: String, index: usize) -> Result<()> {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Phone => &mut self.phone,
            Field::Address => &mut self.address,
        };
        if slot.is_some() {
            return Err(Error::Xml(format!(
                "contact {} has more than one <{}>",
                index + 1,
                field.tag()
            )));
        }
        *slot = Some(value);
        Ok(())
    }

    fn finish(self, index: usize) -> Result<Contact> {
        let missing =
            |field: Field| Error::Xml(format!("contact {} is missing <{}>", index + 1, field.tag()));

        Ok(Contact {
            name: self.name.ok_or_else(|| missing(Field::Name))?,
            phone: self.phone.ok_or_else(|| missing(Field::Phone))?,
            address: self.address.ok_or_else(|| missing(Field::Address))?,
        })
    }
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

fn element(start: &BytesStart<'_>) -> String {
    format!("element <{}>", String::from_utf8_lossy(start.name().as_ref()))
}

fn parse_book(xml: &str) -> Result<ContactBook> {
    let mut reader = Reader::from_str(xml);
    // Field values are kept verbatim; layout whitespace is skipped by hand.
    reader.config_mut().trim_text(false);

    let mut book = ContactBook::new();
    let mut state = State::Prolog;
    let mut pending = PendingContact::default();
    let mut value = String::new();

    loop {
        let position = reader.buffer_position();
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(Error::Xml(format!(
                    "XML parse error at byte {}: {}",
                    reader.error_position(),
                    e
                )))
            }
        };
        let unexpected = |what: String| Error::Xml(format!("unexpected {} at byte {}", what, position));

        state = match (state, event) {
            (_, Event::Comment(_) | Event::PI(_)) => state,
            (State::Prolog, Event::Decl(_) | Event::DocType(_)) => state,
            (State::Prolog | State::Root | State::Contact | State::Epilog, Event::Text(e))
                if is_blank(&e) =>
            {
                state
            }

            (State::Prolog, Event::Start(e)) if e.name().as_ref() == ROOT_TAG.as_bytes() => {
                State::Root
            }
            (State::Prolog, Event::Empty(e)) if e.name().as_ref() == ROOT_TAG.as_bytes() => {
                State::Epilog
            }

            (State::Root, Event::Start(e)) if e.name().as_ref() == CONTACT_TAG.as_bytes() => {
                pending = PendingContact::default();
                State::Contact
            }
            (State::Root, Event::Empty(e)) if e.name().as_ref() == CONTACT_TAG.as_bytes() => {
                book.push(PendingContact::default().finish(book.len())?);
                State::Root
            }
            (State::Root, Event::End(_)) => State::Epilog,

            (State::Contact, Event::Start(e)) => match Field::from_tag(e.name().as_ref()) {
                Some(field) => {
                    value.clear();
                    State::Field(field)
                }
                None => return Err(unexpected(element(&e))),
            },
            (State::Contact, Event::Empty(e)) => match Field::from_tag(e.name().as_ref()) {
                Some(field) => {
                    pending.set(field, String::new(), book.len())?;
                    State::Contact
                }
                None => return Err(unexpected(element(&e))),
            },
            (State::Contact, Event::End(_)) => {
                book.push(std::mem::take(&mut pending).finish(book.len())?);
                State::Root
            }

            (State::Field(_), Event::Text(e)) => {
                let text = e.unescape().map_err(|e| {
                    Error::Xml(format!("invalid text at byte {}: {}", position, e))
                })?;
                value.push_str(&text);
                state
            }
            (State::Field(_), Event::CData(e)) => {
                value.push_str(&String::from_utf8_lossy(&e));
                state
            }
            (State::Field(field), Event::End(_)) => {
                pending.set(field, std::mem::take(&mut value), book.len())?;
                State::Contact
            }

            (State::Epilog, Event::Eof) => break,
            (State::Prolog, Event::Eof) => {
                return Err(Error::Xml(format!("no <{}> root element found", ROOT_TAG)))
            }
            (_, Event::Eof) => return Err(Error::Xml("unexpected end of document".to_string())),

            (_, Event::Start(e) | Event::Empty(e)) => return Err(unexpected(element(&e))),
            (_, Event::Text(_) | Event::CData(_)) => return Err(unexpected("text".to_string())),
            (_, other) => return Err(unexpected(format!("{:?}", other))),
        };
    }

    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(xml: &str) -> String {
        match ContactBook::from_xml(xml) {
            Err(Error::Xml(message)) => message,
            other => panic!("expected XML error, got {:?}", other),
        }
    }

    #[test]
    fn test_from_xml_contacts() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<contacts>
    <contact>
        <name>Ana</name>
        <phone>555-1111</phone>
        <address>Calle 1</address>
    </contact>
    <!-- second entry -->
    <contact>
        <address>Calle 2</address>
        <phone>555-2222</phone>
        <name>Beto</name>
    </contact>
</contacts>
"#;
        let book = ContactBook::from_xml(xml).unwrap();
        assert_eq!(
            book.contacts(),
            &[
                Contact::new("Ana", "555-1111", "Calle 1"),
                Contact::new("Beto", "555-2222", "Calle 2"),
            ]
        );
    }

    #[test]
    fn test_from_xml_empty_root() {
        assert!(ContactBook::from_xml("<contacts/>").unwrap().is_empty());
        assert!(ContactBook::from_xml("<contacts>\n</contacts>").unwrap().is_empty());
    }

    #[test]
    fn test_from_xml_empty_fields() {
        let xml = "<contacts><contact><name>Ana</name><phone/><address></address></contact></contacts>";
        let book = ContactBook::from_xml(xml).unwrap();
        assert_eq!(book.contacts(), &[Contact::new("Ana", "", "")]);
    }

    #[test]
    fn test_from_xml_keeps_field_text_verbatim() {
        let xml = "<contacts><contact><name> Ana &amp; Co </name>\
                   <phone>&lt;none&gt;</phone>\
                   <address><![CDATA[Calle <1>]]></address></contact></contacts>";
        let book = ContactBook::from_xml(xml).unwrap();
        assert_eq!(
            book.contacts(),
            &[Contact::new(" Ana & Co ", "<none>", "Calle <1>")]
        );
    }

    #[test]
    fn test_from_xml_wrong_root() {
        let message = parse_err("<people/>");
        assert!(message.contains("<people>"), "{}", message);
    }

    #[test]
    fn test_from_xml_missing_field() {
        let message =
            parse_err("<contacts><contact><name>Ana</name><phone>1</phone></contact></contacts>");
        assert_eq!(message, "contact 1 is missing <address>");
    }

    #[test]
    fn test_from_xml_empty_contact_element() {
        let message = parse_err("<contacts><contact/></contacts>");
        assert_eq!(message, "contact 1 is missing <name>");
    }

    #[test]
    fn test_from_xml_duplicate_field() {
        let message = parse_err(
            "<contacts><contact><name>A</name><name>B</name></contact></contacts>",
        );
        assert_eq!(message, "contact 1 has more than one <name>");
    }

    #[test]
    fn test_from_xml_unknown_element() {
        let message = parse_err(
            "<contacts><contact><email>a@b</email></contact></contacts>",
        );
        assert!(message.contains("<email>"), "{}", message);
    }

    #[test]
    fn test_from_xml_stray_text() {
        let message = parse_err("<contacts>hello</contacts>");
        assert!(message.starts_with("unexpected text"), "{}", message);
    }

    #[test]
    fn test_from_xml_truncated() {
        let message = parse_err("<contacts><contact><name>Ana</name>");
        assert_eq!(message, "unexpected end of document");
    }

    #[test]
    fn test_from_xml_trailing_element() {
        assert!(ContactBook::from_xml("<contacts/><contacts/>").is_err());
    }

    #[test]
    fn test_from_xml_empty_input() {
        assert_eq!(parse_err(""), "no <contacts> root element found");
        assert!(ContactBook::from_xml("   \n").is_err());
    }

    #[test]
    fn test_from_xml_mismatched_end() {
        assert!(ContactBook::from_xml("<contacts><contact></contacts>").is_err());
    }

    #[test]
    fn test_from_xml_bytes_rejects_invalid_utf8() {
        let result = ContactBook::from_xml_bytes(b"<contacts>\xff</contacts>");
        assert!(matches!(result, Err(Error::Xml(_))));
    }
}
