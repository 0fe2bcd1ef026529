//! Write a contact document as indented XML.

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::book::{CONTACT_TAG, ROOT_TAG};
use crate::{ContactBook, Error, Result};

/// Spaces per nesting level in written documents.
pub const INDENT_WIDTH: usize = 4;

fn xml_error(e: impl std::fmt::Display) -> Error {
    Error::Xml(e.to_string())
}

impl ContactBook {
    /// Convert to an XML string.
    pub fn to_xml_string(&self) -> Result<String> {
        let mut output = Vec::new();
        self.write_xml(&mut output)?;
        String::from_utf8(output).map_err(xml_error)
    }

    /// Write the document as UTF-8 XML with a fixed 4-space indent.
    ///
    /// Output is deterministic: the same book always produces the same bytes.
    pub fn write_xml<W: Write>(&self, writer: W) -> Result<()> {
        let mut xml_writer = Writer::new_with_indent(writer, b' ', INDENT_WIDTH);

        xml_writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(xml_error)?;

        if self.is_empty() {
            xml_writer
                .write_event(Event::Empty(BytesStart::new(ROOT_TAG)))
                .map_err(xml_error)?;
        } else {
            xml_writer
                .write_event(Event::Start(BytesStart::new(ROOT_TAG)))
                .map_err(xml_error)?;

            for contact in self {
                xml_writer
                    .write_event(Event::Start(BytesStart::new(CONTACT_TAG)))
                    .map_err(xml_error)?;

                for (field, value) in contact.fields() {
                    xml_writer
                        .create_element(field.tag())
                        .write_text_content(BytesText::new(value))
                        .map_err(xml_error)?;
                }

                xml_writer
                    .write_event(Event::End(BytesEnd::new(CONTACT_TAG)))
                    .map_err(xml_error)?;
            }

            xml_writer
                .write_event(Event::End(BytesEnd::new(ROOT_TAG)))
                .map_err(xml_error)?;
        }

        xml_writer.get_mut().write_all(b"\n").map_err(xml_error)?;
        Ok(())
    }
}
