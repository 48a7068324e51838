//! Structural token reader
//!
//! A thin layer over the `quick-xml` event stream that drives the inventory
//! grammar. Whitespace-only text, comments, the XML declaration, processing
//! instructions and DOCTYPE are skipped by every primitive. Self-closing
//! elements are expanded into a start/end pair so callers see one shape.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{InventoryError, Result};

/// An owned start element: its local name and its attributes in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    qname: Vec<u8>,
    attributes: Vec<(String, String)>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Result<Self> {
        let name = utf8_name(start.local_name().as_ref())?;
        let mut attributes = Vec::new();
        let mut attrs = start.attributes();
        attrs.with_checks(false);
        for attr in attrs {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = utf8_name(attr.key.local_name().as_ref())?;
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            qname: start.name().as_ref().to_vec(),
            attributes,
        })
    }

    /// Local element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value of the first attribute with this local name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// All attributes, in document order
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

fn utf8_name(raw: &[u8]) -> Result<String> {
    std::str::from_utf8(raw)
        .map(str::to_string)
        .map_err(|_| InventoryError::structure("a UTF-8 name"))
}

enum Token {
    Start(Element),
    End(String),
    /// Character data or anything else that may not appear between elements
    Content,
    Eof,
}

/// Grammar-driving reader over any buffered byte source
pub struct StructuralReader<R> {
    reader: Reader<R>,
    buf: Vec<u8>,
}

impl<R: BufRead> StructuralReader<R> {
    pub fn new(source: R) -> Self {
        let mut reader = Reader::from_reader(source);
        reader.config_mut().expand_empty_elements = true;
        Self {
            reader,
            buf: Vec::new(),
        }
    }

    /// Consume a start element named `name`
    pub fn expect_start(&mut self, name: &str) -> Result<Element> {
        match self.next_token()? {
            Token::Start(element) if element.name == name => Ok(element),
            _ => Err(InventoryError::structure(format!("<{}>", name))),
        }
    }

    /// Consume an end element named `name`
    pub fn expect_end(&mut self, name: &str) -> Result<()> {
        match self.next_token()? {
            Token::End(end) if end == name => Ok(()),
            _ => Err(InventoryError::structure(format!("</{}>", name))),
        }
    }

    /// Consume either a start element named `start` (returned) or the end
    /// element named `end` (`None`).
    pub fn next_start_or_end(&mut self, start: &str, end: &str) -> Result<Option<Element>> {
        match self.next_token()? {
            Token::Start(element) if element.name == start => Ok(Some(element)),
            Token::End(name) if name == end => Ok(None),
            _ => Err(InventoryError::structure(format!("<{}> or </{}>", start, end))),
        }
    }

    /// Like [`next_start_or_end`](Self::next_start_or_end), but any start
    /// element is accepted. Used where the element name is itself data.
    pub fn next_any_start_or_end(&mut self, end: &str) -> Result<Option<Element>> {
        match self.next_token()? {
            Token::Start(element) => Ok(Some(element)),
            Token::End(name) if name == end => Ok(None),
            _ => Err(InventoryError::structure(format!("a child element or </{}>", end))),
        }
    }

    /// Discard everything up to and including the end of `element`, which must
    /// be the start element most recently consumed.
    pub fn skip(&mut self, element: &Element) -> Result<()> {
        self.buf.clear();
        self.reader
            .read_to_end_into(QName(&element.qname), &mut self.buf)?;
        Ok(())
    }

    fn next_token(&mut self) -> Result<Token> {
        loop {
            self.buf.clear();
            let token = match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(start) => Token::Start(Element::from_start(&start)?),
                Event::End(end) => Token::End(utf8_name(end.local_name().as_ref())?),
                Event::Text(text) if text.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Text(_) | Event::CData(_) | Event::Empty(_) => Token::Content,
                Event::Comment(_) | Event::Decl(_) | Event::PI(_) | Event::DocType(_) => continue,
                Event::Eof => Token::Eof,
            };
            return Ok(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(xml: &str) -> StructuralReader<&[u8]> {
        StructuralReader::new(xml.as_bytes())
    }

    #[test]
    fn test_whitespace_and_declaration_are_skipped() {
        let mut r = reader("<?xml version=\"1.0\"?>\n<!-- inventory -->\n  <root>\n\t</root>\n");
        r.expect_start("root").unwrap();
        r.expect_end("root").unwrap();
    }

    #[test]
    fn test_self_closing_elements_expand() {
        let mut r = reader(r#"<list><entry key="a"/><entry key="b"></entry></list>"#);
        r.expect_start("list").unwrap();

        let first = r.next_start_or_end("entry", "list").unwrap().unwrap();
        assert_eq!(first.attribute("key"), Some("a"));
        r.skip(&first).unwrap();

        let second = r.next_start_or_end("entry", "list").unwrap().unwrap();
        assert_eq!(second.attribute("key"), Some("b"));
        r.skip(&second).unwrap();

        assert!(r.next_start_or_end("entry", "list").unwrap().is_none());
    }

    #[test]
    fn test_unexpected_start_names_expected_construct() {
        let mut r = reader("<other/>");
        let err = r.expect_start("root").unwrap_err();
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "Invalid document structure: expected <root>");
    }

    #[test]
    fn test_text_content_is_significant() {
        let mut r = reader("<root>stray</root>");
        r.expect_start("root").unwrap();
        assert!(r.next_any_start_or_end("root").is_err());
    }

    #[test]
    fn test_skip_discards_nested_children() {
        let mut r = reader("<a><b><c>text</c><c/></b><d/></a>");
        r.expect_start("a").unwrap();
        let b = r.next_any_start_or_end("a").unwrap().unwrap();
        assert_eq!(b.name(), "b");
        r.skip(&b).unwrap();
        let d = r.next_any_start_or_end("a").unwrap().unwrap();
        assert_eq!(d.name(), "d");
        r.skip(&d).unwrap();
        r.expect_end("a").unwrap();
    }

    #[test]
    fn test_attributes_are_unescaped_in_order() {
        let mut r = reader(r#"<book title="Tom &amp; Jerry" year="1940"/>"#);
        let book = r.expect_start("book").unwrap();
        let attrs: Vec<_> = book.attributes().collect();
        assert_eq!(attrs, vec![("title", "Tom & Jerry"), ("year", "1940")]);
    }

    #[test]
    fn test_truncated_document_fails() {
        let mut r = reader("<root>");
        r.expect_start("root").unwrap();
        assert!(r.next_any_start_or_end("root").is_err());
    }
}
