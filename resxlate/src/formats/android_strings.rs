//! Support for Android `strings.xml` resource files.
//!
//! Only singular `<string>` elements directly under `<resources>` are
//! recognized. Plurals, arrays and other resource types are kept as opaque
//! document content.
//!
//! Besides the decoded entries, scanning records the byte span of every
//! `<string>` element and of the closing `</resources>` tag, so callers can
//! rewrite single values without touching the rest of the file.

use std::{
    collections::HashSet,
    io::BufRead,
    ops::Range,
};

use quick_xml::{
    Reader,
    escape::unescape,
    events::{BytesStart, Event},
};
use crate::{error::Error, traits::Parser, types::StringEntry};

const ROOT_TAG: &[u8] = b"resources";
const STRING_TAG: &[u8] = b"string";

/// Placeholder path for documents that were not read from disk.
const INPUT: &str = "<input>";

/// Decoded contents of a `strings.xml` document.
#[derive(Debug)]
pub struct Format {
    pub strings: Vec<StringEntry>,
}

impl Parser for Format {
    /// Parse from any reader.
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut source = String::new();
        reader
            .read_to_string(&mut source)
            .map_err(|e| Error::io_error(INPUT, e))?;

        let document = Document::scan(&source)?;
        let mut seen = HashSet::new();
        for node in &document.nodes {
            if !seen.insert(node.entry.name.as_str()) {
                return Err(Error::parse_error(
                    INPUT,
                    format!("duplicate string name '{}'", node.entry.name),
                ));
            }
        }

        Ok(Format {
            strings: document.nodes.into_iter().map(|n| n.entry).collect(),
        })
    }
}

impl Format {
    pub fn find(&self, name: &str) -> Option<&StringEntry> {
        self.strings.iter().find(|s| s.name == name)
    }
}

/// One top-level `<string>` element and where it sits in the source text.
#[derive(Debug, Clone)]
pub struct StringNode {
    pub entry: StringEntry,
    /// From `<string` through `</string>` (or `/>` for an empty element).
    pub element: Range<usize>,
    /// Between the start tag's `>` and the end tag's `<`. `None` when self-closing.
    pub content: Option<Range<usize>>,
}

/// A scanned `strings.xml` document borrowing its source text.
#[derive(Debug)]
pub struct Document<'a> {
    pub source: &'a str,
    pub nodes: Vec<StringNode>,
    /// Offset of the `<` of the closing `</resources>` tag.
    pub root_end: usize,
}

impl<'a> Document<'a> {
    /// Scan `source`, requiring a single `<resources>` root element.
    pub fn scan(source: &'a str) -> Result<Self, Error> {
        let mut reader = Reader::from_str(source);

        let mut nodes = Vec::new();
        let mut depth = 0usize;
        let mut root_seen = false;
        let mut root_end = None;

        loop {
            let start = reader.buffer_position() as usize;
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) if depth == 0 => {
                    if root_seen || e.name().as_ref() != ROOT_TAG {
                        return Err(Error::parse_error(
                            INPUT,
                            "expected a single <resources> root element",
                        ));
                    }
                    root_seen = true;
                    depth = 1;
                }
                Event::Start(e) if depth == 1 && e.name().as_ref() == STRING_TAG => {
                    let (name, translatable) = string_attributes(&e)?;
                    let span = reader.read_to_end(e.name()).map_err(xml_error)?;
                    let content = span.start as usize..span.end as usize;
                    let raw = &source[content.clone()];
                    let value = decode_value(raw)?;
                    nodes.push(StringNode {
                        entry: StringEntry {
                            name,
                            value,
                            translatable,
                            markup: raw.contains('<'),
                        },
                        element: start..reader.buffer_position() as usize,
                        content: Some(content),
                    });
                }
                Event::Empty(e) if depth == 1 && e.name().as_ref() == STRING_TAG => {
                    let (name, translatable) = string_attributes(&e)?;
                    nodes.push(StringNode {
                        entry: StringEntry {
                            name,
                            value: String::new(),
                            translatable,
                            markup: false,
                        },
                        element: start..reader.buffer_position() as usize,
                        content: None,
                    });
                }
                Event::Empty(_) if depth == 0 => {
                    return Err(Error::parse_error(
                        INPUT,
                        "expected a single <resources> root element",
                    ));
                }
                Event::Start(_) => depth += 1,
                Event::End(_) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && root_seen && root_end.is_none() {
                        root_end = Some(start);
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if !root_seen {
            return Err(Error::parse_error(INPUT, "missing <resources> root element"));
        }
        let root_end = root_end
            .ok_or_else(|| Error::parse_error(INPUT, "missing closing </resources> tag"))?;

        Ok(Document {
            source,
            nodes,
            root_end,
        })
    }
}

fn string_attributes(e: &BytesStart) -> Result<(String, bool), Error> {
    let mut name = None;
    let mut translatable = true;

    for attr in e.attributes().with_checks(false) {
        let attr = attr.map_err(|e| Error::parse_error(INPUT, e.to_string()))?;
        match attr.key.as_ref() {
            b"name" => name = Some(attr.unescape_value().map_err(xml_error)?.to_string()),
            b"translatable" => {
                translatable = attr.unescape_value().map_err(xml_error)?.as_ref() != "false"
            }
            _ => {}
        }
    }
    let name = name.ok_or_else(|| Error::parse_error(INPUT, "string tag missing 'name'"))?;
    Ok((name, translatable))
}

fn xml_error(e: quick_xml::Error) -> Error {
    Error::parse_error(INPUT, e.to_string())
}

/// Plain text content is entity-decoded; content with inline markup or CDATA
/// is kept verbatim.
fn decode_value(raw: &str) -> Result<String, Error> {
    if raw.contains('<') {
        return Ok(raw.to_string());
    }
    unescape(raw)
        .map(|v| v.into_owned())
        .map_err(|e| Error::parse_error(INPUT, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_strings_xml() {
        let xml = r#"
        <resources>
            <string name="hello">Hello</string>
            <string name="bye" translatable="false">Goodbye</string>
            <string name="empty"></string>
            <string name="blank"/>
        </resources>
        "#;
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings.len(), 4);
        let hello = &format.strings[0];
        assert_eq!(hello.name, "hello");
        assert_eq!(hello.value, "Hello");
        assert!(hello.translatable);
        let bye = &format.strings[1];
        assert_eq!(bye.value, "Goodbye");
        assert!(!bye.translatable);
        assert_eq!(format.strings[2].value, "");
        assert_eq!(format.find("blank").unwrap().value, "");
    }

    #[test]
    fn test_entities_are_decoded() {
        let xml = r#"<resources><string name="amp">Tom &amp; Jerry&#39;s</string></resources>"#;
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings[0].value, "Tom & Jerry's");
        assert!(!format.strings[0].markup);
    }

    #[test]
    fn test_inline_markup_kept_verbatim() {
        let xml = r#"<resources><string name="bold">Hi <b>there</b></string></resources>"#;
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings[0].value, "Hi <b>there</b>");
        assert!(format.strings[0].markup);
    }

    #[test]
    fn test_plurals_ignored() {
        let xml = r#"
        <resources>
            <string name="hello">Hello</string>
            <plurals name="apples">
                <item quantity="one">One apple</item>
                <item quantity="other">%d apples</item>
            </plurals>
        </resources>
        "#;
        let format = Format::from_str(xml).unwrap();
        assert_eq!(format.strings.len(), 1);
        assert_eq!(format.strings[0].name, "hello");
    }

    #[test]
    fn test_missing_name_attribute() {
        let xml = r#"<resources><string>No name attr</string></resources>"#;
        let err = Format::from_str(xml).unwrap_err();
        assert!(err.to_string().contains("missing 'name'"));
    }

    #[test]
    fn test_wrong_root_is_rejected() {
        let xml = r#"<strings><string name="a">A</string></strings>"#;
        let err = Format::from_str(xml).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_missing_root_is_rejected() {
        let err = Format::from_str("<?xml version=\"1.0\"?>\n").unwrap_err();
        assert!(err.to_string().contains("missing <resources>"));
    }

    #[test]
    fn test_unclosed_document_is_rejected() {
        let xml = r#"<resources><string name="a">A</string>"#;
        assert!(Format::from_str(xml).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let xml = r#"<resources><string name="a">A</string><string name="a">B</string></resources>"#;
        let err = Format::from_str(xml).unwrap_err();
        assert!(err.to_string().contains("duplicate string name 'a'"));
    }

    #[test]
    fn test_scan_records_spans() {
        let xml = "<resources>\n    <string name=\"a\">A</string>\n</resources>\n";
        let doc = Document::scan(xml).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        let node = &doc.nodes[0];
        assert_eq!(&xml[node.element.clone()], "<string name=\"a\">A</string>");
        assert_eq!(&xml[node.content.clone().unwrap()], "A");
        assert_eq!(&xml[doc.root_end..], "</resources>\n");
    }

    #[test]
    fn test_scan_ignores_nested_string_tags() {
        let xml = r#"<resources><string-array name="arr"><item>x</item></string-array><string name="a">A</string></resources>"#;
        let doc = Document::scan(xml).unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].entry.name, "a");
    }
}
