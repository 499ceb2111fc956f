//! XML document tree for program templates.

use std::fs;
use std::io::Write;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::{partial_escape, resolve_predefined_entity};
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use crate::error::{Result, TemplateError};

/// A node below the document root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    /// Character data with entity references already resolved.
    Text(String),
    CData(String),
    Comment(String),
}

/// An XML element.
///
/// The start tag is kept verbatim so attributes are written back exactly as
/// they appeared in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    start_tag: String,
    children: Vec<Node>,
    self_closing: bool,
}

impl Element {
    fn from_start(start: &BytesStart<'_>, position: u64) -> Result<Self> {
        let start_tag = utf8(start, position)?.to_string();
        let name = utf8(start.name().as_ref(), position)?.to_string();
        Ok(Self {
            name,
            start_tag,
            children: Vec::new(),
            self_closing: false,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    fn push(&mut self, node: Node) {
        self.children.push(node);
    }

    /// Child elements, skipping text and comments.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(element) => Some(element),
            _ => None,
        })
    }

    /// First direct child element with this name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|element| element.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|element| element.name == name)
    }

    /// Concatenated text and CDATA of the direct children.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for node in &self.children {
            match node {
                Node::Text(value) | Node::CData(value) => text.push_str(value),
                _ => {}
            }
        }
        text
    }

    /// True when the direct text content equals `expected` exactly.
    pub fn text_equals(&self, expected: &str) -> bool {
        let mut parts = self.children.iter().filter_map(|node| match node {
            Node::Text(value) | Node::CData(value) => Some(value.as_str()),
            _ => None,
        });
        match (parts.next(), parts.next()) {
            (None, _) => expected.is_empty(),
            (Some(only), None) => only == expected,
            _ => self.text() == expected,
        }
    }

    /// Replaces all children with a single text node.
    pub fn set_text(&mut self, value: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(value.into()));
    }

    fn write<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let start = BytesStart::from_content(self.start_tag.as_str(), self.name.len());
        if self.self_closing && self.children.is_empty() {
            return emit(writer, Event::Empty(start));
        }
        emit(writer, Event::Start(start))?;
        for node in &self.children {
            match node {
                Node::Element(element) => element.write(writer)?,
                Node::Text(text) => {
                    let escaped = partial_escape(text.as_str());
                    emit(writer, Event::Text(BytesText::from_escaped(escaped)))?;
                }
                Node::CData(text) => emit(writer, Event::CData(BytesCData::new(text.as_str())))?,
                Node::Comment(text) => {
                    emit(writer, Event::Comment(BytesText::from_escaped(text.as_str())))?;
                }
            }
        }
        emit(writer, Event::End(BytesEnd::new(self.name.as_str())))
    }
}

/// The parsed template. Read-only; see [`TemplateDocument::instantiate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    root: Element,
}

impl TemplateDocument {
    /// Reads and parses a template file.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source)
    }

    /// Parses template markup.
    pub fn parse(source: &str) -> Result<Self> {
        let source = source.trim_start_matches('\u{feff}');
        let mut reader = Reader::from_str(source);
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut text = String::new();

        loop {
            let position = reader.buffer_position() as u64;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(source) => {
                    return Err(TemplateError::Xml {
                        position: reader.error_position() as u64,
                        source,
                    });
                }
            };
            match event {
                Event::Start(start) => {
                    flush_text(&mut stack, &mut text);
                    stack.push(Element::from_start(&start, position)?);
                }
                Event::Empty(start) => {
                    flush_text(&mut stack, &mut text);
                    let mut element = Element::from_start(&start, position)?;
                    element.self_closing = true;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    flush_text(&mut stack, &mut text);
                    let element = stack.pop().ok_or_else(|| {
                        TemplateError::Structure(format!("unexpected end tag at byte {position}"))
                    })?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Text(content) => {
                    if !stack.is_empty() {
                        text.push_str(utf8(&content, position)?);
                    }
                }
                Event::GeneralRef(reference) => {
                    if stack.is_empty() {
                        continue;
                    }
                    let character = reference
                        .resolve_char_ref()
                        .map_err(|source| TemplateError::Xml { position, source })?;
                    if let Some(character) = character {
                        text.push(character);
                    } else {
                        let name = utf8(&reference, position)?;
                        let resolved = resolve_predefined_entity(name)
                            .ok_or_else(|| TemplateError::UnknownEntity(name.to_string()))?;
                        text.push_str(resolved);
                    }
                }
                Event::CData(content) => {
                    flush_text(&mut stack, &mut text);
                    if let Some(parent) = stack.last_mut() {
                        parent.push(Node::CData(utf8(&content, position)?.to_string()));
                    }
                }
                Event::Comment(content) => {
                    flush_text(&mut stack, &mut text);
                    if let Some(parent) = stack.last_mut() {
                        parent.push(Node::Comment(utf8(&content, position)?.to_string()));
                    }
                }
                Event::Eof => break,
                // Declaration, processing instructions and DOCTYPE are not
                // carried over; documents are written with a fixed declaration.
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(TemplateError::Structure(format!(
                "element <{}> is never closed",
                open.name
            )));
        }
        let root = root.ok_or_else(|| TemplateError::Structure("no root element".to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Deep copy to be filled in for one record.
    pub fn instantiate(&self) -> GeneratedDocument {
        GeneratedDocument {
            root: self.root.clone(),
        }
    }

    /// Serializes the unmodified template.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialize(&self.root)
    }
}

/// A per-record copy of the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub(crate) root: Element,
}

impl GeneratedDocument {
    pub fn root(&self) -> &Element {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Writes the document with an XML declaration.
    pub fn write_to<W: Write>(&self, out: W) -> Result<()> {
        write_document(&self.root, out)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serialize(&self.root)
    }
}

fn serialize(root: &Element) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    write_document(root, &mut buffer)?;
    Ok(buffer)
}

fn write_document<W: Write>(root: &Element, out: W) -> Result<()> {
    let mut writer = Writer::new(out);
    emit(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)),
    )?;
    emit(&mut writer, Event::Text(BytesText::from_escaped("\n")))?;
    root.write(&mut writer)
}

fn emit<W: Write>(writer: &mut Writer<W>, event: Event<'_>) -> Result<()> {
    writer
        .write_event(event)
        .map_err(|error| TemplateError::Write(error.to_string()))
}

fn flush_text(stack: &mut [Element], text: &mut String) {
    if text.is_empty() {
        return;
    }
    if let Some(parent) = stack.last_mut() {
        parent.push(Node::Text(std::mem::take(text)));
    } else {
        text.clear();
    }
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.push(Node::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(TemplateError::Structure(format!(
            "second root element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn utf8(bytes: &[u8], position: u64) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|_| TemplateError::Encoding { position })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "<?xml version='1.0' encoding='utf-8'?>\n\
        <Root a=\"1\">\n  <Name>R&amp;D &#x41;</Name>\n  <!-- note -->\n  <Empty/>\n</Root>";

    #[test]
    fn parses_text_with_references() {
        let doc = TemplateDocument::parse(SAMPLE).unwrap();
        assert_eq!(doc.root().name(), "Root");
        assert_eq!(doc.root().child("Name").unwrap().text(), "R&D A");
        assert!(doc.root().child("Empty").unwrap().children().is_empty());
    }

    #[test]
    fn write_preserves_layout() {
        let doc = TemplateDocument::parse(SAMPLE).unwrap();
        let out = String::from_utf8(doc.to_bytes().unwrap()).unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
             <Root a=\"1\">\n  <Name>R&amp;D A</Name>\n  <!-- note -->\n  <Empty/>\n</Root>"
        );
    }

    #[test]
    fn filled_empty_element_gets_end_tag() {
        let doc = TemplateDocument::parse("<Root><value/></Root>").unwrap();
        let mut generated = doc.instantiate();
        generated.root_mut().child_mut("value").unwrap().set_text("5");
        let out = String::from_utf8(generated.to_bytes().unwrap()).unwrap();
        assert!(out.ends_with("<Root><value>5</value></Root>"));
    }

    #[test]
    fn rejects_unknown_entity() {
        let error = TemplateDocument::parse("<Root>&nbsp;</Root>").unwrap_err();
        assert!(matches!(error, TemplateError::UnknownEntity(name) if name == "nbsp"));
    }

    #[test]
    fn rejects_missing_root_and_unclosed() {
        assert!(matches!(
            TemplateDocument::parse("   "),
            Err(TemplateError::Structure(_))
        ));
        assert!(TemplateDocument::parse("<Root><a></Root>").is_err());
        assert!(TemplateDocument::parse("<Root>").is_err());
    }

    #[test]
    fn text_equals_handles_split_text() {
        let doc =
            TemplateDocument::parse("<Root><variable>enmProg|<![CDATA[enmPcb]]></variable><empty/></Root>")
                .unwrap();
        let variable = doc.root().child("variable").unwrap();
        assert_eq!(variable.children().len(), 2);
        assert!(variable.text_equals("enmProg|enmPcb"));
        assert!(!variable.text_equals("enmProg"));
        assert!(doc.root().child("empty").unwrap().text_equals(""));
    }

    #[test]
    fn markup_characters_are_escaped_on_write() {
        let doc = TemplateDocument::parse("<Root><value/></Root>").unwrap();
        let mut generated = doc.instantiate();
        generated
            .root_mut()
            .child_mut("value")
            .unwrap()
            .set_text("A&B <1> \"x\" 'y'");
        let out = String::from_utf8(generated.to_bytes().unwrap()).unwrap();
        assert!(out.ends_with("<value>A&amp;B &lt;1&gt; \"x\" 'y'</value></Root>"));
        let reparsed = TemplateDocument::parse(&out).unwrap();
        assert_eq!(reparsed.root().child("value").unwrap().text(), "A&B <1> \"x\" 'y'");
    }

    #[test]
    fn resolves_predefined_and_numeric_references() {
        let doc = TemplateDocument::parse("<Root>&lt;&gt;&amp;&apos;&quot;&#65;&#x42;</Root>").unwrap();
        assert_eq!(doc.root().text(), "<>&'\"AB");
    }

    #[test]
    fn rejects_invalid_character_reference() {
        let error = TemplateDocument::parse("<Root>&#xZZ;</Root>").unwrap_err();
        assert!(matches!(error, TemplateError::Xml { .. }));
    }
}
