//! Generic XML tree for message flow diagram files
//!
//! The reader knows nothing about flows: it turns the file into named
//! elements with ordered attributes and nested children. Interpreting the
//! tree is left to [`crate::extract`].

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error while reading a diagram file
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML parse error at line {line}: {message}")]
    Xml { line: usize, message: String },

    #[error("Invalid document: {0}")]
    Invalid(String),
}

/// An element of the diagram tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Qualified element name as written (e.g. `ecore:EPackage`, `nodes`)
    pub name: String,
    /// Attributes in document order; keys are unique
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl Element {
    pub fn new(name: &str, line: usize, column: usize) -> Self {
        Self {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            line,
            column,
        }
    }

    /// Builder-style attribute setter, mostly for tests
    pub fn with_attribute(mut self, key: &str, value: &str) -> Self {
        self.attributes.push((key.to_string(), value.to_string()));
        self
    }

    /// Builder-style child setter, mostly for tests
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Element name without its namespace prefix
    pub fn local_name(&self) -> &str {
        self.name
            .rsplit_once(':')
            .map_or(self.name.as_str(), |(_, local)| local)
    }

    /// Get an attribute value by its qualified key
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Direct children with the given local name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.local_name() == name)
    }

    /// First direct child with the given local name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.local_name() == name)
    }

    /// Depth-first, pre-order traversal starting with this element
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants { stack: vec![self] }
    }
}

/// Iterator returned by [`Element::descendants`]
pub struct Descendants<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        let element = self.stack.pop()?;
        self.stack.extend(element.children.iter().rev());
        Some(element)
    }
}

/// A parsed diagram file
#[derive(Debug, Clone)]
pub struct DiagramDocument {
    path: PathBuf,
    root: Element,
}

impl DiagramDocument {
    /// Read and parse a diagram file
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, path)
    }

    /// Parse diagram content; `path` is kept as context only
    pub fn parse(content: &str, path: &Path) -> Result<Self, ParseError> {
        let root = parse_tree(content)?;
        Ok(Self {
            path: path.to_path_buf(),
            root,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

/// Byte offset to line/column lookup
struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    fn new(content: &str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { starts }
    }

    fn position(&self, offset: usize) -> (usize, usize) {
        let line = self.starts.partition_point(|&start| start <= offset);
        let line_start = self.starts.get(line.saturating_sub(1)).copied().unwrap_or(0);
        (line.max(1), offset - line_start + 1)
    }
}

fn parse_tree(content: &str) -> Result<Element, ParseError> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let index = LineIndex::new(content);
    let xml_error = |offset: u64, message: &dyn fmt::Display| ParseError::Xml {
        line: index.position(offset as usize).0,
        message: message.to_string(),
    };

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                // `<` + name/attributes + `>`
                let start = (reader.buffer_position() as usize).saturating_sub(e.len() + 2);
                let element = open_element(&e, index.position(start))
                    .map_err(|message| xml_error(start as u64, &message))?;
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                // `<` + name/attributes + `/>`
                let start = (reader.buffer_position() as usize).saturating_sub(e.len() + 3);
                let element = open_element(&e, index.position(start))
                    .map_err(|message| xml_error(start as u64, &message))?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::End(_)) => {
                let element = stack.pop().ok_or_else(|| {
                    xml_error(reader.buffer_position(), &"unexpected closing tag")
                })?;
                attach(element, &mut stack, &mut root)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => return Err(xml_error(reader.error_position(), &e)),
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Invalid(format!(
            "element <{}> opened at line {} is never closed",
            open.name, open.line
        )));
    }

    root.ok_or_else(|| ParseError::Invalid("document has no root element".to_string()))
}

fn open_element(e: &BytesStart<'_>, (line, column): (usize, usize)) -> Result<Element, String> {
    let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut element = Element::new(&name, line, column);

    for attr in e.attributes() {
        let attr = attr.map_err(|err| err.to_string())?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().map_err(|err| err.to_string())?;
        element.attributes.push((key, value.into_owned()));
    }

    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), ParseError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Invalid(format!(
            "second root element <{}> at line {}",
            element.name, element.line
        )));
    }
    *root = Some(element);
    Ok(())
}
