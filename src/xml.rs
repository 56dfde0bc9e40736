//! A small typed XML tree: one half for building outgoing SOAP bodies, one half for
//! reading responses. Kept deliberately minimal rather than pulling in a generic DOM —
//! the wire protocol only ever needs namespace-qualified elements, a handful of
//! unprefixed attributes, and text content.

use quick_xml::events::{BytesDecl, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use quick_xml::writer::Writer;
use thiserror::Error;

use crate::namespaces::prefix_for;

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("xml error: {0}")]
    QuickXml(#[from] quick_xml::Error),
    #[error("xml encoding error: {0}")]
    Encoding(#[from] std::str::Utf8Error),
    #[error("response body was empty")]
    Empty,
}

/// A node being built for an outgoing request.
#[derive(Debug, Clone)]
pub struct Element {
    pub ns: &'static str,
    pub name: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Child>,
}

#[derive(Debug, Clone)]
pub enum Child {
    Element(Element),
    Text(String),
}

impl Element {
    pub fn new(ns: &'static str, name: &'static str) -> Self {
        Element {
            ns,
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(Child::Element(child));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Child::Text(text.into()));
        self
    }

    fn qname(&self) -> String {
        let prefix = prefix_for(self.ns);
        if prefix.is_empty() {
            self.name.to_string()
        } else {
            format!("{}:{}", prefix, self.name)
        }
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>, declare_namespaces: bool) -> Result<(), XmlError> {
        let qname = self.qname();
        let mut start = BytesStart::new(qname.clone());
        if declare_namespaces {
            for ns in [
                crate::namespaces::SOAP_NS,
                crate::namespaces::MESSAGES_NS,
                crate::namespaces::TYPES_NS,
                crate::namespaces::ERRORS_NS,
            ] {
                start.push_attribute((format!("xmlns:{}", prefix_for(ns)).as_str(), ns));
            }
        }
        for (name, value) in &self.attrs {
            let escaped = quick_xml::escape::escape(value);
            start.push_attribute((name.as_str(), escaped.as_ref()));
        }

        if self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        for child in &self.children {
            match child {
                Child::Element(el) => el.write(writer, false)?,
                Child::Text(text) => {
                    writer.write_event(Event::Text(BytesText::new(text)))?;
                }
            }
        }
        writer.write_event(Event::End(quick_xml::events::BytesEnd::new(qname)))?;
        Ok(())
    }

    /// Serializes `self` as a complete document: XML declaration followed by the
    /// element, with all four namespace prefixes declared on the root tag.
    pub fn to_document(&self) -> Result<Vec<u8>, XmlError> {
        let mut writer = Writer::new(Vec::new());
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.write(&mut writer, true)?;
        Ok(writer.into_inner())
    }
}

/// A node parsed from a response, with namespaces resolved via `xmlns` bindings rather
/// than trusting whatever prefix the server happened to use.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub ns: Option<String>,
    pub local_name: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    /// Depth-first search (self included) for the first descendant matching `(ns, local_name)`.
    pub fn find_first(&self, ns: &str, local_name: &str) -> Option<&Node> {
        if self.ns.as_deref() == Some(ns) && self.local_name == local_name {
            return Some(self);
        }
        for child in &self.children {
            if let Some(found) = child.find_first(ns, local_name) {
                return Some(found);
            }
        }
        None
    }

    /// Depth-first search (self included) collecting every descendant matching `(ns, local_name)`.
    pub fn find_all<'a>(&'a self, ns: &str, local_name: &str, out: &mut Vec<&'a Node>) {
        if self.ns.as_deref() == Some(ns) && self.local_name == local_name {
            out.push(self);
        }
        for child in &self.children {
            child.find_all(ns, local_name, out);
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.iter().find(|(k, _)| k == name).map(|(_, v)| v.as_str())
    }
}

fn resolve_ns(result: ResolveResult) -> Option<String> {
    match result {
        ResolveResult::Bound(ns) => std::str::from_utf8(ns.as_ref()).ok().map(str::to_string),
        _ => None,
    }
}

/// Parses a full response body into a tree rooted at the outermost element (typically
/// the SOAP `Envelope`).
pub fn parse(bytes: &[u8]) -> Result<Node, XmlError> {
    let mut reader = NsReader::from_reader(bytes);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Node> = Vec::new();
    let mut root: Option<Node> = None;
    let mut buf = Vec::new();

    loop {
        let (resolved_ns, event) = reader.read_resolved_event_into(&mut buf)?;
        match event {
            Event::Start(start) => {
                let node = build_node(resolved_ns, &start)?;
                stack.push(node);
            }
            Event::Empty(start) => {
                let node = build_node(resolved_ns, &start)?;
                close_node(&mut stack, &mut root, node);
            }
            Event::End(_) => {
                let node = stack.pop().ok_or(XmlError::Empty)?;
                close_node(&mut stack, &mut root, node);
            }
            Event::Text(text) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&text.unescape()?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    root.ok_or(XmlError::Empty)
}

fn close_node(stack: &mut Vec<Node>, root: &mut Option<Node>, node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    } else {
        *root = Some(node);
    }
}

fn build_node(ns: ResolveResult, start: &BytesStart) -> Result<Node, XmlError> {
    let local_name = std::str::from_utf8(start.local_name().as_ref())?.to_string();
    let mut attrs = Vec::new();
    for attr in start.attributes() {
        let attr = attr?;
        let key = std::str::from_utf8(attr.key.local_name().as_ref())?.to_string();
        let value = attr.unescape_value()?.to_string();
        attrs.push((key, value));
    }
    Ok(Node {
        ns: resolve_ns(ns),
        local_name,
        attrs,
        text: String::new(),
        children: Vec::new(),
    })
}
