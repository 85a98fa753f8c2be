//! A small in-memory HTML tree and its serializer. Pages are assembled
//! completely as a [`Document`] before anything touches the disk.
//!
//! Text and attribute values are escaped with [`pulldown_cmark`]'s escaping
//! routines; `href` and `src` values go through [`escape_href`] so that
//! already percent-encoded links are left intact. [`Node::Raw`] is written
//! verbatim and is how transcluded SVG markup, license notices, and spliced
//! sequences enter a page.

use pulldown_cmark::escape::{escape_href, escape_html, StrWrite};
use std::io;

// Elements that have no closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node of the document tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Element(Element),

    /// Text that is escaped on output.
    Text(String),

    /// Markup that is written as-is.
    Raw(String),
}

/// An element with its attributes (in insertion order) and children.
#[derive(Clone, Debug, PartialEq)]
pub struct Element {
    pub name: &'static str,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: &'static str) -> Self {
        Element {
            name,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn raw(self, markup: impl Into<String>) -> Self {
        self.child(Node::Raw(markup.into()))
    }

    /// Returns the value of the first attribute called `name`.
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Node {
        Node::Element(element)
    }
}

/// Shorthand for [`Element::new`].
pub fn el(name: &'static str) -> Element {
    Element::new(name)
}

/// A complete HTML document.
#[derive(Clone, Debug, Default)]
pub struct Document {
    pub lang: String,
    pub title: String,
    pub head: Vec<Node>,
    pub body: Vec<Node>,
}

impl Document {
    pub fn new(lang: &str, title: &str) -> Self {
        Document {
            lang: lang.to_owned(),
            title: title.to_owned(),
            head: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Serializes the document.
    pub fn render(&self) -> io::Result<String> {
        let mut out = String::new();
        self.write_to(&mut out)?;
        Ok(out)
    }

    pub fn write_to<W: StrWrite>(&self, w: &mut W) -> io::Result<()> {
        w.write_str("<!DOCTYPE html>\n<html lang=\"")?;
        escape_html(&mut *w, &self.lang)?;
        w.write_str("\">\n<head>\n<title>")?;
        escape_html(&mut *w, &self.title)?;
        w.write_str("</title>\n")?;
        for node in &self.head {
            write_node(w, node)?;
            w.write_str("\n")?;
        }
        w.write_str("</head>\n<body>\n")?;
        for node in &self.body {
            write_node(w, node)?;
            w.write_str("\n")?;
        }
        w.write_str("</body>\n</html>\n")
    }
}

fn write_node<W: StrWrite>(w: &mut W, node: &Node) -> io::Result<()> {
    match node {
        Node::Element(element) => write_element(w, element),
        Node::Text(text) => escape_html(&mut *w, text),
        Node::Raw(markup) => w.write_str(markup),
    }
}

fn write_element<W: StrWrite>(w: &mut W, element: &Element) -> io::Result<()> {
    write!(w, "<{}", element.name)?;
    for (name, value) in &element.attrs {
        write!(w, " {}=\"", name)?;
        match *name {
            "href" | "src" => escape_href(&mut *w, value)?,
            _ => escape_html(&mut *w, value)?,
        }
        w.write_str("\"")?;
    }
    w.write_str(">")?;
    if VOID_ELEMENTS.contains(&element.name) {
        return Ok(());
    }
    for child in &element.children {
        write_node(w, child)?;
    }
    write!(w, "</{}>", element.name)
}

/// Collects every element called `name` in `nodes`, depth first.
pub fn find_all<'a>(nodes: &'a [Node], name: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    let mut stack: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        if let Node::Element(element) = node {
            if element.name == name {
                found.push(element);
            }
            stack.extend(element.children.iter().rev());
        }
    }
    found
}
