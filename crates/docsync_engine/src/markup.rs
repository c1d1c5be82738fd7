//! Owned parse tree over the element vocabulary of an exported document.
//!
//! The exported HTML is parsed once with `scraper`, then every element is
//! classified into an [`ElementKind`]. Anything outside the recognized
//! vocabulary becomes [`ElementKind::Passthrough`] so that rendering stays a
//! total function: unknown wrappers render their children.

use std::sync::OnceLock;

use ego_tree::NodeRef;
use regex::Regex;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStyle {
    Unordered,
    Ordered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// `h1`..`h6`; the payload is the level.
    Heading(u8),
    Paragraph,
    LineBreak,
    Quote,
    List(ListStyle),
    ListItem,
    Table,
    TableRow,
    TableCell,
    Image { src: String, alt: String },
    Link { href: Option<String> },
    Bold,
    Italic,
    /// A `span` whose inline style declares a text color.
    ColorSpan { color: String },
    Passthrough,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    pub children: Vec<MarkupNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupNode {
    Text(String),
    Element(Element),
}

impl MarkupNode {
    /// Concatenation of all descendant text.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            MarkupNode::Text(text) => out.push_str(text),
            MarkupNode::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            MarkupNode::Element(element) => Some(element),
            MarkupNode::Text(_) => None,
        }
    }
}

impl Element {
    pub fn text_content(&self) -> String {
        self.children.iter().map(MarkupNode::text_content).collect()
    }

    /// Direct element children of the given kind, in document order.
    pub fn child_elements<'a>(
        &'a self,
        kind: &'a ElementKind,
    ) -> impl Iterator<Item = &'a Element> + 'a {
        self.children
            .iter()
            .filter_map(MarkupNode::as_element)
            .filter(move |element| &element.kind == kind)
    }

    /// Descendant elements of the given kind in document order, not
    /// descending into matches.
    pub fn descendants_of_kind<'a>(&'a self, kind: &ElementKind) -> Vec<&'a Element> {
        let mut found = Vec::new();
        collect_kind(&self.children, kind, &mut found);
        found
    }
}

fn collect_kind<'a>(nodes: &'a [MarkupNode], kind: &ElementKind, found: &mut Vec<&'a Element>) {
    for element in nodes.iter().filter_map(MarkupNode::as_element) {
        if &element.kind == kind {
            found.push(element);
        } else {
            collect_kind(&element.children, kind, found);
        }
    }
}

/// Parses a full HTML document and returns the element children of `<body>`.
///
/// Top-level text between blocks is not part of the result.
pub fn parse_body(html: &str) -> Vec<MarkupNode> {
    let document = Html::parse_document(html);
    let Some(body) = Selector::parse("body")
        .ok()
        .and_then(|sel| document.select(&sel).next())
    else {
        return Vec::new();
    };

    body.children()
        .filter_map(|child| ElementRef::wrap(child).map(build_element))
        .map(MarkupNode::Element)
        .collect()
}

/// Parses an HTML fragment into markup nodes, keeping top-level text.
pub fn parse_fragment(html: &str) -> Vec<MarkupNode> {
    let fragment = Html::parse_fragment(html);
    fragment
        .root_element()
        .children()
        .filter_map(build_node)
        .collect()
}

fn build_node(node: NodeRef<'_, Node>) -> Option<MarkupNode> {
    match node.value() {
        Node::Text(text) => Some(MarkupNode::Text(text.to_string())),
        Node::Element(_) => ElementRef::wrap(node).map(|e| MarkupNode::Element(build_element(e))),
        // Comments, doctypes and processing instructions carry no content.
        _ => None,
    }
}

fn build_element(element: ElementRef<'_>) -> Element {
    Element {
        kind: classify(element),
        children: element.children().filter_map(build_node).collect(),
    }
}

fn classify(element: ElementRef<'_>) -> ElementKind {
    let value = element.value();
    let tag = value.name().to_ascii_lowercase();
    match tag.as_str() {
        "h1" => ElementKind::Heading(1),
        "h2" => ElementKind::Heading(2),
        "h3" => ElementKind::Heading(3),
        "h4" => ElementKind::Heading(4),
        "h5" => ElementKind::Heading(5),
        "h6" => ElementKind::Heading(6),
        "p" => ElementKind::Paragraph,
        "br" => ElementKind::LineBreak,
        "blockquote" => ElementKind::Quote,
        "ul" => ElementKind::List(ListStyle::Unordered),
        "ol" => ElementKind::List(ListStyle::Ordered),
        "li" => ElementKind::ListItem,
        "table" => ElementKind::Table,
        "tr" => ElementKind::TableRow,
        "td" | "th" => ElementKind::TableCell,
        "img" => ElementKind::Image {
            src: value.attr("src").unwrap_or_default().to_string(),
            alt: value.attr("alt").unwrap_or_default().to_string(),
        },
        "a" => ElementKind::Link {
            href: value.attr("href").map(str::to_string),
        },
        "strong" | "b" => ElementKind::Bold,
        "em" | "i" => ElementKind::Italic,
        "span" => value
            .attr("style")
            .and_then(color_from_style)
            .map(|color| ElementKind::ColorSpan { color })
            .unwrap_or(ElementKind::Passthrough),
        _ => ElementKind::Passthrough,
    }
}

/// Extracts the value of a `color` declaration from an inline style.
///
/// Only a standalone `color` property counts; `background-color` and other
/// properties ending in `color` are ignored.
pub fn color_from_style(style: &str) -> Option<String> {
    static COLOR_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    let regex = COLOR_REGEX
        .get_or_init(|| Regex::new(r"(?i)(?:^|;)\s*color\s*:\s*([^;]+)").ok())
        .as_ref()?;

    regex
        .captures(style)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|color| !color.is_empty())
}
