//! Markup transducer: exported document HTML to MDX body text.
//!
//! Rendering is a recursive walk over [`MarkupNode`]s. Every element kind has
//! a rule; [`ElementKind::Passthrough`] and structural kinds outside their
//! usual parent render their children, so unknown markup is never dropped.
//!
//! Image nodes consult the [`ImageCache`]. A cache miss assigns the filename
//! immediately and records an [`Effect::FetchImage`]; the download itself is
//! left to the caller, which keeps this module free of I/O.

use std::path::Path;

use docsync_core::Effect;

use crate::image_cache::ImageCache;
use crate::links::{unwrap_redirect, video_id};
use crate::markup::{parse_body, Element, ElementKind, ListStyle, MarkupNode};
use crate::table::render_table;

/// Read-only context shared by every node of one document.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    /// Slash-joined folder path plus document slug.
    pub namespace: &'a str,
    /// Public URL prefix for image references, e.g. `/img`.
    pub url_prefix: &'a str,
    /// Local root of the static image tree.
    pub images_dir: &'a Path,
}

impl RenderContext<'_> {
    pub fn image_url(&self, filename: &str) -> String {
        let prefix = self.url_prefix.trim_end_matches('/');
        format!("{prefix}/{}/{filename}", self.namespace)
    }

    pub fn image_path(&self, filename: &str) -> std::path::PathBuf {
        let mut path = self.images_dir.to_path_buf();
        path.extend(self.namespace.split('/').filter(|s| !s.is_empty()));
        path.push(filename);
        path
    }
}

/// Converted body text plus the downloads it requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub markup: String,
    pub effects: Vec<Effect>,
}

pub struct Transducer<'a> {
    ctx: RenderContext<'a>,
    cache: &'a mut ImageCache,
    effects: Vec<Effect>,
}

impl<'a> Transducer<'a> {
    pub fn new(ctx: RenderContext<'a>, cache: &'a mut ImageCache) -> Self {
        Self {
            ctx,
            cache,
            effects: Vec::new(),
        }
    }

    /// Renders a single node and its subtree.
    pub fn render(&mut self, node: &MarkupNode) -> String {
        match node {
            MarkupNode::Text(text) => text.replace('\n', "\n\n"),
            MarkupNode::Element(element) => self.render_element(element),
        }
    }

    pub fn into_effects(self) -> Vec<Effect> {
        self.effects
    }

    fn render_element(&mut self, element: &Element) -> String {
        match &element.kind {
            ElementKind::Heading(level) => {
                let hashes = "#".repeat(usize::from(*level));
                format!("{hashes} {}\n\n", element.text_content().trim())
            }
            ElementKind::Paragraph => format!("{}\n\n", self.render_children(element)),
            ElementKind::LineBreak => "\n".to_string(),
            ElementKind::Quote => format!("> {}\n\n", element.text_content().trim()),
            ElementKind::List(style) => self.render_list(element, *style),
            ElementKind::Table => format!("{}\n", render_table(element)),
            ElementKind::Image { src, alt } => self.render_image(src, alt),
            ElementKind::Link { href } => self.render_link(element, href.as_deref()),
            ElementKind::Bold => format!("**{}**", self.render_children(element)),
            ElementKind::Italic => format!("*{}*", self.render_children(element)),
            ElementKind::ColorSpan { color } => format!(
                "<ColorText color=\"{color}\">{}</ColorText>",
                self.render_children(element)
            ),
            ElementKind::ListItem
            | ElementKind::TableRow
            | ElementKind::TableCell
            | ElementKind::Passthrough => self.render_children(element),
        }
    }

    fn render_children(&mut self, element: &Element) -> String {
        element
            .children
            .iter()
            .map(|child| self.render(child))
            .collect()
    }

    fn render_list(&mut self, list: &Element, style: ListStyle) -> String {
        let mut out = String::new();
        for (idx, item) in list.child_elements(&ElementKind::ListItem).enumerate() {
            match style {
                ListStyle::Unordered => out.push_str("- "),
                ListStyle::Ordered => out.push_str(&format!("{}. ", idx + 1)),
            }
            out.push_str(&self.render_children(item));
            out.push('\n');
        }
        out.push('\n');
        out
    }

    fn render_image(&mut self, src: &str, alt: &str) -> String {
        if src.is_empty() {
            return String::new();
        }
        let assignment = self.cache.lookup_or_assign(src);
        if assignment.is_new {
            self.effects.push(Effect::FetchImage {
                url: src.to_string(),
                target: self.ctx.image_path(&assignment.filename),
            });
        }
        format!("![{alt}]({})\n\n", self.ctx.image_url(&assignment.filename))
    }

    fn render_link(&mut self, element: &Element, href: Option<&str>) -> String {
        let target = unwrap_redirect(href.unwrap_or("#"));
        if let Some(id) = video_id(&target) {
            return format!("<VideoPlayer src=\"{id}\" />\n\n");
        }
        format!("[{}]({target})", element.text_content().trim())
    }
}

/// Converts every top-level body element of `html`; empty outputs are dropped
/// and the rest joined with a newline.
pub fn convert_document(html: &str, ctx: RenderContext<'_>, cache: &mut ImageCache) -> Conversion {
    let nodes = parse_body(html);
    let mut transducer = Transducer::new(ctx, cache);
    let parts: Vec<String> = nodes
        .iter()
        .map(|node| transducer.render(node))
        .filter(|part| !part.is_empty())
        .collect();

    Conversion {
        markup: parts.join("\n"),
        effects: transducer.into_effects(),
    }
}
