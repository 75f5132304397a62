//! Markdown Rendering Policy — turns backend-authored markdown (or the
//! fallback template) into a styled `Document`.
//!
//! Rendering is total: every input produces a document. Constructs without a
//! rule degrade to their text, and raw HTML is kept as literal text.

pub mod document;
pub mod rules;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::render::document::{Document, Element, Node};
use crate::render::rules::ElementKind;

/// Deepest element nesting kept in a document. Tags opened below this depth
/// are transparent, so their text lands in the deepest kept ancestor.
pub const MAX_DEPTH: usize = 64;

/// Parses `content` as markdown with tables and builds the styled document.
pub fn render(content: &str) -> Document {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut builder = TreeBuilder::default();
    for event in Parser::new_ext(content, options) {
        builder.push(event);
    }
    builder.finish()
}

/// Convenience for callers that only need markup.
pub fn render_html(content: &str) -> String {
    render(content).to_html()
}

/// Targets that may become anchors. Anything else renders as its link text.
fn is_safe_href(href: &str) -> bool {
    let href = href.trim();
    let scheme_end = href.find(':');
    let path_start = href.find(['/', '?', '#']);
    match (scheme_end, path_start) {
        (None, _) => true,
        (Some(colon), Some(path)) if path < colon => true,
        (Some(colon), _) => {
            let scheme = href[..colon].to_ascii_lowercase();
            matches!(scheme.as_str(), "http" | "https" | "mailto")
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Event stream → tree
// ────────────────────────────────────────────────────────────────────────────

/// One open tag. A frame with no element is transparent: its children are
/// spliced into the parent when it closes.
#[derive(Default)]
struct Frame {
    element: Option<Element>,
    children: Vec<Node>,
    next_ordinal: Option<u64>,
}

impl Frame {
    fn element(element: Element) -> Self {
        Self {
            element: Some(element),
            ..Self::default()
        }
    }

    fn kind(&self) -> Option<ElementKind> {
        self.element.as_ref().map(|e| e.kind)
    }
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    stack: Vec<Frame>,
    in_table_head: bool,
}

impl TreeBuilder {
    fn push(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(end) => self.end(end),
            Event::Text(text) => self.push_text(&text),
            Event::Code(code) => {
                let mut element = Element::new(ElementKind::InlineCode);
                element.children.push(Node::text(code.to_string()));
                self.push_node(Node::Element(element));
            }
            // Raw HTML is never passed through.
            Event::Html(html) | Event::InlineHtml(html) => self.push_text(&html),
            Event::SoftBreak => self.push_text("\n"),
            Event::HardBreak => self.push_node(Node::Element(Element::new(ElementKind::LineBreak))),
            Event::Rule => self.push_node(Node::Element(Element::new(ElementKind::Rule))),
            Event::TaskListMarker(checked) => self.push_text(if checked { "[x] " } else { "[ ] " }),
            Event::FootnoteReference(label) => self.push_text(&format!("[^{label}]")),
            Event::InlineMath(math) | Event::DisplayMath(math) => self.push_text(&math),
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        if self.stack.len() >= MAX_DEPTH {
            self.stack.push(Frame::default());
            return;
        }
        let frame = match tag {
            Tag::Paragraph | Tag::HtmlBlock => Frame::element(Element::new(ElementKind::Paragraph)),
            Tag::Heading { level, .. } => Frame::element(Element::new(match level {
                HeadingLevel::H1 => ElementKind::Heading1,
                HeadingLevel::H2 => ElementKind::Heading2,
                HeadingLevel::H3 => ElementKind::Heading3,
                _ => ElementKind::Paragraph,
            })),
            Tag::BlockQuote(_) => Frame::element(Element::new(ElementKind::Blockquote)),
            Tag::CodeBlock(_) => Frame::element(Element::new(ElementKind::CodeBlock)),
            Tag::List(None) => Frame::element(Element::new(ElementKind::UnorderedList)),
            Tag::List(Some(start)) => Frame {
                next_ordinal: Some(start),
                ..Frame::element(Element::new(ElementKind::OrderedList))
            },
            Tag::Item => {
                let mut item = Element::new(ElementKind::ListItem);
                if let Some(parent) = self.stack.last_mut() {
                    if let Some(n) = parent.next_ordinal.as_mut() {
                        item.ordinal = Some(*n);
                        *n += 1;
                    }
                }
                Frame::element(item)
            }
            Tag::Table(_) => Frame::element(Element::new(ElementKind::Table)),
            Tag::TableHead => {
                self.in_table_head = true;
                Frame::element(Element::new(ElementKind::TableHead))
            }
            Tag::TableRow => {
                if self.stack.last().and_then(Frame::kind) == Some(ElementKind::Table) {
                    self.stack
                        .push(Frame::element(Element::new(ElementKind::TableBody)));
                }
                let index = self.stack.last().map_or(0, |f| f.children.len());
                let mut row = Element::new(ElementKind::TableRow);
                row.row_index = Some(index);
                Frame::element(row)
            }
            Tag::TableCell => Frame::element(Element::new(if self.in_table_head {
                ElementKind::TableHeaderCell
            } else {
                ElementKind::TableCell
            })),
            Tag::Emphasis => Frame::element(Element::new(ElementKind::Emphasis)),
            Tag::Strong => Frame::element(Element::new(ElementKind::Strong)),
            Tag::Strikethrough => Frame::element(Element::new(ElementKind::Strikethrough)),
            Tag::Link { dest_url, .. } if is_safe_href(&dest_url) => {
                let mut link = Element::new(ElementKind::Link);
                link.href = Some(dest_url.to_string());
                Frame::element(link)
            }
            // Unsafe links, images, footnotes, metadata: keep only the text.
            _ => Frame::default(),
        };
        self.stack.push(frame);
    }

    fn end(&mut self, end: TagEnd) {
        match end {
            TagEnd::TableHead => {
                self.in_table_head = false;
                // The head's cells arrive without a row; give them one.
                if let Some(head) = self.stack.last_mut() {
                    let mut row = Element::new(ElementKind::TableRow);
                    row.row_index = Some(0);
                    row.children = std::mem::take(&mut head.children);
                    head.children.push(Node::Element(row));
                }
                self.close();
            }
            TagEnd::Table => {
                if self.stack.last().and_then(Frame::kind) == Some(ElementKind::TableBody) {
                    self.close();
                }
                self.close();
            }
            _ => self.close(),
        }
    }

    fn close(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        match frame.element {
            Some(mut element) => {
                element.children = frame.children;
                self.push_node(Node::Element(element));
            }
            None => {
                for child in frame.children {
                    self.push_node(child);
                }
            }
        }
    }

    fn siblings(&mut self) -> &mut Vec<Node> {
        match self.stack.last_mut() {
            Some(frame) => &mut frame.children,
            None => &mut self.root,
        }
    }

    fn push_node(&mut self, node: Node) {
        if let Node::Text { text } = &node {
            self.push_text(text);
            return;
        }
        self.siblings().push(node);
    }

    /// Adjacent text runs are merged into one node.
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let siblings = self.siblings();
        if let Some(Node::Text { text: last }) = siblings.last_mut() {
            last.push_str(text);
        } else {
            siblings.push(Node::text(text));
        }
    }

    fn finish(mut self) -> Document {
        while !self.stack.is_empty() {
            self.close();
        }
        Document { nodes: self.root }
    }
}
