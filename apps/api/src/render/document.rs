use serde::Serialize;

use crate::render::rules::{ElementKind, RuleSet};

/// A rendered recommendation document: a tree of styled elements and text.
/// Text is stored unescaped; escaping happens on HTML output.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub nodes: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Element(Element),
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Element {
    pub kind: ElementKind,
    /// 0-based position among sibling rows, for table rows only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<usize>,
    /// Item number inside an ordered list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            row_index: None,
            ordinal: None,
            href: None,
            children: Vec::new(),
        }
    }

    /// Concatenated text of all descendants.
    #[cfg(test)]
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out.trim().to_string()
    }

    /// Direct child elements, skipping text nodes.
    #[cfg(test)]
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    #[cfg(test)]
    pub fn find_all(&self, kind: ElementKind) -> Vec<&Element> {
        let mut found = Vec::new();
        find_in(&self.children, kind, &mut found);
        found
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    #[cfg(test)]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            Node::Text { .. } => None,
        }
    }
}

impl Document {
    /// Every element of `kind`, in document order.
    #[cfg(test)]
    pub fn find_all(&self, kind: ElementKind) -> Vec<&Element> {
        let mut found = Vec::new();
        find_in(&self.nodes, kind, &mut found);
        found
    }

    /// Text content with one line per block.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.nodes, &mut out);
        out.trim().to_string()
    }

    pub fn to_html(&self) -> String {
        self.to_html_with(RuleSet::standard())
    }

    pub fn to_html_with(&self, rules: &RuleSet) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_node(node, rules, &mut out);
        }
        out
    }
}

#[cfg(test)]
fn find_in<'a>(nodes: &'a [Node], kind: ElementKind, found: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.kind == kind {
                found.push(element);
            }
            find_in(&element.children, kind, found);
        }
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text { text } => out.push_str(text),
            Node::Element(element) => match element.kind {
                ElementKind::LineBreak => out.push('\n'),
                ElementKind::Rule => {}
                kind => {
                    collect_text(&element.children, out);
                    if kind.is_block() && !out.ends_with('\n') {
                        out.push('\n');
                    } else if matches!(
                        kind,
                        ElementKind::TableCell | ElementKind::TableHeaderCell
                    ) {
                        out.push('\t');
                    }
                }
            },
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// HTML output
// ────────────────────────────────────────────────────────────────────────────

fn write_node(node: &Node, rules: &RuleSet, out: &mut String) {
    match node {
        Node::Text { text } => escape_html(text, out),
        Node::Element(element) => write_element(element, rules, out),
    }
}

fn write_element(element: &Element, rules: &RuleSet, out: &mut String) {
    let rule = rules.get(element.kind);

    if let Some(container) = rule.container {
        open_tag(container.tag, container.class, out);
    }

    let class = rule.class_for_row(element.row_index);
    out.push('<');
    out.push_str(rule.tag);
    if !class.is_empty() {
        out.push_str(" class=\"");
        out.push_str(class);
        out.push('"');
    }
    if let Some(href) = &element.href {
        out.push_str(" href=\"");
        escape_html(href, out);
        out.push_str("\" rel=\"noopener noreferrer nofollow\"");
    }
    out.push('>');

    if !rule.void {
        match rule.marker {
            Some(marker) => {
                open_tag("span", marker.class, out);
                match element.ordinal {
                    Some(n) => out.push_str(&format!("{n}.")),
                    None => out.push_str(marker.glyph),
                }
                out.push_str("</span><span>");
                for child in &element.children {
                    write_node(child, rules, out);
                }
                out.push_str("</span>");
            }
            None => {
                for child in &element.children {
                    write_node(child, rules, out);
                }
            }
        }
        close_tag(rule.tag, out);
    }

    if let Some(container) = rule.container {
        close_tag(container.tag, out);
    }
}

fn open_tag(tag: &str, class: &str, out: &mut String) {
    out.push('<');
    out.push_str(tag);
    if !class.is_empty() {
        out.push_str(" class=\"");
        out.push_str(class);
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(text: &str) -> Node {
        let mut p = Element::new(ElementKind::Paragraph);
        p.children.push(Node::text(text));
        Node::Element(p)
    }

    #[test]
    fn test_text_is_escaped() {
        let doc = Document {
            nodes: vec![paragraph("<b>\"x\" & 'y'</b>")],
        };
        assert_eq!(
            doc.to_html(),
            "<p class=\"mb-3 text-gray-700 leading-relaxed\">&lt;b&gt;&quot;x&quot; &amp; &#39;y&#39;&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn test_void_element_has_no_closing_tag() {
        let doc = Document {
            nodes: vec![Node::Element(Element::new(ElementKind::LineBreak))],
        };
        assert_eq!(doc.to_html(), "<br>");
    }

    #[test]
    fn test_ordered_item_shows_ordinal_instead_of_checkmark() {
        let mut item = Element::new(ElementKind::ListItem);
        item.ordinal = Some(2);
        item.children.push(Node::text("Start the backend"));
        let html = Document {
            nodes: vec![Node::Element(item)],
        }
        .to_html();
        assert!(html.contains(">2.</span>"));
        assert!(!html.contains('✓'));
    }

    #[test]
    fn test_plain_text_separates_blocks() {
        let doc = Document {
            nodes: vec![paragraph("one"), paragraph("two")],
        };
        assert_eq!(doc.plain_text(), "one\ntwo");
    }

    #[test]
    fn test_serializes_with_type_tag() {
        let doc = Document {
            nodes: vec![paragraph("hi")],
        };
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value["nodes"][0]["type"], "element");
        assert_eq!(value["nodes"][0]["kind"], "paragraph");
        assert_eq!(value["nodes"][0]["children"][0]["text"], "hi");
    }
}
