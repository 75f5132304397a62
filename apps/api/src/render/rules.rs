//! The closed table of per-element rendering rules.
//!
//! The walker in `render::document` never branches on element kind for
//! styling; it looks the kind up here and applies whatever the rule says.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    UnorderedList,
    OrderedList,
    ListItem,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    Blockquote,
    Strong,
    Emphasis,
    Strikethrough,
    InlineCode,
    CodeBlock,
    Link,
    Rule,
    LineBreak,
}

impl ElementKind {
    #[cfg(test)]
    pub const ALL: [ElementKind; 22] = [
        ElementKind::Heading1,
        ElementKind::Heading2,
        ElementKind::Heading3,
        ElementKind::Paragraph,
        ElementKind::UnorderedList,
        ElementKind::OrderedList,
        ElementKind::ListItem,
        ElementKind::Table,
        ElementKind::TableHead,
        ElementKind::TableBody,
        ElementKind::TableRow,
        ElementKind::TableHeaderCell,
        ElementKind::TableCell,
        ElementKind::Blockquote,
        ElementKind::Strong,
        ElementKind::Emphasis,
        ElementKind::Strikethrough,
        ElementKind::InlineCode,
        ElementKind::CodeBlock,
        ElementKind::Link,
        ElementKind::Rule,
        ElementKind::LineBreak,
    ];

    /// Block-level kinds end a line in plain-text extraction.
    pub fn is_block(self) -> bool {
        !matches!(
            self,
            ElementKind::Strong
                | ElementKind::Emphasis
                | ElementKind::Strikethrough
                | ElementKind::InlineCode
                | ElementKind::Link
                | ElementKind::TableHeaderCell
                | ElementKind::TableCell
        )
    }
}

/// Outer element wrapped around the rendered element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Container {
    pub tag: &'static str,
    pub class: &'static str,
}

/// Glyph shown in place of the source marker; the element's content is
/// wrapped in a `<span>` after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub glyph: &'static str,
    pub class: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRule {
    pub tag: &'static str,
    pub class: &'static str,
    /// Class for odd-indexed rows; `class` applies to even ones.
    pub alternate_class: Option<&'static str>,
    pub container: Option<Container>,
    pub marker: Option<Marker>,
    /// Void elements have no children and no closing tag.
    pub void: bool,
}

impl RenderRule {
    const fn new(tag: &'static str, class: &'static str) -> Self {
        Self {
            tag,
            class,
            alternate_class: None,
            container: None,
            marker: None,
            void: false,
        }
    }

    const fn alternating(mut self, odd_class: &'static str) -> Self {
        self.alternate_class = Some(odd_class);
        self
    }

    const fn contained(mut self, tag: &'static str, class: &'static str) -> Self {
        self.container = Some(Container { tag, class });
        self
    }

    const fn marked(mut self, glyph: &'static str, class: &'static str) -> Self {
        self.marker = Some(Marker { glyph, class });
        self
    }

    const fn void(mut self) -> Self {
        self.void = true;
        self
    }

    /// Class for an element at `row_index` among its sibling rows.
    pub fn class_for_row(&self, row_index: Option<usize>) -> &'static str {
        match (row_index, self.alternate_class) {
            (Some(i), Some(odd)) if i % 2 == 1 => odd,
            _ => self.class,
        }
    }
}

const STANDARD_RULES: &[(ElementKind, RenderRule)] = &[
    (
        ElementKind::Heading1,
        RenderRule::new("h1", "text-3xl font-bold mb-4 text-blue-600"),
    ),
    (
        ElementKind::Heading2,
        RenderRule::new("h2", "text-2xl font-bold mb-3 mt-6 text-blue-700"),
    ),
    (
        ElementKind::Heading3,
        RenderRule::new("h3", "text-xl font-semibold mb-2 mt-4 text-teal-600"),
    ),
    (
        ElementKind::Paragraph,
        RenderRule::new("p", "mb-3 text-gray-700 leading-relaxed"),
    ),
    (
        ElementKind::UnorderedList,
        RenderRule::new("ul", "list-none space-y-2 mb-4"),
    ),
    (
        ElementKind::OrderedList,
        RenderRule::new("ol", "list-none space-y-2 mb-4"),
    ),
    (
        ElementKind::ListItem,
        RenderRule::new("li", "flex items-start gap-2").marked("✓", "text-green-500 mt-1"),
    ),
    (
        ElementKind::Table,
        RenderRule::new(
            "table",
            "min-w-full border-collapse border border-gray-300 shadow-md",
        )
        .contained("div", "overflow-x-auto my-6"),
    ),
    (
        ElementKind::TableHead,
        RenderRule::new("thead", "bg-gradient-to-r from-blue-600 to-teal-600 text-white"),
    ),
    (ElementKind::TableBody, RenderRule::new("tbody", "")),
    (
        ElementKind::TableRow,
        RenderRule::new("tr", "bg-gray-50").alternating("bg-white"),
    ),
    (
        ElementKind::TableHeaderCell,
        RenderRule::new("th", "border border-gray-300 px-4 py-3 text-left font-semibold"),
    ),
    (
        ElementKind::TableCell,
        RenderRule::new("td", "border border-gray-300 px-4 py-3"),
    ),
    (
        ElementKind::Blockquote,
        RenderRule::new(
            "blockquote",
            "border-l-4 border-blue-500 pl-4 italic bg-blue-50 py-2 my-4",
        ),
    ),
    (
        ElementKind::Strong,
        RenderRule::new("strong", "font-bold text-blue-700"),
    ),
    (ElementKind::Emphasis, RenderRule::new("em", "italic")),
    (ElementKind::Strikethrough, RenderRule::new("del", "line-through")),
    (
        ElementKind::InlineCode,
        RenderRule::new("code", "bg-gray-100 px-2 py-1 rounded text-sm font-mono"),
    ),
    (
        ElementKind::CodeBlock,
        RenderRule::new("code", "font-mono text-sm").contained(
            "pre",
            "bg-gray-100 rounded p-4 my-4 overflow-x-auto",
        ),
    ),
    (
        ElementKind::Link,
        RenderRule::new("a", "text-blue-600 underline"),
    ),
    (ElementKind::Rule, RenderRule::new("hr", "my-6 border-gray-200").void()),
    (ElementKind::LineBreak, RenderRule::new("br", "").void()),
];

/// Used for any kind missing from a rule set: an unstyled span.
const PLAIN_RULE: RenderRule = RenderRule::new("span", "");

/// Immutable mapping from element kind to rendering rule.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: HashMap<ElementKind, RenderRule>,
}

impl RuleSet {
    pub fn from_rules(rules: &[(ElementKind, RenderRule)]) -> Self {
        Self {
            rules: rules.iter().copied().collect(),
        }
    }

    /// The shared standard rule set.
    pub fn standard() -> &'static RuleSet {
        static STANDARD: OnceLock<RuleSet> = OnceLock::new();
        STANDARD.get_or_init(|| RuleSet::from_rules(STANDARD_RULES))
    }

    pub fn get(&self, kind: ElementKind) -> &RenderRule {
        self.rules.get(&kind).unwrap_or(&PLAIN_RULE)
    }

    #[cfg(test)]
    pub fn contains(&self, kind: ElementKind) -> bool {
        self.rules.contains_key(&kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set_covers_every_kind() {
        let rules = RuleSet::standard();
        for kind in ElementKind::ALL {
            assert!(rules.contains(kind), "no rule for {kind:?}");
        }
    }

    #[test]
    fn test_row_class_alternates_by_index() {
        let row = RuleSet::standard().get(ElementKind::TableRow);
        assert_eq!(row.class_for_row(Some(0)), "bg-gray-50");
        assert_eq!(row.class_for_row(Some(1)), "bg-white");
        assert_eq!(row.class_for_row(Some(2)), "bg-gray-50");
    }

    #[test]
    fn test_non_row_rules_ignore_index() {
        let cell = RuleSet::standard().get(ElementKind::TableCell);
        assert_eq!(cell.class_for_row(Some(1)), cell.class);
    }

    #[test]
    fn test_list_item_uses_checkmark() {
        let marker = RuleSet::standard().get(ElementKind::ListItem).marker.unwrap();
        assert_eq!(marker.glyph, "✓");
    }

    #[test]
    fn test_missing_kind_falls_back_to_plain_span() {
        let rules = RuleSet::from_rules(&[]);
        assert_eq!(rules.get(ElementKind::Strong).tag, "span");
    }
}
