//! Markup fragments: sibling nodes without an implicit wrapper element.
//!
//! A [`Fragment`] is what a template returns when plain text is not enough.
//! It holds zero or more [`Node`]s; each node is either text or an
//! [`Element`] carrying a tag, presentation classes, inline style and
//! children.
//!
//! Fragments render to several targets:
//!
//! | Method | Output |
//! |--------|--------|
//! | [`Fragment::to_html`] | HTML with escaped text and attributes |
//! | [`Fragment::text_content`] | Concatenated text, no markup |
//! | [`Fragment::to_markup`] | Bracket tags, one per class: `[calendar-x]text[/calendar-x]` |
//! | [`Fragment::render`] | Terminal output driven by a [`TagTransform`] |

use std::collections::HashMap;
use std::fmt;

use console::Style;

use crate::sanitize::escape_html;
use crate::transform::{TagTransform, UnknownTagBehavior};

/// A single display node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text. Escaped when rendered as HTML.
    Text(String),
    /// An element with classes, style and children.
    Element(Element),
}

impl Node {
    /// Creates a text node.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(text.to_string())
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(text)
    }
}

/// An element node.
///
/// ```rust
/// use daybook_markup::Element;
///
/// let pill = Element::span()
///     .class("calendar-weekday-grid-date")
///     .style("background-color", "#03bd9e")
///     .child("14");
/// assert_eq!(
///     pill.to_html(),
///     r#"<span class="calendar-weekday-grid-date" style="background-color: #03bd9e">14</span>"#
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    classes: Vec<String>,
    style: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element with the given tag name.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: Vec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A `<span>` element.
    pub fn span() -> Self {
        Self::new("span")
    }

    /// A `<strong>` element.
    pub fn strong() -> Self {
        Self::new("strong")
    }

    /// Adds one class name.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds several class names in order.
    pub fn classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Adds an inline style declaration.
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.style.push((property.into(), value.into()));
        self
    }

    /// Appends a child node.
    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Renders this element as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_html_element(&mut out, self);
        out
    }
}

/// Zero or more sibling nodes with no implicit wrapping element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    nodes: Vec<Node>,
}

impl Fragment {
    /// Creates an empty fragment.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style append.
    pub fn with(mut self, node: impl Into<Node>) -> Self {
        self.nodes.push(node.into());
        self
    }

    /// The sibling nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// True when the fragment has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Renders the fragment as HTML.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_html_node(&mut out, node);
        }
        out
    }

    /// Concatenated text of every node, without markup.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_text(&mut out, node);
        }
        out
    }

    /// Renders the fragment as bracket-tag markup, one tag per class.
    ///
    /// Elements without classes contribute only their children.
    pub fn to_markup(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            write_markup(&mut out, node);
        }
        out
    }

    /// Renders the fragment for a terminal.
    ///
    /// [`TagTransform::Apply`] looks each class up in `styles` and styles
    /// text with every matching class of its ancestors; `unknown` decides
    /// what happens to classes without a style. [`TagTransform::Remove`]
    /// produces plain text and [`TagTransform::Keep`] bracket markup.
    pub fn render(
        &self,
        styles: &HashMap<String, Style>,
        transform: TagTransform,
        unknown: &UnknownTagBehavior,
    ) -> String {
        match transform {
            TagTransform::Keep => return self.to_markup(),
            TagTransform::Remove => return self.text_content(),
            TagTransform::Apply => {}
        }

        let renderer = TerminalRenderer { styles, unknown };
        let mut out = String::new();
        let mut stack: Vec<&Style> = Vec::new();
        for node in &self.nodes {
            renderer.write_node(&mut out, node, &mut stack);
        }
        out
    }
}

impl From<Vec<Node>> for Fragment {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}

impl From<Element> for Fragment {
    fn from(element: Element) -> Self {
        Self {
            nodes: vec![Node::Element(element)],
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

fn write_html_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_html(text)),
        Node::Element(element) => write_html_element(out, element),
    }
}

fn write_html_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(element.tag);
    if !element.classes.is_empty() {
        out.push_str(" class=\"");
        out.push_str(&escape_html(&element.classes.join(" ")));
        out.push('"');
    }
    if !element.style.is_empty() {
        let declarations = element
            .style
            .iter()
            .map(|(property, value)| format!("{}: {}", property, value))
            .collect::<Vec<_>>()
            .join("; ");
        out.push_str(" style=\"");
        out.push_str(&escape_html(&declarations));
        out.push('"');
    }
    out.push('>');
    for child in &element.children {
        write_html_node(out, child);
    }
    out.push_str("</");
    out.push_str(element.tag);
    out.push('>');
}

fn write_text(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            for child in &element.children {
                write_text(out, child);
            }
        }
    }
}

fn write_markup(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(text),
        Node::Element(element) => {
            for class in &element.classes {
                out.push('[');
                out.push_str(class);
                out.push(']');
            }
            for child in &element.children {
                write_markup(out, child);
            }
            for class in element.classes.iter().rev() {
                out.push_str("[/");
                out.push_str(class);
                out.push(']');
            }
        }
    }
}

struct TerminalRenderer<'a> {
    styles: &'a HashMap<String, Style>,
    unknown: &'a UnknownTagBehavior,
}

impl<'a> TerminalRenderer<'a> {
    fn write_node(&self, out: &mut String, node: &Node, stack: &mut Vec<&'a Style>) {
        match node {
            Node::Text(text) => self.append_styled(out, text, stack),
            Node::Element(element) => {
                let depth = stack.len();
                let mut passthrough = Vec::new();
                for class in &element.classes {
                    match self.styles.get(class) {
                        Some(style) => stack.push(style),
                        None => match self.unknown {
                            UnknownTagBehavior::Indicate(indicator) => {
                                out.push_str(indicator);
                                out.push(' ');
                            }
                            UnknownTagBehavior::Passthrough => {
                                out.push('[');
                                out.push_str(class);
                                out.push(']');
                                passthrough.push(class.as_str());
                            }
                            UnknownTagBehavior::Strip => {}
                        },
                    }
                }
                for child in &element.children {
                    self.write_node(out, child, stack);
                }
                for class in passthrough.iter().rev() {
                    out.push_str("[/");
                    out.push_str(class);
                    out.push(']');
                }
                stack.truncate(depth);
            }
        }
    }

    fn append_styled(&self, output: &mut String, text: &str, style_stack: &[&Style]) {
        if text.is_empty() {
            return;
        }

        if style_stack.is_empty() {
            output.push_str(text);
        } else {
            let mut current = text.to_string();
            for style in style_stack {
                current = style.apply_to(current).to_string();
            }
            output.push_str(&current);
        }
    }
}
