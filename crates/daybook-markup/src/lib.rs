//! Markup fragments and tag handling for calendar templates.
//!
//! This crate holds the display-side building blocks that calendar templates
//! return and consume:
//!
//! - [`Fragment`], [`Node`], [`Element`]: a small tree of sibling display
//!   nodes with no implicit wrapper element
//! - [`strip_tags`]: removes `<...>` tags from untrusted text before display
//! - [`ClassNames`]: prefixed presentation class names
//! - [`parse_markup`]: bracket-tag markup (`[tag]content[/tag]`) to fragments
//!
//! # Example
//!
//! ```rust
//! use daybook_markup::{strip_tags, ClassNames, Element, Fragment};
//!
//! let classes = ClassNames::default();
//! let fragment = Fragment::new()
//!     .with(Element::span().classes(classes.of(["icon", "ic-milestone"])))
//!     .with(Element::span().child(strip_tags("<b>Launch</b>")));
//!
//! assert_eq!(
//!     fragment.to_html(),
//!     r#"<span class="calendar-icon calendar-ic-milestone"></span><span>Launch</span>"#
//! );
//! assert_eq!(fragment.text_content(), "Launch");
//! ```
//!
//! # Tag Name Syntax
//!
//! Bracket tag names follow CSS identifier rules:
//! - Start with a letter (`a-z`) or underscore (`_`)
//! - Followed by letters, digits (`0-9`), underscores, or hyphens (`-`)
//! - Case-sensitive (lowercase only)
//!
//! Pattern: `[a-z_][a-z0-9_-]*`

mod class;
mod fragment;
mod parse;
mod sanitize;
mod tokenizer;
mod transform;

pub use class::{ClassList, ClassNames, DEFAULT_CLASS_PREFIX};
pub use fragment::{Element, Fragment, Node};
pub use parse::parse_markup;
pub use sanitize::{escape_html, strip_tags};
pub use transform::{TagTransform, UnknownTagBehavior};
