//! What a template returns, and how it is turned into a string.

use std::fmt;
use std::str::FromStr;

use daybook_markup::{escape_html, parse_markup, ClassNames, Element, Fragment, Node, TagTransform};

use crate::theme::Theme;

/// The result of one template call: plain text or a markup fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOutput {
    Text(String),
    Fragment(Fragment),
}

impl TemplateOutput {
    /// Builds output from bracket-tag markup.
    ///
    /// Input without any `[` is kept as text. Markup whose parse yields a
    /// single text node also collapses to text, so `"Busy"` and `"[oops"`
    /// both come back as [`TemplateOutput::Text`].
    ///
    /// ```rust
    /// use daybook::TemplateOutput;
    /// use daybook_markup::ClassNames;
    ///
    /// let classes = ClassNames::default();
    /// assert_eq!(TemplateOutput::from_markup("Busy", &classes), TemplateOutput::Text("Busy".into()));
    ///
    /// let out = TemplateOutput::from_markup("[left-content]Task[/left-content]", &classes);
    /// assert_eq!(out.to_html(), r#"<span class="calendar-left-content">Task</span>"#);
    /// ```
    pub fn from_markup(markup: &str, classes: &ClassNames) -> Self {
        if !markup.contains('[') {
            return TemplateOutput::Text(markup.to_string());
        }
        let fragment = parse_markup(markup, classes);
        match fragment.nodes() {
            [] => TemplateOutput::Text(String::new()),
            [Node::Text(text)] => TemplateOutput::Text(text.clone()),
            _ => TemplateOutput::Fragment(fragment),
        }
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, TemplateOutput::Fragment(_))
    }

    /// Text without markup.
    pub fn text_content(&self) -> String {
        match self {
            TemplateOutput::Text(text) => text.clone(),
            TemplateOutput::Fragment(fragment) => fragment.text_content(),
        }
    }

    /// HTML, with text escaped.
    pub fn to_html(&self) -> String {
        match self {
            TemplateOutput::Text(text) => escape_html(text),
            TemplateOutput::Fragment(fragment) => fragment.to_html(),
        }
    }

    /// Renders in the given mode. `theme` is only read by [`OutputMode::Term`].
    pub fn render(&self, mode: OutputMode, theme: &Theme) -> String {
        match (self, mode.tag_transform()) {
            (_, None) => self.to_html(),
            (TemplateOutput::Text(text), Some(_)) => text.clone(),
            (TemplateOutput::Fragment(fragment), Some(transform)) => {
                fragment.render(&theme.styles(), transform, theme.unknown())
            }
        }
    }
}

impl From<String> for TemplateOutput {
    fn from(text: String) -> Self {
        TemplateOutput::Text(text)
    }
}

impl From<&str> for TemplateOutput {
    fn from(text: &str) -> Self {
        TemplateOutput::Text(text.to_string())
    }
}

impl From<Fragment> for TemplateOutput {
    fn from(fragment: Fragment) -> Self {
        TemplateOutput::Fragment(fragment)
    }
}

impl From<Element> for TemplateOutput {
    fn from(element: Element) -> Self {
        TemplateOutput::Fragment(element.into())
    }
}

/// Text for text output, HTML for fragments.
impl fmt::Display for TemplateOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateOutput::Text(text) => f.write_str(text),
            TemplateOutput::Fragment(fragment) => write!(f, "{}", fragment),
        }
    }
}

/// Target format for [`TemplateOutput::render`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// HTML markup.
    #[default]
    Html,
    /// Plain text, no markup or styling.
    Text,
    /// Bracket-tag markup, one tag per class.
    Markup,
    /// ANSI-styled terminal text using a [`Theme`].
    Term,
}

impl OutputMode {
    pub const ALL: [OutputMode; 4] = [
        OutputMode::Html,
        OutputMode::Text,
        OutputMode::Markup,
        OutputMode::Term,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Html => "html",
            OutputMode::Text => "text",
            OutputMode::Markup => "markup",
            OutputMode::Term => "term",
        }
    }

    /// How class tags are rendered in this mode; `None` for HTML.
    pub fn tag_transform(&self) -> Option<TagTransform> {
        match self {
            OutputMode::Html => None,
            OutputMode::Text => Some(TagTransform::Remove),
            OutputMode::Markup => Some(TagTransform::Keep),
            OutputMode::Term => Some(TagTransform::Apply),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OutputMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown output mode: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use console::Style;
    use daybook_markup::UnknownTagBehavior;

    fn pill() -> TemplateOutput {
        Element::span()
            .class("calendar-left-content")
            .child("Task")
            .into()
    }

    #[test]
    fn text_is_escaped_only_in_html() {
        let out = TemplateOutput::from("#<b>x</b>");
        assert_eq!(out.render(OutputMode::Html, &Theme::new()), "#&lt;b&gt;x&lt;/b&gt;");
        assert_eq!(out.render(OutputMode::Text, &Theme::new()), "#<b>x</b>");
        assert_eq!(out.render(OutputMode::Markup, &Theme::new()), "#<b>x</b>");
    }

    #[test]
    fn fragment_modes() {
        let theme = Theme::new();
        assert_eq!(
            pill().render(OutputMode::Html, &theme),
            r#"<span class="calendar-left-content">Task</span>"#
        );
        assert_eq!(pill().render(OutputMode::Text, &theme), "Task");
        assert_eq!(
            pill().render(OutputMode::Markup, &theme),
            "[calendar-left-content]Task[/calendar-left-content]"
        );
    }

    #[test]
    fn term_mode_uses_theme() {
        let theme = Theme::new()
            .add("calendar-left-content", Style::new().bold())
            .force_styling(true);
        let out = pill().render(OutputMode::Term, &theme);
        assert!(out.contains("\x1b[1m"));
        assert!(out.contains("Task"));
    }

    #[test]
    fn text_and_markup_modes_ignore_unstyled_handling() {
        let theme = Theme::new().with_unknown(UnknownTagBehavior::Indicate("(!?)".into()));
        assert_eq!(pill().render(OutputMode::Text, &theme), "Task");
        assert_eq!(
            pill().render(OutputMode::Markup, &theme),
            "[calendar-left-content]Task[/calendar-left-content]"
        );
        assert_eq!(pill().render(OutputMode::Term, &theme), "(!?) Task");
    }

    #[test]
    fn term_mode_passes_unstyled_tags_through() {
        let theme = Theme::new().with_unknown(UnknownTagBehavior::Passthrough);
        assert_eq!(
            pill().render(OutputMode::Term, &theme),
            "[calendar-left-content]Task[/calendar-left-content]"
        );
    }

    #[test]
    fn from_markup_collapses_plain_text() {
        let classes = ClassNames::default();
        assert_eq!(
            TemplateOutput::from_markup("[unclosed", &classes),
            TemplateOutput::Text("[unclosed".into())
        );
        assert_eq!(
            TemplateOutput::from_markup("", &classes),
            TemplateOutput::Text(String::new())
        );
        assert!(TemplateOutput::from_markup("[a]x[/a]", &classes).is_fragment());
    }

    #[test]
    fn output_mode_parse() {
        assert_eq!("term".parse::<OutputMode>(), Ok(OutputMode::Term));
        assert_eq!("HTML".parse::<OutputMode>(), Ok(OutputMode::Html));
        assert!("pdf".parse::<OutputMode>().is_err());
    }
}
