//! Bracket-tag markup to [`Fragment`] conversion.

use crate::class::ClassNames;
use crate::fragment::{Element, Fragment, Node};
use crate::tokenizer::{Token, Tokenizer};

/// Parses `[tag]content[/tag]` markup into a fragment of `<span>` elements.
///
/// Each tag becomes a span whose single class is the tag name run through
/// `classes` (so `[left-content]` becomes `calendar-left-content` with the
/// default prefix). Malformed markup never fails:
///
/// - an open tag without a matching close is literal text
/// - an orphan close tag is literal text
/// - a close tag for an outer element closes every element opened inside it
/// - elements still open at the end of input are closed there
///
/// ```rust
/// use daybook_markup::{parse_markup, ClassNames};
///
/// let fragment = parse_markup("[left-content]Task[/left-content]", &ClassNames::default());
/// assert_eq!(
///     fragment.to_html(),
///     r#"<span class="calendar-left-content">Task</span>"#
/// );
/// ```
pub fn parse_markup(input: &str, classes: &ClassNames) -> Fragment {
    let tokens = Tokenizer::new(input).collect::<Vec<_>>();
    let mut builder = TreeBuilder::default();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Text(text) => builder.push_text(text),
            Token::OpenTag(tag) => {
                if has_matching_close(&tokens[i + 1..], tag) {
                    builder.open(tag, Element::span().class(classes.name(tag)));
                } else {
                    builder.push_text(&format!("[{}]", tag));
                }
            }
            Token::CloseTag(tag) => {
                if !builder.close(tag) {
                    builder.push_text(&format!("[/{}]", tag));
                }
            }
            Token::InvalidTag(text) => builder.push_text(text),
        }
    }

    builder.finish()
}

/// Checks if there's a matching close tag in the remaining tokens.
fn has_matching_close(tokens: &[Token], tag: &str) -> bool {
    let mut depth = 1;
    for token in tokens {
        match token {
            Token::OpenTag(t) if *t == tag => depth += 1,
            Token::CloseTag(t) if *t == tag => {
                depth -= 1;
                if depth == 0 {
                    return true;
                }
            }
            _ => {}
        }
    }
    false
}

#[derive(Default)]
struct TreeBuilder<'a> {
    root: Vec<Node>,
    stack: Vec<(&'a str, Element)>,
}

impl<'a> TreeBuilder<'a> {
    fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let siblings = match self.stack.last_mut() {
            Some((_, element)) => element.children_mut(),
            None => &mut self.root,
        };
        // Merge adjacent text so literal tags don't split runs
        if let Some(Node::Text(last)) = siblings.last_mut() {
            last.push_str(text);
        } else {
            siblings.push(Node::text(text));
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some((_, parent)) => parent.children_mut().push(node),
            None => self.root.push(node),
        }
    }

    fn open(&mut self, tag: &'a str, element: Element) {
        self.stack.push((tag, element));
    }

    /// Closes `tag` and everything opened after it. Returns false when
    /// `tag` is not open.
    fn close(&mut self, tag: &str) -> bool {
        if !self.stack.iter().any(|(open, _)| *open == tag) {
            return false;
        }
        while let Some((open, element)) = self.stack.pop() {
            self.push_node(Node::Element(element));
            if open == tag {
                break;
            }
        }
        true
    }

    fn finish(mut self) -> Fragment {
        while let Some((_, element)) = self.stack.pop() {
            self.push_node(Node::Element(element));
        }
        Fragment::from(self.root)
    }
}
