//! Lexer for `[class]text[/class]` markup.

/// One lexical piece of bracket markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Text(&'a str),
    /// `[class]`
    OpenTag(&'a str),
    /// `[/class]`
    CloseTag(&'a str),
    /// Bracketed text that is not a valid tag; rendered verbatim.
    InvalidTag(&'a str),
}

/// Splits markup into text runs and `[tag]` / `[/tag]` tokens.
pub(crate) struct Tokenizer<'a> {
    rest: &'a str,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Class names usable as tags: `[a-z_][a-z0-9_-]*`.
    pub(crate) fn is_valid_tag_name(name: &str) -> bool {
        let bytes = name.as_bytes();
        match bytes.split_first() {
            Some((first, tail)) => {
                (first.is_ascii_lowercase() || *first == b'_')
                    && tail.iter().all(|b| {
                        b.is_ascii_lowercase() || b.is_ascii_digit() || matches!(*b, b'_' | b'-')
                    })
            }
            None => false,
        }
    }

    fn take(&mut self, len: usize) -> &'a str {
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        head
    }
}

fn classify(raw: &str) -> Token<'_> {
    let body = &raw[1..raw.len() - 1];
    match body.strip_prefix('/') {
        Some(name) if Tokenizer::is_valid_tag_name(name) => Token::CloseTag(name),
        None if Tokenizer::is_valid_tag_name(body) => Token::OpenTag(body),
        _ => Token::InvalidTag(raw),
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let token = match (self.rest.find('['), self.rest.find(']')) {
            // text up to the next bracket
            (Some(open), _) if open > 0 => Token::Text(self.take(open)),
            (Some(_), Some(close)) => classify(self.take(close + 1)),
            // no bracket, or a bracket that is never closed
            _ => Token::Text(self.take(self.rest.len())),
        };
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_plain_text() {
        let tokens: Vec<_> = Tokenizer::new("hello world").collect();
        assert_eq!(tokens, vec![Token::Text("hello world")]);
    }

    #[test]
    fn tokenize_tag_pair() {
        let tokens: Vec<_> = Tokenizer::new("[left-content]Task[/left-content]").collect();
        assert_eq!(
            tokens,
            vec![
                Token::OpenTag("left-content"),
                Token::Text("Task"),
                Token::CloseTag("left-content"),
            ]
        );
    }

    #[test]
    fn tokenize_invalid_tag() {
        let tokens: Vec<_> = Tokenizer::new("[Bad]x").collect();
        assert_eq!(tokens, vec![Token::InvalidTag("[Bad]"), Token::Text("x")]);
    }

    #[test]
    fn tokenize_unclosed_bracket() {
        let tokens: Vec<_> = Tokenizer::new("a [b").collect();
        assert_eq!(tokens, vec![Token::Text("a "), Token::Text("[b")]);
    }

    #[test]
    fn tokenize_stray_close_bracket_and_empty_tag() {
        let tokens: Vec<_> = Tokenizer::new("1] of [][/x]").collect();
        assert_eq!(
            tokens,
            vec![Token::Text("1] of "), Token::InvalidTag("[]"), Token::CloseTag("x")]
        );
    }

    #[test]
    fn tag_name_rules() {
        assert!(Tokenizer::is_valid_tag_name("more-title-date"));
        assert!(Tokenizer::is_valid_tag_name("_private"));
        assert!(Tokenizer::is_valid_tag_name("h1"));
        assert!(!Tokenizer::is_valid_tag_name(""));
        assert!(!Tokenizer::is_valid_tag_name("1style"));
        assert!(!Tokenizer::is_valid_tag_name("-style"));
        assert!(!Tokenizer::is_valid_tag_name("myStyle"));
        assert!(!Tokenizer::is_valid_tag_name("my.style"));
    }
}
