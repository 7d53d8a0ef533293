//! Pattern tokenizer for `{placeholder}` syntax.
//!
//! Patterns are parsed once into literal and token segments. Parsing never
//! fails: a `{` without a closing `}` becomes an unterminated token so that the
//! startup validator can report it alongside every other problem.

use std::fmt;
use std::ops::Range;

use crate::placeholder::Placeholder;

/// A `{...}` reference inside a pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token body, exactly as written (no trimming).
    pub path: String,

    /// Byte range of the whole token (braces included) in the source pattern.
    pub span: Range<usize>,

    /// False when the pattern ended before the closing `}`.
    pub terminated: bool,
}

impl Token {
    /// Classifies the token body against the placeholder schema.
    pub fn placeholder(&self) -> Option<Placeholder> {
        if !self.terminated {
            return None;
        }
        Placeholder::parse(&self.path)
    }
}

/// One piece of a parsed pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(Token),
}

/// A parsed naming pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Parses a pattern string.
    ///
    /// # Examples
    ///
    /// ```
    /// use nameplate_naming::Pattern;
    ///
    /// let pattern = Pattern::parse("{app.namespace}-{queueId}");
    /// let paths: Vec<_> = pattern.tokens().map(|t| t.path.as_str()).collect();
    /// assert_eq!(paths, vec!["app.namespace", "queueId"]);
    /// ```
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let segments = tokenize(&source);
        Self { source, segments }
    }

    /// The pattern as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Literal and token segments in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All tokens in source order, without resolving anything.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Token(token) => Some(token),
            Segment::Literal(_) => None,
        })
    }

    /// Returns true if the pattern contains no tokens at all.
    pub fn is_literal(&self) -> bool {
        self.tokens().next().is_none()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn tokenize(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut chars = input.char_indices();

    while let Some((start, ch)) = chars.next() {
        if ch != '{' {
            continue;
        }

        if literal_start < start {
            segments.push(Segment::Literal(input[literal_start..start].to_string()));
        }

        let body_start = start + 1;
        match chars.by_ref().find(|(_, c)| *c == '}') {
            Some((close, _)) => {
                segments.push(Segment::Token(Token {
                    path: input[body_start..close].to_string(),
                    span: start..close + 1,
                    terminated: true,
                }));
                literal_start = close + 1;
            }
            None => {
                segments.push(Segment::Token(Token {
                    path: input[body_start..].to_string(),
                    span: start..input.len(),
                    terminated: false,
                }));
                return segments;
            }
        }
    }

    if literal_start < input.len() {
        segments.push(Segment::Literal(input[literal_start..].to_string()));
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(pattern: &Pattern) -> Vec<&str> {
        pattern.tokens().map(|t| t.path.as_str()).collect()
    }

    #[test]
    fn test_parse_literal_only() {
        let pattern = Pattern::parse("static-name");
        assert!(pattern.is_literal());
        assert_eq!(
            pattern.segments(),
            &[Segment::Literal("static-name".to_string())]
        );
    }

    #[test]
    fn test_parse_empty() {
        let pattern = Pattern::parse("");
        assert!(pattern.segments().is_empty());
    }

    #[test]
    fn test_parse_mixed_segments() {
        let pattern = Pattern::parse("pre-{app.env}.{queueId}-post");
        assert_eq!(pattern.segments().len(), 5);
        assert_eq!(paths(&pattern), vec!["app.env", "queueId"]);
        assert_eq!(pattern.segments()[0], Segment::Literal("pre-".into()));
        assert_eq!(pattern.segments()[2], Segment::Literal(".".into()));
        assert_eq!(pattern.segments()[4], Segment::Literal("-post".into()));
    }

    #[test]
    fn test_adjacent_tokens() {
        let pattern = Pattern::parse("{app.env}{app.name}");
        assert_eq!(pattern.segments().len(), 2);
        assert_eq!(paths(&pattern), vec!["app.env", "app.name"]);
    }

    #[test]
    fn test_span_positions() {
        let input = "x-{app.env}-y";
        let pattern = Pattern::parse(input);
        let token = pattern.tokens().next().unwrap();
        assert_eq!(&input[token.span.clone()], "{app.env}");
    }

    #[test]
    fn test_stray_closing_brace_is_literal() {
        let pattern = Pattern::parse("a}b-{app.env}");
        assert_eq!(pattern.segments()[0], Segment::Literal("a}b-".into()));
        assert_eq!(paths(&pattern), vec!["app.env"]);
    }

    #[test]
    fn test_whitespace_is_kept_in_token_body() {
        let pattern = Pattern::parse("{ app.env }");
        assert_eq!(paths(&pattern), vec![" app.env "]);
        assert_eq!(pattern.tokens().next().unwrap().placeholder(), None);
    }

    #[test]
    fn test_unterminated_token() {
        let pattern = Pattern::parse("{app.namespace}-{queueId");
        let tokens: Vec<_> = pattern.tokens().collect();
        assert_eq!(tokens.len(), 2);
        assert!(tokens[0].terminated);
        assert!(!tokens[1].terminated);
        assert_eq!(tokens[1].path, "queueId");
        assert_eq!(tokens[1].placeholder(), None);
    }

    #[test]
    fn test_empty_token() {
        let pattern = Pattern::parse("{}");
        assert_eq!(paths(&pattern), vec![""]);
    }

    #[test]
    fn test_multibyte_literals() {
        let pattern = Pattern::parse("é-{app.env}-ü");
        assert_eq!(pattern.segments()[0], Segment::Literal("é-".into()));
        assert_eq!(pattern.segments()[2], Segment::Literal("-ü".into()));
    }
}
