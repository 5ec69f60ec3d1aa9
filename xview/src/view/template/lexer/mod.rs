//! Template lexer.
//!
//! Splits template markup into text runs, placeholders and block directives.
pub mod token;

pub use token::Token;

use super::Error;

/// Start of an HTML comment. Block directives live inside comments so the template
/// stays valid HTML that can be previewed in a browser.
const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

#[derive(Debug, Clone, PartialEq)]
pub struct TokenWithContext {
    token: Token,
    line: usize,
    column: usize,
}

impl std::fmt::Display for TokenWithContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} (line: {}, column: {})",
            self.token, self.line, self.column
        )
    }
}

impl TokenWithContext {
    pub fn new(token: Token, line: usize, column: usize) -> Self {
        Self {
            token,
            line,
            column,
        }
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn token(&self) -> Token {
        self.token.clone()
    }

    pub fn into_token(self) -> Token {
        self.token
    }
}

/// Directive keyword found inside an HTML comment.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Directive {
    Begin,
    End,
}

/// The lexer converts template text into a list of tokens.
///
/// Anything that's not a block directive (`<!-- BEGIN name -->`, `<!-- END name -->`)
/// or a placeholder (`{Name}`) is considered to be just text that is printed as-is.
/// This text is represented by the special `Token::Text`.
pub struct Lexer<'a> {
    // Template source.
    source: &'a str,
    // Byte offset into the source.
    position: usize,
    // Resulting tokens.
    tokens: Vec<TokenWithContext>,
    // Buffer for text runs.
    buffer: String,
    // Where the text currently in the buffer started.
    buffer_start: (usize, usize),
    // Which line we're on.
    line: usize,
    // Which column we're on.
    column: usize,
    // Last lookup of the next `-->`, `Some(None)` if there are none left.
    comment_end: Option<Option<usize>>,
    // Last lookup of the next `}`.
    placeholder_end: Option<Option<usize>>,
}

impl<'a> Lexer<'a> {
    /// Create new lexer from text input.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            tokens: vec![],
            buffer: String::new(),
            buffer_start: (1, 1),
            line: 1,
            column: 1,
            comment_end: None,
            placeholder_end: None,
        }
    }

    /// Parse an input string into tokens.
    pub fn tokens(mut self) -> Result<Vec<TokenWithContext>, Error> {
        let source = self.source;

        while self.position < source.len() {
            let rest = &source[self.position..];

            if rest.starts_with(COMMENT_START) {
                if let Some(consumed) = self.comment(rest)? {
                    self.advance(&rest[..consumed]);
                    continue;
                }
            } else if rest.starts_with('{') {
                if let Some(consumed) = self.placeholder(rest) {
                    self.advance(&rest[..consumed]);
                    continue;
                }
            }

            // Just text.
            let c = match rest.chars().next() {
                Some(c) => c,
                None => break,
            };

            if self.buffer.is_empty() {
                self.buffer_start = (self.line, self.column);
            }

            self.buffer.push(c);
            self.advance(&rest[..c.len_utf8()]);
        }

        self.drain_buffer();

        Ok(self.tokens)
    }

    // Handle `<!-- ... -->`. Returns the number of bytes consumed if the comment
    // is a block directive, or `None` if it's a regular comment that should be printed.
    fn comment(&mut self, rest: &str) -> Result<Option<usize>, Error> {
        let start = self.position + COMMENT_START.len();
        let end = match find_from(self.source, &mut self.comment_end, COMMENT_END, start) {
            Some(end) => end - self.position,
            // Unterminated comment, the browser will deal with it.
            None => return Ok(None),
        };

        let body = rest[COMMENT_START.len()..end].trim();

        let (directive, name) = match Self::directive(body) {
            Some(directive) => directive,
            None => return Ok(None),
        };

        let token = match directive {
            Directive::Begin => Token::BlockBegin(name.to_string()),
            Directive::End if name.is_empty() => Token::BlockEnd(None),
            Directive::End => Token::BlockEnd(Some(name.to_string())),
        };

        let valid = match directive {
            Directive::Begin => valid_block_name(name),
            Directive::End => name.is_empty() || valid_block_name(name),
        };

        if !valid {
            return Err(Error::InvalidBlockName(self.add_token(token)));
        }

        self.drain_buffer();
        let token = self.add_token(token);
        self.tokens.push(token);

        Ok(Some(end + COMMENT_END.len()))
    }

    // Handle `{Name}`. Returns the number of bytes consumed if this is a placeholder.
    fn placeholder(&mut self, rest: &str) -> Option<usize> {
        let end = find_from(self.source, &mut self.placeholder_end, "}", self.position)?
            - self.position;
        let name = &rest[1..end];

        if !valid_placeholder_name(name) {
            return None;
        }

        self.drain_buffer();
        let token = self.add_token(Token::Placeholder(name.to_string()));
        self.tokens.push(token);

        Some(end + 1)
    }

    // Recognize `BEGIN name`, `BEGIN: name`, `END`, `END name`.
    fn directive(body: &str) -> Option<(Directive, &str)> {
        for (keyword, directive) in [("BEGIN", Directive::Begin), ("END", Directive::End)] {
            if let Some(rest) = body.strip_prefix(keyword) {
                if rest.is_empty() || rest.starts_with(':') || rest.starts_with(char::is_whitespace)
                {
                    let rest = rest.strip_prefix(':').unwrap_or(rest).trim();
                    return Some((directive, rest));
                }
            }
        }

        None
    }

    // Flush buffered text into a text token.
    fn drain_buffer(&mut self) {
        if !self.buffer.is_empty() {
            let text = std::mem::take(&mut self.buffer);
            let (line, column) = self.buffer_start;
            self.tokens
                .push(TokenWithContext::new(Token::Text(text), line, column));
        }
    }

    // Move past consumed source, keeping track of lines and columns.
    fn advance(&mut self, consumed: &str) {
        for c in consumed.chars() {
            match c {
                '\n' => {
                    self.line += 1;
                    self.column = 1;
                }
                '\r' => (), // Handle column count on Windows.
                _ => self.column += 1,
            }
        }

        self.position += consumed.len();
    }

    // Add token to output with lexer context (e.g. line number).
    fn add_token(&self, token: Token) -> TokenWithContext {
        TokenWithContext::new(token, self.line, self.column)
    }
}

// Find `needle` at or after `from`. The lexer only moves forward, so a previous
// match that's still ahead of `from` is reused instead of scanning the rest again.
fn find_from(
    source: &str,
    last: &mut Option<Option<usize>>,
    needle: &str,
    from: usize,
) -> Option<usize> {
    match *last {
        Some(None) => return None,
        Some(Some(found)) if found >= from => return Some(found),
        _ => (),
    }

    let found = source[from..].find(needle).map(|offset| from + offset);
    *last = Some(found);
    found
}

fn valid_block_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

fn valid_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => (),
        _ => return false,
    }

    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Easily tokenize strings.
pub trait Tokenize {
    /// Parse a string and convert it to a list of tokens.
    fn tokenize(&self) -> Result<Vec<TokenWithContext>, Error>;
}

impl Tokenize for &str {
    fn tokenize(&self) -> Result<Vec<TokenWithContext>, Error> {
        Lexer::new(self).tokens()
    }
}

impl Tokenize for String {
    fn tokenize(&self) -> Result<Vec<TokenWithContext>, Error> {
        Lexer::new(self).tokens()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn tokens(source: &str) -> Vec<Token> {
        source
            .tokenize()
            .expect("tokenize")
            .into_iter()
            .map(|t| t.into_token())
            .collect()
    }

    #[test]
    fn test_directives_and_placeholders() {
        let tokens = tokens("<!-- BEGIN root --><h1>{Title}</h1><!-- END root -->");

        assert_eq!(
            tokens,
            vec![
                Token::BlockBegin("root".into()),
                Token::Text("<h1>".into()),
                Token::Placeholder("Title".into()),
                Token::Text("</h1>".into()),
                Token::BlockEnd(Some("root".into())),
            ]
        );
    }

    #[test]
    fn test_colon_and_anonymous_end() {
        let tokens = tokens("<!-- BEGIN: item -->x<!-- END -->");

        assert_eq!(
            tokens,
            vec![
                Token::BlockBegin("item".into()),
                Token::Text("x".into()),
                Token::BlockEnd(None),
            ]
        );
    }

    #[test]
    fn test_braces_are_text() {
        let source = "body { color: red; } {1abc} {} {not a var} {";
        assert_eq!(tokens(source), vec![Token::Text(source.into())]);
    }

    #[test]
    fn test_regular_comments_are_text() {
        let source = "<!-- BEGINNING of the page --><!-- just a comment --><!-- unterminated";
        assert_eq!(tokens(source), vec![Token::Text(source.into())]);
    }

    #[test]
    fn test_short_comments() {
        let source = "<!--><!--->";
        assert_eq!(tokens(source), vec![Token::Text(source.into())]);
    }

    #[test]
    fn test_many_unterminated() {
        let source = "{ <!-- ".repeat(10_000);
        assert_eq!(tokens(&source), vec![Token::Text(source.clone())]);

        let source = format!(
            "{}<!-- BEGIN root -->{{Title}}<!-- END root -->",
            "{ <!-- x ".repeat(100)
        );
        let tokens = tokens(&source);
        assert_eq!(tokens.len(), 4);
        assert_eq!(tokens[1], Token::BlockBegin("root".into()));
        assert_eq!(tokens[2], Token::Placeholder("Title".into()));
    }

    #[test]
    fn test_invalid_block_name() {
        let err = "<!-- BEGIN two words -->".tokenize().unwrap_err();
        assert!(matches!(err, Error::InvalidBlockName(_)));

        let err = "<!-- BEGIN -->".tokenize().unwrap_err();
        assert!(matches!(err, Error::InvalidBlockName(_)));
    }

    #[test]
    fn test_line_and_column() {
        let tokens = "<!-- BEGIN root -->\n  {Title}\n<!-- END root -->"
            .tokenize()
            .unwrap();

        let placeholder = &tokens[2];
        assert_eq!(placeholder.token(), Token::Placeholder("Title".into()));
        assert_eq!(placeholder.line(), 2);
        assert_eq!(placeholder.column(), 3);

        let end = &tokens[4];
        assert_eq!(end.line(), 3);
        assert_eq!(end.column(), 1);
    }
}
