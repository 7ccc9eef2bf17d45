//! Character scanner over a single expression string.

use super::parse_error::ParseError;

const SINGLE_QUOTE: char = '\'';
const DOUBLE_QUOTE: char = '"';

/// A token read by [`Cursor::read_token`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,

    /// Whether the token was enclosed in quotes. Quoted tokens are never keywords.
    pub quoted: bool,

    /// Byte offset of the token's first character, including any opening quote.
    pub offset: usize,
}

impl Token {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.quoted && self.text.is_empty()
    }

    /// Whether this is the given keyword, ignoring ASCII case.
    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        !self.quoted && self.text.eq_ignore_ascii_case(keyword)
    }
}

pub const fn is_quote(c: char) -> bool {
    c == SINGLE_QUOTE || c == DOUBLE_QUOTE
}

const fn is_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r' || c == '\n'
}

pub(crate) const fn is_token_delimiter(c: char) -> bool {
    is_space(c) || c == '.' || c == '(' || c == ')'
}

/// Position-tracking scanner over an expression.
///
/// The cursor holds a byte index into `text`. `base` is the offset of `text` within the
/// full expression, so that nested cursors report offsets relative to the original input.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    text: &'a str,
    index: usize,
    base: usize,
}

impl<'a> Cursor<'a> {
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self::with_offset(text, 0)
    }

    /// Create a cursor over a fragment that starts at `base` in the original expression.
    #[must_use]
    pub const fn with_offset(text: &'a str, base: usize) -> Self {
        Self { text, index: 0, base }
    }

    /// Offset of the current character in the original expression.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.base + self.index
    }

    /// The current character, or `None` at the end of the input.
    #[must_use]
    pub fn current(&self) -> Option<char> {
        self.text.get(self.index..).and_then(|rest| rest.chars().next())
    }

    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.current().is_none()
    }

    /// Move past the current character and return the new current character.
    pub fn advance(&mut self) -> Option<char> {
        if let Some(c) = self.current() {
            self.index += c.len_utf8();
        }
        self.current()
    }

    /// Skip whitespace, failing if the end of the input is reached.
    pub fn skip_space(&mut self) -> Result<(), ParseError> {
        self.skip_whitespace();
        if self.is_at_end() { Err(ParseError::NoToken) } else { Ok(()) }
    }

    /// Skip whitespace, stopping quietly at the end of the input.
    pub fn skip_whitespace(&mut self) {
        while self.current().is_some_and(is_space) {
            _ = self.advance();
        }
    }

    /// Read the next token.
    ///
    /// A token starting with a single or double quote extends to the matching quote, which must
    /// be present; a doubled quote inside stands for one literal quote. Any other token extends
    /// to the next space, `.`, `(`, `)`, or the end of the input and may be empty.
    pub fn read_token(&mut self) -> Result<Token, ParseError> {
        self.skip_space()?;
        let offset = self.offset();

        match self.current() {
            Some(quote) if is_quote(quote) => {
                let text = self.read_quoted(quote)?;
                Ok(Token { text, quoted: true, offset })
            }
            _ => {
                let text = self.move_to(is_token_delimiter, false)?;
                Ok(Token { text, quoted: false, offset })
            }
        }
    }

    /// Read a quoted string starting at the opening quote, leaving the cursor after the closing one.
    pub(crate) fn read_quoted(&mut self, quote: char) -> Result<String, ParseError> {
        let open = self.offset();
        let mut text = String::new();
        _ = self.advance();

        loop {
            text.push_str(&self.move_to(|c| c == quote, true).map_err(|_| ParseError::UnmatchedQuote { quote, open })?);

            // doubled quote
            if self.advance() == Some(quote) {
                text.push(quote);
                _ = self.advance();
            } else {
                return Ok(text);
            }
        }
    }

    /// Accumulate characters up to, not including, the first one matching `stop`.
    ///
    /// When `required` is set, reaching the end of the input first is an error.
    pub fn move_to(&mut self, stop: impl Fn(char) -> bool, required: bool) -> Result<String, ParseError> {
        let start = self.index;
        while let Some(c) = self.current() {
            if stop(c) {
                return Ok(self.text[start..self.index].to_string());
            }
            _ = self.advance();
        }

        if required {
            Err(ParseError::NoToken)
        } else {
            Ok(self.text[start..].to_string())
        }
    }

    /// Extract the text up to the `)` balancing an already consumed `(`.
    ///
    /// Returns the offset of the extracted fragment and the fragment itself; the cursor is left
    /// after the closing parenthesis. Parentheses inside quoted strings are not counted; a quote
    /// inside a bare token such as `O'Brien` is an ordinary character.
    pub fn move_to_closing_parenthesis(&mut self) -> Result<(usize, &'a str), ParseError> {
        let text = self.text;
        let start = self.index;
        let open = self.offset().saturating_sub(1);
        let mut depth = 1_usize;
        let mut previous: Option<char> = None;

        while let Some(c) = self.current() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let fragment = &text[start..self.index];
                        _ = self.advance();
                        return Ok((self.base + start, fragment));
                    }
                }
                // a quote only opens a string at the start of a token or list element
                quote if is_quote(quote) && previous.is_none_or(|p| is_token_delimiter(p) || p == ',') => {
                    _ = self.read_quoted(quote)?;
                    previous = Some(quote);
                    continue;
                }
                _ => {}
            }
            previous = Some(c);
            _ = self.advance();
        }

        Err(ParseError::UnmatchedParenthesis { open })
    }
}
