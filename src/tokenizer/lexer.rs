//! # JSON Lexer
//!
//! Scans the characters of a JSON document into [`Token`]s. String escapes
//! are resolved and numbers converted while scanning, so every token handed
//! to the parser is fully decoded.
//!
//! ```rust
//! use jparse::tokenizer::{Token, tokenize};
//!
//! let tokens = tokenize(r#"{"a": null}"#).expect("valid tokens");
//! assert_eq!(
//!     tokens,
//!     vec![
//!         Token::LCurly,
//!         Token::String("a".to_string()),
//!         Token::Colon,
//!         Token::Null,
//!         Token::RCurly,
//!     ]
//! );
//! ```
use log::trace;

use crate::error::JsonParseError;
use crate::tokenizer::Token;
use crate::value::Number;

/// A tokenizer over the characters of a JSON document. Produces one token per
/// call to [`Tokenizer::next_token`]; the cursor only ever moves forward.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    /// The input sequence of characters to tokenize
    input: Vec<char>,
    /// Index of the next character to examine
    position: usize,
    /// Set once the iterator has yielded an error
    errored: bool,
}

impl Tokenizer {
    /// Create a tokenizer positioned at the start of `input`.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            errored: false,
        }
    }

    /// Returns the cursor as a character offset into the input.
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Skips whitespace and returns whether the input is exhausted.
    pub fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.is_eof()
    }

    fn is_eof(&self) -> bool {
        self.position >= self.input.len()
    }

    fn current_char(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Reads and consumes the next character, if any remain.
    fn consume_char(&mut self) -> Option<char> {
        let c = self.current_char()?;
        self.position += 1;
        Some(c)
    }

    /// Consume whitespace character(s) starting from the current position.
    fn skip_whitespace(&mut self) {
        while matches!(self.current_char(), Some(' ' | '\t' | '\n' | '\r')) {
            self.position += 1;
        }
    }

    /// Returns the next token from the current position, or `None` once only
    /// whitespace remains.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonParseError`] if the characters at the cursor do not
    /// form a valid token.
    pub fn next_token(&mut self) -> Result<Option<Token>, JsonParseError> {
        self.skip_whitespace();

        let Some(c) = self.current_char() else {
            return Ok(None);
        };

        let token = match c {
            '{' => self.structural(Token::LCurly),
            '}' => self.structural(Token::RCurly),
            '[' => self.structural(Token::LSquare),
            ']' => self.structural(Token::RSquare),
            ':' => self.structural(Token::Colon),
            ',' => self.structural(Token::Comma),
            '"' => self.read_string()?,
            '-' | '0'..='9' => self.read_number()?,
            't' => self.read_keyword("true", Token::Bool(true))?,
            'f' => self.read_keyword("false", Token::Bool(false))?,
            'n' => self.read_keyword("null", Token::Null)?,
            other => return Err(JsonParseError::UnexpectedCharacter(other)),
        };

        trace!("token {token} (cursor at {})", self.position);
        Ok(Some(token))
    }

    /// Consumes a single structural character.
    fn structural(&mut self, token: Token) -> Token {
        self.position += 1;
        token
    }

    /// Reads a string literal, resolving escape sequences, and returns the
    /// decoded string token.
    fn read_string(&mut self) -> Result<Token, JsonParseError> {
        // Skip opening quote
        self.position += 1;

        let mut text = String::new();
        let mut in_escape = false;
        let mut in_unicode_escape = false;
        let mut hex = String::with_capacity(4);

        loop {
            let c = self
                .consume_char()
                .ok_or(JsonParseError::UnterminatedString)?;

            if in_unicode_escape {
                hex.push(c);
                if !c.is_ascii_hexdigit() {
                    return Err(JsonParseError::InvalidUnicodeEscape(hex));
                }
                if hex.len() == 4 {
                    text.push(decode_code_point(&hex));
                    hex.clear();
                    in_unicode_escape = false;
                }
            } else if in_escape {
                in_escape = false;
                match c {
                    '"' => text.push('"'),
                    '\\' => text.push('\\'),
                    '/' => text.push('/'),
                    'b' => text.push('\u{0008}'),
                    'f' => text.push('\u{000C}'),
                    'n' => text.push('\n'),
                    'r' => text.push('\r'),
                    't' => text.push('\t'),
                    'u' => in_unicode_escape = true,
                    other => {
                        return Err(JsonParseError::InvalidEscapeSequence(
                            other,
                        ));
                    }
                }
            } else {
                match c {
                    '\\' => in_escape = true,
                    '"' => return Ok(Token::String(text)),
                    other => text.push(other),
                }
            }
        }
    }

    /// Reads the maximal run of number characters and converts it, trying an
    /// integer before a float.
    fn read_number(&mut self) -> Result<Token, JsonParseError> {
        let start_pos = self.position;
        while self.current_char().is_some_and(is_number_char) {
            self.position += 1;
        }

        let text: String = self.input[start_pos..self.position].iter().collect();

        if let Ok(int) = text.parse::<i64>() {
            return Ok(Token::Number(Number::Integer(int)));
        }
        match text.parse::<f64>() {
            // JSON has no representation for overflowed floats
            Ok(float) if float.is_finite() => {
                Ok(Token::Number(Number::Float(float)))
            }
            _ => Err(JsonParseError::InvalidNumber(text)),
        }
    }

    /// Consumes as many characters as `keyword` has (fewer if the input runs
    /// out) and compares them against it.
    fn read_keyword(
        &mut self,
        keyword: &str,
        token: Token,
    ) -> Result<Token, JsonParseError> {
        let start_pos = self.position;
        let end_pos = (start_pos + keyword.len()).min(self.input.len());
        self.position = end_pos;

        let text: String = self.input[start_pos..end_pos].iter().collect();
        if text == keyword {
            Ok(token)
        } else {
            Err(JsonParseError::InvalidKeyword(text))
        }
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token, JsonParseError>;

    /// Yields tokens until end of input or the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.errored {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.errored = true;
                Some(Err(err))
            }
        }
    }
}

const fn is_number_char(c: char) -> bool {
    matches!(c, '0'..='9' | 'e' | 'E' | '.' | '+' | '-')
}

/// Decodes four validated hex digits into a character. Surrogate halves are
/// not paired up; each one becomes U+FFFD since a `char` cannot hold it.
fn decode_code_point(hex: &str) -> char {
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// Tokenize a whole JSON text into its token sequence.
///
/// # Errors
///
/// Returns the first [`JsonParseError`] encountered while scanning.
pub fn tokenize(text: &str) -> Result<Vec<Token>, JsonParseError> {
    Tokenizer::new(text).collect()
}
