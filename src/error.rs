//! Error type shared by the tokenizer and the parser.
use std::error::Error;
use std::fmt;

use crate::tokenizer::Token;

/// Represents errors that can occur while tokenizing or parsing a JSON
/// document. Every error is terminal: no partial value is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonParseError {
    /// A character that cannot start any token.
    UnexpectedCharacter(char),
    /// The input ended inside a string literal.
    UnterminatedString,
    /// A `\` followed by a character that is not a JSON escape.
    InvalidEscapeSequence(char),
    /// A `\u` escape containing a non-hex character. Holds the hex digits read
    /// so far followed by the offending character.
    InvalidUnicodeEscape(String),
    /// A numeric-looking span that is neither an integer nor a float.
    InvalidNumber(String),
    /// A `t`/`f`/`n` lead-in that did not spell `true`/`false`/`null`.
    InvalidKeyword(String),
    /// A value, key or separator was required but the input is exhausted.
    UnexpectedEndOfInput,
    /// A token that does not fit its grammar position.
    UnexpectedToken(Token),
    /// An object key that is not a string.
    InvalidKey(Token),
    /// An object key not followed by `:`.
    ExpectedColon(Token),
    /// Non-whitespace content after the top-level value, at the given
    /// character offset.
    TrailingContent(usize),
    /// Containers nested deeper than the configured limit.
    NestingTooDeep(usize),
}

impl Error for JsonParseError {}

impl fmt::Display for JsonParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedCharacter(c) => {
                write!(f, "Unexpected character: {c:?}")
            }
            Self::UnterminatedString => write!(f, "Unterminated string"),
            Self::InvalidEscapeSequence(c) => {
                write!(f, "Invalid escape sequence: \\{c}")
            }
            Self::InvalidUnicodeEscape(seq) => {
                write!(f, "Invalid unicode escape: \\u{seq}")
            }
            Self::InvalidNumber(text) => write!(f, "Invalid number: {text}"),
            Self::InvalidKeyword(text) => {
                write!(f, "Invalid keyword: {text:?}")
            }
            Self::UnexpectedEndOfInput => {
                write!(f, "Unexpected end of input")
            }
            Self::UnexpectedToken(token) => {
                write!(f, "Unexpected token: {token}")
            }
            Self::InvalidKey(token) => {
                write!(f, "Invalid object key: {token}")
            }
            Self::ExpectedColon(token) => {
                write!(f, "Expected ':' after object key, got {token}")
            }
            Self::TrailingContent(position) => {
                write!(f, "Trailing content at character {position}")
            }
            Self::NestingTooDeep(limit) => {
                write!(f, "Nesting exceeds maximum depth of {limit}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(
            JsonParseError::UnexpectedCharacter('@').to_string(),
            "Unexpected character: '@'"
        );
        assert_eq!(
            JsonParseError::InvalidEscapeSequence('x').to_string(),
            r"Invalid escape sequence: \x"
        );
        assert_eq!(
            JsonParseError::UnexpectedToken(Token::RSquare).to_string(),
            "Unexpected token: ]"
        );
        assert_eq!(
            JsonParseError::TrailingContent(9).to_string(),
            "Trailing content at character 9"
        );
    }
}
