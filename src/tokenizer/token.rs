//! # JSON Token
//!
//! Defines possible tokens from scanning a JSON document.
use std::fmt::Display;

use crate::value::Number;

/// Represents a token from a JSON document.
///
/// End of input is not a token: the lexer reports it as `None`.
#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    /* Delimiters */
    /// Opening curly brace
    LCurly,

    /// Closing curly brace
    RCurly,

    /// Opening square bracket
    LSquare,

    /// Closing square bracket
    RSquare,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Values */
    /// Null literal
    Null,

    /// Boolean literal
    Bool(bool),

    /// Decoded string value, escapes already resolved
    String(String),

    /// Numeric value
    Number(Number),
}

impl Token {
    /// Returns whether the token is one of the six structural markers.
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::LCurly
                | Self::RCurly
                | Self::LSquare
                | Self::RSquare
                | Self::Colon
                | Self::Comma
        )
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LCurly => write!(f, "{{"),
            Self::RCurly => write!(f, "}}"),
            Self::LSquare => write!(f, "["),
            Self::RSquare => write!(f, "]"),
            Self::Colon => write!(f, ":"),
            Self::Comma => write!(f, ","),
            Self::Null => write!(f, "null"),
            Self::Bool(val) => write!(f, "{val}"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}
