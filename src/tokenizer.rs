//! # Tokenizer/ Lexer
//!
//! Scans the characters of a JSON document into a token stream, one token per
//! call.
pub mod lexer;
pub mod token;

// Re-exports
pub use lexer::{Tokenizer, tokenize};
pub use token::Token;
