/*!
# JSON Parser

Recursive-descent parser turning JSON text into a [`JsonValue`] tree.

## Examples

The public API method [`parse`] converts a complete JSON document:

```rust
use jparse::{JsonValue, Number, parse};

let value = parse(r#"{"name": "Babbage", "born": 1791}"#).expect("valid JSON");
assert_eq!(
    value.get("born"),
    Some(&JsonValue::Number(Number::Integer(1791)))
);
```

Nesting is limited to [`DEFAULT_MAX_DEPTH`] containers unless configured
otherwise with [`ParseOptions`]:

```rust
use jparse::{ParseOptions, parse_with_options};

let options = ParseOptions::default().with_max_depth(Some(2));
assert!(parse_with_options("[[1]]", options).is_ok());
assert!(parse_with_options("[[[1]]]", options).is_err());
```

## Errors

If the input is not a single well-formed JSON value, [`parse`] returns a
[`JsonParseError`] describing how parsing failed:

```rust
use jparse::{JsonParseError, parse, tokenizer::Token};

let result = parse("[1, 2,]");
assert_eq!(result, Err(JsonParseError::UnexpectedToken(Token::RSquare)));
```

## See Also

- [`Tokenizer`]: The token source driven by the parser.
- [`JsonValue`]: The value tree produced.
*/
use log::debug;
use std::collections::HashMap;

use crate::error::JsonParseError;
use crate::tokenizer::{Token, Tokenizer};
use crate::value::JsonValue;

/// Default limit on nested objects/arrays.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of nested containers, or `None` for no limit (nesting
    /// is then bounded only by the call stack).
    pub max_depth: Option<usize>,
}

impl ParseOptions {
    /// Construct the default options.
    pub const fn new() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// Set the nesting limit.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A recursive-descent parser owning the tokenizer for one document.
///
/// Nesting state lives on the call stack; the parser pulls one token at a
/// time and never buffers lookahead.
#[derive(Debug)]
pub struct Parser {
    tokenizer: Tokenizer,
    options: ParseOptions,
    /// Number of containers currently open
    depth: usize,
}

impl Parser {
    /// Create a parser over `text`.
    pub fn new(text: &str, options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(text),
            options,
            depth: 0,
        }
    }

    /// Parse exactly one value followed by nothing but whitespace.
    ///
    /// # Errors
    ///
    /// Returns a [`JsonParseError`] describing the first problem found.
    pub fn parse(mut self) -> Result<JsonValue, JsonParseError> {
        let result = self.parse_document();
        if let Err(err) = &result {
            debug!(
                "parse failed at character {}: {err}",
                self.tokenizer.position()
            );
        }
        result
    }

    fn parse_document(&mut self) -> Result<JsonValue, JsonParseError> {
        let value = self.parse_value()?;

        if !self.tokenizer.at_end() {
            return Err(JsonParseError::TrailingContent(
                self.tokenizer.position(),
            ));
        }

        Ok(value)
    }

    /// Fetch a fresh token and interpret it as a value.
    fn parse_value(&mut self) -> Result<JsonValue, JsonParseError> {
        let token = self.tokenizer.next_token()?;
        self.process_token(token)
    }

    /// Interpret an already fetched token as a value, descending into
    /// containers.
    fn process_token(
        &mut self,
        token: Option<Token>,
    ) -> Result<JsonValue, JsonParseError> {
        match token {
            Some(Token::LCurly) => self.nested(Self::parse_object),
            Some(Token::LSquare) => self.nested(Self::parse_array),
            Some(Token::String(s)) => Ok(JsonValue::String(s)),
            Some(Token::Number(n)) => Ok(JsonValue::Number(n)),
            Some(Token::Bool(b)) => Ok(JsonValue::Boolean(b)),
            Some(Token::Null) => Ok(JsonValue::Null),
            Some(
                token @ (Token::RCurly
                | Token::RSquare
                | Token::Colon
                | Token::Comma),
            ) => Err(JsonParseError::UnexpectedToken(token)),
            None => Err(JsonParseError::UnexpectedEndOfInput),
        }
    }

    /// Run a container parser one level deeper, enforcing the depth limit.
    fn nested(
        &mut self,
        parse_container: fn(&mut Self) -> Result<JsonValue, JsonParseError>,
    ) -> Result<JsonValue, JsonParseError> {
        self.depth += 1;
        if let Some(limit) =
            self.options.max_depth.filter(|&limit| self.depth > limit)
        {
            return Err(JsonParseError::NestingTooDeep(limit));
        }

        let value = parse_container(self);
        self.depth -= 1;
        value
    }

    /// Parse the remainder of an array after its opening `[`.
    fn parse_array(&mut self) -> Result<JsonValue, JsonParseError> {
        let mut arr = vec![];

        let token = self.tokenizer.next_token()?;
        if matches!(token, Some(Token::RSquare)) {
            return Ok(JsonValue::Array(arr));
        }
        arr.push(self.process_token(token)?);

        loop {
            match self.tokenizer.next_token()? {
                Some(Token::RSquare) => break,
                Some(Token::Comma) => arr.push(self.parse_value()?),
                Some(token) => {
                    return Err(JsonParseError::UnexpectedToken(token));
                }
                None => return Err(JsonParseError::UnexpectedEndOfInput),
            }
        }

        Ok(JsonValue::Array(arr))
    }

    /// Parse the remainder of an object after its opening `{`. Repeated keys
    /// overwrite earlier entries.
    fn parse_object(&mut self) -> Result<JsonValue, JsonParseError> {
        let mut obj = HashMap::new();

        let mut key_token = self.tokenizer.next_token()?;
        if matches!(key_token, Some(Token::RCurly)) {
            return Ok(JsonValue::Object(obj));
        }

        loop {
            let key = match key_token {
                Some(Token::String(key)) => key,
                Some(token) => return Err(JsonParseError::InvalidKey(token)),
                None => return Err(JsonParseError::UnexpectedEndOfInput),
            };

            match self.tokenizer.next_token()? {
                Some(Token::Colon) => {}
                Some(token) => {
                    return Err(JsonParseError::ExpectedColon(token));
                }
                None => return Err(JsonParseError::UnexpectedEndOfInput),
            }

            let value = self.parse_value()?;
            obj.insert(key, value);

            match self.tokenizer.next_token()? {
                Some(Token::RCurly) => break,
                Some(Token::Comma) => key_token = self.tokenizer.next_token()?,
                Some(token) => {
                    return Err(JsonParseError::UnexpectedToken(token));
                }
                None => return Err(JsonParseError::UnexpectedEndOfInput),
            }
        }

        Ok(JsonValue::Object(obj))
    }
}

/// Parse a JSON document with the default [`ParseOptions`].
///
/// # Errors
///
/// Returns a [`JsonParseError`] describing how parsing failed.
pub fn parse(text: &str) -> Result<JsonValue, JsonParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// Parse a JSON document with explicit [`ParseOptions`].
///
/// # Errors
///
/// Returns a [`JsonParseError`] describing how parsing failed.
pub fn parse_with_options(
    text: &str,
    options: ParseOptions,
) -> Result<JsonValue, JsonParseError> {
    debug!("parsing {} bytes with {options:?}", text.len());
    Parser::new(text, options).parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    fn int(i: i64) -> JsonValue {
        JsonValue::Number(Number::Integer(i))
    }

    fn object(entries: &[(&str, JsonValue)]) -> JsonValue {
        JsonValue::Object(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect(),
        )
    }

    fn nested_arrays(depth: usize) -> String {
        format!("{}{}", "[".repeat(depth), "]".repeat(depth))
    }

    #[test]
    fn parse_scalars() {
        assert_eq!(parse("null"), Ok(JsonValue::Null));
        assert_eq!(parse(" true "), Ok(JsonValue::Boolean(true)));
        assert_eq!(parse("false"), Ok(JsonValue::Boolean(false)));
        assert_eq!(parse(r#""hi""#), Ok(JsonValue::String("hi".into())));
        assert_eq!(parse("42"), Ok(int(42)));
    }

    #[test]
    #[allow(clippy::approx_constant)]
    fn parse_numbers() {
        assert_eq!(parse("3.14"), Ok(JsonValue::Number(Number::Float(3.14))));
        assert_eq!(parse("1e10"), Ok(JsonValue::Number(Number::Float(1e10))));
        assert_eq!(parse("-7"), Ok(int(-7)));
    }

    #[test]
    fn negative_zero_is_integer() {
        // Integer conversion is tried first, so `-0` is the integer zero.
        assert_eq!(parse("-0"), Ok(int(0)));
    }

    #[test]
    fn parse_empty_containers() {
        assert_eq!(parse("[]"), Ok(JsonValue::Array(vec![])));
        assert_eq!(parse("{}"), Ok(JsonValue::Object(HashMap::new())));
        assert_eq!(parse(" [ ] "), Ok(JsonValue::Array(vec![])));
        assert_eq!(parse("{\n}"), Ok(JsonValue::Object(HashMap::new())));
    }

    #[test]
    fn parse_nested_document() {
        let text = r#"
            {
                "name": "jp",
                "tags": ["a", "b"],
                "meta": {"size": 2, "ok": true, "none": null},
                "matrix": [[1, 2], [], [3]]
            }
        "#;
        let expected = object(&[
            ("name", JsonValue::String("jp".into())),
            (
                "tags",
                JsonValue::Array(vec![
                    JsonValue::String("a".into()),
                    JsonValue::String("b".into()),
                ]),
            ),
            (
                "meta",
                object(&[
                    ("size", int(2)),
                    ("ok", JsonValue::Boolean(true)),
                    ("none", JsonValue::Null),
                ]),
            ),
            (
                "matrix",
                JsonValue::Array(vec![
                    JsonValue::Array(vec![int(1), int(2)]),
                    JsonValue::Array(vec![]),
                    JsonValue::Array(vec![int(3)]),
                ]),
            ),
        ]);
        assert_eq!(parse(text), Ok(expected));
    }

    #[test]
    fn parse_escaped_strings() {
        assert_eq!(
            parse(r#""hello\nworld""#),
            Ok(JsonValue::String("hello\nworld".into()))
        );
        assert_eq!(parse(r#""\u0041""#), Ok(JsonValue::String("A".into())));
    }

    #[test]
    fn duplicate_keys_last_write_wins() {
        assert_eq!(parse(r#"{"a":1,"a":2}"#), Ok(object(&[("a", int(2))])));
    }

    #[test]
    fn trailing_comma_in_array() {
        assert_eq!(
            parse("[1, 2,]"),
            Err(JsonParseError::UnexpectedToken(Token::RSquare))
        );
    }

    #[test]
    fn trailing_content() {
        assert_eq!(
            parse(r#"{"a": 1} extra"#),
            Err(JsonParseError::TrailingContent(9))
        );
        assert_eq!(parse("1 2"), Err(JsonParseError::TrailingContent(2)));
        assert_eq!(parse("[] @"), Err(JsonParseError::TrailingContent(3)));
        assert_eq!(parse("null \n\t"), Ok(JsonValue::Null));
    }

    #[test]
    fn tokenizer_errors_propagate() {
        assert_eq!(
            parse("tru"),
            Err(JsonParseError::InvalidKeyword("tru".into()))
        );
        assert_eq!(
            parse(r#""unterminated"#),
            Err(JsonParseError::UnterminatedString)
        );
        assert_eq!(
            parse(r#"{"a": [1, "\x"]}"#),
            Err(JsonParseError::InvalidEscapeSequence('x'))
        );
        assert_eq!(
            parse("[1, #]"),
            Err(JsonParseError::UnexpectedCharacter('#'))
        );
    }

    #[test]
    fn unexpected_end_of_input() {
        let cases = [
            "", "   ", "[", "[1", "[1,", "{", r#"{"a""#, r#"{"a":"#,
            r#"{"a":1"#, r#"{"a":1,"#,
        ];
        for text in cases {
            assert_eq!(
                parse(text),
                Err(JsonParseError::UnexpectedEndOfInput),
                "input {text:?}"
            );
        }
    }

    #[test]
    fn unexpected_tokens() {
        let cases = [
            ("]", Token::RSquare),
            ("}", Token::RCurly),
            (":", Token::Colon),
            (",", Token::Comma),
            ("[,]", Token::Comma),
            ("[1 2]", Token::Number(Number::Integer(2))),
            ("[1}", Token::RCurly),
            (r#"{"a":1 "b":2}"#, Token::String("b".into())),
            (r#"{"a":1]"#, Token::RSquare),
            (r#"{"a":}"#, Token::RCurly),
        ];
        for (text, token) in cases {
            assert_eq!(
                parse(text),
                Err(JsonParseError::UnexpectedToken(token)),
                "input {text:?}"
            );
        }
    }

    #[test]
    fn object_grammar_errors() {
        assert_eq!(
            parse("{1: 2}"),
            Err(JsonParseError::InvalidKey(Token::Number(Number::Integer(1))))
        );
        assert_eq!(
            parse(r#"{"a":1,}"#),
            Err(JsonParseError::InvalidKey(Token::RCurly))
        );
        assert_eq!(
            parse(r#"{"a" 1}"#),
            Err(JsonParseError::ExpectedColon(Token::Number(
                Number::Integer(1)
            )))
        );
        assert_eq!(
            parse(r#"{"a", "b"}"#),
            Err(JsonParseError::ExpectedColon(Token::Comma))
        );
    }

    #[test]
    fn depth_limit() {
        let options = ParseOptions::default().with_max_depth(Some(10));
        assert!(parse_with_options(&nested_arrays(10), options).is_ok());
        assert_eq!(
            parse_with_options(&nested_arrays(11), options),
            Err(JsonParseError::NestingTooDeep(10))
        );
        assert_eq!(
            parse_with_options(
                r#"{"a": {"b": [[]]}}"#,
                options.with_max_depth(Some(3))
            ),
            Err(JsonParseError::NestingTooDeep(3))
        );
    }

    #[test]
    fn default_depth_limit() {
        assert!(parse(&nested_arrays(DEFAULT_MAX_DEPTH)).is_ok());
        assert_eq!(
            parse(&nested_arrays(DEFAULT_MAX_DEPTH + 1)),
            Err(JsonParseError::NestingTooDeep(DEFAULT_MAX_DEPTH))
        );
    }

    #[test]
    fn unlimited_depth() {
        let options = ParseOptions::default().with_max_depth(None);
        let value = parse_with_options(&nested_arrays(300), options).unwrap();
        assert_eq!(value.depth(), 300);
    }

    #[test]
    fn parser_instances_are_independent() {
        let first = Parser::new("[1]", ParseOptions::default());
        let second = Parser::new("[2]", ParseOptions::default());
        assert_eq!(second.parse(), Ok(JsonValue::Array(vec![int(2)])));
        assert_eq!(first.parse(), Ok(JsonValue::Array(vec![int(1)])));
    }
}
