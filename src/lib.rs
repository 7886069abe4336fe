/*!
# `jparse` Library

A recursive-descent JSON parser. The [`tokenizer`] turns characters into
decoded tokens and the [`parser`] assembles them into a [`JsonValue`] tree.

```rust
use jparse::{JsonValue, parse};

let value = parse(r#"[1, "two", null]"#).expect("valid JSON");
assert_eq!(value.depth(), 2);
assert!(matches!(value, JsonValue::Array(_)));
```
*/

pub mod commands;
pub mod error;
pub mod parser;
pub mod tokenizer;
pub mod utils;
pub mod value;

// Re-exports
pub use error::JsonParseError;
pub use parser::{DEFAULT_MAX_DEPTH, ParseOptions, Parser, parse, parse_with_options};
pub use value::{JsonValue, Number};
