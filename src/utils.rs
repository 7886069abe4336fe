//! Miscellaneous rendering helpers used by the `jp` binary.

use anyhow::Context as _;
use colored::Colorize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::tokenizer::Token;
use crate::value::JsonValue;

// ==============================================================================
// Colorized JSON Output
// ==============================================================================

/// Write a parsed value (colorized where `colored` allows it) to `writer`,
/// followed by a newline. Object keys are written in sorted order. Silently
/// returns `Ok(())` on broken pipe so that piping to tools like `less` or
/// `head` exits cleanly.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_result<W: Write>(
    writer: &mut W,
    value: &JsonValue,
    pretty: bool,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        write_colored_json(writer, value, 0, pretty)?;
        writeln!(writer)?;
        Ok(())
    })();

    suppress_broken_pipe(result).context("write JSON to stdout")
}

/// Write one token per line, in scanning order.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_tokens<W: Write>(
    writer: &mut W,
    tokens: &[Token],
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for token in tokens {
            let rendered = token.to_string();
            if token.is_structural() {
                writeln!(writer, "{}", rendered.bold())?;
            } else {
                writeln!(writer, "{rendered}")?;
            }
        }
        Ok(())
    })();

    suppress_broken_pipe(result).context("write tokens to stdout")
}

fn suppress_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}

/// Quote and escape a string the way JSON text spells it.
fn quoted(s: &str) -> String {
    // NOTE: serializing a `&str` cannot fail
    serde_json::to_string(s).unwrap_or_else(|_| format!("{s:?}"))
}

/// Recursively write a JSON value with syntax highlighting.
fn write_colored_json<W: Write>(
    writer: &mut W,
    value: &JsonValue,
    indent: usize,
    pretty: bool,
) -> io::Result<()> {
    let next_indent = indent + 2;

    match value {
        JsonValue::Null => write!(writer, "{}", "null".red().dimmed()),
        JsonValue::Boolean(b) => {
            write!(writer, "{}", b.to_string().yellow().bold())
        }
        JsonValue::Number(n) => write!(writer, "{}", n.to_string().yellow()),
        JsonValue::String(s) => write!(writer, "{}", quoted(s).green()),
        JsonValue::Array(arr) => {
            write!(writer, "[")?;
            for (i, item) in arr.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write_colored_json(writer, item, next_indent, pretty)?;
                if i < arr.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !arr.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "]")
        }
        JsonValue::Object(obj) => {
            write!(writer, "{{")?;
            let mut entries: Vec<_> = obj.iter().collect();
            entries.sort_by(|(a, _), (b, _)| a.cmp(b));
            for (i, (key, val)) in entries.iter().enumerate() {
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                // Key with quotes -> colored cyan.
                write!(writer, "{}", quoted(key).cyan())?;
                if pretty {
                    write!(writer, ": ")?;
                } else {
                    write!(writer, ":")?;
                }
                write_colored_json(writer, val, next_indent, pretty)?;
                if i < entries.len() - 1 {
                    write!(writer, ",")?;
                }
            }
            if pretty && !entries.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "}}")
        }
    }
}
