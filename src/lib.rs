//! Repair malformed JSON-like text into strictly valid JSON.
//!
//! The input may come from lenient producers (JavaScript object literals,
//! Python `repr`, MongoDB shells, JSONP responses, log streams, truncated
//! dumps). A single pass over the text emits repaired output, back-patching
//! it when a mistake only becomes visible later. Soft problems (missing
//! commas, quotes, colons and closers, comments, non-standard quotes,
//! newline-delimited values, leading zeros, truncated literals) are fixed
//! silently; anything else fails with a [`RepairError`] carrying the input
//! offset where repair became impossible.
//!
//! ```
//! let out = jsonmend::repair_to_string("{name: 'John', age: 30,}").unwrap();
//! assert_eq!(out, r#"{"name": "John", "age": 30}"#);
//! ```

mod classify;
pub mod cli;
mod emit;
pub mod error;
mod log;
mod parser;
pub mod stream;

pub use error::{RepairError, RepairErrorKind};
pub use log::RepairLogEntry;
pub use stream::{StreamOptions, StreamRepairer};

use std::io::Write;

/// Repair a potentially invalid JSON string into a valid JSON string.
pub fn repair_to_string(input: &str) -> Result<String, RepairError> {
    parser::repair_to_string_impl(input)
}

/// Repair and additionally return a log of every repair that was applied.
pub fn repair_to_string_with_log(
    input: &str,
) -> Result<(String, Vec<RepairLogEntry>), RepairError> {
    parser::repair_to_string_with_log_impl(input)
}

/// Repair a potentially invalid JSON string and write the result into an
/// `io::Write`, avoiding a copy when the caller streams to a sink.
pub fn repair_to_writer<W: Write>(input: &str, writer: &mut W) -> Result<(), RepairError> {
    let s = repair_to_string(input)?;
    writer.write_all(s.as_bytes()).map_err(RepairError::from_io)
}

/// Repair a sequence of UTF-8 chunks with the streaming engine and collect
/// the output into a `String`. Newline-delimited root values come back as a
/// single JSON array, like [`repair_to_string`] on the concatenated input.
pub fn repair_chunks_to_string<'a, I>(chunks: I, opts: &StreamOptions) -> Result<String, RepairError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut repairer = StreamRepairer::new(opts.clone());
    let mut out = String::new();
    for chunk in chunks {
        let s = repairer.push(chunk)?;
        if !s.is_empty() {
            out.push_str(&s);
        }
    }
    let tail = repairer.flush()?;
    if !tail.is_empty() {
        out.push_str(&tail);
    }
    Ok(out)
}

/// Repair and then parse into a `serde_json::Value`.
#[cfg(feature = "serde")]
pub fn repair_to_value(input: &str) -> Result<serde_json::Value, RepairError> {
    let s = repair_to_string(input)?;
    serde_json::from_str(&s).map_err(|e| RepairError::from_serde("parse", e))
}

#[cfg(test)]
mod tests;
