//! Hand-written recursive descent repair parser. One pass over the input,
//! emitting output as it goes; mistakes discovered after the fact are fixed
//! by back-patching the output buffer (see `emit::OutputBuilder`) instead of
//! re-parsing.

mod array;
pub(crate) mod cursor;
mod lex;
mod number;
mod object;
mod strings;

use crate::classify::{
    is_delimiter, is_function_name_char, is_function_name_char_start, is_start_of_value,
    is_whitespace,
};
use crate::emit::OutputBuilder;
use crate::error::{RepairError, RepairErrorKind, RepairResult};
use crate::log::{Logger, RepairLogEntry};
use cursor::Cursor;

pub(crate) fn repair_to_string_impl(input: &str) -> RepairResult<String> {
    let text = pre_trim(input);

    // Fast path: already-valid JSON passes through untouched. The core parser
    // would echo it anyway (valid JSON has no special whitespace between
    // tokens), so behavior is identical, just cheaper.
    #[cfg(feature = "serde")]
    if serde_json::from_str::<serde_json::Value>(text).is_ok() {
        return Ok(text.to_string());
    }

    let (output, _) = Repairer::new(text, false).parse()?;
    Ok(output)
}

pub(crate) fn repair_to_string_with_log_impl(
    input: &str,
) -> RepairResult<(String, Vec<RepairLogEntry>)> {
    // No fast path here: the caller asked to see the repairs.
    Repairer::new(pre_trim(input), true).parse()
}

/// Strip wrappers the core grammar has no business seeing: a UTF-8 BOM and a
/// Markdown fenced code block. Backtick is a quote-like character, so an
/// unstripped fence would otherwise be parsed as garbage strings.
pub(crate) fn pre_trim(input: &str) -> &str {
    let mut text = input;
    if let Some(rest) = text.strip_prefix('\u{FEFF}') {
        text = rest;
    }
    if let Some(body) = trim_fenced_block(text) {
        text = body;
    }
    text
}

/// Accept ``` with an optional language token, optional spaces/tabs and an
/// optional newline; return the body up to the closing ```. Without a closing
/// fence the input is left alone.
fn trim_fenced_block(text: &str) -> Option<&str> {
    let rest = text.strip_prefix("```")?;
    let mut index = 0;
    let bytes = rest.as_bytes();
    while index < bytes.len() && bytes[index] == b'`' {
        index += 1;
    }
    while index < bytes.len() && (bytes[index].is_ascii_alphanumeric() || bytes[index] == b'_') {
        index += 1;
    }
    while index < bytes.len() && (bytes[index] == b' ' || bytes[index] == b'\t') {
        index += 1;
    }
    if rest[index..].starts_with("\r\n") {
        index += 2;
    } else if rest[index..].starts_with('\n') {
        index += 1;
    }
    let body = &rest[index..];
    body.find("```").map(|end| &body[..end])
}

pub(crate) struct Repairer {
    cur: Cursor,
    out: OutputBuilder,
    log: Logger,
}

impl Repairer {
    pub(crate) fn new(input: &str, logging: bool) -> Self {
        Self {
            cur: Cursor::new(input),
            out: OutputBuilder::with_capacity(input.len()),
            log: Logger::new(logging),
        }
    }

    /// Top-level driver: exactly one root value, then either a
    /// newline-delimited tail (wrapped into an array), a stray trailing
    /// comma (stripped), or redundant closers (skipped).
    pub(crate) fn parse(mut self) -> RepairResult<(String, Vec<RepairLogEntry>)> {
        self.parse_whitespace_and_skip_comments(true);
        let processed = self.parse_value()?;
        if !processed {
            return Err(RepairError::new(
                RepairErrorKind::UnexpectedEnd,
                self.cur.len(),
            ));
        }

        let processed_comma = self.parse_character(',');
        if processed_comma {
            self.parse_whitespace_and_skip_comments(true);
        }

        if self.cur.peek().is_some_and(is_start_of_value) && self.out.ends_with_comma_or_newline()
        {
            // Newline-delimited JSON: more root values follow.
            if !processed_comma {
                self.out.insert_before_last_whitespace(',');
                self.record("inserted missing comma between root values");
            }
            self.parse_newline_delimited_json()?;
        } else if processed_comma {
            // A comma after the root value but nothing behind it.
            self.out.strip_last_occurrence(',', false);
            self.record("stripped trailing comma");
        }

        while matches!(self.cur.peek(), Some('}' | ']')) {
            self.record("stripped redundant closer");
            self.cur.bump();
            self.parse_whitespace_and_skip_comments(true);
        }

        if self.cur.at_end() {
            return Ok((self.out.into_string(), self.log.into_entries()));
        }
        let c = self.cur.peek().unwrap_or('\u{0}');
        Err(RepairError::new(
            RepairErrorKind::UnexpectedCharacter(c),
            self.cur.pos(),
        ))
    }

    /// Keep consuming root values, splicing commas between them, until one
    /// fails to parse; then wrap everything in `[` ... `]`.
    fn parse_newline_delimited_json(&mut self) -> RepairResult<()> {
        let mut initial = true;
        let mut processed_value = true;
        while processed_value {
            if initial {
                initial = false;
            } else {
                let processed_comma = self.parse_character(',');
                if !processed_comma {
                    self.out.insert_before_last_whitespace(',');
                }
            }
            processed_value = self.parse_value()?;
        }
        // The last iteration spliced a comma for a value that never came.
        self.out.strip_last_occurrence(',', false);
        self.out.wrap("[\n", "\n]");
        self.record("wrapped newline-delimited values in an array");
        Ok(())
    }

    pub(crate) fn parse_value(&mut self) -> RepairResult<bool> {
        self.parse_whitespace_and_skip_comments(true);
        let processed = self.parse_object()?
            || self.parse_array()?
            || self.parse_string(false)?
            || self.parse_number()?
            || self.parse_keywords()
            || self.parse_unquoted_string()?;
        self.parse_whitespace_and_skip_comments(true);
        Ok(processed)
    }

    fn parse_keywords(&mut self) -> bool {
        self.parse_keyword("true", "true")
            || self.parse_keyword("false", "false")
            || self.parse_keyword("null", "null")
            || self.parse_keyword("True", "true")
            || self.parse_keyword("False", "false")
            || self.parse_keyword("None", "null")
    }

    fn parse_keyword(&mut self, literal: &str, replacement: &'static str) -> bool {
        if !self.cur.starts_with(literal) {
            return false;
        }
        if literal != replacement {
            self.record("normalized non-standard keyword");
        }
        self.out.push_str(replacement);
        self.cur.advance_by(literal.chars().count());
        true
    }

    /// Unquoted run of text, or a function-call wrapper like `NumberLong(2)`
    /// or `callback({...});` whose inner value is kept and whose wrapper is
    /// discarded.
    pub(crate) fn parse_unquoted_string(&mut self) -> RepairResult<bool> {
        let start = self.cur.pos();

        if self.cur.peek().is_some_and(is_function_name_char_start) {
            let mut index = self.cur.pos();
            while self.cur.peek_at(index).is_some_and(is_function_name_char) {
                index += 1;
            }
            let mut after = index;
            while self.cur.peek_at(after).is_some_and(is_whitespace) {
                after += 1;
            }
            if self.cur.peek_at(after) == Some('(') {
                self.record("stripped function call wrapper");
                self.cur.set_pos(after + 1);
                self.parse_value()?;
                self.cur.eat(')');
                self.cur.eat(';');
                return Ok(true);
            }
        }

        while let Some(c) = self.cur.peek() {
            if is_delimiter(c) {
                break;
            }
            self.cur.bump();
        }

        if self.cur.pos() == start {
            return Ok(false);
        }

        // Back up over trailing whitespace so it stays outside the string.
        let mut end = self.cur.pos();
        while end > start && self.cur.peek_at(end - 1).is_some_and(is_whitespace) {
            end -= 1;
        }
        self.cur.set_pos(end);

        let symbol = self.cur.collect(start, end);
        if symbol == "undefined" {
            self.record("replaced undefined with null");
            self.out.push_str("null");
        } else {
            self.record("quoted unquoted string");
            self.out.push_json_string(&symbol);
        }

        if self.cur.peek() == Some('"') {
            // The run had a closing quote but no opening one; drop it.
            self.cur.bump();
        }
        Ok(true)
    }

    /// Consume and emit `c` when it is the next character.
    pub(crate) fn parse_character(&mut self, c: char) -> bool {
        if self.cur.eat(c) {
            self.out.push(c);
            true
        } else {
            false
        }
    }

    pub(crate) fn record(&mut self, message: &'static str) {
        if self.log.enabled() {
            let position = self.cur.pos();
            let context = self.cur.context(position);
            self.log.record(position, message, context);
        }
    }

    pub(crate) fn err(&self, kind: RepairErrorKind) -> RepairError {
        RepairError::new(kind, self.cur.pos())
    }
}
