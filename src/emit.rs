//! Append-only output buffer with the three back-patch primitives the parser
//! needs to correct decisions after the fact: strip-last-occurrence,
//! insert-before-last-whitespace and remove-at-index.
//!
//! The buffer holds Unicode scalar values, not bytes, so every edit is
//! UTF-8-safe and all indices agree with the cursor's scalar indices.

use crate::classify::is_whitespace;

#[derive(Debug, Default)]
pub(crate) struct OutputBuilder {
    buf: Vec<char>,
}

impl OutputBuilder {
    pub(crate) fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Length in scalar values.
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn push(&mut self, c: char) {
        self.buf.push(c);
    }

    pub(crate) fn push_str(&mut self, s: &str) {
        self.buf.extend(s.chars());
    }

    /// Flush another builder's contents onto this one. The string recognizer
    /// assembles each string in a local builder and appends it wholesale.
    pub(crate) fn push_builder(&mut self, other: &OutputBuilder) {
        self.buf.extend_from_slice(&other.buf);
    }

    /// Append `text` as a JSON string literal, escaping as needed. Used for
    /// unquoted strings and quoted number tokens.
    pub(crate) fn push_json_string(&mut self, text: &str) {
        self.buf.push('"');
        for c in text.chars() {
            match c {
                '"' => self.push_str("\\\""),
                '\\' => self.push_str("\\\\"),
                '\u{0008}' => self.push_str("\\b"),
                '\u{000C}' => self.push_str("\\f"),
                '\n' => self.push_str("\\n"),
                '\r' => self.push_str("\\r"),
                '\t' => self.push_str("\\t"),
                c if c < '\u{0020}' => {
                    self.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => self.buf.push(c),
            }
        }
        self.buf.push('"');
    }

    /// Roll the buffer back to a checkpoint taken with `len()`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    pub(crate) fn insert(&mut self, index: usize, c: char) {
        self.buf.insert(index, c);
    }

    pub(crate) fn remove_at(&mut self, index: usize) {
        self.buf.remove(index);
    }

    /// Remove the last occurrence of `c`. With `strip_remaining`, everything
    /// after that occurrence is dropped too (at every call site that is only
    /// trailing whitespace).
    pub(crate) fn strip_last_occurrence(&mut self, c: char, strip_remaining: bool) {
        if let Some(index) = self.buf.iter().rposition(|&b| b == c) {
            if strip_remaining {
                self.buf.truncate(index);
            } else {
                self.buf.remove(index);
            }
        }
    }

    /// Insert `c` before the trailing whitespace run, or append when the
    /// buffer does not end in whitespace. Keeps repaired punctuation snug
    /// against the token it belongs to, preserving pretty-printing.
    pub(crate) fn insert_before_last_whitespace(&mut self, c: char) {
        let mut index = self.buf.len();
        while index > 0 && is_whitespace(self.buf[index - 1]) {
            index -= 1;
        }
        self.buf.insert(index, c);
    }

    /// True when the buffer ends with `,` or a newline, ignoring trailing
    /// spaces/tabs/carriage returns. The newline-delimited-JSON detection in
    /// the driver keys off this.
    pub(crate) fn ends_with_comma_or_newline(&self) -> bool {
        let mut index = self.buf.len();
        while index > 0 && matches!(self.buf[index - 1], ' ' | '\t' | '\r') {
            index -= 1;
        }
        index > 0 && matches!(self.buf[index - 1], ',' | '\n')
    }

    /// Wrap the whole buffer, used once to turn newline-delimited values into
    /// a JSON array.
    pub(crate) fn wrap(&mut self, prefix: &str, suffix: &str) {
        let mut wrapped: Vec<char> = prefix.chars().collect();
        wrapped.append(&mut self.buf);
        wrapped.extend(suffix.chars());
        self.buf = wrapped;
    }

    pub(crate) fn into_string(self) -> String {
        self.buf.into_iter().collect()
    }
}
