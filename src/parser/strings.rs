//! String recognizer. Runs greedily by default; when the greedy attempt
//! discovers the closing quote must have been missing (the text ends right
//! after a delimiter), it rewinds to a checkpoint and retries in
//! stop-at-delimiter mode, treating the next delimiter as the place to insert
//! the closing quote.

use super::Repairer;
use crate::classify::{
    control_escape, is_control_character, is_delimiter, is_double_quote_like, is_hex_digit,
    is_quote, is_single_quote_like, is_valid_string_character,
};
use crate::emit::OutputBuilder;
use crate::error::{RepairErrorKind, RepairResult};

/// Which characters may close the string, chosen from its opening character.
/// ASCII quotes only match themselves; typographic quotes match their family.
#[derive(Clone, Copy)]
enum EndQuote {
    Double,
    Single,
    SingleLike,
    DoubleLike,
}

impl EndQuote {
    fn of(open: char) -> Self {
        if open == '"' {
            EndQuote::Double
        } else if open == '\'' {
            EndQuote::Single
        } else if is_single_quote_like(open) {
            EndQuote::SingleLike
        } else {
            EndQuote::DoubleLike
        }
    }

    fn matches(self, c: char) -> bool {
        match self {
            EndQuote::Double => c == '"',
            EndQuote::Single => c == '\'',
            EndQuote::SingleLike => is_single_quote_like(c),
            EndQuote::DoubleLike => is_double_quote_like(c),
        }
    }
}

impl Repairer {
    pub(crate) fn parse_string(&mut self, stop_at_delimiter: bool) -> RepairResult<bool> {
        let mut skip_escape_chars = false;
        if self.cur.peek() == Some('\\') {
            // A leading backslash marks a stringified string: the document
            // was embedded in another string and had its quotes escaped.
            // Drop that escape layer while parsing.
            self.cur.bump();
            skip_escape_chars = true;
        }

        let open = match self.cur.peek() {
            Some(c) if is_quote(c) => c,
            _ => return Ok(false),
        };
        let end_quote = EndQuote::of(open);
        if open != '"' {
            self.record("normalized quote character");
        }
        if skip_escape_chars {
            self.record("stripped escape layer of stringified string");
        }

        // Checkpoint for the stop-at-delimiter retry.
        let i_before = self.cur.pos();
        let o_before = self.out.len();

        let mut str_buf = OutputBuilder::new();
        str_buf.push('"');
        self.cur.bump();

        loop {
            let c = match self.cur.peek() {
                Some(c) => c,
                None => {
                    // End of input: a quote is missing somewhere. If the text
                    // ends with a delimiter (like `["hello]`), the quote
                    // belongs before that delimiter; retry in
                    // stop-at-delimiter mode.
                    let prev = self
                        .cur
                        .prev_non_whitespace(self.cur.pos().saturating_sub(1));
                    if !stop_at_delimiter && prev.is_some_and(is_delimiter) {
                        self.cur.set_pos(i_before);
                        self.out.truncate(o_before);
                        return self.parse_string(true);
                    }
                    self.record("repaired missing end quote");
                    str_buf.insert_before_last_whitespace('"');
                    self.out.push_builder(&str_buf);
                    return Ok(true);
                }
            };

            if end_quote.matches(c) {
                // Candidate end quote; verify it before committing.
                let i_quote = self.cur.pos();
                let o_quote = str_buf.len();
                str_buf.push('"');
                self.cur.bump();
                self.out.push_builder(&str_buf);

                // Newlines stay put here: a newline right after the quote is
                // delimiter evidence for the checks below.
                self.parse_whitespace_and_skip_comments(false);

                let next = self.cur.peek();
                if stop_at_delimiter
                    || next.is_none()
                    || next.is_some_and(|n| is_delimiter(n) || is_quote(n) || n.is_ascii_digit())
                {
                    // A legitimate end quote.
                    self.parse_concatenated_string()?;
                    return Ok(true);
                }

                let prev = if i_quote == 0 {
                    None
                } else {
                    self.cur.prev_non_whitespace(i_quote - 1)
                };
                if prev.is_some_and(is_delimiter) {
                    // The quote is preceded by a delimiter, so it opened the
                    // next token rather than closing this string. Retry,
                    // stopping at the first delimiter.
                    self.cur.set_pos(i_before);
                    self.out.truncate(o_before);
                    return self.parse_string(true);
                }

                // An unescaped quote in the middle of the string: escape it
                // and keep scanning.
                self.out.truncate(o_before);
                self.cur.set_pos(i_quote + 1);
                str_buf.insert(o_quote, '\\');
                self.record("escaped unescaped quote");
            } else if stop_at_delimiter && is_delimiter(c) {
                // The delimiter marks where the missing end quote belongs.
                self.record("repaired missing end quote");
                str_buf.insert_before_last_whitespace('"');
                self.out.push_builder(&str_buf);
                self.parse_concatenated_string()?;
                return Ok(true);
            } else if c == '\\' {
                match self.cur.peek_ahead(1) {
                    Some(esc) if matches!(esc, '"' | '\\' | '/' | 'b' | 'f' | 'n' | 'r' | 't') => {
                        str_buf.push('\\');
                        str_buf.push(esc);
                        self.cur.advance_by(2);
                    }
                    Some('u') => {
                        let mut j = 2;
                        while j < 6 && self.cur.peek_ahead(j).is_some_and(is_hex_digit) {
                            j += 1;
                        }
                        if j == 6 {
                            let escape = self.cur.collect(self.cur.pos(), self.cur.pos() + 6);
                            str_buf.push_str(&escape);
                            self.cur.advance_by(6);
                        } else if self.cur.pos() + j >= self.cur.len() {
                            // Truncated by end of input: drop the escape and
                            // let the end-of-input branch close the string.
                            self.record("removed truncated unicode escape");
                            self.cur.set_pos(self.cur.len());
                        } else {
                            return Err(self.err(RepairErrorKind::InvalidUnicodeCharacter));
                        }
                    }
                    Some(other) => {
                        // Not a JSON escape: drop the backslash.
                        self.record("removed invalid escape character");
                        str_buf.push(other);
                        self.cur.advance_by(2);
                    }
                    None => {
                        // Lone backslash at the very end of the input.
                        self.cur.set_pos(self.cur.len());
                    }
                }
            } else if c == '"' && self.cur.peek_at(self.cur.pos() - 1) != Some('\\') {
                // A bare double quote inside a string delimited by other
                // quote characters. Quotes whose escape layer was stripped
                // (previous character is a backslash) are left as-is.
                self.record("escaped unescaped double quote");
                str_buf.push('\\');
                str_buf.push('"');
                self.cur.bump();
            } else if is_control_character(c) {
                self.record("escaped control character");
                str_buf.push_str(control_escape(c));
                self.cur.bump();
            } else {
                if !is_valid_string_character(c) {
                    return Err(self.err(RepairErrorKind::InvalidCharacter(c)));
                }
                str_buf.push(c);
                self.cur.bump();
            }

            if skip_escape_chars {
                // Complete the un-doubling of the outer escape layer.
                self.cur.eat('\\');
            }
        }
    }

    /// After a completed string, fold `+`-concatenated strings into it:
    /// `"a" + "b"` becomes `"ab"` by stripping the left close quote and the
    /// right open quote.
    pub(crate) fn parse_concatenated_string(&mut self) -> RepairResult<bool> {
        let mut processed = false;
        self.parse_whitespace_and_skip_comments(true);
        while self.cur.peek() == Some('+') {
            processed = true;
            self.record("merged concatenated string");
            self.cur.bump();
            self.parse_whitespace_and_skip_comments(true);
            self.out.strip_last_occurrence('"', true);
            let start = self.out.len();
            if self.parse_string(false)? {
                self.out.remove_at(start);
            } else {
                // No right-hand string: re-close the left one.
                self.out.insert_before_last_whitespace('"');
            }
        }
        Ok(processed)
    }
}
