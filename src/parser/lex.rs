//! Whitespace, comments and ellipsis. Whitespace is echoed to the output
//! (special Unicode whitespace normalized to a single space); comments and
//! ellipses are consumed silently.

use super::Repairer;
use crate::classify::{is_special_whitespace, is_whitespace, is_whitespace_except_newline};

impl Repairer {
    /// Alternate whitespace and comments until neither matches. With
    /// `skip_newline` false, newlines are left in place; the string
    /// recognizer relies on that to see a newline as delimiter evidence when
    /// verifying a candidate end quote.
    pub(crate) fn parse_whitespace_and_skip_comments(&mut self, skip_newline: bool) -> bool {
        let start = self.cur.pos();
        self.parse_whitespace(skip_newline);
        loop {
            if !self.parse_comment() {
                break;
            }
            self.parse_whitespace(skip_newline);
        }
        self.cur.pos() > start
    }

    fn parse_whitespace(&mut self, skip_newline: bool) -> bool {
        let matches_ws = if skip_newline {
            is_whitespace
        } else {
            is_whitespace_except_newline
        };
        let mut whitespace = String::new();
        while let Some(c) = self.cur.peek() {
            if matches_ws(c) {
                whitespace.push(c);
            } else if is_special_whitespace(c) {
                self.record("normalized special whitespace");
                whitespace.push(' ');
            } else {
                break;
            }
            self.cur.bump();
        }
        if whitespace.is_empty() {
            return false;
        }
        self.out.push_str(&whitespace);
        true
    }

    /// Block (`/* ... */`) or line (`// ...`) comment; nothing is emitted.
    /// A line comment leaves its newline behind for the whitespace pass.
    fn parse_comment(&mut self) -> bool {
        if self.cur.starts_with("/*") {
            self.record("stripped block comment");
            self.cur.advance_by(2);
            while !self.cur.at_end() && !self.cur.starts_with("*/") {
                self.cur.bump();
            }
            self.cur.advance_by(2);
            true
        } else if self.cur.starts_with("//") {
            self.record("stripped line comment");
            self.cur.advance_by(2);
            while let Some(c) = self.cur.peek() {
                if c == '\n' {
                    break;
                }
                self.cur.bump();
            }
            true
        } else {
            false
        }
    }

    /// `...` between elements or members, as left behind by truncated dumps.
    /// Consumed silently, together with one adjacent comma.
    pub(crate) fn skip_ellipsis(&mut self) {
        self.parse_whitespace_and_skip_comments(true);
        if self.cur.starts_with("...") {
            self.record("stripped ellipsis");
            self.cur.advance_by(3);
            self.parse_whitespace_and_skip_comments(true);
            self.cur.eat(',');
        }
    }
}
