use super::Repairer;
use crate::classify::{is_delimiter, is_whitespace};
use crate::error::RepairResult;

impl Repairer {
    /// Optional `-`, digits, optional `.` digits, optional exponent. A run
    /// cut off right after `-`, `.` or `e`/`E±` is completed with a `0`
    /// (`-0`, `1.0`, `1e0`); a run that does not end at a number boundary is
    /// rewound so the unquoted-string recognizer can claim it.
    pub(crate) fn parse_number(&mut self) -> RepairResult<bool> {
        let start = self.cur.pos();

        if self.cur.peek() == Some('-') {
            self.cur.bump();
            if self.at_end_of_number() {
                self.repair_truncated_number(start);
                return Ok(true);
            }
            if !self.peek_digit() {
                self.cur.set_pos(start);
                return Ok(false);
            }
        }

        let mut integer_digits = 0usize;
        while self.peek_digit() {
            self.cur.bump();
            integer_digits += 1;
        }

        if integer_digits > 0 && self.cur.peek() == Some('.') {
            self.cur.bump();
            if self.at_end_of_number() {
                self.repair_truncated_number(start);
                return Ok(true);
            }
            if !self.peek_digit() {
                self.cur.set_pos(start);
                return Ok(false);
            }
            while self.peek_digit() {
                self.cur.bump();
            }
        }

        if integer_digits > 0 && matches!(self.cur.peek(), Some('e' | 'E')) {
            self.cur.bump();
            if matches!(self.cur.peek(), Some('-' | '+')) {
                self.cur.bump();
            }
            if self.at_end_of_number() {
                self.repair_truncated_number(start);
                return Ok(true);
            }
            if !self.peek_digit() {
                self.cur.set_pos(start);
                return Ok(false);
            }
            while self.peek_digit() {
                self.cur.bump();
            }
        }

        if !self.at_end_of_number() {
            // Something like `123abc`; not a number after all.
            self.cur.set_pos(start);
            return Ok(false);
        }

        if self.cur.pos() > start {
            let num = self.cur.collect(start, self.cur.pos());
            let unsigned = num.strip_prefix('-').unwrap_or(&num);
            let invalid_leading_zero = unsigned.len() > 1
                && unsigned.starts_with('0')
                && unsigned.as_bytes()[1].is_ascii_digit();
            if invalid_leading_zero {
                // `00789` is not strict JSON and the zeros may carry meaning.
                self.record("quoted number with leading zero");
                self.out.push_json_string(&num);
            } else {
                self.out.push_str(&num);
            }
            return Ok(true);
        }
        Ok(false)
    }

    #[inline]
    fn peek_digit(&self) -> bool {
        self.cur.peek().is_some_and(|c| c.is_ascii_digit())
    }

    fn at_end_of_number(&self) -> bool {
        match self.cur.peek() {
            None => true,
            Some(c) => is_delimiter(c) || is_whitespace(c),
        }
    }

    /// The only place the parser fabricates a digit.
    fn repair_truncated_number(&mut self, start: usize) {
        self.record("completed truncated number");
        let num = self.cur.collect(start, self.cur.pos());
        self.out.push_str(&num);
        self.out.push('0');
    }
}
