use super::Repairer;
use crate::classify::is_start_of_value;
use crate::error::{RepairErrorKind, RepairResult};

impl Repairer {
    pub(crate) fn parse_object(&mut self) -> RepairResult<bool> {
        if !self.cur.eat('{') {
            return Ok(false);
        }
        self.out.push('{');
        self.parse_whitespace_and_skip_comments(true);

        // Stray comma right after the opening brace, like `{, "a": 1}`.
        if self.cur.eat(',') {
            self.record("stripped leading comma");
            self.parse_whitespace_and_skip_comments(true);
        }

        let mut initial = true;
        while !self.cur.at_end() && self.cur.peek() != Some('}') {
            // Whether this iteration put a member separator in the output;
            // only such a comma may be stripped back out below.
            let emitted_comma = !initial;
            if initial {
                initial = false;
            } else {
                if !self.parse_character(',') {
                    self.record("inserted missing comma");
                    self.out.insert_before_last_whitespace(',');
                }
                self.parse_whitespace_and_skip_comments(true);
            }

            self.skip_ellipsis();

            let processed_key = self.parse_string(false)? || self.parse_unquoted_string()?;
            if !processed_key {
                if matches!(self.cur.peek(), Some('{' | '}' | '[' | ']') | None) {
                    // Nothing but a closer behind the comma: it was trailing.
                    if emitted_comma {
                        self.record("stripped trailing comma");
                        self.out.strip_last_occurrence(',', false);
                    }
                } else {
                    return Err(self.err(RepairErrorKind::ObjectKeyExpected));
                }
                break;
            }

            self.parse_whitespace_and_skip_comments(true);
            let processed_colon = self.parse_character(':');
            let truncated = self.cur.at_end();
            if !processed_colon {
                if truncated || self.cur.peek().is_some_and(is_start_of_value) {
                    self.record("inserted missing colon");
                    self.out.insert_before_last_whitespace(':');
                } else {
                    return Err(self.err(RepairErrorKind::ColonExpected));
                }
            }

            let processed_value = self.parse_value()?;
            if !processed_value {
                if processed_colon || truncated {
                    self.record("inserted missing value null");
                    self.out.push_str("null");
                } else {
                    return Err(self.err(RepairErrorKind::ColonExpected));
                }
            }
        }

        if self.cur.eat('}') {
            self.out.push('}');
        } else {
            self.record("inserted missing closing brace");
            self.out.insert_before_last_whitespace('}');
        }
        Ok(true)
    }
}
