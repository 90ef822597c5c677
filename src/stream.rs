//! Streaming repair: a chunked transform over the core parser.
//!
//! Input chunks are buffered until a complete top-level value is available
//! (a newline at depth zero, outside strings and comments). Each complete
//! segment is repaired by the core parser; newline-delimited values are
//! aggregated into a JSON array with the same shape the non-streaming driver
//! produces. Memory stays proportional to the window: a single value whose
//! text outgrows `window_size` raises `BufferExceeded` instead of buffering
//! without bound.

use crate::classify::{is_double_quote_like, is_single_quote_like};
use crate::error::{RepairError, RepairErrorKind, RepairResult};
use memchr::memchr;
use std::io::Write;

#[derive(Clone, Debug)]
pub struct StreamOptions {
    /// Maximum buffered size in bytes of a single top-level value.
    pub window_size: usize,
    /// Suggested read size in bytes for callers feeding from a byte stream.
    pub chunk_size: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self {
            window_size: 65536,
            chunk_size: 65536,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum QuoteKind {
    Single,
    Double,
}

pub struct StreamRepairer {
    opts: StreamOptions,
    /// Unconsumed input: the prefix of the current segment.
    buf: String,
    /// Byte index into `buf` where scanning resumes.
    scan_pos: usize,
    depth: i32,
    in_string: bool,
    quote_kind: QuoteKind,
    escape: bool,
    in_line_comment: bool,
    in_block_comment: bool,
    /// Scalar values drained from `buf` so far; segment-relative error
    /// positions are re-based onto this.
    chars_consumed: usize,
    /// Repaired values emitted so far, driving the NDJSON aggregation.
    emitted: usize,
    /// The first repaired value, held back until a second value proves the
    /// input is newline-delimited and needs array wrapping.
    pending: Option<String>,
}

impl StreamRepairer {
    pub fn new(opts: StreamOptions) -> Self {
        Self {
            opts,
            buf: String::new(),
            scan_pos: 0,
            depth: 0,
            in_string: false,
            quote_kind: QuoteKind::Double,
            escape: false,
            in_line_comment: false,
            in_block_comment: false,
            chars_consumed: 0,
            emitted: 0,
            pending: None,
        }
    }

    /// Feed a chunk; returns whatever output became complete.
    pub fn push(&mut self, chunk: &str) -> RepairResult<String> {
        self.buf.push_str(chunk);
        let mut out = String::new();
        self.scan(&mut out)?;
        if self.buf.len() > self.opts.window_size {
            return Err(RepairError::new(
                RepairErrorKind::BufferExceeded,
                self.chars_consumed,
            ));
        }
        Ok(out)
    }

    /// Repair whatever input remains and close the aggregation. An input
    /// that held no value at all fails with `UnexpectedEnd`, like the
    /// non-streaming parser.
    pub fn flush(&mut self) -> RepairResult<String> {
        let mut out = String::new();
        self.scan(&mut out)?;
        let tail = std::mem::take(&mut self.buf);
        self.scan_pos = 0;
        if !is_blank_segment(&tail) {
            let repaired = self.repair_segment(&tail)?;
            self.emit_value(repaired, &mut out);
        }
        self.chars_consumed += tail.chars().count();

        match self.emitted {
            0 => Err(RepairError::new(
                RepairErrorKind::UnexpectedEnd,
                self.chars_consumed,
            )),
            1 => {
                if let Some(only) = self.pending.take() {
                    out.push_str(&only);
                }
                Ok(out)
            }
            _ => {
                out.push_str("\n]");
                Ok(out)
            }
        }
    }

    pub fn push_to_writer<W: Write>(&mut self, chunk: &str, writer: &mut W) -> RepairResult<()> {
        let s = self.push(chunk)?;
        if !s.is_empty() {
            writer.write_all(s.as_bytes()).map_err(RepairError::from_io)?;
        }
        Ok(())
    }

    pub fn flush_to_writer<W: Write>(&mut self, writer: &mut W) -> RepairResult<()> {
        let s = self.flush()?;
        if !s.is_empty() {
            writer.write_all(s.as_bytes()).map_err(RepairError::from_io)?;
        }
        Ok(())
    }

    /// Advance the boundary scanner over the buffered input, repairing and
    /// emitting every completed segment.
    fn scan(&mut self, out: &mut String) -> RepairResult<()> {
        while self.scan_pos < self.buf.len() {
            if self.in_line_comment {
                match memchr(b'\n', &self.buf.as_bytes()[self.scan_pos..]) {
                    Some(pos) => {
                        // Leave the newline in place: it may close a segment.
                        self.scan_pos += pos;
                        self.in_line_comment = false;
                    }
                    None => {
                        self.scan_pos = self.buf.len();
                        break;
                    }
                }
                continue;
            }
            if self.in_block_comment {
                let bytes = &self.buf.as_bytes()[self.scan_pos..];
                match find_block_comment_end(bytes) {
                    Some(end) => {
                        self.scan_pos += end;
                        self.in_block_comment = false;
                        continue;
                    }
                    None => {
                        // Keep a trailing '*' around: its '/' may arrive in
                        // the next chunk.
                        let keep = usize::from(bytes.last() == Some(&b'*'));
                        self.scan_pos = self.buf.len() - keep;
                        break;
                    }
                }
            }

            let rest = &self.buf[self.scan_pos..];
            let c = match rest.chars().next() {
                Some(c) => c,
                None => break,
            };
            let clen = c.len_utf8();

            if self.in_string {
                if self.escape {
                    self.escape = false;
                } else if c == '\\' {
                    self.escape = true;
                } else {
                    let closes = match self.quote_kind {
                        QuoteKind::Double => is_double_quote_like(c),
                        QuoteKind::Single => is_single_quote_like(c),
                    };
                    if closes {
                        self.in_string = false;
                    }
                }
                self.scan_pos += clen;
                continue;
            }

            match c {
                // A lone slash at the buffer end cannot be classified yet.
                '/' if rest.len() == 1 => break,
                '/' if rest.as_bytes().get(1) == Some(&b'/') => {
                    self.in_line_comment = true;
                    self.scan_pos += 2;
                }
                '/' if rest.as_bytes().get(1) == Some(&b'*') => {
                    self.in_block_comment = true;
                    self.scan_pos += 2;
                }
                '{' | '[' => {
                    self.depth += 1;
                    self.scan_pos += 1;
                }
                '}' | ']' => {
                    self.depth -= 1;
                    self.scan_pos += 1;
                }
                '\n' if self.depth <= 0 => {
                    let boundary = self.scan_pos;
                    let segment = self.buf[..boundary].to_string();
                    let consumed_chars = segment.chars().count() + 1;
                    self.buf.drain(..boundary + 1);
                    self.scan_pos = 0;
                    if !is_blank_segment(&segment) {
                        let repaired = self.repair_segment(&segment)?;
                        self.emit_value(repaired, out);
                    }
                    self.chars_consumed += consumed_chars;
                }
                c if is_double_quote_like(c) => {
                    self.in_string = true;
                    self.quote_kind = QuoteKind::Double;
                    self.escape = false;
                    self.scan_pos += clen;
                }
                c if is_single_quote_like(c) => {
                    self.in_string = true;
                    self.quote_kind = QuoteKind::Single;
                    self.escape = false;
                    self.scan_pos += clen;
                }
                _ => {
                    self.scan_pos += clen;
                }
            }
        }
        Ok(())
    }

    /// Run the core parser on one segment, re-basing error positions onto
    /// absolute input offsets.
    fn repair_segment(&self, segment: &str) -> RepairResult<String> {
        let start = segment.trim_start_matches([' ', '\t', '\r', '\n']);
        let leading = segment.chars().count() - start.chars().count();
        let trimmed = start.trim_end_matches([' ', '\t', '\r', '\n']);
        crate::repair_to_string(trimmed).map_err(|e| e.offset_by(self.chars_consumed + leading))
    }

    fn emit_value(&mut self, value: String, out: &mut String) {
        match self.emitted {
            0 => {
                self.pending = Some(value);
            }
            1 => {
                out.push_str("[\n");
                if let Some(first) = self.pending.take() {
                    out.push_str(&first);
                }
                out.push_str(",\n");
                out.push_str(&value);
            }
            _ => {
                out.push_str(",\n");
                out.push_str(&value);
            }
        }
        self.emitted += 1;
    }
}

fn find_block_comment_end(bytes: &[u8]) -> Option<usize> {
    let mut offset = 0;
    while let Some(pos) = memchr(b'*', &bytes[offset..]) {
        let idx = offset + pos;
        if idx + 1 >= bytes.len() {
            return None;
        }
        if bytes[idx + 1] == b'/' {
            return Some(idx + 2);
        }
        offset = idx + 1;
    }
    None
}

/// True when the segment holds nothing but whitespace and comments, like the
/// blank and comment-only lines that show up between NDJSON records.
fn is_blank_segment(s: &str) -> bool {
    let mut rest = s;
    loop {
        rest = rest.trim_start_matches([' ', '\t', '\r', '\n']);
        if rest.is_empty() {
            return true;
        }
        if let Some(r) = rest.strip_prefix("//") {
            rest = match r.find('\n') {
                Some(pos) => &r[pos + 1..],
                None => "",
            };
        } else if let Some(r) = rest.strip_prefix("/*") {
            rest = match r.find("*/") {
                Some(pos) => &r[pos + 2..],
                None => "",
            };
        } else {
            return false;
        }
    }
}
