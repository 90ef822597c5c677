use std::fmt;

/// What made the repair impossible. Everything the parser can fix silently is
/// fixed silently; these are the conditions it cannot recover from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairErrorKind {
    /// Input was empty, or held no value at all (only whitespace/comments).
    UnexpectedEnd,
    /// Content remained after the root value and its tolerated trailing garbage.
    UnexpectedCharacter(char),
    /// Inside an object, a key was required and no key-like token followed.
    ObjectKeyExpected,
    /// After an object key, neither a colon nor a value start followed.
    ColonExpected,
    /// A character inside a string that is invalid and cannot be escaped.
    InvalidCharacter(char),
    /// `\u` followed by fewer than four hex digits, not at end of input.
    InvalidUnicodeCharacter,
    /// Streaming only: a single value outgrew the configured window.
    BufferExceeded,
    /// Wrapper for collaborator failures (I/O sinks, serde round-trips).
    Parse(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairError {
    pub kind: RepairErrorKind,
    /// 0-based index (in Unicode scalar values) into the input at which the
    /// condition was detected; `input.chars().count()` for end-of-input errors.
    pub position: usize,
}

impl RepairError {
    pub fn new(kind: RepairErrorKind, position: usize) -> Self {
        Self { kind, position }
    }

    pub(crate) fn from_io(err: std::io::Error) -> Self {
        Self {
            kind: RepairErrorKind::Parse(format!("io write error: {}", err)),
            position: 0,
        }
    }

    #[cfg(feature = "serde")]
    pub(crate) fn from_serde(what: &str, err: serde_json::Error) -> Self {
        Self {
            kind: RepairErrorKind::Parse(format!("serde_json {} error: {}", what, err)),
            position: 0,
        }
    }

    /// Shift the reported position by `offset` scalar values. The streaming
    /// engine repairs segments in isolation and re-bases their errors onto
    /// absolute input offsets with this.
    pub(crate) fn offset_by(mut self, offset: usize) -> Self {
        self.position += offset;
        self
    }
}

impl fmt::Display for RepairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RepairErrorKind::UnexpectedEnd => {
                write!(f, "Unexpected end of input at position {}", self.position)
            }
            RepairErrorKind::UnexpectedCharacter(c) => {
                write!(
                    f,
                    "Unexpected character {:?} at position {}",
                    c, self.position
                )
            }
            RepairErrorKind::ObjectKeyExpected => {
                write!(f, "Object key expected at position {}", self.position)
            }
            RepairErrorKind::ColonExpected => {
                write!(f, "Colon expected at position {}", self.position)
            }
            RepairErrorKind::InvalidCharacter(c) => {
                write!(
                    f,
                    "Invalid character {:?} in string at position {}",
                    c, self.position
                )
            }
            RepairErrorKind::InvalidUnicodeCharacter => {
                write!(f, "Invalid unicode escape at position {}", self.position)
            }
            RepairErrorKind::BufferExceeded => {
                write!(f, "Buffer window exceeded at position {}", self.position)
            }
            RepairErrorKind::Parse(msg) => {
                write!(f, "{} at position {}", msg, self.position)
            }
        }
    }
}

impl std::error::Error for RepairError {}

pub type RepairResult<T> = Result<T, RepairError>;
