//! Character classifiers. The repair decisions elsewhere are all phrased in
//! terms of these predicates; keep the sets here exhaustive.

/// Whitespace the parser echoes into the output verbatim.
#[inline]
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Whitespace minus newline. Used where a newline must stay visible as
/// delimiter evidence (end-quote verification inside strings).
#[inline]
pub fn is_whitespace_except_newline(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r')
}

/// Unicode whitespace that is normalized to a single ASCII space on output.
#[inline]
pub fn is_special_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{00A0}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// ASCII `"` plus the typographic double-quote family.
#[inline]
pub fn is_double_quote_like(c: char) -> bool {
    matches!(
        c,
        '"' | '\u{201C}' | '\u{201D}' | '\u{201F}' | '\u{2033}' | '\u{2036}'
    )
}

/// ASCII `'` plus the typographic single-quote family, backtick and acute.
#[inline]
pub fn is_single_quote_like(c: char) -> bool {
    matches!(
        c,
        '\'' | '\u{2018}' | '\u{2019}' | '\u{201B}' | '\u{2032}' | '\u{2035}' | '`' | '\u{00B4}'
    )
}

#[inline]
pub fn is_quote(c: char) -> bool {
    is_double_quote_like(c) || is_single_quote_like(c)
}

/// Characters that terminate unquoted runs and signal structural boundaries.
/// Slash is deliberately absent so regex-like tokens keep their `/`.
#[inline]
pub fn is_delimiter(c: char) -> bool {
    matches!(c, ',' | ':' | '[' | ']' | '{' | '}' | '(' | ')' | '\n' | '+') || is_quote(c)
}

#[inline]
pub fn is_start_of_value(c: char) -> bool {
    matches!(c, '[' | '{' | '-' | '_') || c.is_ascii_alphanumeric() || is_quote(c)
}

/// The control characters with a named short escape. Anything else below
/// U+0020 is rejected as invalid string content.
#[inline]
pub fn is_control_character(c: char) -> bool {
    matches!(c, '\u{0008}' | '\u{000C}' | '\n' | '\r' | '\t')
}

#[inline]
pub fn control_escape(c: char) -> &'static str {
    match c {
        '\u{0008}' => "\\b",
        '\u{000C}' => "\\f",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        _ => unreachable!("not a named control character"),
    }
}

#[inline]
pub fn is_valid_string_character(c: char) -> bool {
    c >= '\u{0020}'
}

#[inline]
pub fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

/// First character of a function-call name (`NumberLong`, `ISODate`, a JSONP
/// callback). MongoDB wrapper names and arbitrary callback identifiers are
/// treated uniformly.
#[inline]
pub fn is_function_name_char_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

#[inline]
pub fn is_function_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
