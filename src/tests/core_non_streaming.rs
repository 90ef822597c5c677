use super::*;

#[test]
fn repair_unquoted_key_and_single_quotes() {
    let out = repair_to_string("{name: 'John'}").unwrap();
    assert_eq!(out, r#"{"name": "John"}"#);
}

#[test]
fn repair_mixed_quote_styles() {
    let out = repair_to_string("{'a':2, b: 'x'}").unwrap();
    assert_eq!(out, r#"{"a":2, "b": "x"}"#);
}

#[test]
fn strip_trailing_comma_in_array() {
    let out = repair_to_string("[1, 2, 3,]").unwrap();
    assert_eq!(out, "[1, 2, 3]");
}

#[test]
fn strip_trailing_comma_after_root_value() {
    let out = repair_to_string("1,").unwrap();
    assert_eq!(out, "1");
}

#[test]
fn close_truncated_object_and_string() {
    let out = repair_to_string(r#"{"msg": "hello"#).unwrap();
    assert_eq!(out, r#"{"msg": "hello"}"#);
}

#[test]
fn mongo_wrapper_keeps_inner_value() {
    let out = repair_to_string(r#"/* c */ {"x": NumberLong("42")}"#).unwrap();
    assert_eq!(out.trim(), r#"{"x": "42"}"#);
}

#[test]
fn jsonp_callback_is_stripped() {
    let out = repair_to_string(r#"callback({"ok":True});"#).unwrap();
    assert_eq!(out, r#"{"ok":true}"#);
}

#[test]
fn unclosed_wrapper_still_consumes_semicolon() {
    let out = repair_to_string("callback({a:1};").unwrap();
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn python_keywords_normalize() {
    let out = repair_to_string("[True, False, None]").unwrap();
    assert_eq!(out, "[true, false, null]");
}

#[test]
fn undefined_becomes_null() {
    let out = repair_to_string("[undefined]").unwrap();
    assert_eq!(out, "[null]");
}

#[test]
fn concatenated_strings_merge() {
    let out = repair_to_string(r#""a" + "b""#).unwrap();
    assert_eq!(out, r#""ab""#);
}

#[test]
fn leading_zero_number_is_quoted() {
    let out = repair_to_string(r#"{"n": 00789}"#).unwrap();
    assert_eq!(out, r#"{"n": "00789"}"#);
}

#[test]
fn truncated_decimal_is_completed() {
    let out = repair_to_string(r#"["x", 1.]"#).unwrap();
    assert_eq!(out, r#"["x", 1.0]"#);
}

#[test]
fn redundant_closers_are_dropped() {
    let out = repair_to_string(r#"{"a":1}}]"#).unwrap();
    assert_eq!(out, r#"{"a":1}"#);
}

#[test]
fn unquoted_strings_are_quoted() {
    let out = repair_to_string("[hello, world]").unwrap();
    assert_eq!(out, r#"["hello", "world"]"#);
}

#[test]
fn stray_end_quote_after_unquoted_run() {
    let out = repair_to_string(r#"[abc"]"#).unwrap();
    assert_eq!(out, r#"["abc"]"#);
}

#[test]
fn fenced_code_block_is_stripped() {
    let out = repair_to_string("```json\n{a:1}\n```").unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1}));
}

#[test]
fn bom_is_skipped() {
    let out = repair_to_string("\u{FEFF}{a:1}").unwrap();
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v, serde_json::json!({"a": 1}));
}

#[test]
fn repair_to_value_roundtrip() {
    let v = repair_to_value("{a: [1, 2,], b: 'x'}").unwrap();
    assert_eq!(v, serde_json::json!({"a": [1, 2], "b": "x"}));
}

#[test]
fn repair_to_writer_writes_output() {
    let mut buf: Vec<u8> = Vec::new();
    repair_to_writer("{a:1}", &mut buf).unwrap();
    assert_eq!(std::str::from_utf8(&buf).unwrap(), r#"{"a":1}"#);
}
