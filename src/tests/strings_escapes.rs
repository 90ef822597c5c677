use super::*;

#[test]
fn single_quoted_string() {
    assert_eq!(repair_to_string("'hello'").unwrap(), r#""hello""#);
}

#[test]
fn smart_double_quotes() {
    let out = repair_to_string("\u{201C}hello\u{201D}").unwrap();
    assert_eq!(out, r#""hello""#);
}

#[test]
fn smart_single_quotes_and_backticks() {
    assert_eq!(repair_to_string("\u{2018}hi\u{2019}").unwrap(), r#""hi""#);
    assert_eq!(repair_to_string("`hi`").unwrap(), r#""hi""#);
}

#[test]
fn unescaped_quote_inside_string_is_escaped() {
    let out = repair_to_string(r#""a"b""#).unwrap();
    assert_eq!(out, r#""a\"b""#);
}

#[test]
fn apostrophe_in_single_quoted_string() {
    // The interior quote is normalized with the delimiters; de-facto it
    // comes out as an escaped double quote.
    let out = repair_to_string("'it's broken'").unwrap();
    assert_eq!(out, "\"it\\\"s broken\"");
}

#[test]
fn missing_end_quote_before_closer() {
    let out = repair_to_string(r#"["hello]"#).unwrap();
    assert_eq!(out, r#"["hello"]"#);
}

#[test]
fn missing_end_quote_stops_at_comma() {
    let out = repair_to_string(r#"["a,b]"#).unwrap();
    assert_eq!(out, r#"["a","b"]"#);
}

#[test]
fn missing_end_quote_lands_before_trailing_whitespace() {
    let out = repair_to_string("{\"msg\": \"hello  ").unwrap();
    assert_eq!(out.trim_end(), r#"{"msg": "hello"}"#);
    let v: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(v["msg"], "hello");
}

#[test]
fn concatenation_chain() {
    let out = repair_to_string(r#""a" + "b" + "c""#).unwrap();
    assert_eq!(out, r#""abc""#);
}

#[test]
fn concatenation_across_comments() {
    let out = repair_to_string("\"hello\" + /*c*/ \" world\"").unwrap();
    assert_eq!(out, r#""hello world""#);
}

#[test]
fn dangling_concatenation_recloses_string() {
    assert_eq!(repair_to_string(r#""a" +"#).unwrap(), r#""a""#);
}

#[test]
fn stringified_string_loses_one_escape_layer() {
    assert_eq!(repair_to_string(r#"\"hello\""#).unwrap(), r#""hello""#);
}

#[test]
fn stringified_object_loses_one_escape_layer() {
    let out = repair_to_string(r#"{\"a\":\"b\"}"#).unwrap();
    assert_eq!(out, r#"{"a":"b"}"#);
}

#[test]
fn valid_escapes_pass_through() {
    let (out, _) = repair_to_string_with_log(r#""a\n\té\\b""#).unwrap();
    assert_eq!(out, r#""a\n\té\\b""#);
}

#[test]
fn invalid_escape_drops_backslash() {
    assert_eq!(repair_to_string(r#""a\xb""#).unwrap(), r#""axb""#);
}

#[test]
fn literal_control_characters_are_escaped() {
    let out = repair_to_string("\"a\nb\tc\"").unwrap();
    assert_eq!(out, r#""a\nb\tc""#);
}

#[test]
fn unicode_escape_truncated_by_end_of_input() {
    assert_eq!(repair_to_string("\"\\u26").unwrap(), r#""""#);
}

#[test]
fn url_slashes_survive_inside_strings() {
    let (out, _) = repair_to_string_with_log(r#""https://example.com/a""#).unwrap();
    assert_eq!(out, r#""https://example.com/a""#);
}
