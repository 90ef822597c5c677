use super::*;

#[test]
fn truncated_numbers_get_a_zero() {
    assert_eq!(repair_to_string("[2.]").unwrap(), "[2.0]");
    assert_eq!(repair_to_string("[1e]").unwrap(), "[1e0]");
    assert_eq!(repair_to_string("[1E+]").unwrap(), "[1E+0]");
    assert_eq!(repair_to_string("[-]").unwrap(), "[-0]");
}

#[test]
fn truncated_number_at_end_of_input() {
    assert_eq!(repair_to_string("2.").unwrap(), "2.0");
}

#[test]
fn plain_numbers_pass_through() {
    let out = repair_to_string("[-0.5 1e3 2E-2]").unwrap();
    assert_eq!(out, "[-0.5, 1e3, 2E-2]");
}

#[test]
fn leading_zeros_are_quoted() {
    assert_eq!(repair_to_string("007").unwrap(), r#""007""#);
    let v = repair_to_value("{n: -00789}").unwrap();
    assert_eq!(v["n"], "-00789");
}

#[test]
fn zero_alone_stays_a_number() {
    let (out, _) = repair_to_string_with_log("0").unwrap();
    assert_eq!(out, "0");
}

#[test]
fn digits_followed_by_letters_become_a_string() {
    assert_eq!(repair_to_string("123abc").unwrap(), r#""123abc""#);
}

#[test]
fn fraction_like_tokens_become_strings() {
    assert_eq!(repair_to_string("[1/3]").unwrap(), r#"["1/3"]"#);
}

#[test]
fn bare_decimal_point_token_becomes_a_string() {
    assert_eq!(repair_to_string(".5").unwrap(), r#"".5""#);
}
