use super::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn repair_from_file() {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(br#"{name: "John", age: 30}"#).unwrap();

    let content = std::fs::read_to_string(temp.path()).unwrap();
    let fixed = repair_to_string(&content).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(v["name"], "John");
    assert_eq!(v["age"], 30);
}

#[test]
fn repair_from_file_with_comments() {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(
        br#"
    {
        // User information
        name: "Alice",
        age: 25,
        /* Contact details */
        email: 'alice@example.com'
    }
    "#,
    )
    .unwrap();

    let content = std::fs::read_to_string(temp.path()).unwrap();
    let fixed = repair_to_string(&content).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(v["name"], "Alice");
    assert_eq!(v["email"], "alice@example.com");
}

#[test]
fn repair_truncated_file() {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(br#"{"name": "Bob", "items": [1, 2, 3"#).unwrap();

    let content = std::fs::read_to_string(temp.path()).unwrap();
    let fixed = repair_to_string(&content).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(v["items"].as_array().unwrap().len(), 3);
}

#[test]
fn repair_unicode_file() {
    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all("{name: \"张三\", city: '北京'}".as_bytes())
        .unwrap();

    let content = std::fs::read_to_string(temp.path()).unwrap();
    let fixed = repair_to_string(&content).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(v["name"], "张三");
    assert_eq!(v["city"], "北京");
}

#[test]
fn repair_large_generated_file() {
    let mut broken = String::from("{users: [");
    for i in 0..100 {
        if i > 0 {
            broken.push_str(", ");
        }
        broken.push_str(&format!("{{id: {}, name: 'User{}', active: true}}", i, i));
    }
    broken.push_str("]}");

    let mut temp = NamedTempFile::new().unwrap();
    temp.write_all(broken.as_bytes()).unwrap();

    let content = std::fs::read_to_string(temp.path()).unwrap();
    let fixed = repair_to_string(&content).unwrap();

    let v: serde_json::Value = serde_json::from_str(&fixed).unwrap();
    assert_eq!(v["users"].as_array().unwrap().len(), 100);
}
