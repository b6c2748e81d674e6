use objkit::cli::{assign_path, lookup_path, parse_value_arg, remove_paths, CliError};
use serde_json::json;

fn parsed(out: &str) -> serde_json::Value {
    serde_json::from_str(out).expect("cli output must be JSON")
}

#[test]
fn lookup_matrix() {
    let doc = r#"{"a":{"b":[10,{"c":"x"}]},"list":[{"id":1},{"id":2}],"zero":0}"#;
    let cases: &[(&str, serde_json::Value)] = &[
        ("a", json!({"b": [10, {"c": "x"}]})),
        ("a.b.0", json!(10)),
        ("a.b.1.c", json!("x")),
        ("list.id", json!([1, 2])),
        ("list.1.id", json!(2)),
        ("zero", json!(0)),
    ];
    for (path, expected) in cases {
        let out = lookup_path(doc, path).unwrap_or_else(|e| panic!("{path}: {e}"));
        assert_eq!(parsed(&out), *expected, "path {path}");
    }
}

#[test]
fn lookup_not_found_matrix() {
    let doc = r#"{"a":{"b":1},"zero":0}"#;
    for path in ["x", "a.c", "a.b.c", "zero.x", "x.y.z"] {
        assert!(
            matches!(lookup_path(doc, path), Err(CliError::NotFound(_))),
            "path {path}"
        );
    }
}

#[test]
fn assign_matrix() {
    let cases: &[(&str, &str, &str, bool, serde_json::Value)] = &[
        (r#"{"a":1}"#, "a", "2", false, json!({"a": 2})),
        (r#"{"a":1}"#, "b", "2", false, json!({"a": 1})),
        (r#"{"a":1}"#, "b", "2", true, json!({"a": 1, "b": 2})),
        ("{}", "x.y", "\"v\"", true, json!({"x": {"y": "v"}})),
        ("{}", "x.1", "true", true, json!({"x": [null, true]})),
        (r#"{"l":[{},{}]}"#, "l.k", "7", false, json!({"l": [{"k": 7}, {"k": 7}]})),
        (r#"{"a":{}}"#, "a.s", "plain text", true, json!({"a": {"s": "plain text"}})),
    ];
    for (doc, path, value, create, expected) in cases {
        let out = assign_path(doc, path, parse_value_arg(value), *create).unwrap();
        assert_eq!(parsed(&out), *expected, "set {path} on {doc}");
    }
}

#[test]
fn remove_matrix() {
    let cases: &[(&str, &[&str], serde_json::Value)] = &[
        (r#"{"a":1,"b":2}"#, &["a"], json!({"b": 2})),
        (r#"{"a":{"b":1,"c":2}}"#, &["a.b", "a.c"], json!({"a": {}})),
        (r#"{"a":1}"#, &["x.y"], json!({"a": 1})),
        (r#"{"l":[{"k":1},{"j":2}]}"#, &["l.k"], json!({"l": [{}, {"j": 2}]})),
    ];
    for (doc, paths, expected) in cases {
        let out = remove_paths(doc, &paths[..]).unwrap();
        assert_eq!(parsed(&out), *expected, "unset {paths:?} on {doc}");
    }
}

#[test]
fn facade_reexports_cover_the_workflow() {
    let doc = objkit::Value::from(json!({"user": {"name": "a"}}));
    let copy = objkit::deep_clone(&doc, false);
    objkit::set(&copy, "user.name", objkit::Value::from("b"), false);
    objkit::unset(&doc, "user.name");

    assert_eq!(objkit::get(&copy, "user.name", false), objkit::Value::from("b"));
    assert_eq!(objkit::get(&doc, "user.name", false), objkit::Value::Undefined);
}
