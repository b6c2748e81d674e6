//! Batch variants of the path operations.
//!
//! Entries are applied in order against the same root; a failing entry is
//! logged and skipped, the rest still run.

use objkit_value::Value;
use tracing::warn;

use crate::ops::{get, try_set, try_unset};
use crate::{PathEntry, SetValue};

/// Apply every entry to `root`. Later entries see the effects of earlier
/// ones, so the last write to a path wins.
///
/// # Example
///
/// ```
/// use objkit_path::{set_many, PathEntry, SetValue};
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": 1, "b": {"c": 2}}));
/// set_many(
///     &doc,
///     &[
///         PathEntry::copy("a", "b.c"),
///         PathEntry::assign("b.d", SetValue::literal(3)),
///     ],
///     true,
/// );
/// assert_eq!(doc, Value::from(json!({"a": 2, "b": {"c": 2, "d": 3}})));
/// ```
pub fn set_many(root: &Value, entries: &[PathEntry], create_if_missing: bool) -> Value {
    for entry in entries {
        apply_entry(root, entry, create_if_missing);
    }
    root.clone()
}

/// [`set_many`] over a dynamic list of entries, each either a
/// `[path, sourcePath]` pair or a `{path, value}` record. Malformed entries
/// are logged and skipped.
pub fn set_many_from_value(root: &Value, entries: &Value, create_if_missing: bool) -> Value {
    let Some(list) = entries.as_array() else {
        warn!(op = "set_many", entries = ?entries, "expected an array of path entries");
        return root.clone();
    };
    for item in list.items() {
        match PathEntry::try_from(&item) {
            Ok(entry) => apply_entry(root, &entry, create_if_missing),
            Err(err) => {
                warn!(op = "set_many", entry = ?item, error = %err, "skipping malformed path entry");
            }
        }
    }
    root.clone()
}

fn apply_entry(root: &Value, entry: &PathEntry, create_if_missing: bool) {
    let value = match entry {
        PathEntry::Copy { from, .. } => SetValue::copy_from_in(from.clone(), root.clone()),
        PathEntry::Assign { value, .. } => value.clone(),
    };
    let path = entry.path();
    if let Err(err) = try_set(root, path, &value, create_if_missing) {
        warn!(op = "set_many", path = %path, value = ?value, error = %err, "there was an error while setting the value");
    }
}

/// Delete every path in order. `None` or a falsy root leaves the root as is.
pub fn unset_many<P: AsRef<str>>(root: &Value, paths: Option<&[P]>) -> Value {
    let Some(paths) = paths else {
        return root.clone();
    };
    if !root.is_truthy() {
        return root.clone();
    }
    for path in paths {
        let path = path.as_ref();
        if let Err(err) = try_unset(root, path) {
            warn!(op = "unset_many", path = %path, error = %err, "there was an error while deleting the value");
        }
    }
    root.clone()
}

/// Read every path; one result per path, in order.
pub fn get_many<P: AsRef<str>>(root: &Value, paths: &[P]) -> Vec<Value> {
    paths.iter().map(|path| get(root, path.as_ref(), false)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use objkit_value::Property;
    use serde_json::json;
    use tracing_test::traced_test;

    fn doc(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    #[test]
    fn test_set_many_last_write_wins() {
        let obj = doc(json!({"a": 0}));
        set_many(
            &obj,
            &[
                PathEntry::assign("a", SetValue::literal(1)),
                PathEntry::assign("a", SetValue::literal(2)),
            ],
            false,
        );
        assert_eq!(obj, doc(json!({"a": 2})));
    }

    #[test]
    fn test_set_many_copy_sees_earlier_writes() {
        let obj = doc(json!({"a": 1, "b": 0}));
        set_many(
            &obj,
            &[
                PathEntry::assign("a", SetValue::literal(5)),
                PathEntry::copy("b", "a"),
            ],
            false,
        );
        assert_eq!(obj, doc(json!({"a": 5, "b": 5})));
    }

    #[test]
    fn test_set_many_from_value_pairs_and_records() {
        let obj = doc(json!({"src": {"v": "x"}}));
        let entries = doc(json!([
            ["copy.here", "src.v"],
            {"path": "lit", "value": {"value": 3}},
            {"path": "plain", "value": [1, 2]}
        ]));
        set_many_from_value(&obj, &entries, true);
        assert_eq!(
            obj,
            doc(json!({"src": {"v": "x"}, "copy": {"here": "x"}, "lit": 3, "plain": [1, 2]}))
        );
    }

    #[test]
    #[traced_test]
    fn test_set_many_from_value_skips_malformed() {
        let obj = doc(json!({"a": 1, "b": 1}));
        let entries = doc(json!([{"value": 1}, {"path": "b", "value": 7}, 42]));
        set_many_from_value(&obj, &entries, false);
        assert_eq!(obj, doc(json!({"a": 1, "b": 7})));
        assert!(logs_contain("skipping malformed path entry"));
    }

    #[test]
    #[traced_test]
    fn test_set_many_from_value_not_an_array() {
        let obj = doc(json!({"a": 1}));
        let result = set_many_from_value(&obj, &doc(json!({"path": "a"})), false);
        assert!(result.ptr_eq(&obj));
        assert!(logs_contain("expected an array of path entries"));
    }

    #[test]
    fn test_set_many_continues_after_fault() {
        let obj = doc(json!({"list": [1, 2], "x": 0}));
        set_many(
            &obj,
            &[
                PathEntry::assign("list.id", SetValue::literal(1)),
                PathEntry::assign("x", SetValue::literal(1)),
            ],
            false,
        );
        assert_eq!(obj, doc(json!({"list": [1, 2], "x": 1})));
    }

    #[test]
    fn test_unset_many() {
        let obj = doc(json!({"a": 1, "b": {"c": 2, "d": 3}}));
        unset_many(&obj, Some(&["a", "b.c", "missing.path"][..]));
        assert_eq!(obj, doc(json!({"b": {"d": 3}})));
    }

    #[test]
    fn test_unset_many_without_paths() {
        let obj = doc(json!({"a": 1}));
        unset_many::<&str>(&obj, None);
        assert_eq!(obj, doc(json!({"a": 1})));
        assert_eq!(unset_many(&Value::Undefined, Some(&["a"][..])), Value::Undefined);
    }

    #[test]
    #[traced_test]
    fn test_unset_many_continues_after_non_configurable() {
        let obj = doc(json!({"prop2": 2}));
        obj.as_object()
            .unwrap()
            .define("prop1", Property::new(Value::from(1)).sealed());
        unset_many(&obj, Some(&["prop1", "prop2"][..]));
        assert_eq!(get(&obj, "prop1", false), Value::from(1));
        assert_eq!(get(&obj, "prop2", false), Value::Undefined);
        assert!(logs_contain("there was an error while deleting the value"));
    }

    #[test]
    fn test_get_many() {
        let obj = doc(json!({"a": 1, "b": {"c": [1, 2]}}));
        let paths = vec!["a".to_string(), "b.c.1".to_string(), "z".to_string()];
        assert_eq!(
            get_many(&obj, &paths),
            vec![Value::from(1), Value::from(2), Value::Undefined]
        );
    }
}
