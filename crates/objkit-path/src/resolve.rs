use objkit_value::{is_index, Value};

use crate::{parse_path, Path, PathError, Slot};

/// Walk `root` along `path` and return the slot the last segment refers to.
///
/// A traversal key counts as missing when the container does not own it or
/// holds a falsy value there. A missing key either ends the walk with an
/// unresolved slot or, with `create_if_missing`, is filled with a new empty
/// container: an array when the following segment is an index, an object
/// otherwise. Containers created before a later failure stay in place.
///
/// # Errors
///
/// Walking into `undefined`, `null` or a primitive fails with
/// [`PathError::Value`], as does creating a container where none can be
/// stored.
///
/// # Example
///
/// ```
/// use objkit_path::resolve;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": {"b": 2}}));
///
/// let slot = resolve(&doc, "a.b", false).unwrap();
/// assert_eq!(slot.key, "b");
/// assert_eq!(slot.container, Some(Value::from(json!({"b": 2}))));
///
/// let missing = resolve(&doc, "a.c.d", false).unwrap();
/// assert!(!missing.is_resolved());
///
/// let created = resolve(&doc, "a.c.0", true).unwrap();
/// assert_eq!(created.container, Some(Value::empty_array()));
/// ```
pub fn resolve(root: &Value, path: &str, create_if_missing: bool) -> Result<Slot, PathError> {
    resolve_path(root, &parse_path(path), create_if_missing)
}

/// [`resolve`] over an already parsed [`Path`].
pub fn resolve_path(root: &Value, path: &Path, create_if_missing: bool) -> Result<Slot, PathError> {
    if path.is_root() {
        return Ok(Slot::found(root.clone(), ""));
    }

    let target = path.target();
    let traversal = path.traversal();
    let mut current = root.clone();

    for (i, segment) in traversal.iter().enumerate() {
        let existing = if current.has_own(segment)? {
            current.get_property(segment)?
        } else {
            Value::Undefined
        };

        if existing.is_truthy() {
            current = existing;
            continue;
        }

        if !create_if_missing {
            return Ok(Slot::unresolved(target));
        }

        let next = traversal.get(i + 1).map(String::as_str).unwrap_or(target);
        let created = if is_index(next) {
            Value::empty_array()
        } else {
            Value::empty_object()
        };
        current.set_property(segment, created.clone())?;
        current = created;
    }

    Ok(Slot::found(current, target))
}
