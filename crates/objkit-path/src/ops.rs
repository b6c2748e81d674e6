//! Read, write and delete through a resolved slot.

use objkit_value::{ArrayRef, Value};
use tracing::warn;

use crate::{resolve, PathError, SetValue};

/// Read the value at `path`.
///
/// On an array with a non-index target key, returns a new array holding that
/// key of every element (holes stay holes). An unresolved path reads as
/// `Undefined`.
pub fn try_get(root: &Value, path: &str, create_if_missing: bool) -> Result<Value, PathError> {
    let slot = resolve(root, path, create_if_missing)?;
    if let Some(items) = slot.broadcast_target() {
        let values = ArrayRef::default();
        for item in items.slots() {
            let read = item.map(|item| item.get_property(&slot.key)).transpose()?;
            values.push_slot(read);
        }
        return Ok(Value::Array(values));
    }
    match &slot.container {
        Some(container) => Ok(container.get_property(&slot.key)?),
        None => Ok(Value::Undefined),
    }
}

/// [`try_get`] that never fails: a fault is logged and the root is returned.
///
/// # Example
///
/// ```
/// use objkit_path::get;
/// use objkit_value::{ArrayRef, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": {"b": [10, 20]}}));
/// assert_eq!(get(&doc, "a.b.1", false), Value::from(20));
/// assert_eq!(get(&doc, "a.x.y", false), Value::Undefined);
/// ```
pub fn get(root: &Value, path: &str, create_if_missing: bool) -> Value {
    match try_get(root, path, create_if_missing) {
        Ok(value) => value,
        Err(err) => {
            warn!(op = "get", path = %path, error = %err, "there was an error while getting the value of the path");
            root.clone()
        }
    }
}

/// Write `value` at `path`.
///
/// Without `create_if_missing`, only slots whose container already owns the
/// key are written. Broadcast writes (array container, non-index key) reach
/// every element either way. A value that resolves to `Undefined` is not
/// stored.
///
/// # Errors
///
/// Faults abort the write; elements already written by a broadcast stay
/// written.
pub fn try_set(
    root: &Value,
    path: &str,
    value: &SetValue,
    create_if_missing: bool,
) -> Result<(), PathError> {
    let slot = resolve(root, path, create_if_missing)?;
    let key = slot.key.as_str();

    if let Some(items) = slot.broadcast_target() {
        for item in items.slots().into_iter().flatten() {
            let effective = value.effective(|| item.get_property(key))?;
            if !effective.is_undefined() {
                item.set_property(key, effective)?;
            }
        }
        return Ok(());
    }

    let Some(container) = &slot.container else {
        return Ok(());
    };
    if !create_if_missing && !container.has_own(key)? {
        return Ok(());
    }
    let effective = value.effective(|| container.get_property(key))?;
    if !effective.is_undefined() {
        container.set_property(key, effective)?;
    }
    Ok(())
}

/// [`try_set`] that never fails: a fault is logged and the root (with any
/// partial writes) is returned.
///
/// # Example
///
/// ```
/// use objkit_path::{set, SetValue};
/// use objkit_value::{ArrayRef, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": 1, "src": {"v": "copied"}}));
///
/// set(&doc, "b.c", Value::from(2), false); // `b` is missing: no-op
/// set(&doc, "b.c", Value::from(2), true);
/// set(&doc, "a", SetValue::copy_from_in("src.v", doc.clone()), false);
///
/// assert_eq!(doc, Value::from(json!({"a": "copied", "src": {"v": "copied"}, "b": {"c": 2}})));
/// ```
pub fn set(root: &Value, path: &str, value: impl Into<SetValue>, create_if_missing: bool) -> Value {
    let value = value.into();
    if let Err(err) = try_set(root, path, &value, create_if_missing) {
        warn!(op = "set", path = %path, value = ?value, error = %err, "there was an error while setting the value");
    }
    root.clone()
}

/// Delete the key at `path`.
///
/// On an array with a non-index target key, the key is removed from every
/// element that owns it; the array itself keeps its length. A falsy root is
/// left alone.
pub fn try_unset(root: &Value, path: &str) -> Result<(), PathError> {
    if !root.is_truthy() {
        return Ok(());
    }
    let slot = resolve(root, path, false)?;
    let key = slot.key.as_str();

    if let Some(items) = slot.broadcast_target() {
        for item in items.slots().into_iter().flatten() {
            if let Ok(true) = item.has_own(key) {
                item.delete_property(key)?;
            }
        }
        return Ok(());
    }

    if let Some(container) = &slot.container {
        if container.has_own(key)? {
            container.delete_property(key)?;
        }
    }
    Ok(())
}

/// [`try_unset`] that never fails: a fault is logged and the root is
/// returned.
pub fn unset(root: &Value, path: &str) -> Value {
    if let Err(err) = try_unset(root, path) {
        warn!(op = "unset", path = %path, error = %err, "there was an error while deleting the value");
    }
    root.clone()
}
