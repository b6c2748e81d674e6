//! Object merge helpers.

use std::collections::HashSet;

use objkit_value::{Container, Value, ValueError};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MergeError {
    #[error("invalid input parameters: expected objects, got {target} and {update}")]
    NotAnObject {
        target: &'static str,
        update: &'static str,
    },
    #[error(transparent)]
    Value(#[from] ValueError),
}

fn check_objects(target: &Value, update: &Value) -> Result<(), MergeError> {
    let is_object = |v: &Value| {
        matches!(
            v.shape(),
            Container::Mapping(_) | Container::Sequence(_)
        )
    };
    if is_object(target) && is_object(update) {
        Ok(())
    } else {
        Err(MergeError::NotAnObject {
            target: target.type_name(),
            update: update.type_name(),
        })
    }
}

/// Copy every own enumerable property of `update` onto `target`, overwriting
/// or creating keys. Shallow: nested containers are assigned by handle.
///
/// # Errors
///
/// Fails when either argument is not an object or an array, or when a write
/// is rejected (read-only property, named key on an array). Properties
/// written before the rejected one stay written.
///
/// # Examples
///
/// ```
/// use objkit_util::merge_overwrite;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let target = Value::from(json!({"a": 1, "b": {"c": 1}}));
/// merge_overwrite(&target, &Value::from(json!({"b": {"d": 2}, "e": 3}))).unwrap();
/// assert_eq!(target, Value::from(json!({"a": 1, "b": {"d": 2}, "e": 3})));
/// ```
pub fn merge_overwrite(target: &Value, update: &Value) -> Result<Value, MergeError> {
    check_objects(target, update)?;
    for (key, value) in update.own_entries() {
        target.set_property(&key, value)?;
    }
    Ok(target.clone())
}

/// Like [`merge_overwrite`], but only keys `target` already owns are
/// touched. Where both sides hold objects the merge recurses instead of
/// replacing the nested object.
///
/// # Examples
///
/// ```
/// use objkit_util::merge_overwrite_existing;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let target = Value::from(json!({"a": 1, "nested": {"x": 1, "y": 2}}));
/// let update = Value::from(json!({"a": 2, "b": 3, "nested": {"y": 9, "z": 0}}));
/// merge_overwrite_existing(&target, &update).unwrap();
/// assert_eq!(target, Value::from(json!({"a": 2, "nested": {"x": 1, "y": 9}})));
/// ```
pub fn merge_overwrite_existing(target: &Value, update: &Value) -> Result<Value, MergeError> {
    check_objects(target, update)?;
    let mut visiting = HashSet::new();
    merge_existing(target, update, &mut visiting)?;
    Ok(target.clone())
}

fn merge_existing(
    target: &Value,
    update: &Value,
    visiting: &mut HashSet<(usize, usize)>,
) -> Result<(), MergeError> {
    if let (Some(t), Some(u)) = (target.identity(), update.identity()) {
        if !visiting.insert((t, u)) {
            return Ok(());
        }
    }
    for (key, value) in update.own_entries() {
        if !target.has_own(&key)? {
            continue;
        }
        let current = target.get_property(&key)?;
        match (&current, &value) {
            (Value::Object(_), Value::Object(_)) if !current.ptr_eq(&value) => {
                merge_existing(&current, &value, visiting)?;
            }
            _ => target.set_property(&key, value)?,
        }
    }
    Ok(())
}
