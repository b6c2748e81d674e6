//! Own-property access with JavaScript semantics.
//!
//! These are the only primitives the path engine uses to touch a container.

use crate::{Value, ValueError};

/// Largest gap of holes an index assignment may open past the end of an array.
const MAX_HOLES: usize = 1 << 16;

/// Check if a path segment addresses an array element: a non-empty run of
/// ASCII digits.
///
/// # Example
///
/// ```
/// use objkit_value::is_index;
///
/// assert!(is_index("0"));
/// assert!(is_index("007"));
/// assert!(!is_index(""));
/// assert!(!is_index("-1"));
/// assert!(!is_index("1.5"));
/// assert!(!is_index("id"));
/// ```
pub fn is_index(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit())
}

/// Parse an index segment. `None` for non-index keys and for indices that do
/// not fit in `usize`.
pub fn parse_index(key: &str) -> Option<usize> {
    if is_index(key) {
        key.parse().ok()
    } else {
        None
    }
}

impl Value {
    /// Whether the value owns a property named `key`.
    ///
    /// Reference kinds without string keys (maps, sets, dates...) own
    /// nothing; nullish values and primitives cannot be asked at all.
    pub fn has_own(&self, key: &str) -> Result<bool, ValueError> {
        match self {
            Value::Object(obj) => Ok(obj.contains_key(key)),
            Value::Array(arr) => Ok(parse_index(key).is_some_and(|i| arr.has_index(i))),
            Value::TypedArray(arr) => Ok(parse_index(key).is_some_and(|i| i < arr.len())),
            Value::Date(_) | Value::RegExp(_) | Value::Buffer(_) | Value::Map(_) | Value::Set(_) => {
                Ok(false)
            }
            _ => Err(ValueError::NotIndexable {
                key: key.to_string(),
                found: self.type_name(),
            }),
        }
    }

    /// Reads the own property `key`, `Undefined` when absent.
    pub fn get_property(&self, key: &str) -> Result<Value, ValueError> {
        match self {
            Value::Undefined | Value::Null => Err(ValueError::NotIndexable {
                key: key.to_string(),
                found: self.type_name(),
            }),
            Value::Object(obj) => Ok(obj.get(key).unwrap_or_default()),
            Value::Array(arr) => Ok(parse_index(key)
                .and_then(|i| arr.get(i))
                .unwrap_or_default()),
            Value::TypedArray(arr) => Ok(parse_index(key)
                .and_then(|i| arr.get(i))
                .unwrap_or_default()),
            _ => Ok(Value::Undefined),
        }
    }

    /// Assigns the own property `key`.
    ///
    /// Arrays accept index keys only; assigning past the end pads the gap
    /// with holes.
    pub fn set_property(&self, key: &str, value: Value) -> Result<(), ValueError> {
        match self {
            Value::Undefined | Value::Null => Err(ValueError::NotIndexable {
                key: key.to_string(),
                found: self.type_name(),
            }),
            Value::Object(obj) => obj.insert(key, value),
            Value::Array(arr) => {
                let index = parse_index(key).ok_or_else(|| ValueError::NotAssignable {
                    key: key.to_string(),
                    found: self.type_name(),
                })?;
                let mut items = arr.borrow_mut();
                if index < items.len() {
                    items[index] = Some(value);
                    return Ok(());
                }
                if index - items.len() > MAX_HOLES {
                    return Err(ValueError::IndexOutOfRange {
                        index: key.to_string(),
                        len: items.len(),
                    });
                }
                items.resize(index, None);
                items.push(Some(value));
                Ok(())
            }
            _ => Err(ValueError::NotAssignable {
                key: key.to_string(),
                found: self.type_name(),
            }),
        }
    }

    /// Deletes the own property `key`. Absent keys are a successful no-op.
    ///
    /// Deleting an array element leaves a hole: the index is no longer owned
    /// and the length is unchanged.
    pub fn delete_property(&self, key: &str) -> Result<(), ValueError> {
        match self {
            Value::Undefined | Value::Null => Err(ValueError::NotIndexable {
                key: key.to_string(),
                found: self.type_name(),
            }),
            Value::Object(obj) => obj.remove(key).map(|_| ()),
            Value::Array(arr) => {
                if let Some(index) = parse_index(key) {
                    if let Some(slot) = arr.borrow_mut().get_mut(index) {
                        *slot = None;
                    }
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Own enumerable `(key, value)` pairs: object properties in insertion
    /// order, array elements keyed by index with holes skipped. Empty for
    /// everything else.
    pub fn own_entries(&self) -> Vec<(String, Value)> {
        match self {
            Value::Object(obj) => obj.enumerable_entries(),
            Value::Array(arr) => arr
                .slots()
                .into_iter()
                .enumerate()
                .filter_map(|(i, slot)| slot.map(|v| (i.to_string(), v)))
                .collect(),
            _ => Vec::new(),
        }
    }
}
