use std::collections::HashSet;

use crate::Value;

/// `SameValueZero`: the key equality used by maps and sets. Like `===`
/// except `NaN` equals `NaN`; containers and symbols compare by identity.
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::BigInt(a), Value::BigInt(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::RegExp(a), Value::RegExp(b)) => a == b,
        _ => a.ptr_eq(b),
    }
}

/// Performs a structural equality check between two values.
///
/// Containers are compared by content, objects by their enumerable own
/// properties, maps and sets without regard to order. Symbols compare by
/// description. Cycles are handled: a pair of containers already under
/// comparison is assumed equal.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use objkit_value::{deep_equal, Value};
///
/// let a = Value::from(json!({"foo": [1, 2, 3]}));
/// let b = Value::from(json!({"foo": [1, 2, 3]}));
/// let c = Value::from(json!({"foo": [1, 2, 4]}));
///
/// assert!(deep_equal(&a, &b));
/// assert!(!deep_equal(&a, &c));
/// ```
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    let mut seen = HashSet::new();
    equal_rec(a, b, &mut seen)
}

fn equal_rec(a: &Value, b: &Value, seen: &mut HashSet<(usize, usize)>) -> bool {
    if let (Some(ia), Some(ib)) = (a.identity(), b.identity()) {
        if ia == ib || !seen.insert((ia, ib)) {
            return true;
        }
    }

    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b || (a.is_nan() && b.is_nan()),
        (Value::BigInt(a), Value::BigInt(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Symbol(a), Value::Symbol(b)) => a.description() == b.description(),
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::RegExp(a), Value::RegExp(b)) => a == b,
        (Value::Buffer(a), Value::Buffer(b)) => *a.borrow() == *b.borrow(),
        (Value::TypedArray(a), Value::TypedArray(b)) => *a.borrow() == *b.borrow(),

        (Value::Array(arr_a), Value::Array(arr_b)) => {
            let (items_a, items_b) = (arr_a.items(), arr_b.items());
            if items_a.len() != items_b.len() {
                return false;
            }
            items_a
                .iter()
                .zip(items_b.iter())
                .all(|(x, y)| equal_rec(x, y, seen))
        }

        (Value::Object(obj_a), Value::Object(obj_b)) => {
            let (entries_a, entries_b) = (obj_a.enumerable_entries(), obj_b.enumerable_entries());
            if entries_a.len() != entries_b.len() {
                return false;
            }
            for (key, val_a) in &entries_a {
                match entries_b.iter().find(|(k, _)| k == key) {
                    Some((_, val_b)) => {
                        if !equal_rec(val_a, val_b, seen) {
                            return false;
                        }
                    }
                    None => return false,
                }
            }
            true
        }

        (Value::Map(map_a), Value::Map(map_b)) => {
            let (entries_a, entries_b) = (map_a.entries(), map_b.entries());
            if entries_a.len() != entries_b.len() {
                return false;
            }
            // Trial comparisons run on a copy of `seen` so a failed match
            // does not leave pairs marked as equal.
            entries_a.iter().all(|(ka, va)| {
                entries_b.iter().any(|(kb, vb)| {
                    let mut trial = seen.clone();
                    equal_rec(ka, kb, &mut trial) && equal_rec(va, vb, &mut trial)
                })
            })
        }

        (Value::Set(set_a), Value::Set(set_b)) => {
            let (values_a, values_b) = (set_a.values(), set_b.values());
            if values_a.len() != values_b.len() {
                return false;
            }
            values_a
                .iter()
                .all(|va| values_b.iter().any(|vb| equal_rec(va, vb, &mut seen.clone())))
        }

        // Different types are never equal
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        deep_equal(self, other)
    }
}
