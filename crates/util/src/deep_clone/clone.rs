use objkit_value::{ArrayRef, MapRef, ObjectRef, Property, SetRef, TypedArrayRef, Value};

use super::CloneRegistry;

/// Options for [`deep_clone_with`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CloneOptions {
    /// Copy only enumerable object properties, with default metadata. When
    /// unset, every own property is copied along with its descriptor flags.
    pub ignore_non_enumerable: bool,
}

/// Creates an independent deep copy of a value graph.
///
/// Shared sub-structure stays shared and cycles stay cycles in the copy:
/// every source container is cloned exactly once per call.
///
/// # Examples
///
/// ```
/// use objkit_util::deep_clone;
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let original = Value::from(json!({"foo": [1, 2, 3]}));
/// original.set_property("me", original.clone()).unwrap();
///
/// let cloned = deep_clone(&original, false);
/// assert_eq!(original, cloned);
/// assert!(!cloned.ptr_eq(&original));
/// assert!(cloned.get_property("me").unwrap().ptr_eq(&cloned));
/// ```
pub fn deep_clone(value: &Value, ignore_non_enumerable: bool) -> Value {
    deep_clone_with(
        value,
        &CloneOptions {
            ignore_non_enumerable,
        },
    )
}

/// [`deep_clone`] with explicit options.
pub fn deep_clone_with(value: &Value, options: &CloneOptions) -> Value {
    let mut cloner = Cloner {
        options,
        registry: CloneRegistry::new(),
    };
    cloner.clone_value(value)
}

struct Cloner<'a> {
    options: &'a CloneOptions,
    registry: CloneRegistry,
}

impl Cloner<'_> {
    fn clone_value(&mut self, value: &Value) -> Value {
        if let Some(existing) = self.registry.get(value) {
            return existing;
        }
        match value {
            Value::Symbol(symbol) => Value::symbol(symbol.description()),
            Value::Buffer(bytes) => {
                let copy = Value::buffer(bytes.to_vec());
                self.registry.register(value, &copy);
                copy
            }
            Value::TypedArray(data) => {
                let copy = Value::TypedArray(TypedArrayRef::new(data.borrow().clone()));
                self.registry.register(value, &copy);
                copy
            }
            Value::Map(map) => {
                let target = MapRef::new();
                self.registry.register(value, &Value::Map(target.clone()));
                for (k, v) in map.entries() {
                    let k = self.clone_value(&k);
                    let v = self.clone_value(&v);
                    target.set(k, v);
                }
                Value::Map(target)
            }
            Value::Set(set) => {
                let target = SetRef::new();
                self.registry.register(value, &Value::Set(target.clone()));
                for member in set.values() {
                    let member = self.clone_value(&member);
                    target.add(member);
                }
                Value::Set(target)
            }
            Value::Array(items) => {
                let target = ArrayRef::default();
                self.registry.register(value, &Value::Array(target.clone()));
                for slot in items.slots() {
                    let slot = slot.map(|item| self.clone_value(&item));
                    target.push_slot(slot);
                }
                Value::Array(target)
            }
            Value::Object(obj) => {
                let target = ObjectRef::default();
                self.registry.register(value, &Value::Object(target.clone()));
                self.copy_properties(obj, &target);
                Value::Object(target)
            }
            // Date and RegExp are immutable, a copy of the value is a new
            // instance already.
            _ => value.clone(),
        }
    }

    fn copy_properties(&mut self, source: &ObjectRef, target: &ObjectRef) {
        for (key, prop) in source.entries() {
            if self.options.ignore_non_enumerable {
                if prop.enumerable {
                    let copy = self.clone_value(&prop.value);
                    target.define(key, Property::new(copy));
                }
            } else {
                let copy = self.clone_value(&prop.value);
                target.define(
                    key,
                    Property {
                        value: copy,
                        ..prop
                    },
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use objkit_value::{RegExp, TypedArray};
    use serde_json::json;

    #[test]
    fn test_clone_primitives() {
        for value in [
            Value::Undefined,
            Value::Null,
            Value::from(78),
            Value::from("hello"),
            Value::from(true),
            Value::BigInt(123),
        ] {
            assert_eq!(deep_clone(&value, false), value);
        }
    }

    #[test]
    fn test_clone_simple_object() {
        let obj = Value::from(json!({"a": 1, "b": "hello", "c": true}));
        let cloned = deep_clone(&obj, false);
        assert_eq!(cloned, obj);
        assert!(!cloned.ptr_eq(&obj));
    }

    #[test]
    fn test_clone_is_independent() {
        let obj = Value::from(json!({"a": {"b": {"c": [1, 2, 3]}}}));
        let cloned = deep_clone(&obj, false);
        cloned
            .get_property("a")
            .unwrap()
            .set_property("x", Value::from(1))
            .unwrap();
        assert_eq!(obj, Value::from(json!({"a": {"b": {"c": [1, 2, 3]}}})));
    }

    #[test]
    fn test_clone_null_and_undefined_fields() {
        let obj = Value::object([("a", Value::Null), ("b", Value::Undefined)]);
        let cloned = deep_clone(&obj, false);
        assert_eq!(cloned, obj);
        assert_eq!(cloned.has_own("b"), Ok(true));
    }

    #[test]
    fn test_clone_cycle() {
        let obj = Value::from(json!({"a": 1}));
        obj.set_property("b", obj.clone()).unwrap();
        let cloned = deep_clone(&obj, false);
        assert_eq!(cloned, obj);
        assert!(!cloned.ptr_eq(&obj));
        assert!(cloned.get_property("b").unwrap().ptr_eq(&cloned));
    }

    #[test]
    fn test_clone_cycle_through_array() {
        let arr = Value::empty_array();
        arr.set_property("0", arr.clone()).unwrap();
        let cloned = deep_clone(&arr, false);
        assert!(!cloned.ptr_eq(&arr));
        assert!(cloned.get_property("0").unwrap().ptr_eq(&cloned));
    }

    #[test]
    fn test_clone_preserves_aliasing() {
        let shared = Value::from(json!({"n": 1}));
        let list = Value::from(json!([{"x": 1}]));
        let obj = Value::object([
            ("left", shared.clone()),
            ("right", shared.clone()),
            ("list", list.clone()),
            ("again", list),
        ]);
        let cloned = deep_clone(&obj, false);
        let left = cloned.get_property("left").unwrap();
        assert!(left.ptr_eq(&cloned.get_property("right").unwrap()));
        assert!(!left.ptr_eq(&shared));
        assert!(cloned
            .get_property("list")
            .unwrap()
            .ptr_eq(&cloned.get_property("again").unwrap()));
    }

    #[test]
    fn test_clone_symbol_gets_new_identity() {
        let symbol = Value::symbol(Some("hello"));
        let obj = Value::object([("b", symbol.clone()), ("c", Value::BigInt(123))]);
        let cloned = deep_clone(&obj, false);
        assert_eq!(cloned, obj);
        let copy = cloned.get_property("b").unwrap();
        assert!(!copy.ptr_eq(&symbol));
        assert!(matches!(&copy, Value::Symbol(s) if s.description() == Some("hello")));
    }

    #[test]
    fn test_clone_special_kinds() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let map = MapRef::new();
        map.set(Value::from("k"), Value::from(json!({"deep": true})));
        let set = SetRef::new();
        set.add(Value::from(1));
        let obj = Value::object([
            ("date", Value::from(date)),
            ("re", Value::from(RegExp::new("a+b", "gi").unwrap())),
            ("map", Value::Map(map.clone())),
            ("set", Value::Set(set.clone())),
            ("buf", Value::buffer(vec![1, 2, 3])),
            ("typed", Value::typed_array(TypedArray::Int16(vec![-1, 2]))),
        ]);

        let cloned = deep_clone(&obj, false);
        assert_eq!(cloned, obj);

        let Value::Map(map_copy) = cloned.get_property("map").unwrap() else {
            panic!("expected a map");
        };
        assert!(!map_copy.ptr_eq(&map));
        let inner = map_copy.get(&Value::from("k")).unwrap();
        assert!(!inner.ptr_eq(&map.get(&Value::from("k")).unwrap()));

        let buf = cloned.get_property("buf").unwrap();
        let Value::Buffer(bytes) = &buf else {
            panic!("expected a buffer");
        };
        bytes.borrow_mut()[0] = 9;
        assert_eq!(obj.get_property("buf").unwrap(), Value::buffer(vec![1, 2, 3]));
    }

    #[test]
    fn test_clone_keeps_descriptors() {
        let obj = Value::from(json!({"visible": 1}));
        let handle = obj.as_object().unwrap();
        handle.define("hidden", Property::new(Value::from(2)).hidden());
        handle.define("locked", Property::new(Value::from(3)).read_only().sealed());

        let cloned = deep_clone(&obj, false);
        let copy = cloned.as_object().unwrap();
        assert_eq!(copy.property("hidden"), handle.property("hidden"));
        assert_eq!(copy.property("locked"), handle.property("locked"));
    }

    #[test]
    fn test_clone_ignoring_non_enumerable() {
        let obj = Value::from(json!({"visible": 1}));
        let handle = obj.as_object().unwrap();
        handle.define("hidden", Property::new(Value::from(2)).hidden());
        handle.define("locked", Property::new(Value::from(3)).read_only());

        let cloned = deep_clone_with(
            &obj,
            &CloneOptions {
                ignore_non_enumerable: true,
            },
        );
        let copy = cloned.as_object().unwrap();
        assert!(!copy.contains_key("hidden"));
        assert_eq!(copy.property("locked"), Some(Property::new(Value::from(3))));
    }

    #[test]
    fn test_clone_keeps_array_holes() {
        let arr = Value::from(json!([1, 2, 3]));
        arr.delete_property("1").unwrap();
        let cloned = deep_clone(&arr, false);
        assert_eq!(cloned.has_own("1"), Ok(false));
        assert_eq!(cloned.has_own("2"), Ok(true));
        assert_eq!(cloned.as_array().map(|a| a.len()), Some(3));
    }
}
