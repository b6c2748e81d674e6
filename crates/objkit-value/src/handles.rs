//! Shared container handles.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};

use crate::equal::same_value_zero;
use crate::{Value, ValueError};

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident, $inner:ty) => {
        $(#[$meta])*
        #[derive(Clone, Default)]
        pub struct $name(Rc<RefCell<$inner>>);

        impl $name {
            pub fn borrow(&self) -> Ref<'_, $inner> {
                self.0.borrow()
            }

            pub fn borrow_mut(&self) -> RefMut<'_, $inner> {
                self.0.borrow_mut()
            }

            /// Returns true if both handles point at the same container.
            pub fn ptr_eq(&self, other: &Self) -> bool {
                Rc::ptr_eq(&self.0, &other.0)
            }

            /// Address of the shared allocation, stable while any handle is alive.
            pub fn identity(&self) -> usize {
                Rc::as_ptr(&self.0) as *const () as usize
            }
        }
    };
}

handle!(
    /// Ordered, index-addressable sequence. `None` slots are holes.
    ArrayRef,
    Vec<Option<Value>>
);
handle!(
    /// Keyed mapping of own properties, in insertion order.
    ObjectRef,
    IndexMap<String, Property>
);
handle!(
    /// Associative map whose keys are arbitrary values.
    MapRef,
    Vec<(Value, Value)>
);
handle!(
    /// Insertion-ordered set of values.
    SetRef,
    Vec<Value>
);
handle!(
    /// Fixed-size binary buffer.
    BufferRef,
    Vec<u8>
);
handle!(
    /// Typed numeric array.
    TypedArrayRef,
    TypedArray
);

impl ArrayRef {
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(RefCell::new(items.into_iter().map(Some).collect())))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// The element at `index`; `None` past the end and for holes.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index).cloned().flatten()
    }

    /// Whether `index` holds an element (in bounds and not a hole).
    pub fn has_index(&self, index: usize) -> bool {
        matches!(self.0.borrow().get(index), Some(Some(_)))
    }

    pub fn push(&self, value: Value) {
        self.0.borrow_mut().push(Some(value));
    }

    pub fn push_slot(&self, slot: Option<Value>) {
        self.0.borrow_mut().push(slot);
    }

    /// Snapshot of the elements, holes read as `Undefined`. The snapshot
    /// shares element handles with the array but releases the borrow, so
    /// callers may mutate while walking.
    pub fn items(&self) -> Vec<Value> {
        self.0
            .borrow()
            .iter()
            .map(|slot| slot.clone().unwrap_or_default())
            .collect()
    }

    /// Snapshot of the raw slots, holes included.
    pub fn slots(&self) -> Vec<Option<Value>> {
        self.0.borrow().clone()
    }
}

/// An own property: the value plus its descriptor metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub value: Value,
    pub writable: bool,
    pub enumerable: bool,
    pub configurable: bool,
}

impl Property {
    pub fn new(value: Value) -> Self {
        Self {
            value,
            writable: true,
            enumerable: true,
            configurable: true,
        }
    }

    pub fn read_only(mut self) -> Self {
        self.writable = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.enumerable = false;
        self
    }

    pub fn sealed(mut self) -> Self {
        self.configurable = false;
        self
    }
}

impl ObjectRef {
    pub fn new(props: IndexMap<String, Property>) -> Self {
        Self(Rc::new(RefCell::new(props)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.borrow().contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        self.0.borrow().get(key).map(|p| p.value.clone())
    }

    pub fn property(&self, key: &str) -> Option<Property> {
        self.0.borrow().get(key).cloned()
    }

    /// Plain assignment. An existing property keeps its descriptor metadata,
    /// a new one gets the default (all flags set).
    pub fn insert(&self, key: impl Into<String>, value: Value) -> Result<(), ValueError> {
        let key = key.into();
        let mut props = self.0.borrow_mut();
        match props.get_mut(&key) {
            Some(prop) if !prop.writable => Err(ValueError::ReadOnly { key }),
            Some(prop) => {
                prop.value = value;
                Ok(())
            }
            None => {
                props.insert(key, Property::new(value));
                Ok(())
            }
        }
    }

    /// Defines (or redefines) a property with explicit metadata.
    pub fn define(&self, key: impl Into<String>, prop: Property) {
        self.0.borrow_mut().insert(key.into(), prop);
    }

    /// Removes a property. Absent keys succeed with `None`.
    pub fn remove(&self, key: &str) -> Result<Option<Property>, ValueError> {
        let mut props = self.0.borrow_mut();
        match props.get(key) {
            Some(prop) if !prop.configurable => Err(ValueError::NonConfigurable {
                key: key.to_string(),
            }),
            Some(_) => Ok(props.shift_remove(key)),
            None => Ok(None),
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.0.borrow().keys().cloned().collect()
    }

    /// Snapshot of `(key, property)` pairs, in insertion order.
    pub fn entries(&self) -> Vec<(String, Property)> {
        self.0
            .borrow()
            .iter()
            .map(|(k, p)| (k.clone(), p.clone()))
            .collect()
    }

    /// Snapshot of the enumerable `(key, value)` pairs.
    pub fn enumerable_entries(&self) -> Vec<(String, Value)> {
        self.0
            .borrow()
            .iter()
            .filter(|(_, p)| p.enumerable)
            .map(|(k, p)| (k.clone(), p.value.clone()))
            .collect()
    }
}

impl MapRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0
            .borrow()
            .iter()
            .find(|(k, _)| same_value_zero(k, key))
            .map(|(_, v)| v.clone())
    }

    pub fn has(&self, key: &Value) -> bool {
        self.0.borrow().iter().any(|(k, _)| same_value_zero(k, key))
    }

    pub fn set(&self, key: Value, value: Value) {
        let mut entries = self.0.borrow_mut();
        match entries.iter_mut().find(|(k, _)| same_value_zero(k, &key)) {
            Some(entry) => entry.1 = value,
            None => entries.push((key, value)),
        }
    }

    pub fn delete(&self, key: &Value) -> bool {
        let mut entries = self.0.borrow_mut();
        let before = entries.len();
        entries.retain(|(k, _)| !same_value_zero(k, key));
        entries.len() != before
    }

    pub fn entries(&self) -> Vec<(Value, Value)> {
        self.0.borrow().clone()
    }
}

impl SetRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn has(&self, value: &Value) -> bool {
        self.0.borrow().iter().any(|v| same_value_zero(v, value))
    }

    pub fn add(&self, value: Value) {
        if !self.has(&value) {
            self.0.borrow_mut().push(value);
        }
    }

    pub fn delete(&self, value: &Value) -> bool {
        let mut values = self.0.borrow_mut();
        let before = values.len();
        values.retain(|v| !same_value_zero(v, value));
        values.len() != before
    }

    pub fn values(&self) -> Vec<Value> {
        self.0.borrow().clone()
    }
}

impl BufferRef {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(Rc::new(RefCell::new(bytes)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.0.borrow().clone()
    }
}

/// Element storage of a typed numeric array.
#[derive(Clone, Debug, PartialEq)]
pub enum TypedArray {
    Int8(Vec<i8>),
    Uint8(Vec<u8>),
    Uint8Clamped(Vec<u8>),
    Int16(Vec<i16>),
    Uint16(Vec<u16>),
    Int32(Vec<i32>),
    Uint32(Vec<u32>),
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    BigInt64(Vec<i64>),
    BigUint64(Vec<u64>),
}

impl Default for TypedArray {
    fn default() -> Self {
        TypedArray::Uint8(Vec::new())
    }
}

impl TypedArray {
    pub fn kind(&self) -> &'static str {
        match self {
            TypedArray::Int8(_) => "Int8Array",
            TypedArray::Uint8(_) => "Uint8Array",
            TypedArray::Uint8Clamped(_) => "Uint8ClampedArray",
            TypedArray::Int16(_) => "Int16Array",
            TypedArray::Uint16(_) => "Uint16Array",
            TypedArray::Int32(_) => "Int32Array",
            TypedArray::Uint32(_) => "Uint32Array",
            TypedArray::Float32(_) => "Float32Array",
            TypedArray::Float64(_) => "Float64Array",
            TypedArray::BigInt64(_) => "BigInt64Array",
            TypedArray::BigUint64(_) => "BigUint64Array",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            TypedArray::Int8(v) => v.len(),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => v.len(),
            TypedArray::Int16(v) => v.len(),
            TypedArray::Uint16(v) => v.len(),
            TypedArray::Int32(v) => v.len(),
            TypedArray::Uint32(v) => v.len(),
            TypedArray::Float32(v) => v.len(),
            TypedArray::Float64(v) => v.len(),
            TypedArray::BigInt64(v) => v.len(),
            TypedArray::BigUint64(v) => v.len(),
        }
    }

    /// Element at `index` as a [`Value`]: `Number` for the numeric kinds,
    /// `BigInt` for the 64-bit integer kinds.
    pub fn get(&self, index: usize) -> Option<Value> {
        let value = match self {
            TypedArray::Int8(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Uint8(v) | TypedArray::Uint8Clamped(v) => {
                Value::Number(f64::from(*v.get(index)?))
            }
            TypedArray::Int16(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Uint16(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Int32(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Uint32(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Float32(v) => Value::Number(f64::from(*v.get(index)?)),
            TypedArray::Float64(v) => Value::Number(*v.get(index)?),
            TypedArray::BigInt64(v) => Value::BigInt(i128::from(*v.get(index)?)),
            TypedArray::BigUint64(v) => Value::BigInt(i128::from(*v.get(index)?)),
        };
        Some(value)
    }
}

impl TypedArrayRef {
    pub fn new(data: TypedArray) -> Self {
        Self(Rc::new(RefCell::new(data)))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn get(&self, index: usize) -> Option<Value> {
        self.0.borrow().get(index)
    }
}

/// A unique token. Two symbols are the same only if they come from the same
/// [`Symbol::new`] call; the description is just a label.
#[derive(Clone)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    pub fn new(description: Option<&str>) -> Self {
        Self(Rc::new(description.map(str::to_string)))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// A compiled pattern that remembers its source text and flags.
///
/// Supported flags: `i`, `m`, `s` change matching; `g`, `y`, `u`, `d` are
/// accepted and kept for round-tripping.
#[derive(Clone, Debug)]
pub struct RegExp {
    source: String,
    flags: String,
    regex: Regex,
}

impl RegExp {
    pub fn new(source: &str, flags: &str) -> Result<Self, ValueError> {
        let invalid = |reason: String| ValueError::InvalidRegExp {
            pattern: source.to_string(),
            flags: flags.to_string(),
            reason,
        };
        let mut builder = RegexBuilder::new(source);
        for flag in flags.chars() {
            match flag {
                'i' => {
                    builder.case_insensitive(true);
                }
                'm' => {
                    builder.multi_line(true);
                }
                's' => {
                    builder.dot_matches_new_line(true);
                }
                'g' | 'y' | 'u' | 'd' => {}
                other => return Err(invalid(format!("unknown flag `{other}`"))),
            }
        }
        let regex = builder.build().map_err(|e| invalid(e.to_string()))?;
        Ok(Self {
            source: source.to_string(),
            flags: flags.to_string(),
            regex,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.regex.is_match(haystack)
    }
}

impl PartialEq for RegExp {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.flags == other.flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_insert_keeps_descriptor() {
        let obj = ObjectRef::default();
        obj.define("a", Property::new(Value::from(1)).hidden());
        obj.insert("a", Value::from(2)).unwrap();
        let prop = obj.property("a").unwrap();
        assert_eq!(prop.value, Value::from(2));
        assert!(!prop.enumerable);
    }

    #[test]
    fn test_object_read_only_and_sealed() {
        let obj = ObjectRef::default();
        obj.define("ro", Property::new(Value::from(1)).read_only());
        obj.define("fixed", Property::new(Value::from(1)).sealed());
        assert!(matches!(obj.insert("ro", Value::from(2)), Err(ValueError::ReadOnly { .. })));
        assert!(matches!(obj.remove("fixed"), Err(ValueError::NonConfigurable { .. })));
        assert_eq!(obj.remove("missing"), Ok(None));
    }

    #[test]
    fn test_object_remove_keeps_order() {
        let obj = ObjectRef::default();
        for key in ["a", "b", "c"] {
            obj.insert(key, Value::Null).unwrap();
        }
        obj.remove("b").unwrap();
        assert_eq!(obj.keys(), vec!["a", "c"]);
    }

    #[test]
    fn test_map_same_value_zero_keys() {
        let map = MapRef::new();
        map.set(Value::Number(f64::NAN), Value::from(1));
        map.set(Value::Number(f64::NAN), Value::from(2));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&Value::Number(f64::NAN)), Some(Value::from(2)));
        assert!(map.delete(&Value::Number(f64::NAN)));
    }

    #[test]
    fn test_set_dedup() {
        let set = SetRef::new();
        set.add(Value::from("a"));
        set.add(Value::from("a"));
        set.add(Value::from(0));
        assert_eq!(set.len(), 2);
        assert!(set.has(&Value::from(-0.0)));
    }

    #[test]
    fn test_typed_array_get() {
        let arr = TypedArrayRef::new(TypedArray::Int16(vec![-1, 2]));
        assert_eq!(arr.get(0), Some(Value::from(-1)));
        assert_eq!(arr.get(2), None);
        assert_eq!(arr.borrow().kind(), "Int16Array");
    }

    #[test]
    fn test_regexp_flags() {
        let re = RegExp::new("^ab+c$", "gi").unwrap();
        assert!(re.is_match("ABBC"));
        assert_eq!(re.flags(), "gi");
        assert!(RegExp::new("a", "q").is_err());
        assert!(RegExp::new("(", "").is_err());
    }

    #[test]
    fn test_symbol_identity() {
        let a = Symbol::new(Some("tag"));
        let b = Symbol::new(Some("tag"));
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
        assert_eq!(a.description(), b.description());
    }
}
