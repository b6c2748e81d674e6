use chrono::{DateTime, Utc};
use indexmap::IndexMap;

use crate::handles::{
    ArrayRef, BufferRef, MapRef, ObjectRef, Property, RegExp, SetRef, Symbol, TypedArray,
    TypedArrayRef,
};

/// A dynamically typed value.
///
/// Cloning a `Value` clones the handle, not the container: the clone refers
/// to the same array, object, map, set or buffer. Use the deep clone engine
/// for an independent copy.
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(String),
    Symbol(Symbol),
    Date(DateTime<Utc>),
    RegExp(RegExp),
    Buffer(BufferRef),
    TypedArray(TypedArrayRef),
    Map(MapRef),
    Set(SetRef),
    Array(ArrayRef),
    Object(ObjectRef),
}

/// The shape of a value as seen by the path engine, decided once per lookup.
#[derive(Clone)]
pub enum Container {
    /// An ordered, index-addressable sequence.
    Sequence(ArrayRef),
    /// A keyed mapping.
    Mapping(ObjectRef),
    /// Any other reference kind (map, set, buffer, typed array, date, regexp).
    Opaque,
    /// `undefined`, `null`, booleans, numbers, strings, symbols.
    Primitive,
}

impl Value {
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(ArrayRef::new(items))
    }

    pub fn empty_array() -> Self {
        Value::array(Vec::new())
    }

    /// Builds an object from `(key, value)` pairs with default descriptors.
    pub fn object<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let props: IndexMap<String, Property> = entries
            .into_iter()
            .map(|(k, v)| (k.into(), Property::new(v)))
            .collect();
        Value::Object(ObjectRef::new(props))
    }

    pub fn empty_object() -> Self {
        Value::Object(ObjectRef::default())
    }

    pub fn buffer(bytes: Vec<u8>) -> Self {
        Value::Buffer(BufferRef::new(bytes))
    }

    pub fn typed_array(data: TypedArray) -> Self {
        Value::TypedArray(TypedArrayRef::new(data))
    }

    pub fn symbol(description: Option<&str>) -> Self {
        Value::Symbol(Symbol::new(description))
    }

    /// Name used in diagnostics, close to what `typeof`/the constructor name
    /// would report.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::BigInt(_) => "bigint",
            Value::String(_) => "string",
            Value::Symbol(_) => "symbol",
            Value::Date(_) => "Date",
            Value::RegExp(_) => "RegExp",
            Value::Buffer(_) => "ArrayBuffer",
            Value::TypedArray(_) => "TypedArray",
            Value::Map(_) => "Map",
            Value::Set(_) => "Set",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
        }
    }

    pub fn shape(&self) -> Container {
        match self {
            Value::Array(arr) => Container::Sequence(arr.clone()),
            Value::Object(obj) => Container::Mapping(obj.clone()),
            Value::Date(_)
            | Value::RegExp(_)
            | Value::Buffer(_)
            | Value::TypedArray(_)
            | Value::Map(_)
            | Value::Set(_) => Container::Opaque,
            _ => Container::Primitive,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_nullish(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// JavaScript truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined | Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(n) => *n != 0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    /// Identity of a shared container, `None` for inline values.
    ///
    /// Symbols have identity too but are not containers; compare them with
    /// [`Value::ptr_eq`].
    pub fn identity(&self) -> Option<usize> {
        match self {
            Value::Buffer(h) => Some(h.identity()),
            Value::TypedArray(h) => Some(h.identity()),
            Value::Map(h) => Some(h.identity()),
            Value::Set(h) => Some(h.identity()),
            Value::Array(h) => Some(h.identity()),
            Value::Object(h) => Some(h.identity()),
            _ => None,
        }
    }

    /// Reference equality for containers and symbols.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Symbol(a), Value::Symbol(b)) => a.ptr_eq(b),
            _ => match (self.identity(), other.identity()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Value::Number(n as f64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(date: DateTime<Utc>) -> Self {
        Value::Date(date)
    }
}

impl From<RegExp> for Value {
    fn from(re: RegExp) -> Self {
        Value::RegExp(re)
    }
}
