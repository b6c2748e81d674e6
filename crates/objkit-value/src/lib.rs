//! Dynamic value graph for objkit.
//!
//! [`Value`] models the data the path engine and the clone engine operate on.
//! Scalars are held inline. Every mutable container is a shared handle
//! (`Rc<RefCell<_>>`), so a graph can alias sub-structure and contain cycles,
//! and two handles can be compared by identity.
//!
//! # Example
//!
//! ```
//! use objkit_value::Value;
//!
//! let doc = Value::from(serde_json::json!({"list": [{"id": 1}, {"id": 2}]}));
//! let list = doc.get_property("list").unwrap();
//! assert_eq!(list.get_property("1").unwrap().get_property("id").unwrap(), Value::from(2));
//!
//! // Handles share state: writing through one is visible through the other.
//! let alias = doc.clone();
//! alias.set_property("name", Value::from("x")).unwrap();
//! assert_eq!(doc.get_property("name").unwrap(), Value::from("x"));
//! ```

mod equal;
mod fmt;
mod handles;
mod json;
mod property;
mod value;

pub use equal::{deep_equal, same_value_zero};
pub use json::number_to_string;
pub use handles::{
    ArrayRef, BufferRef, MapRef, ObjectRef, Property, RegExp, SetRef, Symbol, TypedArray,
    TypedArrayRef,
};
pub use property::{is_index, parse_index};
pub use value::{Container, Value};

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("cannot read properties of {found} (reading `{key}`)")]
    NotIndexable { key: String, found: &'static str },
    #[error("cannot create property `{key}` on {found}")]
    NotAssignable { key: String, found: &'static str },
    #[error("cannot assign to read only property `{key}`")]
    ReadOnly { key: String },
    #[error("cannot delete property `{key}`")]
    NonConfigurable { key: String },
    #[error("index `{index}` is too far past the end of an array of length {len}")]
    IndexOutOfRange { index: String, len: usize },
    #[error("converting circular structure to JSON")]
    Circular,
    #[error("do not know how to serialize a BigInt")]
    BigIntNotSerializable,
    #[error("invalid regular expression `/{pattern}/{flags}`: {reason}")]
    InvalidRegExp {
        pattern: String,
        flags: String,
        reason: String,
    },
}
