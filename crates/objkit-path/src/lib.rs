//! Dot-path access over objkit value graphs.
//!
//! A path is a string of segments separated by `.`: `"a.b.0.c"`. The last
//! segment is the target key, the others are walked through. Numeric
//! segments address array elements; a non-numeric target key on an array
//! broadcasts the operation over every element.
//!
//! The public operations never fail on traversal faults: they log a
//! `tracing` warning and degrade (reads return the root, writes and deletes
//! stop). The `try_*` variants return the underlying [`PathError`].
//!
//! # Example
//!
//! ```
//! use objkit_path::{get, set, unset, SetValue};
//! use objkit_value::Value;
//! use serde_json::json;
//!
//! let doc = Value::from(json!({"list": [{"id": 1}, {"id": 2}]}));
//!
//! // Broadcast read over the array
//! assert_eq!(get(&doc, "list.id", false), Value::from(json!([1, 2])));
//!
//! // Broadcast write
//! set(&doc, "list.id", SetValue::literal(9), false);
//! assert_eq!(get(&doc, "list.id", false), Value::from(json!([9, 9])));
//!
//! // Auto-vivification of missing containers
//! set(&doc, "meta.tags.0", Value::from("new"), true);
//! assert_eq!(get(&doc, "meta.tags", false), Value::from(json!(["new"])));
//!
//! unset(&doc, "meta");
//! assert_eq!(get(&doc, "meta", false), Value::Undefined);
//! ```

use objkit_value::ValueError;
use thiserror::Error;

mod batch;
mod ops;
mod path;
mod resolve;
pub mod types;

pub use batch::{get_many, set_many, set_many_from_value, unset_many};
pub use objkit_value::is_index;
pub use ops::{get, set, try_get, try_set, try_unset, unset};
pub use path::{parse_path, Path};
pub use resolve::{resolve, resolve_path};
pub use types::{PathEntry, SetValue, Slot};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("the given path `{0}` is not of type string")]
    NotAString(String),
    #[error("malformed path entry `{0}`: expected a [path, sourcePath] pair or a {{path, value}} record")]
    MalformedEntry(String),
    #[error(transparent)]
    Value(#[from] ValueError),
}
