//! objkit — structural utilities over dynamic object graphs.
//!
//! Re-exports the workspace crates under one roof:
//!
//! - [`value`]: the `Value` model with JS-style own-property access
//! - [`path`]: dot-path get/set/unset with array broadcast and auto-vivification
//! - [`util`]: deep clone, merge and form payload encoding
//!
//! plus the [`cli`] helpers behind the `objkit-get`, `objkit-set`,
//! `objkit-unset` and `objkit-clone` binaries.
//!
//! # Example
//!
//! ```
//! use objkit::{deep_clone, get, set, Value};
//! use serde_json::json;
//!
//! let doc = Value::from(json!({"users": [{"name": "a"}, {"name": "b"}]}));
//! let copy = deep_clone(&doc, false);
//!
//! set(&copy, "users.name", Value::from("x"), false);
//! assert_eq!(get(&copy, "users.name", false), Value::from(json!(["x", "x"])));
//! assert_eq!(get(&doc, "users.name", false), Value::from(json!(["a", "b"])));
//! ```

pub mod cli;

pub use objkit_path as path;
pub use objkit_util as util;
pub use objkit_value as value;

pub use objkit_path::{
    get, get_many, resolve, set, set_many, set_many_from_value, unset, unset_many, PathEntry,
    PathError, SetValue, Slot,
};
pub use objkit_util::{
    deep_clone, deep_clone_with, merge_overwrite, merge_overwrite_existing, to_form_payload,
    CloneOptions, FormPayload, MergeError,
};
pub use objkit_value::{Value, ValueError};
