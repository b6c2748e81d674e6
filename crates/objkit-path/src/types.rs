//! Type definitions for dot-path operations.

use objkit_value::{is_index, ArrayRef, Container, Value, ValueError};

use crate::ops::try_get;
use crate::{Path, PathError};

/// Where a path operation lands: a container and the key inside it.
///
/// `container` is `None` when the path could not be walked (a missing
/// intermediate key with creation disabled).
#[derive(Debug, Clone, PartialEq)]
pub struct Slot {
    pub container: Option<Value>,
    pub key: String,
}

impl Slot {
    pub fn found(container: Value, key: impl Into<String>) -> Self {
        Self {
            container: Some(container),
            key: key.into(),
        }
    }

    pub fn unresolved(key: impl Into<String>) -> Self {
        Self {
            container: None,
            key: key.into(),
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.container.is_some()
    }

    /// The array to broadcast over: set when the container is an array and
    /// the key is not an index.
    pub fn broadcast_target(&self) -> Option<ArrayRef> {
        match self.container.as_ref().map(Value::shape) {
            Some(Container::Sequence(items)) if !is_index(&self.key) => Some(items),
            _ => None,
        }
    }
}

/// The value side of a write.
#[derive(Debug, Clone, PartialEq)]
pub enum SetValue {
    /// Assign this value as-is.
    Literal(Value),
    /// Assign whatever `path` reads from `source`. Without a source, the path
    /// is read from the value currently stored at the written slot.
    CopyFrom { path: String, source: Option<Value> },
}

impl SetValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        SetValue::Literal(value.into())
    }

    pub fn copy_from(path: impl Into<String>) -> Self {
        SetValue::CopyFrom {
            path: path.into(),
            source: None,
        }
    }

    pub fn copy_from_in(path: impl Into<String>, source: Value) -> Self {
        SetValue::CopyFrom {
            path: path.into(),
            source: Some(source),
        }
    }

    /// Interprets a dynamic value descriptor.
    ///
    /// - an object owning `value` is a literal holding that field;
    /// - an object owning a string `path` copies from that path, reading from
    ///   its `obj` field when truthy;
    /// - anything else is a literal holding the whole value.
    pub fn from_descriptor(value: &Value) -> Self {
        if let Value::Object(obj) = value {
            if let Some(inner) = obj.get("value") {
                return SetValue::Literal(inner);
            }
            if let Some(Value::String(path)) = obj.get("path") {
                let source = obj.get("obj").filter(Value::is_truthy);
                return SetValue::CopyFrom { path, source };
            }
        }
        SetValue::Literal(value.clone())
    }

    /// The value to store. `current` yields the value at the written slot
    /// and is only called for a source-less copy.
    pub(crate) fn effective(
        &self,
        current: impl FnOnce() -> Result<Value, ValueError>,
    ) -> Result<Value, PathError> {
        match self {
            SetValue::Literal(value) => Ok(value.clone()),
            SetValue::CopyFrom { path, source } => {
                let source = match source {
                    Some(source) => source.clone(),
                    None => current()?,
                };
                try_get(&source, path, false)
            }
        }
    }
}

impl From<Value> for SetValue {
    fn from(value: Value) -> Self {
        SetValue::Literal(value)
    }
}

/// One entry of a batch write.
#[derive(Debug, Clone, PartialEq)]
pub enum PathEntry {
    /// Set `path` to the value found at `from` in the same root.
    Copy { path: String, from: String },
    /// Set `path` to a literal or copied value.
    Assign { path: String, value: SetValue },
}

impl PathEntry {
    pub fn copy(path: impl Into<String>, from: impl Into<String>) -> Self {
        PathEntry::Copy {
            path: path.into(),
            from: from.into(),
        }
    }

    pub fn assign(path: impl Into<String>, value: impl Into<SetValue>) -> Self {
        PathEntry::Assign {
            path: path.into(),
            value: value.into(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            PathEntry::Copy { path, .. } | PathEntry::Assign { path, .. } => path,
        }
    }
}

impl TryFrom<&Value> for PathEntry {
    type Error = PathError;

    /// Accepts `["target.path", "source.path"]` pairs and
    /// `{"path": "target.path", "value": <descriptor>}` records.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Array(pair) if pair.len() == 2 => {
                let items = pair.items();
                let path = Path::try_from(&items[0])?;
                let from = Path::try_from(&items[1])?;
                Ok(PathEntry::Copy {
                    path: path.to_string(),
                    from: from.to_string(),
                })
            }
            Value::Object(record) if record.contains_key("path") => {
                let path = Path::try_from(&record.get("path").unwrap_or_default())?;
                let value = SetValue::from_descriptor(&record.get("value").unwrap_or_default());
                Ok(PathEntry::Assign {
                    path: path.to_string(),
                    value,
                })
            }
            other => Err(PathError::MalformedEntry(format!("{other:?}"))),
        }
    }
}
