use std::fmt;

use crate::Value;

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut ancestors = Vec::new();
        write_value(self, f, &mut ancestors)
    }
}

impl fmt::Debug for crate::Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or(""))
    }
}

// `ancestors` holds the identities of the containers currently being
// printed; meeting one again prints `[Circular]`.
fn write_value(value: &Value, f: &mut fmt::Formatter<'_>, ancestors: &mut Vec<usize>) -> fmt::Result {
    if let Some(id) = value.identity() {
        if ancestors.contains(&id) {
            return f.write_str("[Circular]");
        }
        ancestors.push(id);
        let result = write_container(value, f, ancestors);
        ancestors.pop();
        return result;
    }

    match value {
        Value::Undefined => f.write_str("undefined"),
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => write!(f, "{n}"),
        Value::BigInt(n) => write!(f, "{n}n"),
        Value::String(s) => write!(f, "{s:?}"),
        Value::Symbol(s) => write!(f, "{s:?}"),
        Value::Date(d) => write!(f, "Date({})", d.to_rfc3339()),
        Value::RegExp(re) => write!(f, "/{}/{}", re.source(), re.flags()),
        _ => Ok(()),
    }
}

fn write_container(value: &Value, f: &mut fmt::Formatter<'_>, ancestors: &mut Vec<usize>) -> fmt::Result {
    match value {
        Value::Array(arr) => {
            f.write_str("[")?;
            for (i, item) in arr.items().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(item, f, ancestors)?;
            }
            f.write_str("]")
        }
        Value::Object(obj) => {
            f.write_str("{")?;
            for (i, (key, prop)) in obj.entries().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key:?}: ")?;
                write_value(&prop.value, f, ancestors)?;
            }
            f.write_str("}")
        }
        Value::Map(map) => {
            f.write_str("Map {")?;
            for (i, (k, v)) in map.entries().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(k, f, ancestors)?;
                f.write_str(" => ")?;
                write_value(v, f, ancestors)?;
            }
            f.write_str("}")
        }
        Value::Set(set) => {
            f.write_str("Set {")?;
            for (i, v) in set.values().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(v, f, ancestors)?;
            }
            f.write_str("}")
        }
        Value::Buffer(buf) => write!(f, "ArrayBuffer({:?})", buf.borrow()),
        Value::TypedArray(arr) => write!(f, "{:?}", arr.borrow()),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::Value;
    use serde_json::json;

    #[test]
    fn test_debug_plain() {
        let doc = Value::from(json!({"a": [1, "x", null]}));
        assert_eq!(format!("{doc:?}"), r#"{"a": [1, "x", null]}"#);
    }

    #[test]
    fn test_debug_circular() {
        let doc = Value::from(json!({"a": 1}));
        doc.set_property("self", doc.clone()).unwrap();
        assert_eq!(format!("{doc:?}"), r#"{"a": 1, "self": [Circular]}"#);
    }
}
