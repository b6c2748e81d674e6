//! Conversion from `serde_json` and `JSON.stringify`-compatible encoding.

use chrono::SecondsFormat;
use serde_json::{Map, Number};

use crate::{Value, ValueError};

/// Largest integer an `f64` holds exactly (2^53).
const MAX_SAFE_FLOAT_INT: f64 = 9_007_199_254_740_992.0;

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(arr) => {
                Value::array(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::object(obj.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}

impl From<&serde_json::Value> for Value {
    fn from(value: &serde_json::Value) -> Self {
        Value::from(value.clone())
    }
}

impl Value {
    /// Encodes the value the way `JSON.stringify` would.
    ///
    /// Returns `Ok(None)` when the value itself has no JSON form
    /// (`undefined`, a symbol).
    ///
    /// # Errors
    ///
    /// - [`ValueError::Circular`] if the graph contains a cycle
    /// - [`ValueError::BigIntNotSerializable`] for a `BigInt` anywhere in the graph
    pub fn to_json(&self) -> Result<Option<serde_json::Value>, ValueError> {
        let mut ancestors = Vec::new();
        encode(self, &mut ancestors)
    }

    /// [`Value::to_json`] rendered as compact JSON text.
    ///
    /// # Example
    ///
    /// ```
    /// use objkit_value::Value;
    ///
    /// assert_eq!(Value::from("John").stringify().unwrap().as_deref(), Some("\"John\""));
    /// assert_eq!(Value::from(1).stringify().unwrap().as_deref(), Some("1"));
    /// assert_eq!(Value::Undefined.stringify().unwrap(), None);
    /// ```
    pub fn stringify(&self) -> Result<Option<String>, ValueError> {
        Ok(self.to_json()?.map(|json| {
            let mut out = String::new();
            write_json(&json, &mut out);
            out
        }))
    }
}

/// Compact JSON text with numbers in JavaScript's `Number#toString` form.
fn write_json(json: &serde_json::Value, out: &mut String) {
    match json {
        serde_json::Value::Number(n) if n.is_f64() => {
            out.push_str(&number_to_string(n.as_f64().unwrap_or(f64::NAN)));
        }
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_json(item, out);
            }
            out.push(']');
        }
        serde_json::Value::Object(map) => {
            out.push('{');
            for (i, (key, value)) in map.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&serde_json::Value::String(key.clone()).to_string());
                out.push(':');
                write_json(value, out);
            }
            out.push('}');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}

/// Formats a number the way JavaScript's `Number#toString` does: shortest
/// round-trip digits, plain notation for exponents in `-7 < e < 21`.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:e}", n.abs());
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let len = digits.len() as i32;
    // Position of the decimal point relative to the first digit.
    let point = exp + 1;

    let body = if len <= point && point <= 21 {
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= 21 {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if -6 < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat(-point as usize))
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        let (head, tail) = digits.split_at(1);
        if tail.is_empty() {
            format!("{head}e{sign}{}", exp.abs())
        } else {
            format!("{head}.{tail}e{sign}{}", exp.abs())
        }
    };

    if n < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if !n.is_finite() {
        return serde_json::Value::Null;
    }
    if n.fract() == 0.0 && n.abs() < MAX_SAFE_FLOAT_INT {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

fn encode(value: &Value, ancestors: &mut Vec<usize>) -> Result<Option<serde_json::Value>, ValueError> {
    let json = match value {
        Value::Undefined | Value::Symbol(_) => return Ok(None),
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::BigInt(_) => return Err(ValueError::BigIntNotSerializable),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Date(d) => serde_json::Value::String(d.to_rfc3339_opts(SecondsFormat::Millis, true)),
        Value::RegExp(_) | Value::Buffer(_) | Value::Map(_) | Value::Set(_) => {
            serde_json::Value::Object(Map::new())
        }
        Value::TypedArray(arr) => {
            let data = arr.borrow();
            let mut out = Map::new();
            for i in 0..data.len() {
                if let Some(item) = data.get(i) {
                    out.insert(i.to_string(), encode(&item, ancestors)?.unwrap_or_default());
                }
            }
            serde_json::Value::Object(out)
        }
        Value::Array(arr) => {
            let id = arr.identity();
            enter(id, ancestors)?;
            let mut out = Vec::with_capacity(arr.len());
            for item in arr.items() {
                out.push(encode(&item, ancestors)?.unwrap_or(serde_json::Value::Null));
            }
            ancestors.pop();
            serde_json::Value::Array(out)
        }
        Value::Object(obj) => {
            let id = obj.identity();
            enter(id, ancestors)?;
            let mut out = Map::new();
            for (key, item) in obj.enumerable_entries() {
                if let Some(json) = encode(&item, ancestors)? {
                    out.insert(key, json);
                }
            }
            ancestors.pop();
            serde_json::Value::Object(out)
        }
    };
    Ok(Some(json))
}

fn enter(id: usize, ancestors: &mut Vec<usize>) -> Result<(), ValueError> {
    if ancestors.contains(&id) {
        return Err(ValueError::Circular);
    }
    ancestors.push(id);
    Ok(())
}
