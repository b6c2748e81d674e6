//! `objkit-cli` — command-line tools for dot-path access on JSON documents.
//!
//! Provides the core logic used by the binary entry points:
//! - `objkit-get`   — read one or more dot paths from a document
//! - `objkit-set`   — write a value at a dot path
//! - `objkit-unset` — delete keys at one or more dot paths
//! - `objkit-clone` — re-emit a document through the deep clone engine
//!
//! Every tool reads the document as JSON from stdin and prints pretty JSON.

use std::io::{self, Read, Write};

use objkit_path::{try_get, try_set, try_unset, PathError, SetValue};
use objkit_util::deep_clone;
use objkit_value::{Value, ValueError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

// ── Errors ────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Io(#[from] io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Path(#[from] PathError),
    #[error("{0}")]
    Value(#[from] ValueError),
    #[error("NOT_FOUND: {0}")]
    NotFound(String),
    #[error("result has no JSON representation")]
    NotRepresentable,
}

// ── Logging ───────────────────────────────────────────────────────────────

/// Install a stderr `fmt` subscriber filtered by `RUST_LOG`, defaulting to
/// `warn` so the library's fault warnings are visible.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

// ── Shared ────────────────────────────────────────────────────────────────

/// Read the whole document from stdin.
pub fn read_stdin() -> Result<String, CliError> {
    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

/// Write a tool's output followed by a newline, or pass its error through.
pub fn write_output<W: Write>(out: &mut W, result: Result<String, CliError>) -> Result<(), CliError> {
    let text = result?;
    out.write_all(text.as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Print a tool result to stdout. Errors go to stderr with exit status 1.
pub fn emit(result: Result<String, CliError>) {
    if let Err(e) = write_output(&mut io::stdout(), result) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn parse_document(json: &str) -> Result<Value, CliError> {
    let doc: serde_json::Value = serde_json::from_str(json)?;
    Ok(Value::from(doc))
}

fn render(value: &Value) -> Result<String, CliError> {
    let json = value.to_json()?.ok_or(CliError::NotRepresentable)?;
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Parse a command-line value argument: JSON text if it parses, otherwise
/// the raw string.
pub fn parse_value_arg(arg: &str) -> Value {
    match serde_json::from_str::<serde_json::Value>(arg) {
        Ok(json) => Value::from(json),
        Err(_) => Value::from(arg),
    }
}

// ── objkit-get ────────────────────────────────────────────────────────────

/// Look up `path` in a JSON document and return the result as pretty JSON.
///
/// A path that resolves to nothing is `CliError::NotFound`.
pub fn lookup_path(doc_json: &str, path: &str) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    let found = try_get(&doc, path, false)?;
    if found.is_undefined() {
        return Err(CliError::NotFound(path.to_string()));
    }
    render(&found)
}

/// Look up several paths; the result is a JSON array with `null` for
/// paths that resolve to nothing.
pub fn lookup_paths<P: AsRef<str>>(doc_json: &str, paths: &[P]) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    let mut results = Vec::with_capacity(paths.len());
    for path in paths {
        let found = try_get(&doc, path.as_ref(), false)?;
        results.push(found.to_json()?.unwrap_or(serde_json::Value::Null));
    }
    Ok(serde_json::to_string_pretty(&serde_json::Value::Array(results))?)
}

// ── objkit-set ────────────────────────────────────────────────────────────

/// Write `value` at `path` and return the whole updated document.
pub fn assign_path(doc_json: &str, path: &str, value: Value, create: bool) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    try_set(&doc, path, &SetValue::Literal(value), create)?;
    render(&doc)
}

// ── objkit-unset ──────────────────────────────────────────────────────────

/// Delete the key at each path and return the updated document.
pub fn remove_paths<P: AsRef<str>>(doc_json: &str, paths: &[P]) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    for path in paths {
        try_unset(&doc, path.as_ref())?;
    }
    render(&doc)
}

// ── objkit-clone ──────────────────────────────────────────────────────────

/// Deep-clone a JSON document and return the copy as pretty JSON.
pub fn clone_document(doc_json: &str) -> Result<String, CliError> {
    let doc = parse_document(doc_json)?;
    render(&deep_clone(&doc, false))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parsed(out: &str) -> serde_json::Value {
        serde_json::from_str(out).unwrap()
    }

    // ── Shared ────────────────────────────────────────────────────────────

    #[test]
    fn write_output_appends_newline() {
        let mut out = Vec::new();
        write_output(&mut out, lookup_path(r#"{"a":[1]}"#, "a")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "[\n  1\n]\n");
    }

    #[test]
    fn write_output_passes_errors_without_writing() {
        let mut out = Vec::new();
        let err = write_output(&mut out, lookup_path("{}", "missing")).unwrap_err();
        assert_eq!(err.to_string(), "NOT_FOUND: missing");
        assert!(out.is_empty());
    }

    // ── objkit-get ────────────────────────────────────────────────────────

    #[test]
    fn lookup_nested_key() {
        let out = lookup_path(r#"{"a":{"b":[1,2,3]}}"#, "a.b.1").unwrap();
        assert_eq!(parsed(&out), json!(2));
    }

    #[test]
    fn lookup_broadcast() {
        let out = lookup_path(r#"{"u":[{"n":"a"},{"n":"b"}]}"#, "u.n").unwrap();
        assert_eq!(parsed(&out), json!(["a", "b"]));
    }

    #[test]
    fn lookup_missing_is_not_found() {
        let err = lookup_path(r#"{"a":1}"#, "b.c").unwrap_err();
        assert!(matches!(err, CliError::NotFound(ref p) if p == "b.c"));
        assert_eq!(err.to_string(), "NOT_FOUND: b.c");
    }

    #[test]
    fn lookup_through_primitive_reads_nothing() {
        let err = lookup_path(r#"{"a":1}"#, "a.b").unwrap_err();
        assert!(matches!(err, CliError::NotFound(_)));
    }

    #[test]
    fn lookup_broadcast_over_null_is_a_fault() {
        let err = lookup_path(r#"{"u":[{"n":1},null]}"#, "u.n").unwrap_err();
        assert!(matches!(err, CliError::Path(_)));
    }

    #[test]
    fn lookup_invalid_document() {
        assert!(matches!(lookup_path("{", "a"), Err(CliError::Json(_))));
    }

    #[test]
    fn lookup_many_fills_nulls() {
        let out = lookup_paths(r#"{"a":1,"b":{"c":2}}"#, &["a", "b.c", "x"]).unwrap();
        assert_eq!(parsed(&out), json!([1, 2, null]));
    }

    // ── objkit-set ────────────────────────────────────────────────────────

    #[test]
    fn assign_with_creation() {
        let out = assign_path("{}", "a.0.b", json!(true).into(), true).unwrap();
        assert_eq!(parsed(&out), json!({"a": [{"b": true}]}));
    }

    #[test]
    fn assign_without_creation_is_noop() {
        let out = assign_path(r#"{"a":1}"#, "b.c", Value::from(2), false).unwrap();
        assert_eq!(parsed(&out), json!({"a": 1}));
    }

    #[test]
    fn value_arg_parsing() {
        assert_eq!(parse_value_arg("42"), Value::from(42));
        assert_eq!(parse_value_arg(r#"{"k":[1]}"#), Value::from(json!({"k": [1]})));
        assert_eq!(parse_value_arg("hello"), Value::from("hello"));
    }

    // ── objkit-unset ──────────────────────────────────────────────────────

    #[test]
    fn remove_several_paths() {
        let out = remove_paths(r#"{"a":{"b":1,"c":2},"d":3}"#, &["a.b", "d", "missing.key"]).unwrap();
        assert_eq!(parsed(&out), json!({"a": {"c": 2}}));
    }

    #[test]
    fn remove_broadcast() {
        let out = remove_paths(r#"{"u":[{"n":1,"m":2},{"n":3}]}"#, &["u.n"]).unwrap();
        assert_eq!(parsed(&out), json!({"u": [{"m": 2}, {}]}));
    }

    // ── objkit-clone ──────────────────────────────────────────────────────

    #[test]
    fn clone_keeps_document_and_key_order() {
        let out = clone_document(r#"{"z":1,"a":[{"k":null}],"m":"s"}"#).unwrap();
        assert_eq!(parsed(&out), json!({"z": 1, "a": [{"k": null}], "m": "s"}));
        let keys: Vec<_> = parsed(&out).as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, ["z", "a", "m"]);
    }
}
