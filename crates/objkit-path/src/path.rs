use std::fmt;

use objkit_value::Value;

use crate::PathError;

/// A parsed dot-path.
///
/// Always holds at least one segment; the empty string parses to a single
/// empty segment, which denotes the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

/// Split a dot-path into segments. No escaping: every `.` separates.
///
/// # Example
///
/// ```
/// use objkit_path::parse_path;
///
/// assert_eq!(parse_path("a.b.0").segments(), ["a", "b", "0"]);
/// assert_eq!(parse_path("").segments(), [""]);
/// assert_eq!(parse_path("a.b.").segments(), ["a", "b", ""]);
/// assert_eq!(parse_path(".").segments(), ["", ""]);
/// ```
pub fn parse_path(path: &str) -> Path {
    Path {
        segments: path.split('.').map(str::to_string).collect(),
    }
}

impl Path {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The empty path, addressing the root container itself.
    pub fn is_root(&self) -> bool {
        self.segments.len() == 1 && self.segments[0].is_empty()
    }

    /// The final segment.
    pub fn target(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or("")
    }

    /// Every segment but the last.
    pub fn traversal(&self) -> &[String] {
        &self.segments[..self.segments.len().saturating_sub(1)]
    }
}

impl From<&str> for Path {
    fn from(path: &str) -> Self {
        parse_path(path)
    }
}

impl TryFrom<&Value> for Path {
    type Error = PathError;

    /// Paths arriving as dynamic values must be strings.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Ok(parse_path(s)),
            other => Err(PathError::NotAString(format!("{other:?}"))),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_and_traversal() {
        let path = parse_path("a.b.c");
        assert_eq!(path.target(), "c");
        assert_eq!(path.traversal(), ["a", "b"]);
        assert!(!path.is_root());

        let single = parse_path("a");
        assert_eq!(single.target(), "a");
        assert!(single.traversal().is_empty());
    }

    #[test]
    fn test_root() {
        let root = parse_path("");
        assert!(root.is_root());
        assert_eq!(root.target(), "");
        assert!(!parse_path(".").is_root());
    }

    #[test]
    fn test_display_roundtrip() {
        for raw in ["", "a", "a.b", "a..b", "a.b.", "0.1.2"] {
            assert_eq!(parse_path(raw).to_string(), raw);
        }
    }

    #[test]
    fn test_non_string_path_is_rejected() {
        let err = Path::try_from(&Value::from(123)).unwrap_err();
        assert_eq!(err, PathError::NotAString("123".to_string()));
        assert_eq!(err.to_string(), "the given path `123` is not of type string");
        assert!(Path::try_from(&Value::from("a.b")).is_ok());
    }
}
