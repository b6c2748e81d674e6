//! Form payload building and `multipart/form-data` encoding.

mod multipart;
mod payload;

pub use multipart::{content_type, generate_boundary, BoundaryGenerator};
pub use payload::{FileBlob, FormPayload, FormValue};

use objkit_value::{Container, Value, ValueError};
use tracing::warn;

/// Files to attach under a form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Media {
    pub title: String,
    pub files: MediaFiles,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaFiles {
    /// A single optional file; `None` is ignored.
    One(Option<FileBlob>),
    /// Several files under one name; an empty list is ignored.
    Many(Vec<FileBlob>),
}

impl Media {
    pub fn one(title: impl Into<String>, file: Option<FileBlob>) -> Self {
        Self {
            title: title.into(),
            files: MediaFiles::One(file),
        }
    }

    pub fn many(title: impl Into<String>, files: Vec<FileBlob>) -> Self {
        Self {
            title: title.into(),
            files: MediaFiles::Many(files),
        }
    }
}

/// Build a form payload from the fields of `data` plus optional media.
///
/// Each own enumerable field that is not `Undefined` becomes a text entry
/// holding its JSON encoding. Then, per media item, a non-empty file list
/// replaces any entry of that title with one entry per file, and a single
/// file is set under the title.
///
/// Never fails: a `data` that is not an object is logged and skipped, and a
/// field that cannot be encoded (a cycle, a bigint) is logged and ends the
/// conversion with the entries built so far.
///
/// # Examples
///
/// ```
/// use objkit_util::{to_form_payload, FileBlob, FormValue, Media};
/// use objkit_value::Value;
/// use serde_json::json;
///
/// let data = Value::from(json!({"name": "John", "age": 30}));
/// let media = [Media::one("avatar", Some(FileBlob::new(vec![1, 2]).with_filename("a.png")))];
/// let form = to_form_payload(&data, Some(&media[..]));
///
/// assert_eq!(form.get("name"), Some(&FormValue::from("\"John\"")));
/// assert_eq!(form.get("age"), Some(&FormValue::from("30")));
/// assert_eq!(form.get("avatar").and_then(FormValue::as_file).map(|f| f.filename.as_str()), Some("a.png"));
/// ```
pub fn to_form_payload(data: &Value, media: Option<&[Media]>) -> FormPayload {
    let mut payload = FormPayload::new();

    if let Err(err) = add_fields(&mut payload, data) {
        warn!(op = "to_form_payload", error = %err, "there was an error while converting to form data");
        return payload;
    }

    for item in media.unwrap_or_default() {
        match &item.files {
            MediaFiles::Many(files) if !files.is_empty() => {
                payload.delete(&item.title);
                for file in files {
                    payload.append(item.title.clone(), file.clone());
                }
            }
            MediaFiles::One(Some(file)) => payload.set(item.title.clone(), file.clone()),
            _ => {}
        }
    }

    payload
}

fn add_fields(payload: &mut FormPayload, data: &Value) -> Result<(), ValueError> {
    match data.shape() {
        Container::Mapping(_) | Container::Sequence(_) => {}
        Container::Opaque => return Ok(()),
        Container::Primitive => {
            warn!(op = "to_form_payload", found = data.type_name(), "data parameter is not an object");
            return Ok(());
        }
    }
    for (key, value) in data.own_entries() {
        if value.is_undefined() {
            continue;
        }
        // Symbols have no JSON encoding.
        if let Some(json) = value.stringify()? {
            payload.set(key, json);
        }
    }
    Ok(())
}
