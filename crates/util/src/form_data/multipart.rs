use rand::{distributions::Alphanumeric, rngs::OsRng, Rng, RngCore, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

use super::{FormPayload, FormValue};

const BOUNDARY_PREFIX: &str = "----objkit";
const BOUNDARY_RANDOM_LEN: usize = 24;

/// Produces multipart boundaries.
///
/// Seeded generators repeat the same sequence, which keeps encoded bodies
/// stable in tests.
///
/// # Examples
///
/// ```
/// use objkit_util::BoundaryGenerator;
///
/// let mut a = BoundaryGenerator::new(Some([7; 32]));
/// let mut b = BoundaryGenerator::new(Some([7; 32]));
/// assert_eq!(a.next_boundary(), b.next_boundary());
/// assert!(a.next_boundary().starts_with("----objkit"));
/// ```
pub struct BoundaryGenerator {
    pub seed: [u8; 32],
    rng: Xoshiro256StarStar,
}

impl BoundaryGenerator {
    /// Without a seed, one is drawn from `OsRng`.
    pub fn new(seed: Option<[u8; 32]>) -> Self {
        let seed = seed.unwrap_or_else(|| {
            let mut bytes = [0u8; 32];
            OsRng.fill_bytes(&mut bytes);
            bytes
        });
        Self {
            seed,
            rng: Xoshiro256StarStar::from_seed(seed),
        }
    }

    pub fn next_boundary(&mut self) -> String {
        let suffix: String = (&mut self.rng)
            .sample_iter(Alphanumeric)
            .take(BOUNDARY_RANDOM_LEN)
            .map(char::from)
            .collect();
        format!("{BOUNDARY_PREFIX}{suffix}")
    }
}

/// A fresh random boundary.
pub fn generate_boundary() -> String {
    BoundaryGenerator::new(None).next_boundary()
}

/// `Content-Type` header value for a body encoded with `boundary`.
pub fn content_type(boundary: &str) -> String {
    format!("multipart/form-data; boundary={boundary}")
}

/// Escape a field name or filename for a `Content-Disposition` header.
fn escape_header_param(raw: &str) -> String {
    raw.replace('\n', "%0A")
        .replace('\r', "%0D")
        .replace('"', "%22")
}

/// Normalize every line break (`\r`, `\n`, `\r\n`) to `\r\n`.
fn normalize_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\r\n");
            }
            '\n' => out.push_str("\r\n"),
            other => out.push(other),
        }
    }
    out
}

impl FormPayload {
    /// Encode as a `multipart/form-data` body.
    ///
    /// # Examples
    ///
    /// ```
    /// use objkit_util::FormPayload;
    ///
    /// let mut form = FormPayload::new();
    /// form.set("name", "\"John\"");
    /// let body = form.encode_multipart("XyZ");
    /// assert_eq!(
    ///     String::from_utf8(body).unwrap(),
    ///     "--XyZ\r\nContent-Disposition: form-data; name=\"name\"\r\n\r\n\"John\"\r\n--XyZ--\r\n"
    /// );
    /// ```
    pub fn encode_multipart(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for (name, value) in self.iter() {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            out.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"",
                    escape_header_param(&normalize_newlines(name))
                )
                .as_bytes(),
            );
            match value {
                FormValue::Text(text) => {
                    out.extend_from_slice(b"\r\n\r\n");
                    out.extend_from_slice(normalize_newlines(text).as_bytes());
                }
                FormValue::File(file) => {
                    out.extend_from_slice(
                        format!(
                            "; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                            escape_header_param(&file.filename),
                            file.content_type
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(&file.bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }
}
