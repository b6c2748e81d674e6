//! `objkit-clone` — deep-clone a JSON document.
//!
//! Usage:
//!   objkit-clone < document.json

use objkit::cli::{clone_document, emit, init_logging, read_stdin};

fn main() {
    init_logging();
    emit(read_stdin().and_then(|doc| clone_document(doc.trim())));
}
