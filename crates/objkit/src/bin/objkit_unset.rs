//! `objkit-unset` — delete keys at dot paths in a JSON document.
//!
//! Usage:
//!   objkit-unset '<path>' ['<path>' ...]
//!
//! The document is read from stdin and printed back after the deletions.

use objkit::cli::{emit, init_logging, read_stdin, remove_paths};

fn main() {
    init_logging();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("First argument must be a dot path.");
        std::process::exit(1);
    }

    emit(read_stdin().and_then(|doc| remove_paths(doc.trim(), &paths)));
}
