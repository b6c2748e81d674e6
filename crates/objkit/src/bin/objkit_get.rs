//! `objkit-get` — read dot paths from a JSON document.
//!
//! Usage:
//!   objkit-get '<path>' ['<path>' ...]
//!
//! The document is read from stdin. With one path the value is printed; with
//! several, an array of values (`null` where nothing resolves).

use objkit::cli::{emit, init_logging, lookup_path, lookup_paths, read_stdin};

fn main() {
    init_logging();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        eprintln!("First argument must be a dot path.");
        std::process::exit(1);
    }

    emit(read_stdin().and_then(|doc| match paths.as_slice() {
        [path] => lookup_path(doc.trim(), path),
        many => lookup_paths(doc.trim(), many),
    }));
}
