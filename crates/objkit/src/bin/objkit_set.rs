//! `objkit-set` — write a value at a dot path in a JSON document.
//!
//! Usage:
//!   objkit-set [--create] '<path>' '<value>'
//!
//! The document is read from stdin and printed back after the write. The
//! value is parsed as JSON, falling back to a plain string. `--create`
//! builds missing intermediate containers.

use objkit::cli::{assign_path, emit, init_logging, parse_value_arg, read_stdin};

fn main() {
    init_logging();

    let mut create = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--create" {
            create = true;
        } else {
            positional.push(arg);
        }
    }

    let (path, value) = match positional.as_slice() {
        [path, value] => (path.clone(), parse_value_arg(value)),
        _ => {
            eprintln!("Usage: objkit-set [--create] <path> <value>");
            std::process::exit(1);
        }
    };

    emit(read_stdin().and_then(|doc| assign_path(doc.trim(), &path, value, create)));
}
