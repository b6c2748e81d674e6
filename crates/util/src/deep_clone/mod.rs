//! Deep cloning of value graphs.
//!
//! Handles every value kind, including cycles and shared sub-structure,
//! maps, sets, binary buffers and typed arrays.

mod clone;
mod registry;

pub use clone::{deep_clone, deep_clone_with, CloneOptions};
pub use registry::CloneRegistry;
