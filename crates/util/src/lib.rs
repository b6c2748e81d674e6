//! objkit-util - Utility functions over objkit value graphs
//!
//! Deep cloning, object merging and form payload encoding.

pub mod deep_clone;
pub mod form_data;
pub mod merge;

// Re-exports for convenience
pub use deep_clone::{deep_clone, deep_clone_with, CloneOptions, CloneRegistry};
pub use form_data::{
    content_type, generate_boundary, to_form_payload, BoundaryGenerator, FileBlob, FormPayload,
    FormValue, Media, MediaFiles,
};
pub use merge::{merge_overwrite, merge_overwrite_existing, MergeError};
