//! Rendering module for converting documents to output formats.

mod cleanup;
mod json;
mod options;
mod text;

pub use cleanup::{CleanupOptions, CleanupPipeline, CleanupPreset};
pub use json::{to_json, JsonFormat};
pub use options::{RenderOptions, PAGE_BREAK};
pub use text::to_text;
