//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Separator written between pages when rendering page by page.
pub const PAGE_BREAK: &str = "\n\u{c}\n";

/// Options for rendering document content.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Text cleanup options
    pub cleanup: Option<CleanupOptions>,

    /// Render from pages, with a form feed between them
    pub page_breaks: bool,

    /// Fall back to the stored preview text when the body is empty
    pub preview_fallback: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable cleanup with the given options.
    pub fn with_cleanup(mut self, options: CleanupOptions) -> Self {
        self.cleanup = Some(options);
        self
    }

    /// Enable cleanup with a preset.
    pub fn with_cleanup_preset(self, preset: CleanupPreset) -> Self {
        self.with_cleanup(CleanupOptions::from_preset(preset))
    }

    /// Disable cleanup.
    pub fn without_cleanup(mut self) -> Self {
        self.cleanup = None;
        self
    }

    /// Enable or disable page separators.
    pub fn with_page_breaks(mut self, enabled: bool) -> Self {
        self.page_breaks = enabled;
        self
    }

    /// Enable or disable the preview-text fallback.
    pub fn with_preview_fallback(mut self, enabled: bool) -> Self {
        self.preview_fallback = enabled;
        self
    }
}
