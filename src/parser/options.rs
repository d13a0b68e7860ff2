//! Parsing options and configuration.

use super::paginate::PageLayout;

/// Default limit for nested paragraph lists (tables in cells in tables...).
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 32;

/// Options for parsing HWP documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Deepest nested paragraph list accepted by the v3 grammar
    pub max_nesting_depth: usize,

    /// Page geometry used by pagination
    pub layout: PageLayout,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (optional streams that fail to decode are skipped).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Fail on any decode error (the default).
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Set the nesting limit for paragraph lists.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the page layout used for pagination.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.layout = layout;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            layout: PageLayout::default(),
        }
    }
}

/// Error handling mode during parsing.
///
/// Structural errors (truncation, encryption, excessive nesting) are fatal
/// in both modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Skip undecodable optional streams (preview text) and continue
    Lenient,
}
