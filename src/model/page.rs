//! Page-level types.

use super::Span;
use serde::{Deserialize, Serialize};

/// Default page width in points (A4).
pub const PAGE_WIDTH: f64 = 595.0;

/// Default page height in points (A4).
pub const PAGE_HEIGHT: f64 = 842.0;

/// Default vertical margin subtracted from the page height.
pub const PAGE_MARGIN: f64 = 80.0;

/// A single page produced by pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Page width in points
    pub width: f64,

    /// Page height in points
    pub height: f64,

    /// Vertical margin in points
    pub margin: f64,

    /// Spans placed on the page
    pub elements: Vec<Span>,
}

impl Page {
    /// Create a new page with the given dimensions.
    pub fn new(number: u32, width: f64, height: f64, margin: f64) -> Self {
        Self {
            number,
            width,
            height,
            margin,
            elements: Vec::new(),
        }
    }

    /// Create a new A4 page with the default margin.
    pub fn a4(number: u32) -> Self {
        Self::new(number, PAGE_WIDTH, PAGE_HEIGHT, PAGE_MARGIN)
    }

    /// Place a span on the page.
    pub fn add_span(&mut self, span: Span) {
        self.elements.push(span);
    }

    /// Height available for content.
    pub fn usable_height(&self) -> f64 {
        self.height - self.margin
    }

    /// Get plain text content of the page, one span per line.
    pub fn plain_text(&self) -> String {
        self.elements
            .iter()
            .map(|s| s.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page holds no spans.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get page dimensions as (width, height) tuple.
    pub fn dimensions(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::a4(1)
    }
}
