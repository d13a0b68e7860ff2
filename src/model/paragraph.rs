//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

/// A paragraph of decoded text.
///
/// Spans keep the order in which the parser produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in the paragraph
    pub spans: Vec<Span>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self { spans: Vec::new() }
    }

    /// Create a paragraph holding a single span.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_span(Span::new(text));
        p
    }

    /// Append a span.
    pub fn add_span(&mut self, span: Span) {
        self.spans.push(span);
    }

    /// Spans in source order.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Get plain text content of the paragraph.
    pub fn plain_text(&self) -> String {
        self.spans.iter().map(|s| s.text.as_str()).collect()
    }

    /// Check if the paragraph has no spans.
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }
}

/// An immutable run of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    text: String,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The span text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length in characters (not bytes).
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
