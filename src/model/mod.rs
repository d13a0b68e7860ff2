//! Document model types for decoded HWP content.
//!
//! A [`Document`] owns its paragraphs, each paragraph owns its spans, and
//! pages hold copies of the spans placed on them. The model is built by the
//! parsers and then paginated once.

mod document;
mod page;
mod paragraph;

pub use document::{Document, Metadata};
pub use page::{Page, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH};
pub use paragraph::{Paragraph, Span};
