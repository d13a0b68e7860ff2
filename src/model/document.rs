//! Document-level types.

use super::{Page, Paragraph};
use crate::detect::HwpFormat;
use crate::parser::Diagnostic;
use serde::{Deserialize, Serialize};

/// FMTID of the standard OLE SummaryInformation property set.
const SUMMARY_INFORMATION_FMTID: [u8; 16] = [
    0xe0, 0x85, 0x9f, 0xf2, 0xf9, 0x4f, 0x68, 0x10, 0xab, 0x91, 0x08, 0x00, 0x2b, 0x27, 0xb3, 0xd9,
];

/// Offset of the first section FMTID inside a property set stream.
const FMTID_OFFSET: usize = 28;

/// A decoded HWP document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (version, flags, summary fields)
    pub metadata: Metadata,

    /// Paragraphs in discovery order
    pub paragraphs: Vec<Paragraph>,

    /// Pages produced by pagination
    pub pages: Vec<Page>,

    /// Preview text stored by the authoring application (v5 only)
    pub preview_text: Option<String>,

    /// Raw summary-information property set (v5 only)
    #[serde(skip)]
    pub summary_info: Option<Vec<u8>>,

    /// Non-fatal anomalies reported while parsing
    pub diagnostics: Vec<Diagnostic>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Get a page by zero-based index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= self.page_count()`.
    pub fn page(&self, index: usize) -> &Page {
        &self.pages[index]
    }

    /// Get a page by zero-based index, if present.
    pub fn get_page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Get the number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Append a paragraph and return its index.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) -> usize {
        self.paragraphs.push(paragraph);
        self.paragraphs.len() - 1
    }

    /// Check if the document holds no text at all.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(Paragraph::is_empty)
    }

    /// Get plain text content of the entire document, one paragraph per line.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .filter(|p| !p.is_empty())
            .map(Paragraph::plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Summary bytes with the standard SummaryInformation FMTID patched in.
    ///
    /// HWP stores its own FMTID at offset 28; generic OLE property-set
    /// readers only accept the standard one.
    pub fn summary_property_set(&self) -> Option<Vec<u8>> {
        let raw = self.summary_info.as_ref()?;
        let mut buf = raw.clone();
        if buf.len() >= FMTID_OFFSET + SUMMARY_INFORMATION_FMTID.len() {
            buf[FMTID_OFFSET..FMTID_OFFSET + SUMMARY_INFORMATION_FMTID.len()]
                .copy_from_slice(&SUMMARY_INFORMATION_FMTID);
        }
        Some(buf)
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Format generation
    pub format: HwpFormat,

    /// Version string (e.g. "3.0.0.2" or "5.0.3.4")
    pub version: String,

    /// Whether the body is compressed
    pub compressed: bool,

    /// Number of body sections (1 for v3)
    pub section_count: usize,

    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Document author
    pub author: Option<String>,

    /// Free-form date field
    pub date: Option<String>,

    /// Keywords
    pub keywords: Vec<String>,

    /// Other comment fields
    pub comments: Vec<String>,
}

impl Metadata {
    /// Create new metadata for a format and version.
    pub fn with_version(format: HwpFormat, version: impl Into<String>) -> Self {
        Self {
            format,
            version: version.into(),
            ..Default::default()
        }
    }
}
