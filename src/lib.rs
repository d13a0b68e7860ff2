//! # unhwp
//!
//! Text extraction for HWP word-processor documents.
//!
//! Both format generations are supported: the legacy HWP 3.x binary layout
//! and the HWP 5.x compound-file format. Documents decode into paragraphs of
//! text spans, which are then grouped into fixed-size pages.
//!
//! ## Quick Start
//!
//! ```no_run
//! use unhwp::{parse_file, render};
//!
//! fn main() -> unhwp::Result<()> {
//!     let doc = parse_file("document.hwp")?;
//!     println!("{} pages", doc.page_count());
//!
//!     let options = render::RenderOptions::default();
//!     println!("{}", render::to_text(&doc, &options)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **HWP 3.x**: recursive paragraph grammar with tables, captions, text
//!   boxes and footnotes flattened in document order
//! - **HWP 5.x**: tag-record sections, preview text and summary bytes
//! - **Diagnostics**: unsupported content is reported, never fatal
//! - **Export**: plain text (with optional cleanup) and JSON

pub mod codec;
pub mod container;
pub mod detect;
pub mod error;
pub mod model;
pub mod parser;
pub mod render;

pub use codec::{JohabCodec, LegacyCodec};
pub use container::{MemorySource, StreamSource};
#[cfg(feature = "compound-file")]
pub use container::CompoundFileSource;
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_hwp, is_hwp_bytes, HwpFormat};
pub use error::{Error, Result};
pub use model::{Document, Metadata, Page, Paragraph, Span};
pub use parser::{
    Diagnostic, DiagnosticSink, ErrorMode, HwpParser, LogSink, PageLayout, ParseOptions,
};
pub use render::{CleanupOptions, CleanupPreset, JsonFormat, RenderOptions};

use std::io::Read;
use std::path::Path;

/// Parse an HWP file and return a structured document.
///
/// # Example
///
/// ```no_run
/// use unhwp::parse_file;
///
/// let doc = parse_file("document.hwp").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = HwpParser::open(path)?;
    parser.parse()
}

/// Parse an HWP file with custom options.
///
/// # Example
///
/// ```no_run
/// use unhwp::{parse_file_with_options, ParseOptions};
///
/// let options = ParseOptions::new().lenient().with_max_nesting_depth(16);
/// let doc = parse_file_with_options("document.hwp", options).unwrap();
/// ```
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = HwpParser::open_with_options(path, options)?;
    parser.parse()
}

/// Parse an HWP document from bytes.
pub fn parse_bytes(data: &[u8]) -> Result<Document> {
    let parser = HwpParser::from_bytes(data)?;
    parser.parse()
}

/// Parse an HWP document from bytes with custom options.
pub fn parse_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Document> {
    let parser = HwpParser::from_bytes_with_options(data, options)?;
    parser.parse()
}

/// Parse an HWP document from a reader.
///
/// # Example
///
/// ```no_run
/// use unhwp::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("document.hwp").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let parser = HwpParser::from_reader(reader)?;
    parser.parse()
}

/// Parse an HWP 5.x document from any stream source.
///
/// # Example
///
/// ```no_run
/// use unhwp::{parse_source, MemorySource, ParseOptions};
///
/// let file_header = std::fs::read("FileHeader").unwrap();
/// let doc_info = std::fs::read("DocInfo").unwrap();
/// let section = std::fs::read("Section0").unwrap();
/// let source = MemorySource::new()
///     .with_stream("FileHeader", file_header)
///     .with_stream("DocInfo", doc_info)
///     .with_section(0, section);
/// let doc = parse_source(source, ParseOptions::default()).unwrap();
/// ```
pub fn parse_source<S: StreamSource>(source: S, options: ParseOptions) -> Result<Document> {
    let mut collector = parser::Collector::default();
    let mut document = parser::Hwp5Parser::new(source, options).parse(&mut collector)?;
    document.diagnostics = collector.diagnostics;
    Ok(document)
}

/// Extract plain text from an HWP file.
///
/// # Example
///
/// ```no_run
/// use unhwp::extract_text;
///
/// let text = extract_text("document.hwp").unwrap();
/// println!("{}", text);
/// ```
pub fn extract_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let doc = parse_file(path)?;
    Ok(doc.plain_text())
}

/// Convert an HWP file to plain text with render options.
pub fn to_text<P: AsRef<Path>>(path: P, options: &RenderOptions) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_text(&doc, options)
}

/// Convert an HWP file to JSON.
///
/// # Example
///
/// ```no_run
/// use unhwp::{to_json, JsonFormat};
///
/// let json = to_json("document.hwp", JsonFormat::Pretty).unwrap();
/// std::fs::write("output.json", json).unwrap();
/// ```
pub fn to_json<P: AsRef<Path>>(path: P, format: JsonFormat) -> Result<String> {
    let doc = parse_file(path)?;
    render::to_json(&doc, format)
}

/// Builder for parsing and converting HWP documents.
///
/// # Example
///
/// ```no_run
/// use unhwp::{CleanupPreset, Unhwp};
///
/// let text = Unhwp::new()
///     .lenient()
///     .with_cleanup(CleanupPreset::Standard)
///     .parse("document.hwp")?
///     .to_text()?;
/// # Ok::<(), unhwp::Error>(())
/// ```
pub struct Unhwp {
    parse_options: ParseOptions,
    render_options: RenderOptions,
}

impl Unhwp {
    /// Create a new Unhwp builder.
    pub fn new() -> Self {
        Self {
            parse_options: ParseOptions::default(),
            render_options: RenderOptions::default(),
        }
    }

    /// Enable lenient parsing mode.
    pub fn lenient(mut self) -> Self {
        self.parse_options = self.parse_options.lenient();
        self
    }

    /// Set the page layout used for pagination.
    pub fn with_layout(mut self, layout: PageLayout) -> Self {
        self.parse_options = self.parse_options.with_layout(layout);
        self
    }

    /// Set the nesting limit for HWP 3.x paragraph lists.
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.parse_options = self.parse_options.with_max_nesting_depth(depth);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup(mut self, preset: CleanupPreset) -> Self {
        self.render_options = self.render_options.with_cleanup_preset(preset);
        self
    }

    /// Separate pages with form feeds in text output.
    pub fn with_page_breaks(mut self) -> Self {
        self.render_options = self.render_options.with_page_breaks(true);
        self
    }

    /// Parse an HWP file and return a result wrapper.
    pub fn parse<P: AsRef<Path>>(self, path: P) -> Result<UnhwpResult> {
        let parser = HwpParser::open_with_options(path, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnhwpResult {
            document,
            render_options: self.render_options,
        })
    }

    /// Parse an HWP document from bytes.
    pub fn parse_bytes(self, data: &[u8]) -> Result<UnhwpResult> {
        let parser = HwpParser::from_bytes_with_options(data, self.parse_options)?;
        let document = parser.parse()?;
        Ok(UnhwpResult {
            document,
            render_options: self.render_options,
        })
    }
}

impl Default for Unhwp {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of parsing an HWP document.
pub struct UnhwpResult {
    /// The parsed document
    pub document: Document,
    render_options: RenderOptions,
}

impl UnhwpResult {
    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Get plain text without cleanup.
    pub fn plain_text(&self) -> String {
        self.document.plain_text()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
