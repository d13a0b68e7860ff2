//! Format-dispatching HWP parser.

use std::io::Read;
use std::path::Path;

use super::diagnostic::{Collector, DiagnosticSink};
use super::hwp3::Hwp3Parser;
use super::options::ParseOptions;
use crate::codec::{JohabCodec, LegacyCodec};
use crate::detect::{detect_format_from_bytes, HwpFormat};
use crate::error::Result;
use crate::model::Document;

/// HWP document parser.
///
/// Detects the format generation up front; [`parse`](Self::parse) runs the
/// matching parser and paginates once.
pub struct HwpParser {
    data: Vec<u8>,
    format: HwpFormat,
    options: ParseOptions,
    codec: Box<dyn LegacyCodec>,
}

impl HwpParser {
    /// Open an HWP file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open an HWP file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_vec(data, options)
    }

    /// Parse an HWP document from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse an HWP document from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        Self::from_vec(data.to_vec(), options)
    }

    /// Parse an HWP document from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Parse an HWP document from a reader with custom options.
    pub fn from_reader_with_options<R: Read>(mut reader: R, options: ParseOptions) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_vec(data, options)
    }

    fn from_vec(data: Vec<u8>, options: ParseOptions) -> Result<Self> {
        let format = detect_format_from_bytes(&data)?;
        Ok(Self {
            data,
            format,
            options,
            codec: Box::new(JohabCodec),
        })
    }

    /// Replace the legacy character codec used for HWP 3.x text.
    pub fn with_codec(mut self, codec: impl LegacyCodec + 'static) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Detected format generation.
    pub fn format(&self) -> HwpFormat {
        self.format
    }

    /// Parse the document.
    ///
    /// Diagnostics are logged and collected into [`Document::diagnostics`].
    pub fn parse(&self) -> Result<Document> {
        let mut collector = Collector::default();
        let mut document = self.parse_with_sink(&mut collector)?;
        document.diagnostics = collector.diagnostics;
        Ok(document)
    }

    /// Parse the document, sending diagnostics to `sink` only.
    pub fn parse_with_sink(&self, sink: &mut dyn DiagnosticSink) -> Result<Document> {
        log::debug!("parsing {} ({} bytes)", self.format, self.data.len());
        match self.format {
            HwpFormat::V3 => {
                Hwp3Parser::new(&self.data[..], self.codec.as_ref(), self.options.clone())
                    .parse(sink)
            }
            HwpFormat::V5 => self.parse_compound(sink),
        }
    }

    #[cfg(feature = "compound-file")]
    fn parse_compound(&self, sink: &mut dyn DiagnosticSink) -> Result<Document> {
        use super::hwp5::Hwp5Parser;
        use crate::container::CompoundFileSource;

        let source = CompoundFileSource::open(std::io::Cursor::new(&self.data[..]))?;
        Hwp5Parser::new(source, self.options.clone()).parse(sink)
    }

    #[cfg(not(feature = "compound-file"))]
    fn parse_compound(&self, _sink: &mut dyn DiagnosticSink) -> Result<Document> {
        Err(crate::error::Error::UnsupportedVersion(
            "HWP 5.x requires the `compound-file` feature".to_string(),
        ))
    }
}
