//! HWP 5.x parser.
//!
//! A v5 document is a compound file. `FileHeader` carries the version and
//! flags, `DocInfo` and every `BodyText/Section{i}` are tag-record streams
//! (raw-deflate compressed when the header says so), `PrvText` is UTF-16LE
//! preview text and `\u{5}HwpSummaryInformation` is an OLE property set.

use std::io::Read;

use super::cursor::{inflate_stream, StreamCursor};
use super::diagnostic::{Diagnostic, DiagnosticSink};
use super::options::{ErrorMode, ParseOptions};
use super::paginate::Paginator;
use super::record::{RecordReader, Tag};
use super::text::decode_para_text;
use crate::container::{self, StreamSource};
use crate::detect::HwpFormat;
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Paragraph, Span};

/// Signature at the start of the `FileHeader` stream.
pub const SIGNATURE: &[u8] = b"HWP Document File";

const SIGNATURE_FIELD_LEN: usize = 32;
const FILE_HEADER_MIN_LEN: usize = SIGNATURE_FIELD_LEN + 8;

const FLAG_COMPRESSED: u32 = 1 << 0;
const FLAG_PASSWORD: u32 = 1 << 1;
const FLAG_DISTRIBUTION: u32 = 1 << 2;

const SUPPORTED_MAJOR: u8 = 5;

/// Decoded `FileHeader` stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hwp5Header {
    /// Packed `MM nn PP rr` version
    pub version: u32,
    /// Property flags
    pub flags: u32,
}

impl Hwp5Header {
    /// Parse the `FileHeader` stream.
    pub fn parse(data: &[u8]) -> Result<Self> {
        if data.len() < FILE_HEADER_MIN_LEN {
            return Err(Error::TruncatedStream {
                offset: data.len() as u64,
                needed: (FILE_HEADER_MIN_LEN - data.len()) as u64,
            });
        }
        if !data.starts_with(SIGNATURE) {
            return Err(Error::UnknownFormat);
        }

        let mut cursor = StreamCursor::from_slice(&data[SIGNATURE_FIELD_LEN..]);
        let version = cursor.read_u32()?;
        let flags = cursor.read_u32()?;
        Ok(Self { version, flags })
    }

    /// Version components, major first.
    pub fn version_parts(&self) -> [u8; 4] {
        self.version.to_be_bytes()
    }

    /// Version string, e.g. "5.0.3.4".
    pub fn version_string(&self) -> String {
        let [major, minor, build, revision] = self.version_parts();
        format!("{}.{}.{}.{}", major, minor, build, revision)
    }

    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    /// Password protected or distribution-locked.
    pub fn is_encrypted(&self) -> bool {
        self.flags & (FLAG_PASSWORD | FLAG_DISTRIBUTION) != 0
    }
}

/// HWP 5.x document parser over a stream source.
pub struct Hwp5Parser<S> {
    source: S,
    options: ParseOptions,
}

impl<S: StreamSource> Hwp5Parser<S> {
    pub fn new(source: S, options: ParseOptions) -> Self {
        Self { source, options }
    }

    /// Parse every stream and paginate the result.
    pub fn parse(mut self, sink: &mut dyn DiagnosticSink) -> Result<Document> {
        let header = self.read_header()?;
        log::debug!(
            "HWP {} (compressed: {}, flags: {:#x})",
            header.version_string(),
            header.is_compressed(),
            header.flags
        );
        if header.version_parts()[0] != SUPPORTED_MAJOR {
            return Err(Error::UnsupportedVersion(header.version_string()));
        }
        if header.is_encrypted() {
            return Err(Error::Encrypted);
        }
        let compressed = header.is_compressed();

        let sections = self.section_streams()?;
        let mut metadata = Metadata::with_version(HwpFormat::V5, header.version_string());
        metadata.compressed = compressed;
        metadata.section_count = sections.len();

        if let Some(declared) = self.scan_doc_info(compressed)? {
            if usize::from(declared) != sections.len() {
                log::warn!(
                    "DocInfo declares {} sections, container holds {}",
                    declared,
                    sections.len()
                );
                sink.report(Diagnostic::SectionCountMismatch {
                    declared,
                    found: sections.len(),
                });
            }
        }

        let mut paragraphs = Vec::new();
        for (index, data) in sections.iter().enumerate() {
            let mut records = record_stream(data, compressed);
            parse_section(&mut records, &mut paragraphs, sink)?;
            log::debug!("section {}: {} paragraphs so far", index, paragraphs.len());
        }

        let preview_text = self.read_preview_text()?;
        let summary_info = self.source.read_stream(container::SUMMARY_INFORMATION)?;

        let pages = Paginator::new(self.options.layout).paginate(&paragraphs);
        Ok(Document {
            metadata,
            paragraphs,
            pages,
            preview_text,
            summary_info,
            diagnostics: Vec::new(),
        })
    }

    fn read_header(&mut self) -> Result<Hwp5Header> {
        let data = self
            .source
            .read_stream(container::FILE_HEADER)?
            .ok_or_else(|| Error::MissingStream(container::FILE_HEADER.to_string()))?;
        Hwp5Header::parse(&data)
    }

    /// Raw section streams, `Section0` up to the first missing index.
    fn section_streams(&mut self) -> Result<Vec<Vec<u8>>> {
        let mut sections = Vec::new();
        while let Some(data) = self.source.read_stream(&container::section_path(sections.len()))? {
            sections.push(data);
        }
        Ok(sections)
    }

    /// Pull every DocInfo record, returning the declared section count.
    fn scan_doc_info(&mut self, compressed: bool) -> Result<Option<u16>> {
        let data = self
            .source
            .read_stream(container::DOC_INFO)?
            .ok_or_else(|| Error::MissingStream(container::DOC_INFO.to_string()))?;

        let mut records = record_stream(&data, compressed);
        let mut declared = None;
        let mut count = 0usize;
        while records.pull()? {
            count += 1;
            if records.tag() == Tag::DocumentProperties && declared.is_none() {
                declared = records
                    .payload()
                    .get(..2)
                    .map(|b| u16::from_le_bytes([b[0], b[1]]));
            }
        }
        log::debug!("DocInfo: {} records", count);
        Ok(declared)
    }

    fn read_preview_text(&mut self) -> Result<Option<String>> {
        let Some(data) = self.source.read_stream(container::PREVIEW_TEXT)? else {
            return Ok(None);
        };
        match decode_utf16le(&data) {
            Ok(text) => Ok(Some(text)),
            Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                log::warn!("skipping preview text: {}", e);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

fn record_stream(data: &[u8], compressed: bool) -> RecordReader<Box<dyn Read + '_>> {
    let reader: Box<dyn Read + '_> = if compressed {
        Box::new(inflate_stream(data))
    } else {
        Box::new(data)
    };
    RecordReader::new(StreamCursor::new(reader))
}

/// Strict UTF-16LE decoding; trailing NULs are dropped.
fn decode_utf16le(data: &[u8]) -> Result<String> {
    if data.len() % 2 != 0 {
        return Err(Error::UnsupportedEncoding(format!(
            "odd UTF-16 byte length {}",
            data.len()
        )));
    }
    let units: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();
    let text = String::from_utf16(&units)
        .map_err(|e| Error::UnsupportedEncoding(format!("preview text: {}", e)))?;
    Ok(text.trim_end_matches('\0').to_string())
}

/// Assemble one section's records into paragraphs.
///
/// Levels restart at 0 for each section. A `PARA_HEADER` always opens a
/// paragraph; `PARA_TEXT` only yields a span when its level is deeper than
/// the previous record's.
pub fn parse_section<R: Read>(
    records: &mut RecordReader<R>,
    paragraphs: &mut Vec<Paragraph>,
    sink: &mut dyn DiagnosticSink,
) -> Result<()> {
    let mut prev_level = 0u16;

    while records.pull()? {
        let level = records.level();
        match records.tag() {
            Tag::ParaHeader => paragraphs.push(Paragraph::new()),
            Tag::ParaText => {
                if level > prev_level {
                    let text = decode_para_text(records.payload());
                    if paragraphs.is_empty() {
                        paragraphs.push(Paragraph::new());
                    }
                    if let Some(paragraph) = paragraphs.last_mut() {
                        paragraph.add_span(Span::new(text));
                    }
                }
            }
            Tag::ParaCharShape
            | Tag::ParaLineSeg
            | Tag::CtrlHeader
            | Tag::PageDef
            | Tag::FootnoteShape
            | Tag::PageBorderFill
            | Tag::ListHeader
            | Tag::EqEdit => {}
            tag => sink.report(Diagnostic::UnrecognizedTag {
                tag: tag.id(),
                name: tag.name().to_string(),
                level,
            }),
        }
        prev_level = level;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::record::encode_record;

    fn utf16(text: &str) -> Vec<u8> {
        text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
    }

    fn file_header(version: u32, flags: u32) -> Vec<u8> {
        let mut data = SIGNATURE.to_vec();
        data.resize(32, 0);
        data.extend_from_slice(&version.to_le_bytes());
        data.extend_from_slice(&flags.to_le_bytes());
        data.resize(256, 0);
        data
    }

    fn section(records: &[(Tag, u16, Vec<u8>)]) -> Vec<u8> {
        records
            .iter()
            .flat_map(|(tag, level, payload)| encode_record(tag.id(), *level, payload))
            .collect()
    }

    fn run(data: &[u8]) -> (Vec<Paragraph>, Vec<Diagnostic>) {
        let mut records = RecordReader::new(StreamCursor::from_slice(data));
        let mut paragraphs = Vec::new();
        let mut sink = Vec::new();
        parse_section(&mut records, &mut paragraphs, &mut sink).unwrap();
        (paragraphs, sink)
    }

    #[test]
    fn test_header_parse() {
        let header = Hwp5Header::parse(&file_header(0x0500_0304, 0b1)).unwrap();
        assert_eq!(header.version_string(), "5.0.3.4");
        assert!(header.is_compressed());
        assert!(!header.is_encrypted());

        assert!(Hwp5Header::parse(&file_header(0x0500_0000, 0b10))
            .unwrap()
            .is_encrypted());
        assert!(Hwp5Header::parse(&file_header(0x0500_0000, 0b100))
            .unwrap()
            .is_encrypted());
    }

    #[test]
    fn test_header_bad_signature() {
        let mut data = file_header(0x0500_0000, 0);
        data[0] = b'X';
        assert!(matches!(Hwp5Header::parse(&data), Err(Error::UnknownFormat)));
        assert!(Hwp5Header::parse(&data[..20]).unwrap_err().is_truncated());
    }

    #[test]
    fn test_paragraph_with_text() {
        let data = section(&[
            (Tag::ParaHeader, 0, vec![0; 22]),
            (Tag::ParaText, 1, utf16("AB")),
        ]);
        let (paragraphs, diagnostics) = run(&data);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].spans().len(), 1);
        assert_eq!(paragraphs[0].spans()[0].text(), "AB");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_text_at_same_level_is_dropped() {
        let data = section(&[
            (Tag::ParaHeader, 1, vec![]),
            (Tag::ParaText, 1, utf16("lost")),
        ]);
        let (paragraphs, _) = run(&data);
        assert_eq!(paragraphs.len(), 1);
        assert!(paragraphs[0].is_empty());
    }

    #[test]
    fn test_header_at_any_level_opens_paragraph() {
        let data = section(&[
            (Tag::ParaHeader, 0, vec![]),
            (Tag::ParaHeader, 2, vec![]),
            (Tag::ParaHeader, 1, vec![]),
            (Tag::ParaHeader, 1, vec![]),
        ]);
        let (paragraphs, _) = run(&data);
        assert_eq!(paragraphs.len(), 4);
    }

    #[test]
    fn test_text_without_header_opens_paragraph() {
        let data = section(&[(Tag::ParaText, 1, utf16("x"))]);
        let (paragraphs, _) = run(&data);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(paragraphs[0].plain_text(), "x");
    }

    #[test]
    fn test_no_op_and_unknown_tags() {
        let data = section(&[
            (Tag::ParaHeader, 0, vec![]),
            (Tag::ParaCharShape, 1, vec![0; 8]),
            (Tag::Table, 2, vec![0; 4]),
            (Tag::Unknown(0x3A0), 3, vec![]),
            (Tag::PageDef, 1, vec![0; 40]),
        ]);
        let (paragraphs, diagnostics) = run(&data);
        assert_eq!(paragraphs.len(), 1);
        assert_eq!(
            diagnostics,
            vec![
                Diagnostic::UnrecognizedTag {
                    tag: 0x4D,
                    name: "TABLE".to_string(),
                    level: 2,
                },
                Diagnostic::UnrecognizedTag {
                    tag: 0x3A0,
                    name: "UNKNOWN".to_string(),
                    level: 3,
                },
            ]
        );
    }

    #[test]
    fn test_truncated_section_fails() {
        let mut data = section(&[(Tag::ParaText, 1, utf16("abc"))]);
        data.pop();
        let mut records = RecordReader::new(StreamCursor::from_slice(&data));
        let mut paragraphs = Vec::new();
        let mut sink = Vec::new();
        assert!(parse_section(&mut records, &mut paragraphs, &mut sink)
            .unwrap_err()
            .is_truncated());
    }

    #[test]
    fn test_decode_utf16le() {
        assert_eq!(decode_utf16le(&utf16("미리보기\0\0")).unwrap(), "미리보기");
        assert!(matches!(
            decode_utf16le(&[0x41, 0x00, 0x42]),
            Err(Error::UnsupportedEncoding(_))
        ));
        assert!(matches!(
            decode_utf16le(&[0x3D, 0xD8, 0x41, 0x00]),
            Err(Error::UnsupportedEncoding(_))
        ));
    }
}
