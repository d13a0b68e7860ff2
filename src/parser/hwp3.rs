//! HWP 3.x parser.
//!
//! HWP 3.x is one monolithic stream with fixed-offset blocks:
//!
//! ```text
//! signature (30) | doc info (128) | summary (1008) | info block (n)
//! | font names | styles | paragraph list | ...
//! ```
//!
//! Everything after the info block may be raw-deflate compressed. The body
//! is a recursive grammar:
//!
//! ```text
//! <paragraph list> ::= <paragraph>+ <empty paragraph>
//! ```
//!
//! Tables, pictures, text boxes and footnotes embed further paragraph lists
//! inside a paragraph's character stream.

use std::io::Read;

use super::cursor::StreamCursor;
use super::diagnostic::{Diagnostic, DiagnosticSink};
use super::options::ParseOptions;
use super::paginate::Paginator;
use crate::codec::LegacyCodec;
use crate::detect::{HwpFormat, V3_SIGNATURE_LEN};
use crate::error::{Error, Result};
use crate::model::{Document, Metadata, Paragraph, Span};

const DOC_INFO_CRYPT_OFFSET: u64 = 96;
const DOC_INFO_COMPRESS_GAP: u64 = 26;

const SUMMARY_FIELD_LEN: u16 = 112;
const SUMMARY_FIELD_COUNT: usize = 9;

const FONT_CLASSES: usize = 7;
const FONT_NAME_LEN: u64 = 40;
const STYLE_LEN: u64 = 20 + 31 + 187;

const PARA_HEADER_TAIL: u64 = 1 + 4 + 1 + 31;
const PARA_SHAPE_LEN: u64 = 187;
const LINE_SEG_LEN: u64 = 14;
const CHAR_SHAPE_LEN: u64 = 31;

const CONTROL_HEADER_LEN: u64 = 6;
const TABLE_HEADER_LEN: u64 = 80;
const TABLE_CELL_LEN: u64 = 27;
const PICTURE_HEADER_LEN: u64 = 344;

/// Fields of the 128-byte doc info block used by later stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hwp3Header {
    /// Password protected
    pub encrypted: bool,
    /// Body after the info block is raw-deflate compressed
    pub compressed: bool,
    /// Sub-revision
    pub revision: u8,
    /// Bytes of the info block following the summary
    pub info_block_len: u16,
}

impl Hwp3Header {
    /// Version string, e.g. "3.0.0.2".
    pub fn version(&self) -> String {
        format!("3.0.0.{}", self.revision)
    }
}

/// A code in a paragraph's character stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Control {
    /// Object the format leaves undocumented (field codes etc.)
    Unsupported,
    Tab,
    Table,
    /// Picture or other size-prefixed drawing object
    Picture,
    /// End of the paragraph's characters
    LineEnd,
    TextBox,
    /// Footnote or endnote
    Note,
    /// Bookmarks, date codes and similar markers
    Marker,
    /// Overlapped characters
    Overlap,
    /// Hyphen and reserved two-unit codes
    Hyphen,
    /// Outline number
    Outline,
    /// Fixed-width and bound spaces
    Space,
    Char(u16),
    Unknown(u16),
}

impl Control {
    fn from_code(code: u16) -> Self {
        match code {
            6 => Control::Unsupported,
            9 => Control::Tab,
            10 => Control::Table,
            11 => Control::Picture,
            13 => Control::LineEnd,
            16 => Control::TextBox,
            17 => Control::Note,
            18..=21 => Control::Marker,
            23 => Control::Overlap,
            24 | 25 => Control::Hyphen,
            28 => Control::Outline,
            30 | 31 => Control::Space,
            0x20..=0xFFFF => Control::Char(code),
            _ => Control::Unknown(code),
        }
    }

    /// Extra character units the control accounts for.
    fn extra_units(self) -> u32 {
        match self {
            Control::Unsupported
            | Control::Tab
            | Control::Table
            | Control::Picture
            | Control::TextBox
            | Control::Note
            | Control::Marker => 3,
            Control::Overlap => 4,
            Control::Hyphen => 2,
            Control::Outline => 31,
            Control::Space => 1,
            Control::LineEnd | Control::Char(_) | Control::Unknown(_) => 0,
        }
    }
}

/// HWP 3.x document parser.
pub struct Hwp3Parser<'a> {
    cursor: StreamCursor<Box<dyn Read + 'a>>,
    codec: &'a dyn LegacyCodec,
    options: ParseOptions,
}

impl<'a> Hwp3Parser<'a> {
    /// Create a parser over the whole file stream, starting at the signature.
    pub fn new<R: Read + 'a>(reader: R, codec: &'a dyn LegacyCodec, options: ParseOptions) -> Self {
        Self {
            cursor: StreamCursor::new(Box::new(reader)),
            codec,
            options,
        }
    }

    /// Parse the document and paginate it.
    pub fn parse(self, sink: &mut dyn DiagnosticSink) -> Result<Document> {
        let Hwp3Parser {
            mut cursor,
            codec,
            options,
        } = self;

        cursor.skip(V3_SIGNATURE_LEN as u64)?;
        let header = read_doc_info(&mut cursor)?;
        if header.encrypted {
            return Err(Error::Encrypted);
        }
        log::debug!(
            "HWP {} (compressed: {}, info block: {} bytes)",
            header.version(),
            header.compressed,
            header.info_block_len
        );

        let mut metadata = Metadata::with_version(HwpFormat::V3, header.version());
        metadata.compressed = header.compressed;
        metadata.section_count = 1;
        read_summary(&mut cursor, codec, &mut metadata)?;

        cursor.skip(u64::from(header.info_block_len))?;
        if header.compressed {
            cursor = cursor.inflate();
        }

        skip_font_names(&mut cursor)?;
        skip_styles(&mut cursor)?;

        let mut grammar = Grammar {
            cursor,
            codec,
            sink,
            max_depth: options.max_nesting_depth,
            paragraphs: Vec::new(),
        };
        grammar.parse_paragraph_list(0)?;
        let paragraphs = grammar.paragraphs;
        log::debug!("decoded {} paragraphs", paragraphs.len());

        let pages = Paginator::new(options.layout).paginate(&paragraphs);
        Ok(Document {
            metadata,
            paragraphs,
            pages,
            ..Document::default()
        })
    }
}

fn read_doc_info<R: Read>(cursor: &mut StreamCursor<R>) -> Result<Hwp3Header> {
    cursor.skip(DOC_INFO_CRYPT_OFFSET)?;
    let crypt = cursor.read_u16()?;
    cursor.skip(DOC_INFO_COMPRESS_GAP)?;
    let compress = cursor.read_u8()?;
    let revision = cursor.read_u8()?;
    let info_block_len = cursor.read_u16()?;
    Ok(Hwp3Header {
        encrypted: crypt != 0,
        compressed: compress != 0,
        revision,
        info_block_len,
    })
}

/// Decode one 112-byte summary field.
///
/// Stops at the first unmapped code (including the NUL terminator) and
/// skips the rest of the field.
fn read_summary_field<R: Read>(
    cursor: &mut StreamCursor<R>,
    codec: &dyn LegacyCodec,
) -> Result<String> {
    let mut text = String::new();
    let mut count = 0u16;
    while count < SUMMARY_FIELD_LEN {
        let code = cursor.read_u16()?;
        count += 2;
        match codec.lookup(code) {
            Some(s) => text.push_str(&s),
            None => {
                cursor.skip(u64::from(SUMMARY_FIELD_LEN - count))?;
                break;
            }
        }
    }
    Ok(text)
}

fn read_summary<R: Read>(
    cursor: &mut StreamCursor<R>,
    codec: &dyn LegacyCodec,
    metadata: &mut Metadata,
) -> Result<()> {
    let mut fields = Vec::with_capacity(SUMMARY_FIELD_COUNT);
    for _ in 0..SUMMARY_FIELD_COUNT {
        fields.push(read_summary_field(cursor, codec)?);
    }

    let non_empty = |s: &String| (!s.is_empty()).then(|| s.clone());
    metadata.title = non_empty(&fields[0]);
    metadata.subject = non_empty(&fields[1]);
    metadata.author = non_empty(&fields[2]);
    metadata.date = non_empty(&fields[3]);
    metadata.keywords = fields[4..6].iter().filter_map(non_empty).collect();
    metadata.comments = fields[6..9].iter().filter_map(non_empty).collect();
    Ok(())
}

fn skip_font_names<R: Read>(cursor: &mut StreamCursor<R>) -> Result<()> {
    for _ in 0..FONT_CLASSES {
        let n_fonts = cursor.read_u16()?;
        cursor.skip(FONT_NAME_LEN * u64::from(n_fonts))?;
    }
    Ok(())
}

fn skip_styles<R: Read>(cursor: &mut StreamCursor<R>) -> Result<()> {
    let n_styles = cursor.read_u16()?;
    cursor.skip(STYLE_LEN * u64::from(n_styles))
}

/// Recursive-descent state for the paragraph grammar.
struct Grammar<'g, R> {
    cursor: StreamCursor<R>,
    codec: &'g dyn LegacyCodec,
    sink: &'g mut dyn DiagnosticSink,
    max_depth: usize,
    paragraphs: Vec<Paragraph>,
}

impl<R: Read> Grammar<'_, R> {
    /// `<paragraph>+ <empty paragraph>`
    fn parse_paragraph_list(&mut self, depth: usize) -> Result<()> {
        if depth > self.max_depth {
            return Err(Error::NestingTooDeep { depth });
        }
        while self.parse_paragraph(depth)? {}
        Ok(())
    }

    /// Parse one paragraph. Returns `false` for the empty terminator.
    fn parse_paragraph(&mut self, depth: usize) -> Result<bool> {
        let prev_paragraph_shape = self.cursor.read_u8()?;
        let n_chars = self.cursor.read_u16()?;
        let n_lines = self.cursor.read_u16()?;
        let char_shape_included = self.cursor.read_u8()?;
        self.cursor.skip(PARA_HEADER_TAIL)?;

        if prev_paragraph_shape == 0 && n_chars > 0 {
            self.cursor.skip(PARA_SHAPE_LEN)?;
        }
        if n_chars == 0 {
            return Ok(false);
        }

        self.cursor.skip(u64::from(n_lines) * LINE_SEG_LEN)?;

        if char_shape_included != 0 {
            for _ in 0..n_chars {
                if self.cursor.read_u8()? != 1 {
                    self.cursor.skip(CHAR_SHAPE_LEN)?;
                }
            }
        }

        // nested lists land after this slot
        let slot = self.paragraphs.len();
        self.paragraphs.push(Paragraph::new());
        let text = self.parse_chars(u32::from(n_chars), depth)?;
        self.paragraphs[slot].add_span(Span::new(text));
        Ok(true)
    }

    fn parse_chars(&mut self, n_chars: u32, depth: usize) -> Result<String> {
        let mut text = String::new();
        let mut n_read = 0u32;

        while n_read < n_chars {
            let code = self.cursor.read_u16()?;
            n_read += 1;

            let control = Control::from_code(code);
            n_read += control.extra_units();

            match control {
                Control::Unsupported => {
                    self.cursor.skip(CONTROL_HEADER_LEN + 34)?;
                }
                Control::Tab => {
                    self.cursor.skip(CONTROL_HEADER_LEN)?;
                    text.push('\t');
                }
                Control::Table => self.parse_table(depth)?,
                Control::Picture => {
                    self.cursor.skip(CONTROL_HEADER_LEN)?;
                    let len = self.cursor.read_u32()?;
                    self.cursor.skip(PICTURE_HEADER_LEN)?;
                    self.cursor.skip(u64::from(len))?;
                    // caption
                    self.parse_paragraph_list(depth + 1)?;
                }
                Control::LineEnd => text.push('\n'),
                Control::TextBox => {
                    self.cursor.skip(CONTROL_HEADER_LEN + 10)?;
                    self.parse_paragraph_list(depth + 1)?;
                }
                Control::Note => {
                    self.cursor.skip(CONTROL_HEADER_LEN + 14)?;
                    self.parse_paragraph_list(depth + 1)?;
                }
                Control::Marker => self.cursor.skip(CONTROL_HEADER_LEN)?,
                Control::Overlap => self.cursor.skip(8)?,
                Control::Hyphen => self.cursor.skip(4)?,
                Control::Outline => self.cursor.skip(62)?,
                Control::Space => self.cursor.skip(2)?,
                Control::Char(code) => match self.codec.lookup(code) {
                    Some(s) => text.push_str(&s),
                    None => self.sink.report(Diagnostic::UnmappedCharacter { code }),
                },
                Control::Unknown(code) => self.sink.report(Diagnostic::UnrecognizedControlCode {
                    code,
                    offset: self.cursor.position(),
                }),
            }
        }
        Ok(text)
    }

    /// Table header, one paragraph list per cell, then the caption list.
    fn parse_table(&mut self, depth: usize) -> Result<()> {
        self.cursor.skip(CONTROL_HEADER_LEN + TABLE_HEADER_LEN)?;
        let n_cells = self.cursor.read_u16()?;
        self.cursor.skip(2)?;
        self.cursor.skip(TABLE_CELL_LEN * u64::from(n_cells))?;

        for _ in 0..n_cells {
            self.parse_paragraph_list(depth + 1)?;
        }
        self.parse_paragraph_list(depth + 1)
    }
}
