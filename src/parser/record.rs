//! Tag-record reader for HWP 5.x streams.
//!
//! Every DocInfo and BodyText stream is a flat sequence of records. Each
//! record starts with a little-endian `u32` header:
//!
//! | bits   | field |
//! |--------|-------|
//! | 0..10  | tag id |
//! | 10..20 | level |
//! | 20..32 | payload size (`0xFFF` = a `u32` size follows) |

use std::io::Read;

use super::cursor::StreamCursor;
use crate::error::Result;

const TAG_MASK: u32 = 0x3FF;
const LEVEL_SHIFT: u32 = 10;
const LEVEL_MASK: u32 = 0x3FF;
const SIZE_SHIFT: u32 = 20;
const EXTENDED_SIZE: u32 = 0xFFF;

macro_rules! tags {
    ($($variant:ident = $id:literal => $name:literal,)*) => {
        /// Record tag ids.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Tag {
            $($variant,)*
            /// Any id outside the known table
            Unknown(u16),
        }

        impl Tag {
            /// Map a raw id to a tag.
            pub fn from_id(id: u16) -> Self {
                match id {
                    $($id => Tag::$variant,)*
                    other => Tag::Unknown(other),
                }
            }

            /// Raw id of the tag.
            pub fn id(self) -> u16 {
                match self {
                    $(Tag::$variant => $id,)*
                    Tag::Unknown(id) => id,
                }
            }

            /// Tag name as used in the format documentation.
            pub fn name(self) -> &'static str {
                match self {
                    $(Tag::$variant => $name,)*
                    Tag::Unknown(_) => "UNKNOWN",
                }
            }
        }
    };
}

tags! {
    DocumentProperties = 0x10 => "DOCUMENT_PROPERTIES",
    IdMappings = 0x11 => "ID_MAPPINGS",
    BinData = 0x12 => "BIN_DATA",
    FaceName = 0x13 => "FACE_NAME",
    BorderFill = 0x14 => "BORDER_FILL",
    CharShape = 0x15 => "CHAR_SHAPE",
    TabDef = 0x16 => "TAB_DEF",
    Numbering = 0x17 => "NUMBERING",
    Bullet = 0x18 => "BULLET",
    ParaShape = 0x19 => "PARA_SHAPE",
    Style = 0x1A => "STYLE",
    DocData = 0x1B => "DOC_DATA",
    DistributeDocData = 0x1C => "DISTRIBUTE_DOC_DATA",
    CompatibleDocument = 0x1E => "COMPATIBLE_DOCUMENT",
    LayoutCompatibility = 0x1F => "LAYOUT_COMPATIBILITY",
    TrackChange = 0x20 => "TRACKCHANGE",
    ParaHeader = 0x42 => "PARA_HEADER",
    ParaText = 0x43 => "PARA_TEXT",
    ParaCharShape = 0x44 => "PARA_CHAR_SHAPE",
    ParaLineSeg = 0x45 => "PARA_LINE_SEG",
    ParaRangeTag = 0x46 => "PARA_RANGE_TAG",
    CtrlHeader = 0x47 => "CTRL_HEADER",
    ListHeader = 0x48 => "LIST_HEADER",
    PageDef = 0x49 => "PAGE_DEF",
    FootnoteShape = 0x4A => "FOOTNOTE_SHAPE",
    PageBorderFill = 0x4B => "PAGE_BORDER_FILL",
    ShapeComponent = 0x4C => "SHAPE_COMPONENT",
    Table = 0x4D => "TABLE",
    ShapeComponentLine = 0x4E => "SHAPE_COMPONENT_LINE",
    ShapeComponentRectangle = 0x4F => "SHAPE_COMPONENT_RECTANGLE",
    ShapeComponentEllipse = 0x50 => "SHAPE_COMPONENT_ELLIPSE",
    ShapeComponentArc = 0x51 => "SHAPE_COMPONENT_ARC",
    ShapeComponentPolygon = 0x52 => "SHAPE_COMPONENT_POLYGON",
    ShapeComponentCurve = 0x53 => "SHAPE_COMPONENT_CURVE",
    ShapeComponentOle = 0x54 => "SHAPE_COMPONENT_OLE",
    ShapeComponentPicture = 0x55 => "SHAPE_COMPONENT_PICTURE",
    ShapeComponentContainer = 0x56 => "SHAPE_COMPONENT_CONTAINER",
    CtrlData = 0x57 => "CTRL_DATA",
    EqEdit = 0x58 => "EQEDIT",
    ShapeComponentTextArt = 0x5A => "SHAPE_COMPONENT_TEXTART",
    FormObject = 0x5B => "FORM_OBJECT",
    MemoShape = 0x5C => "MEMO_SHAPE",
    MemoList = 0x5D => "MEMO_LIST",
    ChartData = 0x5F => "CHART_DATA",
}

/// One decoded record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Record tag
    pub tag: Tag,
    /// Nesting level
    pub level: u16,
    /// Record payload
    pub payload: Vec<u8>,
}

/// Pull-based record reader.
///
/// After [`pull`](Self::pull) returns `Ok(true)`, the current tag, level and
/// payload stay available until the next pull.
#[derive(Debug)]
pub struct RecordReader<R> {
    cursor: StreamCursor<R>,
    tag: Tag,
    level: u16,
    payload: Vec<u8>,
}

impl<R: Read> RecordReader<R> {
    /// Create a reader over a record stream.
    pub fn new(cursor: StreamCursor<R>) -> Self {
        Self {
            cursor,
            tag: Tag::Unknown(0),
            level: 0,
            payload: Vec::new(),
        }
    }

    /// Read the next record.
    ///
    /// Returns `Ok(false)` at a clean end of stream. A partial header or
    /// payload is [`Error::TruncatedStream`](crate::Error::TruncatedStream).
    pub fn pull(&mut self) -> Result<bool> {
        let mut header = [0u8; 4];
        if !self.cursor.try_fill(&mut header)? {
            return Ok(false);
        }
        let header = u32::from_le_bytes(header);

        let tag_id = (header & TAG_MASK) as u16;
        let level = ((header >> LEVEL_SHIFT) & LEVEL_MASK) as u16;
        let mut size = header >> SIZE_SHIFT;
        if size == EXTENDED_SIZE {
            size = self.cursor.read_u32()?;
        }

        self.payload = self.cursor.read_exact(size as usize)?;
        self.tag = Tag::from_id(tag_id);
        self.level = level;
        Ok(true)
    }

    pub fn tag(&self) -> Tag {
        self.tag
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Copy of the current record.
    pub fn record(&self) -> TagRecord {
        TagRecord {
            tag: self.tag,
            level: self.level,
            payload: self.payload.clone(),
        }
    }

    /// Bytes consumed from the stream so far.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<TagRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.pull() {
            Ok(true) => Some(Ok(self.record())),
            Ok(false) => None,
            Err(e) => Some(Err(e)),
        }
    }
}

/// Encode a record header and payload.
pub fn encode_record(tag: u16, level: u16, payload: &[u8]) -> Vec<u8> {
    let size = payload.len() as u32;
    let mut out = Vec::with_capacity(payload.len() + 8);
    let packed_size = if size >= EXTENDED_SIZE { EXTENDED_SIZE } else { size };
    let header = (u32::from(tag) & TAG_MASK)
        | ((u32::from(level) & LEVEL_MASK) << LEVEL_SHIFT)
        | (packed_size << SIZE_SHIFT);
    out.extend_from_slice(&header.to_le_bytes());
    if packed_size == EXTENDED_SIZE {
        out.extend_from_slice(&size.to_le_bytes());
    }
    out.extend_from_slice(payload);
    out
}
