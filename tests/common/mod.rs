//! Synthetic HWP fixtures shared by the integration tests.

#![allow(dead_code)]

use std::io::Write;

use flate2::write::DeflateEncoder;
use flate2::Compression;
use unhwp::container::{self, MemorySource};
use unhwp::parser::{encode_record, Tag};

pub const V3_SIGNATURE: &[u8] = b"HWP Document File V3.00 \x1a\x01\x02\x03\x04\x05";

/// Raw-deflate `data`.
pub fn deflate(data: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// Little-endian code units.
pub fn units(codes: &[u16]) -> Vec<u8> {
    codes.iter().flat_map(|c| c.to_le_bytes()).collect()
}

/// UTF-16LE bytes.
pub fn utf16(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Builder for HWP 3.x files.
#[derive(Debug, Clone)]
pub struct V3Builder {
    encrypted: bool,
    compressed: bool,
    revision: u8,
    summary: Vec<Vec<u16>>,
    info_block: Vec<u8>,
    fonts: [u16; 7],
    styles: u16,
    body: Vec<u8>,
}

impl Default for V3Builder {
    fn default() -> Self {
        Self {
            encrypted: false,
            compressed: false,
            revision: 2,
            summary: vec![Vec::new(); 9],
            info_block: Vec::new(),
            fonts: [1; 7],
            styles: 1,
            body: Vec::new(),
        }
    }
}

impl V3Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn encrypted(mut self) -> Self {
        self.encrypted = true;
        self
    }

    pub fn compressed(mut self) -> Self {
        self.compressed = true;
        self
    }

    pub fn revision(mut self, revision: u8) -> Self {
        self.revision = revision;
        self
    }

    /// Set summary field `index` (0 title .. 8 last comment) to ASCII text.
    pub fn summary_field(mut self, index: usize, text: &str) -> Self {
        self.summary[index] = text.bytes().map(u16::from).collect();
        self
    }

    pub fn summary_codes(mut self, index: usize, codes: &[u16]) -> Self {
        self.summary[index] = codes.to_vec();
        self
    }

    pub fn info_block(mut self, data: &[u8]) -> Self {
        self.info_block = data.to_vec();
        self
    }

    pub fn fonts(mut self, counts: [u16; 7]) -> Self {
        self.fonts = counts;
        self
    }

    pub fn styles(mut self, count: u16) -> Self {
        self.styles = count;
        self
    }

    /// Append a paragraph with ASCII text, terminated by a line end.
    pub fn text_paragraph(self, text: &str) -> Self {
        let mut codes: Vec<u16> = text.bytes().map(u16::from).collect();
        codes.push(13);
        let n_chars = codes.len() as u16;
        self.raw_paragraph(n_chars, &units(&codes))
    }

    /// Append a paragraph header for `n_chars` followed by `stream`.
    pub fn raw_paragraph(mut self, n_chars: u16, stream: &[u8]) -> Self {
        self.body.extend(paragraph_header(n_chars));
        self.body.extend_from_slice(stream);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut out = V3_SIGNATURE.to_vec();
        assert_eq!(out.len(), 30);

        let mut doc_info = vec![0u8; 96];
        doc_info.extend_from_slice(&u16::from(self.encrypted).to_le_bytes());
        doc_info.extend_from_slice(&[0u8; 26]);
        doc_info.push(u8::from(self.compressed));
        doc_info.push(self.revision);
        doc_info.extend_from_slice(&(self.info_block.len() as u16).to_le_bytes());
        assert_eq!(doc_info.len(), 128);
        out.extend(doc_info);

        for field in &self.summary {
            let mut bytes = units(field);
            bytes.resize(112, 0);
            out.extend(bytes);
        }
        out.extend_from_slice(&self.info_block);

        let mut body = Vec::new();
        for &count in &self.fonts {
            body.extend_from_slice(&count.to_le_bytes());
            for i in 0..count {
                let mut name = format!("Font{}", i).into_bytes();
                name.resize(40, 0);
                body.extend(name);
            }
        }
        body.extend_from_slice(&self.styles.to_le_bytes());
        body.extend(std::iter::repeat(0x5Au8).take(238 * self.styles as usize));
        body.extend_from_slice(&self.body);
        body.extend(paragraph_header(0));

        if self.compressed {
            out.extend(deflate(&body));
        } else {
            out.extend(body);
        }
        out
    }
}

/// 43-byte paragraph header without shape records.
pub fn paragraph_header(n_chars: u16) -> Vec<u8> {
    let mut out = vec![1u8];
    out.extend_from_slice(&n_chars.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.push(0);
    out.extend_from_slice(&[0u8; 37]);
    out
}

/// One encoded record.
pub fn record(tag: Tag, level: u16, payload: &[u8]) -> Vec<u8> {
    encode_record(tag.id(), level, payload)
}

/// A section with a header at level 0 and text at level 1 per paragraph.
pub fn text_section(paragraphs: &[&str]) -> Vec<u8> {
    let mut out = Vec::new();
    for text in paragraphs {
        out.extend(record(Tag::ParaHeader, 0, &[0u8; 22]));
        out.extend(record(Tag::ParaText, 1, &utf16(text)));
        out.extend(record(Tag::ParaCharShape, 1, &[0u8; 8]));
        out.extend(record(Tag::ParaLineSeg, 1, &[0u8; 36]));
    }
    out
}

/// Builder for HWP 5.x stream sets.
#[derive(Debug, Clone)]
pub struct V5Builder {
    version: u32,
    flags: u32,
    declared_sections: Option<u16>,
    sections: Vec<Vec<u8>>,
    preview: Option<Vec<u8>>,
    summary: Option<Vec<u8>>,
}

impl Default for V5Builder {
    fn default() -> Self {
        Self {
            version: 0x0500_0304,
            flags: 0,
            declared_sections: None,
            sections: Vec::new(),
            preview: None,
            summary: None,
        }
    }
}

impl V5Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn flags(mut self, flags: u32) -> Self {
        self.flags = flags;
        self
    }

    pub fn compressed(self) -> Self {
        let flags = self.flags | 1;
        self.flags(flags)
    }

    /// Override the section count written to DocInfo.
    pub fn declared_sections(mut self, count: u16) -> Self {
        self.declared_sections = Some(count);
        self
    }

    pub fn section(mut self, records: Vec<u8>) -> Self {
        self.sections.push(records);
        self
    }

    pub fn preview(mut self, bytes: Vec<u8>) -> Self {
        self.preview = Some(bytes);
        self
    }

    pub fn summary(mut self, bytes: Vec<u8>) -> Self {
        self.summary = Some(bytes);
        self
    }

    pub fn file_header(&self) -> Vec<u8> {
        let mut data = b"HWP Document File".to_vec();
        data.resize(32, 0);
        data.extend_from_slice(&self.version.to_le_bytes());
        data.extend_from_slice(&self.flags.to_le_bytes());
        data.resize(256, 0);
        data
    }

    pub fn doc_info(&self) -> Vec<u8> {
        let declared = self
            .declared_sections
            .unwrap_or(self.sections.len() as u16);
        let mut properties = declared.to_le_bytes().to_vec();
        properties.resize(26, 0);

        let mut out = record(Tag::DocumentProperties, 0, &properties);
        out.extend(record(Tag::IdMappings, 0, &[0u8; 72]));
        out.extend(record(Tag::FaceName, 1, &utf16("바탕")));
        out
    }

    fn pack(&self, data: &[u8]) -> Vec<u8> {
        if self.flags & 1 != 0 {
            deflate(data)
        } else {
            data.to_vec()
        }
    }

    /// Named streams as they would sit in the container.
    pub fn streams(&self) -> Vec<(String, Vec<u8>)> {
        let mut streams = vec![
            (container::FILE_HEADER.to_string(), self.file_header()),
            (container::DOC_INFO.to_string(), self.pack(&self.doc_info())),
        ];
        for (i, section) in self.sections.iter().enumerate() {
            streams.push((container::section_path(i), self.pack(section)));
        }
        if let Some(preview) = &self.preview {
            streams.push((container::PREVIEW_TEXT.to_string(), preview.clone()));
        }
        if let Some(summary) = &self.summary {
            streams.push((container::SUMMARY_INFORMATION.to_string(), summary.clone()));
        }
        streams
    }

    pub fn source(&self) -> MemorySource {
        self.streams()
            .into_iter()
            .fold(MemorySource::new(), |source, (path, data)| {
                source.with_stream(path, data)
            })
    }

    /// Serialize into a compound file.
    #[cfg(feature = "compound-file")]
    pub fn compound_file(&self) -> Vec<u8> {
        use std::io::Cursor;

        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_storage("/BodyText").unwrap();
        for (path, data) in self.streams() {
            comp.create_stream(format!("/{}", path))
                .unwrap()
                .write_all(&data)
                .unwrap();
        }
        comp.flush().unwrap();
        comp.into_inner().into_inner()
    }
}
