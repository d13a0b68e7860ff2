//! Named-stream access for HWP 5.x.
//!
//! A v5 document is an OLE compound file. The parser only needs "give me
//! the bytes of stream X", so the container sits behind [`StreamSource`]
//! and tests can feed streams from memory.

use std::collections::HashMap;

use crate::error::Result;

/// File header stream.
pub const FILE_HEADER: &str = "FileHeader";
/// Document-level records.
pub const DOC_INFO: &str = "DocInfo";
/// UTF-16LE preview text.
pub const PREVIEW_TEXT: &str = "PrvText";
/// OLE summary property set.
pub const SUMMARY_INFORMATION: &str = "\u{5}HwpSummaryInformation";

/// Path of the `index`th body section.
pub fn section_path(index: usize) -> String {
    format!("BodyText/Section{}", index)
}

/// Random access to named streams.
pub trait StreamSource {
    /// Full contents of a stream, or `None` if it does not exist.
    fn read_stream(&mut self, path: &str) -> Result<Option<Vec<u8>>>;

    /// Whether a stream exists.
    fn has_stream(&mut self, path: &str) -> Result<bool> {
        Ok(self.read_stream(path)?.is_some())
    }
}

/// Streams held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    streams: HashMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a stream.
    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.streams.insert(path.into(), data.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with_stream(mut self, path: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Builder shortcut for the `index`th section.
    pub fn with_section(self, index: usize, data: impl Into<Vec<u8>>) -> Self {
        self.with_stream(section_path(index), data)
    }
}

impl StreamSource for MemorySource {
    fn read_stream(&mut self, path: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.streams.get(path.trim_start_matches('/')).cloned())
    }

    fn has_stream(&mut self, path: &str) -> Result<bool> {
        Ok(self.streams.contains_key(path.trim_start_matches('/')))
    }
}

#[cfg(feature = "compound-file")]
pub use compound::CompoundFileSource;

#[cfg(feature = "compound-file")]
mod compound {
    use std::io::{Read, Seek};

    use super::StreamSource;
    use crate::error::Result;

    /// Streams of an OLE compound file.
    pub struct CompoundFileSource<F> {
        file: cfb::CompoundFile<F>,
    }

    impl<F: Read + Seek> CompoundFileSource<F> {
        /// Open the compound-file directory of `inner`.
        pub fn open(inner: F) -> Result<Self> {
            let file = cfb::CompoundFile::open(inner)?;
            Ok(Self { file })
        }
    }

    fn absolute(path: &str) -> String {
        if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        }
    }

    impl<F: Read + Seek> StreamSource for CompoundFileSource<F> {
        fn read_stream(&mut self, path: &str) -> Result<Option<Vec<u8>>> {
            let path = absolute(path);
            if !self.file.is_stream(&path) {
                return Ok(None);
            }
            let mut stream = self.file.open_stream(&path)?;
            let mut data = Vec::new();
            stream.read_to_end(&mut data)?;
            Ok(Some(data))
        }

        fn has_stream(&mut self, path: &str) -> Result<bool> {
            Ok(self.file.is_stream(absolute(path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_path() {
        assert_eq!(section_path(0), "BodyText/Section0");
        assert_eq!(section_path(12), "BodyText/Section12");
    }

    #[test]
    fn test_memory_source() {
        let mut source = MemorySource::new()
            .with_stream(FILE_HEADER, vec![1u8, 2, 3])
            .with_section(0, vec![4u8]);

        assert_eq!(source.read_stream("FileHeader").unwrap(), Some(vec![1, 2, 3]));
        assert_eq!(source.read_stream("/BodyText/Section0").unwrap(), Some(vec![4]));
        assert_eq!(source.read_stream("BodyText/Section1").unwrap(), None);
        assert!(source.has_stream(&section_path(0)).unwrap());
        assert!(!source.has_stream(PREVIEW_TEXT).unwrap());
    }

    #[cfg(feature = "compound-file")]
    #[test]
    fn test_compound_file_source() {
        use std::io::{Cursor, Write};

        let mut comp = cfb::CompoundFile::create(Cursor::new(Vec::new())).unwrap();
        comp.create_storage("/BodyText").unwrap();
        comp.create_stream("/BodyText/Section0")
            .unwrap()
            .write_all(b"section")
            .unwrap();
        comp.create_stream(SUMMARY_INFORMATION_PATH)
            .unwrap()
            .write_all(b"summary")
            .unwrap();
        comp.flush().unwrap();
        let bytes = comp.into_inner().into_inner();

        let mut source = CompoundFileSource::open(Cursor::new(bytes)).unwrap();
        assert_eq!(
            source.read_stream("BodyText/Section0").unwrap(),
            Some(b"section".to_vec())
        );
        assert_eq!(
            source.read_stream(SUMMARY_INFORMATION).unwrap(),
            Some(b"summary".to_vec())
        );
        assert!(!source.has_stream("BodyText/Section1").unwrap());
        assert_eq!(source.read_stream(DOC_INFO).unwrap(), None);
    }

    #[cfg(feature = "compound-file")]
    const SUMMARY_INFORMATION_PATH: &str = "/\u{5}HwpSummaryInformation";
}
