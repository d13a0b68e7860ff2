//! Forward-only byte cursor shared by both parsers.

use std::io::{self, Read};

use flate2::read::DeflateDecoder;

use crate::error::{Error, Result};

const MAX_PREALLOC: usize = 64 * 1024;

/// Sequential reader with fixed-width little-endian reads.
///
/// Every short read fails with [`Error::TruncatedStream`]; the cursor never
/// seeks backward.
#[derive(Debug)]
pub struct StreamCursor<R> {
    inner: R,
    position: u64,
    len: Option<u64>,
}

impl<'a> StreamCursor<&'a [u8]> {
    /// Create a cursor over an in-memory slice (length known).
    pub fn from_slice(data: &'a [u8]) -> Self {
        Self {
            inner: data,
            position: 0,
            len: Some(data.len() as u64),
        }
    }
}

impl<R: Read> StreamCursor<R> {
    /// Create a cursor over a reader of unknown length.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            position: 0,
            len: None,
        }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Bytes left, when the total length is known.
    pub fn remaining(&self) -> Option<u64> {
        self.len.map(|len| len.saturating_sub(self.position))
    }

    /// True only when the length is known and fully consumed.
    pub fn is_at_end(&self) -> bool {
        self.remaining() == Some(0)
    }

    /// Fill `buf` completely.
    pub fn read_into(&mut self, buf: &mut [u8]) -> Result<()> {
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(Error::TruncatedStream {
                offset: self.position,
                needed: buf.len() as u64,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Read exactly `n` bytes.
    ///
    /// Allocation follows the bytes actually read, not `n`.
    pub fn read_exact(&mut self, n: usize) -> Result<Vec<u8>> {
        let start = self.position;
        let mut buf = Vec::with_capacity(n.min(MAX_PREALLOC));
        (&mut self.inner).take(n as u64).read_to_end(&mut buf)?;
        self.position += buf.len() as u64;
        if buf.len() < n {
            return Err(Error::TruncatedStream {
                offset: start,
                needed: n as u64,
            });
        }
        Ok(buf)
    }

    /// Fill `buf`, distinguishing a clean end of stream from truncation.
    ///
    /// Returns `Ok(false)` if the stream ended before the first byte.
    pub fn try_fill(&mut self, buf: &mut [u8]) -> Result<bool> {
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        let start = self.position;
        self.position += filled as u64;
        match filled {
            0 if !buf.is_empty() => Ok(false),
            n if n == buf.len() => Ok(true),
            _ => Err(Error::TruncatedStream {
                offset: start,
                needed: buf.len() as u64,
            }),
        }
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        let mut buf = [0u8; 1];
        self.read_into(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_into(&mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        self.read_into(&mut buf)?;
        Ok(u32::from_le_bytes(buf))
    }

    /// Advance `n` bytes without keeping them.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        let start = self.position;
        let copied = io::copy(&mut (&mut self.inner).take(n), &mut io::sink())?;
        self.position += copied;
        if copied < n {
            return Err(Error::TruncatedStream {
                offset: start,
                needed: n,
            });
        }
        Ok(())
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<'a> StreamCursor<Box<dyn Read + 'a>> {
    /// Route every further read through a raw-deflate decompressor.
    ///
    /// Position restarts at 0 and counts decompressed bytes.
    pub fn inflate(self) -> Self {
        StreamCursor::new(Box::new(inflate_stream(self.inner)))
    }
}

/// Wrap a raw-deflate (headerless zlib) stream.
pub fn inflate_stream<R: Read>(reader: R) -> DeflateDecoder<R> {
    DeflateDecoder::new(reader)
}
