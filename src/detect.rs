//! HWP format detection and validation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// HWP format generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HwpFormat {
    /// Legacy monolithic binary layout (HWP 3.x)
    V3,
    /// Compound-file container with tag records (HWP 5.x)
    #[default]
    V5,
}

impl std::fmt::Display for HwpFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HwpFormat::V3 => write!(f, "HWP 3.x"),
            HwpFormat::V5 => write!(f, "HWP 5.x"),
        }
    }
}

/// HWP 3.x signature prefix (the full signature is 30 bytes).
const V3_MAGIC: &[u8] = b"HWP Document File V3.00";

/// Length of the HWP 3.x signature block.
pub const V3_SIGNATURE_LEN: usize = 30;

/// OLE compound file magic bytes.
const CFB_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

const HEADER_PROBE_LEN: usize = 32;

/// Detect HWP format from a file path.
///
/// # Example
/// ```no_run
/// use unhwp::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("document.hwp").unwrap();
/// println!("{}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<HwpFormat> {
    let file = File::open(path)?;
    let mut header = Vec::with_capacity(HEADER_PROBE_LEN);
    BufReader::new(file)
        .take(HEADER_PROBE_LEN as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect HWP format from bytes.
///
/// # Returns
/// * `Ok(HwpFormat)` if the data starts with a known header
/// * `Err(Error::UnknownFormat)` otherwise
pub fn detect_format_from_bytes(data: &[u8]) -> Result<HwpFormat> {
    if data.starts_with(V3_MAGIC) {
        return Ok(HwpFormat::V3);
    }
    if data.starts_with(CFB_MAGIC) {
        return Ok(HwpFormat::V5);
    }
    Err(Error::UnknownFormat)
}

/// Check if a file looks like an HWP document.
pub fn is_hwp<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like an HWP document.
pub fn is_hwp_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_v3() {
        let data = b"HWP Document File V3.00 \x1a\x01\x02\x03\x04\x05";
        assert_eq!(data.len(), V3_SIGNATURE_LEN);
        assert_eq!(detect_format_from_bytes(data).unwrap(), HwpFormat::V3);
    }

    #[test]
    fn test_detect_v5_container() {
        let mut data = CFB_MAGIC.to_vec();
        data.extend_from_slice(&[0u8; 24]);
        assert_eq!(detect_format_from_bytes(&data).unwrap(), HwpFormat::V5);
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"%PDF-1.7\n");
        assert!(matches!(result, Err(Error::UnknownFormat)));
        assert!(!is_hwp_bytes(b""));
    }

    #[test]
    fn test_detect_too_short() {
        let result = detect_format_from_bytes(b"HWP Doc");
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_from_path() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"HWP Document File V3.00 \x1a\x01\x02\x03\x04\x05")
            .unwrap();
        assert!(is_hwp(file.path()));
    }
}
