//! Input sniffing: rejects non-PDF sources before handing them to lopdf.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// PDF magic bytes: %PDF-
const PDF_MAGIC: &[u8] = b"%PDF-";
const VERSION_LEN: usize = 3; // e.g., "1.7"

/// Read the header of `path` and return the declared PDF version.
///
/// Files that cannot be opened, are too short, or do not start with the
/// `%PDF-x.y` header are reported as [`Error::InputUnreadable`].
pub fn pdf_version_from_path<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let mut file = File::open(path)
        .map_err(|e| Error::InputUnreadable(format!("{}: {}", path.display(), e)))?;
    let mut header = [0u8; 16];
    let read = file.read(&mut header)?;
    pdf_version_from_bytes(&header[..read])
}

/// Return the declared PDF version from the first bytes of a document.
pub fn pdf_version_from_bytes(data: &[u8]) -> Result<String> {
    let version = data
        .strip_prefix(PDF_MAGIC)
        .and_then(|rest| rest.get(..VERSION_LEN))
        .map(|v| String::from_utf8_lossy(v).to_string())
        .ok_or_else(|| Error::InputUnreadable("not a PDF document".to_string()))?;

    if !is_valid_version(&version) {
        return Err(Error::InputUnreadable(format!(
            "unsupported PDF version: {}",
            version
        )));
    }
    Ok(version)
}

/// Check if bytes start with a valid PDF header.
pub fn is_pdf_bytes(data: &[u8]) -> bool {
    pdf_version_from_bytes(data).is_ok()
}

fn is_valid_version(version: &str) -> bool {
    let chars: Vec<char> = version.chars().collect();
    chars.len() == 3 && chars[0].is_ascii_digit() && chars[1] == '.' && chars[2].is_ascii_digit()
}
