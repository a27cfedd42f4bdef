use crate::error::{CmrMetaError, Result};
use dicom_dictionary_std::tags::PIXEL_DATA;
use dicom_object::{DefaultDicomObject, OpenFileOptions};
use std::io::Cursor;
use std::path::Path;

/// Length of the DICOM file preamble
pub const PREAMBLE_LEN: usize = 128;

/// Magic code following the preamble
pub const DICOM_MAGIC: &[u8; 4] = b"DICM";

/// Checks if a buffer starts with a DICOM header
///
/// DICOM files typically have:
/// - 128-byte preamble
/// - 4-byte "DICM" magic string at offset 128
pub fn has_dicom_magic(buffer: &[u8]) -> bool {
    buffer.len() >= PREAMBLE_LEN + DICOM_MAGIC.len()
        && &buffer[PREAMBLE_LEN..PREAMBLE_LEN + DICOM_MAGIC.len()] == DICOM_MAGIC
}

/// Reads the header of a DICOM file on disk
///
/// Parsing stops at PixelData, so image payloads are never loaded.
pub fn read_header_file(path: &Path) -> Result<DefaultDicomObject> {
    let obj = OpenFileOptions::new()
        .read_until(PIXEL_DATA)
        .open_file(path)?;
    Ok(obj)
}

/// Reads the header of a DICOM file held in memory
///
/// Accepts buffers with the standard preamble as well as buffers starting
/// directly at the magic code.
pub fn read_header_bytes(mut buffer: Vec<u8>) -> Result<DefaultDicomObject> {
    if has_dicom_magic(&buffer) {
        buffer.drain(..PREAMBLE_LEN);
    } else if !buffer.starts_with(DICOM_MAGIC) {
        return Err(CmrMetaError::NotDicom("missing DICM magic code".to_string()));
    }

    let obj = OpenFileOptions::new()
        .read_until(PIXEL_DATA)
        .from_reader(Cursor::new(buffer))?;
    Ok(obj)
}
