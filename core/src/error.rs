use std::path::PathBuf;
use thiserror::Error;

/// Result type for cmrmeta operations
pub type Result<T> = std::result::Result<T, CmrMetaError>;

/// Error types for cmrmeta operations
#[derive(Error, Debug)]
pub enum CmrMetaError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// File does not carry the DICOM magic code
    #[error("Not a DICOM file: {0}")]
    NotDicom(String),

    /// Zip container or entry could not be read
    #[error("Archive error: {0}")]
    ArchiveError(String),

    /// Tabular output error
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Discovery was started without any root
    #[error("No root locations supplied")]
    NoRoots,

    /// A root location does not exist
    #[error("Root not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Invalid series description pattern
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    /// Generic extraction error
    #[error("Extraction error: {0}")]
    ExtractionError(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Helper conversions
impl From<String> for CmrMetaError {
    fn from(s: String) -> Self {
        CmrMetaError::ExtractionError(s)
    }
}

impl From<&str> for CmrMetaError {
    fn from(s: &str) -> Self {
        CmrMetaError::ExtractionError(s.to_string())
    }
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for CmrMetaError {
    fn from(e: dicom_object::ReadError) -> Self {
        CmrMetaError::DicomError(format!("{}", e))
    }
}

impl From<csv::Error> for CmrMetaError {
    fn from(e: csv::Error) -> Self {
        CmrMetaError::CsvError(format!("{}", e))
    }
}

impl From<regex::Error> for CmrMetaError {
    fn from(e: regex::Error) -> Self {
        CmrMetaError::InvalidPattern(format!("{}", e))
    }
}
