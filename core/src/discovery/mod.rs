//! Discovery of representative DICOM files
//!
//! Walks directories and zip archives, filters candidates on their
//! SeriesDescription and keeps one file per (PatientID, StudyDate).

pub mod archive;
mod locator;

pub use archive::{is_archive_path, ArchiveReader};
pub use locator::{Locator, DEFAULT_PROGRESS_INTERVAL};
