//! Core type definitions for CMR metadata discovery
//!
//! This module provides the fundamental types used throughout the cmrmeta library:
//! - [`FileReference`]: Location of a DICOM file on disk or inside a zip archive
//! - [`DedupKey`]: (PatientID, StudyDate) pair selecting one file per study
//! - [`DiscoveryMap`]: Representative file per key, in traversal order
//! - [`Measurement`]: Height or weight, numeric when coercible
//! - [`SeriesFilter`]: Ready-made SeriesDescription predicates

mod filter;
mod key;
mod measurement;
mod reference;

pub use filter::SeriesFilter;
pub use key::{DedupKey, DiscoveryMap};
pub use measurement::Measurement;
pub use reference::{FileReference, ARCHIVE_ENTRY_SEPARATOR};
