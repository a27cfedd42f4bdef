//! Tabular result of metadata extraction and its CSV export

mod record;

pub use record::{MetadataRecord, MISSING_VALUE};

use crate::error::{CmrMetaError, Result};
use crate::types::Measurement;
use log::info;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Output column names, in export order
pub const COLUMNS: [&str; 11] = [
    "FilePath",
    "patient_ID",
    "dob",
    "sex",
    "date",
    "time_series",
    "height",
    "weight",
    "scanner_id",
    "SeriesDescription",
    "StudyInstanceUID",
];

/// Default export file name
pub const DEFAULT_OUTPUT_FILE: &str = "metadata_cmr_dicom.csv";

/// Ordered collection of extracted records
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(transparent))]
pub struct MetadataTable {
    records: Vec<MetadataRecord>,
}

/// Non-null counts reported after extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSummary {
    pub records: usize,
    pub with_patient_id: usize,
    pub with_height: usize,
    pub with_weight: usize,
    pub numeric_height: usize,
    pub numeric_weight: usize,
}

impl MetadataTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: MetadataRecord) {
        self.records.push(record);
    }

    /// Appends all records of another table, keeping their order
    pub fn extend(&mut self, other: MetadataTable) {
        self.records.extend(other.records);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[MetadataRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetadataRecord> {
        self.records.iter()
    }

    /// Counts non-null values of the nullable fields
    pub fn summary(&self) -> TableSummary {
        let count = |f: fn(&MetadataRecord) -> bool| self.records.iter().filter(|r| f(r)).count();
        TableSummary {
            records: self.records.len(),
            with_patient_id: count(|r| r.patient_id != MISSING_VALUE),
            with_height: count(|r| r.height.is_some()),
            with_weight: count(|r| r.weight.is_some()),
            numeric_height: count(|r| r.height.as_ref().and_then(Measurement::as_number).is_some()),
            numeric_weight: count(|r| r.weight.as_ref().and_then(Measurement::as_number).is_some()),
        }
    }

    /// Writes the table as CSV with the fixed header
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(COLUMNS)?;
        for record in &self.records {
            csv.write_record(record.to_row())?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Writes the table to `destination`, replacing any existing file
    ///
    /// The CSV is written to a temporary file next to the destination and
    /// renamed into place, so the destination never holds a partial table.
    ///
    /// # Errors
    ///
    /// Returns an error if the destination directory is not writable
    pub fn export(&self, destination: &Path) -> Result<()> {
        info!("Saving metadata to CSV: `{}`", destination.display());

        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        self.write_csv(tmp.as_file_mut())?;
        tmp.as_file().sync_all()?;
        tmp.persist(destination)
            .map_err(|e| CmrMetaError::IoError(e.error))?;

        info!(
            "CSV saved: `{}` ({} rows)",
            destination.display(),
            self.records.len()
        );
        Ok(())
    }
}

impl FromIterator<MetadataRecord> for MetadataTable {
    fn from_iter<I: IntoIterator<Item = MetadataRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MetadataTable {
    type Item = &'a MetadataRecord;
    type IntoIter = std::slice::Iter<'a, MetadataRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
