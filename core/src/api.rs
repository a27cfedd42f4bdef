use crate::error::Result;
use crate::table::{MetadataRecord, MetadataTable};
use crate::types::{DiscoveryMap, FileReference};
use log::{info, warn};
use std::path::Path;

/// Main extractor for CMR study metadata
///
/// Turns a [`DiscoveryMap`] into a [`MetadataTable`] and persists it.
///
/// # Example
///
/// ```
/// use cmrmeta_core::{DiscoveryMap, MetadataExtractor};
///
/// let table = MetadataExtractor::extract(&DiscoveryMap::new());
/// assert!(table.is_empty());
///
/// let mut csv = Vec::new();
/// table.write_csv(&mut csv).unwrap();
/// assert!(String::from_utf8(csv).unwrap().starts_with("FilePath,patient_ID"));
/// ```
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Extracts one record per discovered file, in map order
    ///
    /// Files that can no longer be opened or parsed are skipped with a
    /// warning; the table then holds fewer rows than the map has keys.
    pub fn extract(map: &DiscoveryMap) -> MetadataTable {
        let total = map.len();
        info!("Beginning metadata extraction for {} files", total);

        let mut table = MetadataTable::new();
        for (idx, (key, reference)) in map.iter().enumerate() {
            info!(
                "[{}/{}] Extracting metadata from: {}",
                idx + 1,
                total,
                reference
            );
            match Self::extract_file(reference) {
                Ok(record) => table.push(record),
                Err(e) => warn!("Skipping `{}` ({}): {}", reference, key, e),
            }
        }

        let summary = table.summary();
        info!(
            "Metadata extraction complete: {} records, height non-null: {}, weight non-null: {}",
            summary.records, summary.with_height, summary.with_weight
        );
        table
    }

    /// Opens a single referenced file and builds its record
    ///
    /// # Errors
    ///
    /// Returns an error if the file or archive entry cannot be read or
    /// is not a valid DICOM file
    pub fn extract_file(reference: &FileReference) -> Result<MetadataRecord> {
        let dcm = reference.open()?;
        Ok(MetadataRecord::from_dicom(reference.to_string(), &dcm))
    }

    /// Writes a table to `destination` as CSV, replacing any existing file
    ///
    /// # Errors
    ///
    /// Returns an error if the destination cannot be written
    pub fn export(table: &MetadataTable, destination: &Path) -> Result<()> {
        table.export(destination)
    }
}
