use super::FileReference;
use crate::extraction::tags::{get_string_value, PATIENT_ID, STUDY_DATE};
use dicom_object::InMemDicomObject;
use std::collections::HashMap;
use std::fmt;

/// Deduplication key: one representative file per patient and study date
///
/// Absent tags are kept as `None`; two files both lacking a PatientID for
/// the same StudyDate are treated as duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DedupKey {
    pub patient_id: Option<String>,
    pub study_date: Option<String>,
}

impl DedupKey {
    pub fn new(patient_id: Option<String>, study_date: Option<String>) -> Self {
        Self {
            patient_id,
            study_date,
        }
    }

    /// Reads PatientID and StudyDate from a DICOM object
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        Self::new(
            get_string_value(dcm, PATIENT_ID),
            get_string_value(dcm, STUDY_DATE),
        )
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PatientID={}, StudyDate={}",
            self.patient_id.as_deref().unwrap_or("NA"),
            self.study_date.as_deref().unwrap_or("NA")
        )
    }
}

/// Representative file per [`DedupKey`], in traversal order
///
/// Keys are unique. The first reference inserted for a key wins; later
/// insertions for the same key are rejected.
#[derive(Debug, Clone, Default)]
pub struct DiscoveryMap {
    entries: Vec<(DedupKey, FileReference)>,
    /// Position of each key in `entries`
    index: HashMap<DedupKey, usize>,
}

impl DiscoveryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a reference unless the key is already present
    ///
    /// Returns `true` if the reference was recorded
    pub fn insert(&mut self, key: DedupKey, reference: FileReference) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, reference));
        true
    }

    pub fn contains_key(&self, key: &DedupKey) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up the representative file for a key
    pub fn get(&self, key: &DedupKey) -> Option<&FileReference> {
        self.index
            .get(key)
            .and_then(|&pos| self.entries.get(pos))
            .map(|(_, reference)| reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&DedupKey, &FileReference)> {
        self.entries.iter().map(|(k, r)| (k, r))
    }
}

impl<'a> IntoIterator for &'a DiscoveryMap {
    type Item = (&'a DedupKey, &'a FileReference);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}
