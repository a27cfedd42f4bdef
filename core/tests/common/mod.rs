#![allow(dead_code)]

use cmrmeta_core::extraction::tags::{
    PATIENT_ID, PATIENT_WEIGHT, SERIES_DESCRIPTION, STUDY_DATE, STUDY_INSTANCE_UID,
};
use dicom_core::{DataElement, PrimitiveValue, Tag, VR};
use dicom_object::meta::FileMetaTableBuilder;
use dicom_object::InMemDicomObject;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

const EXPLICIT_VR_LITTLE_ENDIAN: &str = "1.2.840.10008.1.2.1";
const MR_IMAGE_STORAGE: &str = "1.2.840.10008.5.1.4.1.1.4";

/// Tag values for a synthetic CMR image
pub struct Series<'a> {
    pub patient_id: Option<&'a str>,
    pub study_date: &'a str,
    pub description: Option<&'a str>,
    pub weight: Option<&'a str>,
}

impl<'a> Series<'a> {
    pub fn new(patient_id: &'a str, study_date: &'a str, description: &'a str) -> Self {
        Self {
            patient_id: Some(patient_id),
            study_date,
            description: Some(description),
            weight: Some("70.5"),
        }
    }

    pub fn object(&self) -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        let mut put = |tag: Tag, vr: VR, value: &str| {
            dcm.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
        };
        if let Some(id) = self.patient_id {
            put(PATIENT_ID, VR::LO, id);
        }
        put(STUDY_DATE, VR::DA, self.study_date);
        if let Some(description) = self.description {
            put(SERIES_DESCRIPTION, VR::LO, description);
        }
        if let Some(weight) = self.weight {
            put(PATIENT_WEIGHT, VR::DS, weight);
        }
        put(STUDY_INSTANCE_UID, VR::UI, "1.2.826.0.1.3680043.8.498.7");
        dcm
    }

    /// Writes the series as a DICOM file with preamble and file meta group
    pub fn write(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        let meta = FileMetaTableBuilder::new()
            .transfer_syntax(EXPLICIT_VR_LITTLE_ENDIAN)
            .media_storage_sop_class_uid(MR_IMAGE_STORAGE)
            .media_storage_sop_instance_uid("1.2.826.0.1.3680043.8.498.7.1");
        self.object()
            .with_meta(meta)
            .unwrap()
            .write_to_file(path)
            .unwrap();
    }

    /// Encodes the series as the bytes of a DICOM file
    pub fn bytes(&self) -> Vec<u8> {
        let scratch = TempDir::new().unwrap();
        let path = scratch.path().join("scratch.dcm");
        self.write(&path);
        std::fs::read(path).unwrap()
    }
}

/// Writes a zip archive with the given entries
pub fn write_zip(path: &Path, entries: &[(&str, Vec<u8>)]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let mut zip = ZipWriter::new(File::create(path).unwrap());
    for (name, contents) in entries {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(contents).unwrap();
    }
    zip.finish().unwrap();
}

pub fn stress(desc: &str) -> bool {
    desc.to_lowercase().contains("stress")
}

/// Writes a single-entry stored zip whose zip64 extra field claims an
/// uncompressed size of `claimed_size` bytes while holding no data
pub fn write_oversized_zip(path: &Path, entry: &str, claimed_size: u64) {
    let name = entry.as_bytes();
    let mut out: Vec<u8> = Vec::new();

    // Local file header, empty stored payload
    out.extend_from_slice(&0x0403_4b50u32.to_le_bytes());
    out.extend_from_slice(&45u16.to_le_bytes()); // version needed
    out.extend_from_slice(&0u16.to_le_bytes()); // flags
    out.extend_from_slice(&0u16.to_le_bytes()); // stored
    out.extend_from_slice(&0u32.to_le_bytes()); // mod time + date
    out.extend_from_slice(&0u32.to_le_bytes()); // crc32 of empty data
    out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
    out.extend_from_slice(&0u32.to_le_bytes()); // uncompressed size
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes()); // extra length
    out.extend_from_slice(name);

    let central_start = out.len() as u32;
    out.extend_from_slice(&0x0201_4b50u32.to_le_bytes());
    out.extend_from_slice(&45u16.to_le_bytes()); // version made by
    out.extend_from_slice(&45u16.to_le_bytes()); // version needed
    out.extend_from_slice(&0u16.to_le_bytes()); // flags
    out.extend_from_slice(&0u16.to_le_bytes()); // stored
    out.extend_from_slice(&0u32.to_le_bytes()); // mod time + date
    out.extend_from_slice(&0u32.to_le_bytes()); // crc32
    out.extend_from_slice(&0u32.to_le_bytes()); // compressed size
    out.extend_from_slice(&u32::MAX.to_le_bytes()); // size in zip64 field
    out.extend_from_slice(&(name.len() as u16).to_le_bytes());
    out.extend_from_slice(&12u16.to_le_bytes()); // extra length
    out.extend_from_slice(&0u16.to_le_bytes()); // comment length
    out.extend_from_slice(&0u16.to_le_bytes()); // disk number
    out.extend_from_slice(&0u16.to_le_bytes()); // internal attributes
    out.extend_from_slice(&0u32.to_le_bytes()); // external attributes
    out.extend_from_slice(&0u32.to_le_bytes()); // local header offset
    out.extend_from_slice(name);
    out.extend_from_slice(&0x0001u16.to_le_bytes()); // zip64 extra id
    out.extend_from_slice(&8u16.to_le_bytes());
    out.extend_from_slice(&claimed_size.to_le_bytes());
    let central_size = out.len() as u32 - central_start;

    // End of central directory
    out.extend_from_slice(&0x0605_4b50u32.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&central_size.to_le_bytes());
    out.extend_from_slice(&central_start.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, out).unwrap();
}
