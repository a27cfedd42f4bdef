use crate::extraction::date::DATE_OUTPUT_FORMAT;
use crate::extraction::fields::{
    extract_date, extract_measurement, extract_patient_id, extract_series_description,
};
use crate::extraction::tags::{
    get_string_value, DEVICE_SERIAL_NUMBER, PATIENT_BIRTH_DATE, PATIENT_SEX, PATIENT_SIZE,
    PATIENT_WEIGHT, SERIES_TIME, STUDY_DATE, STUDY_INSTANCE_UID,
};
use crate::types::Measurement;
use chrono::NaiveDateTime;
use dicom_object::InMemDicomObject;

/// Rendering of missing values in exported tables
pub const MISSING_VALUE: &str = "NA";

/// One output row: the normalized metadata of a representative file
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
pub struct MetadataRecord {
    /// Rendered file reference
    pub file_path: String,

    /// PatientID, or "NA" when absent
    pub patient_id: String,

    /// PatientBirthDate
    pub date_of_birth: Option<NaiveDateTime>,

    /// PatientSex
    pub sex: Option<String>,

    /// StudyDate
    pub study_date: Option<NaiveDateTime>,

    /// SeriesTime, verbatim
    pub series_time: Option<String>,

    /// PatientSize
    pub height: Option<Measurement>,

    /// PatientWeight
    pub weight: Option<Measurement>,

    /// DeviceSerialNumber
    pub scanner_id: Option<String>,

    /// SeriesDescription, empty when absent
    pub series_description: String,

    /// StudyInstanceUID
    pub study_instance_uid: Option<String>,
}

impl MetadataRecord {
    /// Builds a record from an already-opened DICOM object
    ///
    /// Never fails: every field follows its own missing-value policy and
    /// problems are reported through the log.
    ///
    /// # Arguments
    ///
    /// * `file_path` - Rendered reference of the source file
    /// * `dcm` - Opened DICOM object
    pub fn from_dicom(file_path: String, dcm: &InMemDicomObject) -> Self {
        Self {
            patient_id: extract_patient_id(dcm, &file_path),
            date_of_birth: extract_date(dcm, PATIENT_BIRTH_DATE, "PatientBirthDate", &file_path),
            sex: get_string_value(dcm, PATIENT_SEX),
            study_date: extract_date(dcm, STUDY_DATE, "StudyDate", &file_path),
            series_time: get_string_value(dcm, SERIES_TIME),
            height: extract_measurement(dcm, PATIENT_SIZE),
            weight: extract_measurement(dcm, PATIENT_WEIGHT),
            scanner_id: get_string_value(dcm, DEVICE_SERIAL_NUMBER),
            series_description: extract_series_description(dcm),
            study_instance_uid: get_string_value(dcm, STUDY_INSTANCE_UID),
            file_path,
        }
    }

    /// Renders the row in table column order
    pub fn to_row(&self) -> [String; 11] {
        [
            self.file_path.clone(),
            self.patient_id.clone(),
            render_date(self.date_of_birth),
            render_text(&self.sex),
            render_date(self.study_date),
            render_text(&self.series_time),
            render_measurement(&self.height),
            render_measurement(&self.weight),
            render_text(&self.scanner_id),
            self.series_description.clone(),
            render_text(&self.study_instance_uid),
        ]
    }
}

fn render_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| MISSING_VALUE.to_string())
}

fn render_date(value: Option<NaiveDateTime>) -> String {
    value
        .map(|ts| ts.format(DATE_OUTPUT_FORMAT).to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

fn render_measurement(value: &Option<Measurement>) -> String {
    value
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| MISSING_VALUE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::{PATIENT_ID, SERIES_DESCRIPTION};
    use chrono::NaiveDate;
    use dicom_core::{DataElement, PrimitiveValue, Tag, VR};

    fn put(dcm: &mut InMemDicomObject, tag: Tag, vr: VR, value: &str) {
        dcm.put(DataElement::new(tag, vr, PrimitiveValue::from(value)));
    }

    fn full_object() -> InMemDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        put(&mut dcm, PATIENT_ID, VR::LO, "CMR001");
        put(&mut dcm, PATIENT_BIRTH_DATE, VR::DA, "19700301");
        put(&mut dcm, PATIENT_SEX, VR::CS, "F");
        put(&mut dcm, STUDY_DATE, VR::DA, "20240115");
        put(&mut dcm, SERIES_TIME, VR::TM, "101500.000");
        put(&mut dcm, PATIENT_SIZE, VR::DS, "1.68");
        put(&mut dcm, PATIENT_WEIGHT, VR::DS, "70.5");
        put(&mut dcm, DEVICE_SERIAL_NUMBER, VR::LO, "SN45210");
        put(&mut dcm, SERIES_DESCRIPTION, VR::LO, "perf_stress");
        put(&mut dcm, STUDY_INSTANCE_UID, VR::UI, "1.2.826.0.1.3680043.8.498.1");
        dcm
    }

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_from_dicom_all_fields() {
        let record = MetadataRecord::from_dicom("study/IM1".to_string(), &full_object());

        assert_eq!(record.file_path, "study/IM1");
        assert_eq!(record.patient_id, "CMR001");
        assert_eq!(record.date_of_birth, Some(midnight(1970, 3, 1)));
        assert_eq!(record.sex.as_deref(), Some("F"));
        assert_eq!(record.study_date, Some(midnight(2024, 1, 15)));
        assert_eq!(record.series_time.as_deref(), Some("101500.000"));
        assert_eq!(record.height, Some(Measurement::Number(1.68)));
        assert_eq!(record.weight, Some(Measurement::Number(70.5)));
        assert_eq!(record.scanner_id.as_deref(), Some("SN45210"));
        assert_eq!(record.series_description, "perf_stress");
        assert_eq!(
            record.study_instance_uid.as_deref(),
            Some("1.2.826.0.1.3680043.8.498.1")
        );
    }

    #[test]
    fn test_from_dicom_empty_object() {
        let record = MetadataRecord::from_dicom("empty".to_string(), &InMemDicomObject::new_empty());

        assert_eq!(record.patient_id, "NA");
        assert_eq!(record.date_of_birth, None);
        assert_eq!(record.sex, None);
        assert_eq!(record.study_date, None);
        assert_eq!(record.series_time, None);
        assert_eq!(record.height, None);
        assert_eq!(record.weight, None);
        assert_eq!(record.scanner_id, None);
        assert_eq!(record.series_description, "");
        assert_eq!(record.study_instance_uid, None);
    }

    #[test]
    fn test_bad_date_keeps_other_fields() {
        let mut dcm = full_object();
        put(&mut dcm, STUDY_DATE, VR::DA, "bad");
        let record = MetadataRecord::from_dicom("IM1".to_string(), &dcm);

        assert_eq!(record.study_date, None);
        assert_eq!(record.patient_id, "CMR001");
        assert_eq!(record.weight, Some(Measurement::Number(70.5)));
    }

    #[test]
    fn test_to_row() {
        let mut dcm = full_object();
        put(&mut dcm, PATIENT_WEIGHT, VR::DS, "unknown");
        dcm.remove_element(PATIENT_SIZE);
        let record = MetadataRecord::from_dicom("IM1".to_string(), &dcm);

        let row = record.to_row();
        assert_eq!(row[0], "IM1");
        assert_eq!(row[2], "1970-03-01");
        assert_eq!(row[4], "2024-01-15");
        assert_eq!(row[6], "NA");
        assert_eq!(row[7], "unknown");
        assert_eq!(row[9], "perf_stress");
    }
}
