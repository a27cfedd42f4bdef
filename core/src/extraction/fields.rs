use chrono::NaiveDateTime;
use dicom_core::Tag;
use dicom_object::InMemDicomObject;
use log::warn;

use super::date::parse_dicom_date;
use super::tags::{get_string_value, PATIENT_ID, SERIES_DESCRIPTION};
use crate::types::Measurement;

/// Placeholder recorded when PatientID is missing
pub const MISSING_PATIENT_ID: &str = "NA";

/// Extracts the patient identifier
///
/// Only PatientID (0010,0020) is consulted. There is deliberately no
/// fallback to PatientName, StudyID or any other tag; a missing value is
/// recorded as `"NA"` and reported.
pub fn extract_patient_id(dcm: &InMemDicomObject, source: &str) -> String {
    match get_string_value(dcm, PATIENT_ID) {
        Some(id) => id,
        None => {
            warn!(
                "Missing PatientID for `{}`, recorded as '{}'",
                source, MISSING_PATIENT_ID
            );
            MISSING_PATIENT_ID.to_string()
        }
    }
}

/// Extracts a DA tag as a timestamp
///
/// Absent and malformed values both yield `None` with a warning naming
/// the field.
pub fn extract_date(
    dcm: &InMemDicomObject,
    tag: Tag,
    field: &str,
    source: &str,
) -> Option<NaiveDateTime> {
    let raw = match get_string_value(dcm, tag) {
        Some(raw) => raw,
        None => {
            warn!("Missing {} for `{}`", field, source);
            return None;
        }
    };

    let parsed = parse_dicom_date(&raw);
    if parsed.is_none() {
        warn!("Malformed {} '{}' for `{}`", field, raw, source);
    }
    parsed
}

/// Extracts a DS measurement tag, keeping uncoercible text
pub fn extract_measurement(dcm: &InMemDicomObject, tag: Tag) -> Option<Measurement> {
    get_string_value(dcm, tag).map(|raw| Measurement::parse(&raw))
}

/// Extracts SeriesDescription, empty when absent
pub fn extract_series_description(dcm: &InMemDicomObject) -> String {
    get_string_value(dcm, SERIES_DESCRIPTION).unwrap_or_default()
}
