use dicom_core::Tag;
use dicom_object::InMemDicomObject;

// Patient Tags
pub const PATIENT_NAME: Tag = Tag(0x0010, 0x0010);
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const PATIENT_BIRTH_DATE: Tag = Tag(0x0010, 0x0030);
pub const PATIENT_SEX: Tag = Tag(0x0010, 0x0040);
pub const PATIENT_SIZE: Tag = Tag(0x0010, 0x1020);
pub const PATIENT_WEIGHT: Tag = Tag(0x0010, 0x1030);

// Study/Series Identification Tags
pub const STUDY_INSTANCE_UID: Tag = Tag(0x0020, 0x000D);
pub const STUDY_DATE: Tag = Tag(0x0008, 0x0020);
pub const SERIES_TIME: Tag = Tag(0x0008, 0x0031);

// Description Tags
pub const SERIES_DESCRIPTION: Tag = Tag(0x0008, 0x103E);

// Device Tags
pub const DEVICE_SERIAL_NUMBER: Tag = Tag(0x0018, 0x1000);

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present, cannot be converted to string,
/// or holds only padding
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    get_present_string_value(dcm, tag).filter(|s| !s.is_empty())
}

/// Like [`get_string_value`], but a present tag with an empty value yields
/// `Some("")`
pub fn get_present_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim_matches(|c: char| c.is_whitespace() || c == '\0').to_string())
}
