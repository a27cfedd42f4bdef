pub mod date;
pub mod fields;
pub mod open;
pub mod tags;

pub use date::parse_dicom_date;
pub use fields::{
    extract_date, extract_measurement, extract_patient_id, extract_series_description,
    MISSING_PATIENT_ID,
};
pub use open::{has_dicom_magic, read_header_bytes, read_header_file};
pub use tags::*;
