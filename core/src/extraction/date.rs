use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::OnceLock;

/// Rendering format for dates in exported tables
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

/// Parses a DICOM DA value (`YYYYMMDD`) into a timestamp at midnight
///
/// Surrounding whitespace and NUL padding are ignored. Anything other than
/// exactly eight digits forming a valid calendar date yields `None`.
pub fn parse_dicom_date(value: &str) -> Option<NaiveDateTime> {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    let re = REGEX.get_or_init(|| Regex::new(r"^\d{8}$").expect("Failed to compile regex"));

    let value = value.trim_matches(|c: char| c.is_whitespace() || c == '\0');
    if !re.is_match(value) {
        return None;
    }

    NaiveDate::parse_from_str(value, "%Y%m%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}
