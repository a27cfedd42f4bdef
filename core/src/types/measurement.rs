use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Patient body measurement (height or weight) as read from a DS tag
///
/// Values that look like an integer or decimal number are coerced to
/// [`Measurement::Number`]. Anything else is kept verbatim as
/// [`Measurement::Text`] so no source information is lost.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "json", derive(serde::Serialize))]
#[cfg_attr(feature = "json", serde(untagged))]
pub enum Measurement {
    Number(f64),
    Text(String),
}

impl Measurement {
    /// Coerces a raw tag value
    ///
    /// Accepts formats like:
    /// - "70"
    /// - "70.5"
    /// - " 1.82 "
    /// - ".5", "-3", "+4."
    /// - Exponential notation: "7.05e1"
    pub fn parse(s: &str) -> Self {
        static REGEX: OnceLock<Regex> = OnceLock::new();
        let re = REGEX.get_or_init(|| {
            Regex::new(r"^[-+]?(?:\d+\.?\d*|\.\d+)(?:[eE][-+]?\d+)?$")
                .expect("Failed to compile regex")
        });

        let trimmed = s.trim();
        if re.is_match(trimmed) {
            if let Ok(n) = trimmed.parse::<f64>() {
                return Measurement::Number(n);
            }
        }
        Measurement::Text(s.to_string())
    }

    /// Returns the numeric value, if coercion succeeded
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Measurement::Number(n) => Some(*n),
            Measurement::Text(_) => None,
        }
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Measurement::Number(n) => write!(f, "{}", n),
            Measurement::Text(s) => write!(f, "{}", s),
        }
    }
}
