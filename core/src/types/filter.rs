use crate::error::Result;
use regex::{Regex, RegexBuilder};
use std::fmt;

/// Ready-made predicates over the SeriesDescription tag
///
/// The locator accepts any `Fn(&str) -> bool`; this type covers the common
/// matching policies so callers do not have to write their own closures.
///
/// # Example
///
/// ```
/// use cmrmeta_core::SeriesFilter;
///
/// let filter = SeriesFilter::contains("stress");
/// assert!(filter.matches("Perfusion STRESS"));
/// assert!(!filter.matches("Perfusion rest"));
/// ```
#[derive(Debug, Clone, Default)]
pub enum SeriesFilter {
    /// Accepts every description
    #[default]
    Any,

    /// Case-insensitive substring match (needle stored lowercased)
    Contains(String),

    /// Case-insensitive regular expression
    Pattern(Regex),
}

impl SeriesFilter {
    /// Case-insensitive substring filter
    pub fn contains(needle: &str) -> Self {
        SeriesFilter::Contains(needle.to_lowercase())
    }

    /// Case-insensitive regular expression filter
    ///
    /// # Errors
    ///
    /// Returns an error if the pattern does not compile
    ///
    /// # Example
    ///
    /// ```
    /// use cmrmeta_core::SeriesFilter;
    ///
    /// let filter = SeriesFilter::regex(r"^(stress|rest)\b").unwrap();
    /// assert!(filter.matches("Rest perfusion"));
    /// assert!(!filter.matches("cine"));
    /// assert!(SeriesFilter::regex("(").is_err());
    /// ```
    pub fn regex(pattern: &str) -> Result<Self> {
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(SeriesFilter::Pattern(re))
    }

    /// Checks a SeriesDescription against the filter
    pub fn matches(&self, description: &str) -> bool {
        match self {
            SeriesFilter::Any => true,
            SeriesFilter::Contains(needle) => description.to_lowercase().contains(needle.as_str()),
            SeriesFilter::Pattern(re) => re.is_match(description),
        }
    }
}

impl fmt::Display for SeriesFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesFilter::Any => write!(f, "any"),
            SeriesFilter::Contains(needle) => write!(f, "contains '{}'", needle),
            SeriesFilter::Pattern(re) => write!(f, "matches /{}/", re.as_str()),
        }
    }
}
