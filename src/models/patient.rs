//! Patient entity model
//!
//! Demographics for the single patient a reconciliation run assembles a
//! profile for. Loaded once from the demographics source, may be edited by
//! the calling workflow before assembly.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Patient sex as recorded in the demographics source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    /// Recorded as `M`
    Male,
    /// Recorded as `F`
    Female,
    /// Anything else
    Unknown,
}

impl Sex {
    /// Parse the single-letter code used by the demographics sheet
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "M" => Self::Male,
            "F" => Self::Female,
            _ => Self::Unknown,
        }
    }

    /// Display word used in the exported profile
    #[must_use]
    pub const fn as_word(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Unknown => "Unknown",
        }
    }
}

/// Demographics for the active patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Hospital registration number, canonically an 8-digit numeric string
    pub id: String,
    /// Patient name
    pub name: String,
    /// Research registration number, if enrolled
    pub research_id: Option<String>,
    /// Birth date, when parseable from the source
    pub birth_date: Option<NaiveDate>,
    /// Age in whole years at the reference date
    pub age: Option<u32>,
    /// Recorded sex
    pub sex: Sex,
}

impl Patient {
    /// Create a patient with only an identifier set
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            research_id: None,
            birth_date: None,
            age: None,
            sex: Sex::Unknown,
        }
    }

    /// Set the birth date and derive age as of `today`
    #[must_use]
    pub fn with_birth_date(mut self, birth_date: NaiveDate, today: NaiveDate) -> Self {
        self.birth_date = Some(birth_date);
        self.age = Some(age_at(birth_date, today));
        self
    }
}

/// Parse a birth date in either `%Y-%m-%d` or `%Y%m%d` form
#[must_use]
pub fn parse_birth_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y%m%d"))
        .ok()
}

/// Whole-year age at `today`, clamped at zero for future birth dates
#[must_use]
pub fn age_at(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sex_from_code() {
        assert_eq!(Sex::from_code("M"), Sex::Male);
        assert_eq!(Sex::from_code(" F "), Sex::Female);
        assert_eq!(Sex::from_code("X"), Sex::Unknown);
        assert_eq!(Sex::from_code(""), Sex::Unknown);
    }

    #[test]
    fn test_parse_birth_date_both_formats() {
        let expected = NaiveDate::from_ymd_opt(1975, 6, 15).unwrap();
        assert_eq!(parse_birth_date("1975-06-15"), Some(expected));
        assert_eq!(parse_birth_date("19750615"), Some(expected));
        assert_eq!(parse_birth_date("June 1975"), None);
        assert_eq!(parse_birth_date(""), None);
    }

    #[test]
    fn test_age_at_counts_whole_years() {
        let birth = NaiveDate::from_ymd_opt(1980, 6, 15).unwrap();
        let before_birthday = NaiveDate::from_ymd_opt(2024, 6, 14).unwrap();
        let on_birthday = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        assert_eq!(age_at(birth, before_birthday), 43);
        assert_eq!(age_at(birth, on_birthday), 44);
    }

    #[test]
    fn test_age_clamped_for_future_birth_date() {
        let birth = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(age_at(birth, today), 0);
    }
}
