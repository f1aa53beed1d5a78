//! Validated primitive types shared by the clinic client crates.
//!
//! These wrappers guarantee their invariants once constructed, so form handling code can
//! accept raw user input at the edge and pass typed values inward.

use chrono::NaiveDate;

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
    /// The input did not look like an e-mail address
    #[error("Invalid e-mail address")]
    InvalidEmail,
    /// The input was not a `YYYY-MM-DD` calendar date
    #[error("Invalid date format. Use YYYY-MM-DD.")]
    InvalidDate,
}

/// Form input with at least one non-whitespace character, stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Trims `input`, failing with [`TextError::Empty`] when nothing is left.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// An e-mail address with a non-empty local part and domain.
///
/// Only the shape is checked; the server remains the authority on whether the address exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }

        let (local, domain) = trimmed.split_once('@').ok_or(TextError::InvalidEmail)?;
        if local.is_empty()
            || domain.is_empty()
            || domain.contains('@')
            || trimmed.chars().any(char::is_whitespace)
        {
            return Err(TextError::InvalidEmail);
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for EmailAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

/// A date string in `YYYY-MM-DD` form with month `01-12` and day `01-31`.
///
/// This is a shape check only, matching what the registration form accepts; `2023-02-30`
/// passes and is left to the server. Use [`IsoDateText::to_naive_date`] when a real calendar
/// date is needed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoDateText(String);

impl IsoDateText {
    pub fn parse(input: impl AsRef<str>) -> Result<Self, TextError> {
        let s = input.as_ref().trim();
        if s.is_empty() {
            return Err(TextError::Empty);
        }

        let b = s.as_bytes();
        if b.len() != 10 || b[4] != b'-' || b[7] != b'-' {
            return Err(TextError::InvalidDate);
        }
        let all_digits = |range: std::ops::Range<usize>| b[range].iter().all(u8::is_ascii_digit);
        if !all_digits(0..4) || !all_digits(5..7) || !all_digits(8..10) {
            return Err(TextError::InvalidDate);
        }

        let month = (b[5] - b'0') * 10 + (b[6] - b'0');
        let day = (b[8] - b'0') * 10 + (b[9] - b'0');
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(TextError::InvalidDate);
        }

        Ok(Self(s.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts to a calendar date, failing for shape-valid but impossible days.
    pub fn to_naive_date(&self) -> Result<NaiveDate, TextError> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").map_err(|_| TextError::InvalidDate)
    }
}

impl From<NaiveDate> for IsoDateText {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl std::fmt::Display for IsoDateText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl serde::Serialize for IsoDateText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}
