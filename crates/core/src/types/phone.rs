//! Phone number type.
//!
//! Numbers are validated against the rule the order form uses: an
//! optional leading trunk/country prefix (`+7`, `7`, or `8`) followed
//! by exactly 10 significant digits, tolerant of spacing and
//! punctuation (`+7 (999) 123-45-67`, `89991234567`, `9991234567`).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Phone`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PhoneError {
    /// The input string is empty.
    #[error("phone number is required")]
    Empty,
    /// The input contains characters other than digits, `+`, spaces,
    /// hyphens, and parentheses.
    #[error("phone number contains an invalid character: {0:?}")]
    InvalidCharacter(char),
    /// After stripping punctuation and the trunk digit, the number is
    /// not exactly 10 digits.
    #[error("phone number must contain 10 digits")]
    WrongDigitCount,
}

/// A phone number, stored as its 10 significant digits.
///
/// ## Examples
///
/// ```
/// use apteka_core::Phone;
///
/// let phone = Phone::parse("+7 (999) 123-45-67").unwrap();
/// assert_eq!(phone.digits(), "9991234567");
/// assert_eq!(phone.to_string(), "+7 (999) 123-45-67");
///
/// assert!(Phone::parse("9991234567").is_ok());
/// assert!(Phone::parse("123").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Phone(String);

impl Phone {
    /// Parse a `Phone` from a string.
    ///
    /// All spacing and punctuation is stripped, then a single leading
    /// trunk digit (`7` or `8`) is dropped; the remainder must be
    /// exactly 10 digits.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, contains a character
    /// outside digits and `+ - ( )` and spaces, or does not reduce to
    /// exactly 10 significant digits.
    pub fn parse(s: &str) -> Result<Self, PhoneError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(PhoneError::Empty);
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !c.is_ascii_digit() && !matches!(c, '+' | '-' | '(' | ')' | ' '))
        {
            return Err(PhoneError::InvalidCharacter(bad));
        }

        let digits = significant_digits(s).ok_or(PhoneError::WrongDigitCount)?;

        Ok(Self(digits))
    }

    /// The 10 significant digits, without any trunk prefix.
    #[must_use]
    pub fn digits(&self) -> &str {
        &self.0
    }

    /// Normalize a raw input string into the canonical display form
    /// `+7 (XXX) XXX-XX-XX`.
    ///
    /// Defined for 10-digit inputs and 11-digit inputs with a leading
    /// trunk digit (`7` or `8`); anything else is returned unchanged.
    #[must_use]
    pub fn format_display(raw: &str) -> String {
        significant_digits(raw).map_or_else(|| raw.to_owned(), |digits| grouped(&digits))
    }
}

/// Strip punctuation and a single leading trunk digit, returning the
/// 10 significant digits if the input reduces to exactly that many.
fn significant_digits(s: &str) -> Option<String> {
    let mut digits: String = s.chars().filter(char::is_ascii_digit).collect();

    if digits.starts_with('7') || digits.starts_with('8') {
        digits.remove(0);
    }

    (digits.len() == 10).then_some(digits)
}

/// Group 10 significant digits as `+7 (XXX) XXX-XX-XX`.
fn grouped(digits: &str) -> String {
    format!(
        "+7 ({}) {}-{}-{}",
        digits.get(0..3).unwrap_or_default(),
        digits.get(3..6).unwrap_or_default(),
        digits.get(6..8).unwrap_or_default(),
        digits.get(8..10).unwrap_or_default(),
    )
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", grouped(&self.0))
    }
}

impl std::str::FromStr for Phone {
    type Err = PhoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
