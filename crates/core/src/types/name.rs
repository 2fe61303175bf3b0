//! Full name type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`FullName`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FullNameError {
    /// The input string is empty or whitespace-only.
    #[error("full name is required")]
    Empty,
    /// The input contains a character outside letters, spaces,
    /// hyphens, and apostrophes.
    #[error("full name can contain only letters, spaces, and hyphens")]
    InvalidCharacter(char),
    /// Fewer than two words were supplied.
    #[error("enter both a first and last name")]
    SingleWord,
    /// A word is shorter than 2 letters.
    #[error("every word must contain at least 2 letters")]
    WordTooShort(String),
}

/// A customer's full name, as entered on the order form.
///
/// Accepts Latin and Cyrillic letters, spaces, hyphens, and
/// apostrophes; requires at least two words of two or more letters
/// each. Interior runs of whitespace are collapsed to single spaces.
///
/// ## Examples
///
/// ```
/// use apteka_core::FullName;
///
/// assert!(FullName::parse("Anna Ivanova").is_ok());
/// assert!(FullName::parse("Анна Иванова-Петрова").is_ok());
///
/// assert!(FullName::parse("A").is_err());        // single short word
/// assert!(FullName::parse("Anna").is_err());     // no last name
/// assert!(FullName::parse("Anna 1").is_err());   // digit
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct FullName(String);

impl FullName {
    /// Parse a `FullName` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty after trimming,
    /// contains a disallowed character, has fewer than two words, or
    /// has a word shorter than 2 letters.
    pub fn parse(s: &str) -> Result<Self, FullNameError> {
        let s = s.trim();

        if s.is_empty() {
            return Err(FullNameError::Empty);
        }

        if let Some(bad) = s.chars().find(|&c| !is_name_char(c)) {
            return Err(FullNameError::InvalidCharacter(bad));
        }

        let words: Vec<&str> = s.split_whitespace().collect();

        if words.len() < 2 {
            return Err(FullNameError::SingleWord);
        }

        for word in &words {
            // Character count, not byte length: Cyrillic letters are
            // two bytes each.
            if word.chars().count() < 2 {
                return Err(FullNameError::WordTooShort((*word).to_owned()));
            }
        }

        Ok(Self(words.join(" ")))
    }

    /// Returns the normalized name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `FullName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Letters of the two supported alphabets plus separators.
const fn is_name_char(c: char) -> bool {
    c.is_ascii_alphabetic()
        || matches!(c, 'а'..='я' | 'А'..='Я' | 'ё' | 'Ё')
        || matches!(c, ' ' | '-' | '\'')
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for FullName {
    type Err = FullNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
