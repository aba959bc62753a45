//! Numeric name prefixes

use std::fmt;

/// The numeric prefix of a section directory or question file name
///
/// Stored as the digit string without leading zeros, so arbitrarily long
/// prefixes display without overflow. `"02"` displays as `2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ordinal(String);

impl Ordinal {
    /// Parse a string consisting only of ASCII digits
    pub fn parse(digits: &str) -> Option<Self> {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let trimmed = digits.trim_start_matches('0');
        let value = if trimmed.is_empty() { "0" } else { trimmed };
        Some(Self(value.to_string()))
    }

    /// Split a `<digits> <title>` name into its ordinal and title
    ///
    /// Returns `None` if the name has no numeric first word or no title.
    pub fn split_name(name: &str) -> Option<(Self, &str)> {
        let (number, title) = name.split_once(' ')?;
        if title.is_empty() {
            return None;
        }
        Some((Self::parse(number)?, title))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Byte length of a leading `<digits>.` marker
pub(crate) fn numeric_marker_len(line: &str) -> Option<usize> {
    let digits = line.bytes().take_while(u8::is_ascii_digit).count();
    (digits > 0 && line.as_bytes().get(digits) == Some(&b'.')).then_some(digits + 1)
}

/// Whether a line starts with `<digits>.`
pub(crate) fn starts_with_ordinal(line: &str) -> bool {
    numeric_marker_len(line).is_some()
}
