//! Validated identifiers and the numeric ordering rule shared by every catalog.
//!
//! Identifiers keep their original spelling (`"5.10"`, `"1205665906"`) so they
//! round-trip into graph node ids unchanged. Ordering never goes through the
//! string form: each dot-separated part is an unsigned integer literal and is
//! compared by value, so `5.2` sorts before `5.10`.

use crate::error::FilenameError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Compare two unsigned decimal literals by integer value.
///
/// Works for literals of any length (no overflow) and ignores leading zeros,
/// so `"01"` and `"1"` compare equal. Both inputs must be ASCII digit runs;
/// the identifier constructors guarantee that.
pub fn numeric_literal_cmp(a: &str, b: &str) -> Ordering {
    let a = strip_leading_zeros(a);
    let b = strip_leading_zeros(b);
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn strip_leading_zeros(literal: &str) -> &str {
    let trimmed = literal.trim_start_matches('0');
    if trimmed.is_empty() && !literal.is_empty() {
        "0"
    } else {
        trimmed
    }
}

fn is_digit_run(value: &str) -> bool {
    !value.is_empty() && value.bytes().all(|b| b.is_ascii_digit())
}

/// Control identifier of the form `<major>.<minor>` (e.g. `5.1`, `8.15`).
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ControlId {
    raw: String,
    dot: usize,
}

impl ControlId {
    pub fn parse(raw: &str) -> Result<Self, FilenameError> {
        let invalid = || FilenameError::InvalidIdentifier(raw.to_string());
        let (major, minor) = raw.split_once('.').ok_or_else(invalid)?;
        if !is_digit_run(major) || !is_digit_run(minor) {
            return Err(invalid());
        }
        Ok(Self {
            raw: raw.to_string(),
            dot: major.len(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> &str {
        &self.raw[..self.dot]
    }

    pub fn minor(&self) -> &str {
        &self.raw[self.dot + 1..]
    }

    /// Orders by `(major, minor)` with each part compared as an integer.
    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        numeric_literal_cmp(self.major(), other.major())
            .then_with(|| numeric_literal_cmp(self.minor(), other.minor()))
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl TryFrom<String> for ControlId {
    type Error = FilenameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ControlId> for String {
    fn from(value: ControlId) -> Self {
        value.raw
    }
}

/// Reference document identifier: a single unsigned integer literal.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(raw: &str) -> Result<Self, FilenameError> {
        if !is_digit_run(raw) {
            return Err(FilenameError::InvalidIdentifier(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn numeric_cmp(&self, other: &Self) -> Ordering {
        numeric_literal_cmp(&self.0, &other.0)
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for DocumentId {
    type Error = FilenameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DocumentId> for String {
    fn from(value: DocumentId) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn control(raw: &str) -> ControlId {
        ControlId::parse(raw).unwrap()
    }

    #[test]
    fn minor_parts_compare_as_integers() {
        let mut ids = vec![control("5.10"), control("5.2"), control("5.1")];
        ids.sort_by(ControlId::numeric_cmp);
        let order: Vec<&str> = ids.iter().map(ControlId::as_str).collect();
        assert_eq!(order, vec!["5.1", "5.2", "5.10"]);
    }

    #[test]
    fn major_part_dominates() {
        assert_eq!(control("8.1").numeric_cmp(&control("5.37")), Ordering::Greater);
        assert_eq!(control("10.1").numeric_cmp(&control("9.9")), Ordering::Greater);
    }

    #[test]
    fn zero_padded_literals_compare_equal() {
        assert_eq!(control("5.01").numeric_cmp(&control("5.1")), Ordering::Equal);
        assert_eq!(numeric_literal_cmp("000", "0"), Ordering::Equal);
    }

    #[test]
    fn long_literals_do_not_overflow() {
        let big = "123456789012345678901234567890";
        let bigger = "223456789012345678901234567890";
        assert_eq!(numeric_literal_cmp(big, bigger), Ordering::Less);
        assert_eq!(numeric_literal_cmp("99", big), Ordering::Less);
    }

    #[test]
    fn rejects_malformed_ids() {
        for raw in ["5", "5.", ".1", "5.1.2", "a.1", "5.x", "-5.1", "５.1"] {
            assert!(ControlId::parse(raw).is_err(), "{raw} should be rejected");
        }
        for raw in ["", "12a", "1.2", " 1"] {
            assert!(DocumentId::parse(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn ids_serialize_as_plain_strings() {
        let json = serde_json::to_string(&control("8.15")).unwrap();
        assert_eq!(json, "\"8.15\"");
        let back: ControlId = serde_json::from_str(&json).unwrap();
        assert_eq!(back.major(), "8");
        assert_eq!(back.minor(), "15");
        assert!(serde_json::from_str::<DocumentId>("\"12x\"").is_err());
    }
}
