// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Account identifier value type and checksum computation.
//!
//! Identifiers are formatted `YY-NNNN-CCC`: a two-digit approval year,
//! a zero-padded sequence unique within that year, and a three-digit
//! checksum. The string form is the persisted representation and must
//! not change; external systems parse and display it verbatim.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Computes the three-digit checksum for a (year, sequence) pair.
///
/// `base = (year mod 100) * 10000 + sequence`, checksum is `base mod 1000`
/// using a non-negative floored modulo. This is a light integrity tag for
/// catching transcription errors, not a cryptographic check.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub const fn checksum(year: i32, sequence: u32) -> u16 {
    let base: i64 = year.rem_euclid(100) as i64 * 10_000 + sequence as i64;
    // rem_euclid(1_000) is always in [0, 999]
    base.rem_euclid(1_000) as u16
}

/// A unique, checksum-suffixed account identifier.
///
/// Assigned exactly once, when an application first reaches the approved
/// state; never changed or reused afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct AccountId {
    year_suffix: u8,
    sequence: u32,
    checksum: u16,
}

impl AccountId {
    /// Builds the identifier for a given approval year and sequence number.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub const fn new(year: i32, sequence: u32) -> Self {
        Self {
            // rem_euclid(100) is always in [0, 99]
            year_suffix: year.rem_euclid(100) as u8,
            sequence,
            checksum: checksum(year, sequence),
        }
    }

    /// Parses an identifier from its persisted string form.
    ///
    /// The layout, digit classes, and checksum segment are all verified.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidIdentifier` if the string does not
    /// match the `YY-NNNN-CCC` layout or its checksum is inconsistent.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidIdentifier {
            identifier: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.split('-');
        let (Some(year_part), Some(seq_part), Some(check_part), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid("expected three hyphen-separated segments"));
        };

        if year_part.len() != 2 || !year_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("year segment must be exactly two digits"));
        }
        if seq_part.len() < 4 || !seq_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("sequence segment must be at least four digits"));
        }
        if check_part.len() != 3 || !check_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("checksum segment must be exactly three digits"));
        }

        let year_suffix: u8 = year_part
            .parse()
            .map_err(|_| invalid("year segment is not numeric"))?;
        let sequence: u32 = seq_part
            .parse()
            .map_err(|_| invalid("sequence segment is not numeric"))?;
        let check: u16 = check_part
            .parse()
            .map_err(|_| invalid("checksum segment is not numeric"))?;

        let expected: u16 = checksum(i32::from(year_suffix), sequence);
        if check != expected {
            return Err(invalid("checksum segment does not match year and sequence"));
        }

        Ok(Self {
            year_suffix,
            sequence,
            checksum: check,
        })
    }

    /// The two-digit year suffix.
    #[must_use]
    pub const fn year_suffix(&self) -> u8 {
        self.year_suffix
    }

    /// The sequence number within the identifier's year.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }

    /// The three-digit checksum segment.
    #[must_use]
    pub const fn checksum(&self) -> u16 {
        self.checksum
    }

    /// The identifier prefix shared by every identifier of a given year,
    /// e.g. `"25-"`.
    #[must_use]
    pub fn year_prefix(year: i32) -> String {
        format!("{:02}-", year.rem_euclid(100))
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}-{:04}-{:03}",
            self.year_suffix, self.sequence, self.checksum
        )
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for AccountId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl FromStr for AccountId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_is_in_range_and_deterministic() {
        for year in [1999, 2000, 2025, 2026, 2099] {
            for sequence in [0_u32, 1, 42, 9_999, 10_000, 123_456] {
                let tag = checksum(year, sequence);
                assert!(tag <= 999, "checksum {tag} out of range");
                assert_eq!(tag, checksum(year, sequence));
            }
        }
    }

    #[test]
    fn test_checksum_known_values() {
        // base = 25 * 10000 + 1 = 250001, mod 1000 = 1
        assert_eq!(checksum(2025, 1), 1);
        // base = 25 * 10000 + 1234 = 251234, mod 1000 = 234
        assert_eq!(checksum(2025, 1234), 234);
        // base = 0 * 10000 + 999 = 999
        assert_eq!(checksum(2000, 999), 999);
    }

    #[test]
    fn test_checksum_handles_negative_years() {
        // Floored modulo keeps the year component non-negative.
        assert!(checksum(-1, 5) <= 999);
    }

    #[test]
    fn test_display_layout() {
        let id = AccountId::new(2025, 1);
        assert_eq!(id.to_string(), "25-0001-001");

        let id = AccountId::new(2026, 123);
        assert_eq!(id.to_string(), "26-0123-123");
    }

    #[test]
    fn test_parse_round_trip() {
        let id = AccountId::new(2025, 47);
        let parsed = AccountId::parse(&id.to_string()).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(parsed, id);
        assert_eq!(parsed.year_suffix(), 25);
        assert_eq!(parsed.sequence(), 47);
    }

    #[test]
    fn test_parse_rejects_malformed_layout() {
        for bad in [
            "",
            "25",
            "25-0001",
            "25-0001-001-9",
            "2025-0001-001",
            "25-001-001",
            "25-0001-01",
            "ab-0001-001",
            "25-00x1-001",
            "25-0001-0x1",
        ] {
            assert!(
                AccountId::parse(bad).is_err(),
                "expected '{bad}' to be rejected"
            );
        }
    }

    #[test]
    fn test_parse_rejects_inconsistent_checksum() {
        // 25-0001 has checksum 001; anything else must fail.
        assert!(AccountId::parse("25-0001-002").is_err());
        assert!(AccountId::parse("25-0001-001").is_ok());
    }

    #[test]
    fn test_year_prefix() {
        assert_eq!(AccountId::year_prefix(2025), "25-");
        assert_eq!(AccountId::year_prefix(2003), "03-");
    }

    #[test]
    fn test_sequence_beyond_four_digits_still_round_trips() {
        let id = AccountId::new(2025, 12_345);
        let text = id.to_string();
        assert_eq!(text, "25-12345-345");
        assert_eq!(AccountId::parse(&text).unwrap_or_else(|e| panic!("{e}")), id);
    }
}
