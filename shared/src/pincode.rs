use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::PINCODE_LENGTH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum PincodeError {
    #[error("expected {expected} characters, got {len}", expected = PINCODE_LENGTH)]
    WrongLength { len: usize },
    #[error("non-digit {found:?} at position {position}")]
    NonDigit { position: usize, found: char },
}

/// Validated 6-digit postal code. Immutable after construction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pincode(String);

impl Pincode {
    pub fn parse(raw: &str) -> Result<Self, PincodeError> {
        let len = raw.chars().count();
        if len != PINCODE_LENGTH {
            return Err(PincodeError::WrongLength { len });
        }

        // ASCII only: the API rejects other Unicode digits.
        if let Some((position, found)) = raw.chars().enumerate().find(|(_, c)| !c.is_ascii_digit())
        {
            return Err(PincodeError::NonDigit { position, found });
        }

        Ok(Self(raw.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pincode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Pincode {
    type Error = PincodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_six_ascii_digits() {
        let pincode = Pincode::parse("110001").unwrap();
        assert_eq!(pincode.as_str(), "110001");
        assert_eq!(pincode.to_string(), "110001");
    }

    #[test]
    fn rejects_short_and_long_input() {
        assert_eq!(Pincode::parse(""), Err(PincodeError::WrongLength { len: 0 }));
        assert_eq!(Pincode::parse("11000"), Err(PincodeError::WrongLength { len: 5 }));
        assert_eq!(Pincode::parse("1100011"), Err(PincodeError::WrongLength { len: 7 }));
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(
            Pincode::parse("11000a"),
            Err(PincodeError::NonDigit { position: 5, found: 'a' })
        );
        assert!(Pincode::parse(" 11000").is_err());
        assert!(Pincode::parse("1e1000").is_err());
        assert!(Pincode::parse("-11000").is_err());
        assert!(Pincode::parse("11.000").is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // Six characters, one of them multi-byte.
        assert!(matches!(
            Pincode::parse("11000٣"),
            Err(PincodeError::NonDigit { position: 5, .. })
        ));
    }

    proptest! {
        #[test]
        fn any_six_ascii_digits_parse(raw in "[0-9]{6}") {
            let pincode = Pincode::parse(&raw).unwrap();
            prop_assert_eq!(pincode.as_str(), raw.as_str());
        }

        #[test]
        fn wrong_length_never_parses(raw in "[0-9]{0,5}|[0-9]{7,12}") {
            prop_assert!(
                matches!(Pincode::parse(&raw), Err(PincodeError::WrongLength { .. })),
                "wrong length accepted"
            );
        }

        #[test]
        fn any_non_digit_is_rejected(
            prefix in "[0-9]{0,5}",
            bad in "[^0-9]",
        ) {
            let mut raw = prefix;
            raw.push_str(&bad);
            while raw.chars().count() < PINCODE_LENGTH {
                raw.push('0');
            }
            prop_assert!(Pincode::parse(&raw).is_err());
        }
    }
}
