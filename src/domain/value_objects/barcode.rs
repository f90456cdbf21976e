//! # Barcode
//!
//! The scan code used as the product lookup key.
//!
//! # Examples
//!
//! ```
//! use getproduct::domain::value_objects::Barcode;
//!
//! let barcode = Barcode::new(" 4601234567890 ").unwrap();
//! assert_eq!(barcode.as_str(), "4601234567890");
//!
//! assert!(Barcode::new("   ").is_err());
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// A non-empty product barcode.
///
/// Surrounding whitespace is trimmed on construction; the remaining value
/// must not be empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Barcode(String);

impl Barcode {
    /// Creates a barcode from raw input.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBarcode` if the input is blank.
    pub fn new(value: impl AsRef<str>) -> DomainResult<Self> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::invalid_barcode("barcode must not be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the barcode as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the barcode and returns the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Barcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Barcode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Barcode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for Barcode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_whitespace() {
        let barcode = Barcode::new("  111\t").unwrap();
        assert_eq!(barcode.as_str(), "111");
    }

    #[test]
    fn new_rejects_empty() {
        assert!(matches!(
            Barcode::new(""),
            Err(DomainError::InvalidBarcode(_))
        ));
        assert!(Barcode::new(" \n ").is_err());
    }

    #[test]
    fn parse_from_str() {
        let barcode: Barcode = "4601234567890".parse().unwrap();
        assert_eq!(barcode.to_string(), "4601234567890");
    }

    #[test]
    fn serde_is_transparent() {
        let barcode = Barcode::new("111").unwrap();
        let json = serde_json::to_string(&barcode).unwrap();
        assert_eq!(json, "\"111\"");

        let back: Barcode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, barcode);
    }

    #[test]
    fn deserialize_rejects_blank() {
        let result: Result<Barcode, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
