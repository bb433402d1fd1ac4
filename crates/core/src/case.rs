//! Case identifier type.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A case number: the opaque, stable identifier of a case.
///
/// Used both as the access-tracker key and as the owner key for stored files.
/// The format is caller-defined; the only requirement here is that it is not
/// empty or whitespace-only.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseNumber(String);

impl CaseNumber {
    /// Create from a string, rejecting empty or whitespace-only input.
    pub fn new(number: impl Into<String>) -> crate::Result<Self> {
        let number = number.into();
        if number.trim().is_empty() {
            return Err(crate::Error::InvalidCaseNumber(
                "case number must not be empty".to_string(),
            ));
        }
        Ok(Self(number))
    }

    /// Get the case number string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CaseNumber({self})")
    }
}

impl fmt::Display for CaseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
