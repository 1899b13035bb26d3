//! RecordId value object.

use super::errors::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Number of trailing characters of a conflict message that carry the existing ID.
pub const CONFLICT_ID_LEN: usize = 12;

/// Trailing run of exactly `CONFLICT_ID_LEN` ASCII digits.
static CONFLICT_ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"([0-9]{{{}}})$", CONFLICT_ID_LEN)).expect("conflict ID pattern is valid")
});

/// A type-safe wrapper for CRM record IDs (contacts, companies).
///
/// IDs are opaque strings assigned by the CRM and are never empty.
///
/// # Example
///
/// ```
/// use crm_employee_sync::domain::RecordId;
///
/// let id = RecordId::new("42").unwrap();
/// assert_eq!(id.as_str(), "42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId, validating that it's not empty.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyId` if the provided ID is empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyId);
        }
        Ok(Self(id))
    }

    /// Recover the existing record ID from a "contact already exists" message.
    ///
    /// The CRM appends the existing ID to the end of the message, so the last
    /// `CONFLICT_ID_LEN` characters are taken and must all be ASCII digits. This couples
    /// to an undocumented message format; callers should fall back to a lookup
    /// when it returns `None`.
    pub fn from_conflict_message(message: &str) -> Option<Self> {
        CONFLICT_ID_PATTERN
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| Self(m.as_str().to_string()))
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Convert into the underlying String.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RecordId::new(s).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
