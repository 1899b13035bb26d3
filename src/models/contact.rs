//! Contact model representing a person in the CRM.

use crate::domain::{require, ValidationError};
use serde::{Deserialize, Serialize};

/// Properties of a contact to be created.
///
/// Property names follow the CRM's internal names, so this serializes directly
/// into the `properties` object of a create request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewContact {
    /// Email address (unique key in the CRM)
    pub email: String,

    /// First name
    pub firstname: String,

    /// Last name
    pub lastname: String,
}

impl NewContact {
    /// Create contact input from its three required fields.
    pub fn new(
        email: impl Into<String>,
        firstname: impl Into<String>,
        lastname: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            firstname: firstname.into(),
            lastname: lastname.into(),
        }
    }

    /// Ensure every field is non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("email", &self.email)?;
        require("firstname", &self.firstname)?;
        require("lastname", &self.lastname)?;
        Ok(())
    }
}
