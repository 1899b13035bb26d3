//! Company model.

use crate::domain::{require, ValidationError};
use serde::{Deserialize, Serialize};

/// Properties of a company to be created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCompany {
    /// Company name
    pub name: String,

    /// Primary web domain, e.g. `example.com`
    pub domain: String,
}

impl NewCompany {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }

    /// Ensure name and domain are non-empty.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        require("domain", &self.domain)?;
        Ok(())
    }
}
