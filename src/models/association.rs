//! Association labels and contact-to-company association payloads.

use serde::{Deserialize, Serialize};

/// Display label of the employment relationship.
pub const EMPLOYEE_LABEL: &str = "Employee";

/// Internal name used when creating the employment label.
pub const EMPLOYEE_LABEL_NAME: &str = "employee";

/// Who defined an association type.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociationCategory {
    HubspotDefined,
    UserDefined,
    IntegratorDefined,
}

/// One association type between two object types.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssociationLabel {
    pub category: AssociationCategory,

    /// Numeric association type ID used when linking records
    pub type_id: u64,

    /// Display label; unlabeled (default) types have none
    #[serde(default)]
    pub label: Option<String>,
}

impl AssociationLabel {
    /// Whether this entry carries the given display label.
    pub fn has_label(&self, label: &str) -> bool {
        self.label.as_deref() == Some(label)
    }
}

/// Response of the label create and list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelsResponse {
    #[serde(default)]
    pub results: Vec<AssociationLabel>,
}

impl LabelsResponse {
    /// Type ID of the first entry with the given label.
    pub fn find(&self, label: &str) -> Option<u64> {
        self.results
            .iter()
            .find(|item| item.has_label(label))
            .map(|item| item.type_id)
    }
}

/// Request body for creating an association label.
#[derive(Debug, Clone, Serialize)]
pub struct CreateLabelRequest<'a> {
    pub name: &'a str,
    pub label: &'a str,
}

/// One entry of the body sent when associating two records.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSpec {
    pub association_category: AssociationCategory,
    pub association_type_id: u64,
}

impl AssociationSpec {
    /// Spec for a user-defined label.
    pub fn user_defined(type_id: u64) -> Self {
        Self {
            association_category: AssociationCategory::UserDefined,
            association_type_id: type_id,
        }
    }
}
