//! Data models for CRM entities.
//!
//! Request and response bodies for contacts, companies, association labels
//! and object search.

pub mod association;
pub mod company;
pub mod contact;
pub mod object;
pub mod search;

pub use association::{
    AssociationCategory, AssociationLabel, AssociationSpec, CreateLabelRequest, LabelsResponse,
    EMPLOYEE_LABEL, EMPLOYEE_LABEL_NAME,
};
pub use company::NewCompany;
pub use contact::NewContact;
pub use object::{ApiErrorBody, CreateObjectRequest, CrmObject};
pub use search::{SearchRequest, SearchResponse};
