//! The CRM operations the employment sync depends on.

use crate::domain::RecordId;
use crate::error::CrmApiResult;

/// CRM operations used by the employment sync.
///
/// Implemented by [`HubSpotClient`](super::HubSpotClient) for the real API and
/// by test doubles that record call order.
pub trait CrmApi {
    /// Create a contact, or recover the ID of the existing contact with the same email.
    fn create_contact(&self, email: &str, firstname: &str, lastname: &str)
        -> CrmApiResult<RecordId>;

    /// Look up a contact by exact email.
    fn find_contact_by_email(&self, email: &str) -> CrmApiResult<Option<RecordId>>;

    /// Create a company. Always creates a new record.
    fn create_company(&self, name: &str, domain: &str) -> CrmApiResult<RecordId>;

    /// Look up a company by exact domain.
    fn find_company_by_domain(&self, domain: &str) -> CrmApiResult<Option<RecordId>>;

    /// Ensure the "Employee" contact-to-company label exists and return its type ID.
    fn ensure_employee_label(&self) -> CrmApiResult<u64>;

    /// Link a contact to a company with the given association type.
    fn add_contact_to_company(
        &self,
        contact_id: &RecordId,
        company_id: &RecordId,
        label_id: u64,
    ) -> CrmApiResult<()>;
}
