//! Employment sync driver.
//!
//! Runs the four CRM steps for one contact-company relationship in a fixed
//! order: contact, company, label, association. The first failure aborts the
//! run; records created before it are left in place.

use crate::client::CrmApi;
use crate::domain::RecordId;
use crate::error::CrmApiResult;
use crate::models::{NewCompany, NewContact};

/// A person employed by a company, as it should appear in the CRM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employment {
    pub contact: NewContact,
    pub company: NewCompany,
}

impl Employment {
    pub fn new(contact: NewContact, company: NewCompany) -> Self {
        Self { contact, company }
    }
}

/// IDs resolved by a successful sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub contact_id: RecordId,
    pub company_id: RecordId,
    pub label_type_id: u64,
}

/// Sequences the CRM calls that record one employment relationship.
pub struct EmploymentSync<C: CrmApi> {
    client: C,
    dedupe_companies: bool,
}

impl<C: CrmApi> EmploymentSync<C> {
    /// Create a driver that always creates a new company record.
    pub fn new(client: C) -> Self {
        Self {
            client,
            dedupe_companies: false,
        }
    }

    /// Reuse an existing company with the same domain instead of creating one.
    pub fn with_company_dedupe(mut self, enabled: bool) -> Self {
        self.dedupe_companies = enabled;
        self
    }

    /// Access the underlying client.
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Record `employment` in the CRM.
    pub fn sync(&self, employment: &Employment) -> CrmApiResult<SyncOutcome> {
        let contact = &employment.contact;
        let contact_id =
            self.client
                .create_contact(&contact.email, &contact.firstname, &contact.lastname)?;

        let company_id = self.resolve_company(&employment.company)?;

        let label_type_id = self.client.ensure_employee_label()?;

        self.client
            .add_contact_to_company(&contact_id, &company_id, label_type_id)?;

        Ok(SyncOutcome {
            contact_id,
            company_id,
            label_type_id,
        })
    }

    fn resolve_company(&self, company: &NewCompany) -> CrmApiResult<RecordId> {
        if self.dedupe_companies {
            company.validate()?;
            if let Some(existing) = self.client.find_company_by_domain(&company.domain)? {
                tracing::info!(
                    "Reusing company {} for domain {}",
                    existing,
                    company.domain
                );
                return Ok(existing);
            }
        }

        self.client.create_company(&company.name, &company.domain)
    }
}
