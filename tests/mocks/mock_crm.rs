use crm_employee_sync::client::CrmApi;
use crm_employee_sync::domain::{require, RecordId};
use crm_employee_sync::error::{CrmApiError, CrmApiResult};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// In-memory CRM for testing the sync workflow.
///
/// Records every call in order and can be told to fail a named operation.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockCrm {
    contacts: Arc<Mutex<HashMap<String, RecordId>>>,
    companies: Arc<Mutex<Vec<(String, RecordId)>>>,
    label: Arc<Mutex<Option<u64>>>,
    associations: Arc<Mutex<Vec<(RecordId, RecordId, u64)>>>,
    calls: Arc<Mutex<Vec<&'static str>>>,
    fail_on: Arc<Mutex<Option<&'static str>>>,
    next_id: Arc<Mutex<u64>>,
}

#[allow(dead_code)]
impl MockCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `operation` fail with a 500 the next time it is called.
    pub fn fail_on(&self, operation: &'static str) {
        *self.fail_on.lock().unwrap() = Some(operation);
    }

    pub fn add_company(&self, domain: &str, id: &str) {
        self.companies
            .lock()
            .unwrap()
            .push((domain.to_string(), RecordId::new(id).unwrap()));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn company_count(&self) -> usize {
        self.companies.lock().unwrap().len()
    }

    pub fn associations(&self) -> Vec<(RecordId, RecordId, u64)> {
        self.associations.lock().unwrap().clone()
    }

    fn enter(&self, operation: &'static str) -> CrmApiResult<()> {
        self.calls.lock().unwrap().push(operation);
        if *self.fail_on.lock().unwrap() == Some(operation) {
            return Err(CrmApiError::ApiError {
                status: 500,
                message: format!("{} failed", operation),
            });
        }
        Ok(())
    }

    fn allocate_id(&self) -> RecordId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        RecordId::new(format!("{}", 1000 + *next)).unwrap()
    }
}

impl CrmApi for MockCrm {
    fn create_contact(
        &self,
        email: &str,
        firstname: &str,
        lastname: &str,
    ) -> CrmApiResult<RecordId> {
        require("email", email)?;
        require("firstname", firstname)?;
        require("lastname", lastname)?;
        self.enter("create_contact")?;

        if let Some(existing) = self.contacts.lock().unwrap().get(email) {
            return Ok(existing.clone());
        }
        let id = self.allocate_id();
        self.contacts
            .lock()
            .unwrap()
            .insert(email.to_string(), id.clone());
        Ok(id)
    }

    fn find_contact_by_email(&self, email: &str) -> CrmApiResult<Option<RecordId>> {
        self.enter("find_contact_by_email")?;
        Ok(self.contacts.lock().unwrap().get(email).cloned())
    }

    fn create_company(&self, name: &str, domain: &str) -> CrmApiResult<RecordId> {
        require("name", name)?;
        require("domain", domain)?;
        self.enter("create_company")?;

        let id = self.allocate_id();
        self.add_company(domain, id.as_str());
        Ok(id)
    }

    fn find_company_by_domain(&self, domain: &str) -> CrmApiResult<Option<RecordId>> {
        self.enter("find_company_by_domain")?;
        Ok(self
            .companies
            .lock()
            .unwrap()
            .iter()
            .find(|(d, _)| d == domain)
            .map(|(_, id)| id.clone()))
    }

    fn ensure_employee_label(&self) -> CrmApiResult<u64> {
        self.enter("ensure_employee_label")?;
        let mut label = self.label.lock().unwrap();
        Ok(*label.get_or_insert(36))
    }

    fn add_contact_to_company(
        &self,
        contact_id: &RecordId,
        company_id: &RecordId,
        label_id: u64,
    ) -> CrmApiResult<()> {
        self.enter("add_contact_to_company")?;
        self.associations
            .lock()
            .unwrap()
            .push((contact_id.clone(), company_id.clone(), label_id));
        Ok(())
    }
}
