//! HTTP client for the HubSpot CRM API.
//!
//! This module provides a synchronous, blocking client built on `ureq`. It handles
//! bearer authentication, request pacing, retries on 429 responses and error
//! mapping. Every call is a single request/response; conflicts on contacts and
//! association labels are recovered in place.

mod api;
mod throttle;

pub use api::CrmApi;
pub use throttle::{backoff_delay, parse_retry_after, Throttle, MAX_BACKOFF};

use crate::config::Config;
use crate::domain::{require, RecordId};
use crate::error::{CrmApiError, CrmApiResult};
use crate::metrics::Metrics;
use crate::models::{
    ApiErrorBody, AssociationSpec, CreateLabelRequest, CreateObjectRequest, CrmObject,
    LabelsResponse, NewCompany, NewContact, SearchRequest, SearchResponse, EMPLOYEE_LABEL,
    EMPLOYEE_LABEL_NAME,
};
use std::sync::Arc;
use std::time::{Duration, Instant};

const CONTACTS_PATH: &str = "/crm/v3/objects/contacts";
const CONTACTS_SEARCH_PATH: &str = "/crm/v3/objects/contacts/search";
const COMPANIES_PATH: &str = "/crm/v3/objects/companies";
const COMPANIES_SEARCH_PATH: &str = "/crm/v3/objects/companies/search";
const LABELS_PATH: &str = "/crm/v4/associations/contacts/companies/labels";

/// HTTP client for the HubSpot CRM API.
///
/// Cloning is cheap; clones share the agent, throttle and metrics.
#[derive(Clone)]
pub struct HubSpotClient {
    /// Base URL for the API
    base_url: String,

    /// Bearer token
    api_key: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    /// Request pacing shared by all clones
    throttle: Arc<Throttle>,

    /// Retries allowed after a 429
    max_retries: u32,

    /// First backoff step when no Retry-After is given
    retry_backoff: Duration,

    /// Metrics collector
    metrics: Metrics,
}

impl HubSpotClient {
    /// Create a new client from configuration.
    pub fn new(config: &Config) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            agent: Arc::new(agent),
            throttle: Arc::new(Throttle::new(Duration::from_millis(config.call_delay_ms))),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
            metrics: Metrics::new(),
        }
    }

    /// Create a client with a custom base URL and no pacing or retries (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String, api_key: String) -> Self {
        Self::new(&Config::for_base_url(base_url, api_key))
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Send one request, pacing it and retrying while the API answers 429.
    ///
    /// Error statuses listed in `recoverable` are returned without being counted
    /// as errors; the caller records them if its recovery fails.
    fn execute<F>(
        &self,
        method: &str,
        path: &str,
        recoverable: &[u16],
        send: F,
    ) -> CrmApiResult<ureq::Response>
    where
        F: Fn(ureq::Request) -> Result<ureq::Response, ureq::Error>,
    {
        let url = self.build_url(path);
        let auth = format!("Bearer {}", self.api_key);
        let mut attempt = 0;

        loop {
            self.throttle.wait();

            let request = self
                .agent
                .request(method, &url)
                .set("Authorization", &auth)
                .set("Content-Type", "application/json");

            tracing::debug!("{} {}", method, url);
            let start = Instant::now();
            let result = send(request);
            self.metrics.record_http_request(start.elapsed());

            match result {
                Ok(response) => {
                    tracing::debug!("{} {} - status {}", method, url, response.status());
                    return Ok(response);
                }
                Err(ureq::Error::Status(429, response)) if attempt < self.max_retries => {
                    attempt += 1;
                    let retry_after = parse_retry_after(response.header("retry-after"));
                    let delay = backoff_delay(attempt, self.retry_backoff, retry_after);
                    self.metrics.record_http_retry();
                    tracing::warn!(
                        "Rate limited on {} {}, retry {}/{} in {:?}",
                        method,
                        url,
                        attempt,
                        self.max_retries,
                        delay
                    );
                    std::thread::sleep(delay);
                }
                Err(e) => {
                    let err = self.map_error(e);
                    if !Self::is_recoverable(&err, recoverable) {
                        self.metrics.record_http_error();
                    }
                    tracing::debug!("{} {} - {}", method, url, err);
                    return Err(err);
                }
            }
        }
    }

    fn is_recoverable(err: &CrmApiError, recoverable: &[u16]) -> bool {
        matches!(err, CrmApiError::ApiError { status, .. } if recoverable.contains(status))
    }

    /// Count a recoverable error status once its recovery has failed.
    fn escalate<T>(&self, result: CrmApiResult<T>) -> CrmApiResult<T> {
        if result.is_err() {
            self.metrics.record_http_error();
        }
        result
    }

    /// Execute a GET request with authentication.
    fn get(&self, path: &str) -> CrmApiResult<ureq::Response> {
        self.execute("GET", path, &[], |request| request.call())
    }

    /// Execute a POST request with authentication and JSON body.
    fn post(&self, path: &str, body: &serde_json::Value) -> CrmApiResult<ureq::Response> {
        self.post_recoverable(path, body, &[])
    }

    /// Execute a POST request whose `recoverable` error statuses the caller handles.
    fn post_recoverable(
        &self,
        path: &str,
        body: &serde_json::Value,
        recoverable: &[u16],
    ) -> CrmApiResult<ureq::Response> {
        self.execute("POST", path, recoverable, |request| request.send_json(body))
    }

    /// Execute a PUT request with authentication and JSON body.
    fn put(&self, path: &str, body: &serde_json::Value) -> CrmApiResult<ureq::Response> {
        self.execute("PUT", path, &[], |request| request.send_json(body))
    }

    /// Map a ureq error to a CrmApiError.
    fn map_error(&self, error: ureq::Error) -> CrmApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let retry_after = parse_retry_after(response.header("retry-after"));
                let message = response
                    .into_string()
                    .unwrap_or_else(|_| "Unknown error".to_string());

                match code {
                    401 => CrmApiError::Unauthorized,
                    404 => CrmApiError::NotFound(message),
                    429 => CrmApiError::RateLimitExceeded { retry_after },
                    _ => CrmApiError::ApiError {
                        status: code,
                        message,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                let detail = transport.to_string();
                if transport.kind() == ureq::ErrorKind::Io && detail.contains("timed out") {
                    CrmApiError::Timeout
                } else if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    CrmApiError::HttpError(format!("Connection failed: {}", detail))
                } else {
                    CrmApiError::HttpError(detail)
                }
            }
        }
    }

    /// Read a response body, failing unless its status is one of `expected`.
    fn expect_status(
        response: ureq::Response,
        operation: &'static str,
        expected: &[u16],
    ) -> CrmApiResult<String> {
        let status = response.status();
        let body = response
            .into_string()
            .map_err(|e| CrmApiError::HttpError(e.to_string()))?;

        if !expected.contains(&status) {
            return Err(CrmApiError::UnexpectedStatus {
                operation,
                status,
                body,
            });
        }
        Ok(body)
    }

    /// Exact-match search returning the first hit's ID.
    fn search_first(
        &self,
        path: &str,
        property: &str,
        value: &str,
    ) -> CrmApiResult<Option<RecordId>> {
        let request = SearchRequest::property_equals(property, value, 1);
        let body = serde_json::to_value(&request)?;

        let response = self.post(path, &body)?;
        let text = Self::expect_status(response, "search", &[200])?;
        let found: SearchResponse = serde_json::from_str(&text)?;

        Ok(found.results.into_iter().next().map(|object| object.id))
    }

    // ========================= Contact Operations =========================

    /// Create a contact and return its ID.
    ///
    /// When a contact with the same email already exists (409), the existing ID is
    /// taken from the tail of the conflict message; if that fails, the contact is
    /// looked up by email instead.
    pub fn create_contact(
        &self,
        email: &str,
        firstname: &str,
        lastname: &str,
    ) -> CrmApiResult<RecordId> {
        let contact = NewContact::new(email, firstname, lastname);
        contact.validate()?;

        let body = serde_json::to_value(CreateObjectRequest::new(&contact))?;

        match self.post_recoverable(CONTACTS_PATH, &body, &[409]) {
            Ok(response) => {
                let text = Self::expect_status(response, "create contact", &[201])?;
                let created: CrmObject = serde_json::from_str(&text)?;

                tracing::info!("Created contact {} for {}", created.id, email);
                self.metrics.record_contact_created();
                Ok(created.id)
            }
            Err(CrmApiError::ApiError {
                status: 409,
                message,
            }) => {
                let id = self.escalate(self.recover_existing_contact(email, &message))?;
                tracing::info!("Contact for {} already exists as {}", email, id);
                self.metrics.record_http_recovered();
                self.metrics.record_contact_reused();
                Ok(id)
            }
            Err(e) => Err(e),
        }
    }

    /// Resolve the existing contact behind a 409 response.
    fn recover_existing_contact(&self, email: &str, raw_body: &str) -> CrmApiResult<RecordId> {
        let message = ApiErrorBody::message_of(raw_body);

        if let Some(id) = RecordId::from_conflict_message(&message) {
            return Ok(id);
        }

        tracing::warn!(
            "Could not read existing contact ID from conflict message, searching by email: {}",
            message
        );

        self.find_contact_by_email(email)?
            .ok_or(CrmApiError::ConflictUnresolved(message))
    }

    /// Look up a contact by exact email.
    pub fn find_contact_by_email(&self, email: &str) -> CrmApiResult<Option<RecordId>> {
        require("email", email)?;
        self.search_first(CONTACTS_SEARCH_PATH, "email", email)
    }

    // ========================= Company Operations =========================

    /// Create a company and return its ID.
    ///
    /// There is no conflict handling: every successful call creates a new record.
    pub fn create_company(&self, name: &str, domain: &str) -> CrmApiResult<RecordId> {
        let company = NewCompany::new(name, domain);
        company.validate()?;

        let body = serde_json::to_value(CreateObjectRequest::new(&company))?;
        let response = self.post(COMPANIES_PATH, &body)?;
        let text = Self::expect_status(response, "create company", &[201])?;
        let created: CrmObject = serde_json::from_str(&text)?;

        tracing::info!("Created company {} for {}", created.id, domain);
        self.metrics.record_company_created();
        Ok(created.id)
    }

    /// Look up a company by exact domain.
    pub fn find_company_by_domain(&self, domain: &str) -> CrmApiResult<Option<RecordId>> {
        require("domain", domain)?;
        let found = self.search_first(COMPANIES_SEARCH_PATH, "domain", domain)?;
        if found.is_some() {
            self.metrics.record_company_reused();
        }
        Ok(found)
    }

    // ========================= Association Operations =========================

    /// Ensure the "Employee" contact-to-company label exists and return its type ID.
    pub fn ensure_employee_label(&self) -> CrmApiResult<u64> {
        self.ensure_label(EMPLOYEE_LABEL_NAME, EMPLOYEE_LABEL)
    }

    /// Create a contact-to-company label, or find it when it already exists.
    pub fn ensure_label(&self, name: &str, label: &str) -> CrmApiResult<u64> {
        let body = serde_json::to_value(CreateLabelRequest { name, label })?;

        match self.post_recoverable(LABELS_PATH, &body, &[400]) {
            Ok(response) => {
                let text = Self::expect_status(response, "create association label", &[200, 201])?;
                let created: LabelsResponse = serde_json::from_str(&text)?;

                let type_id = created
                    .find(label)
                    .or_else(|| created.results.first().map(|item| item.type_id))
                    .ok_or_else(|| {
                        CrmApiError::UnexpectedResponse(
                            "label creation returned no results".to_string(),
                        )
                    })?;

                tracing::info!("Created association label '{}' with type {}", label, type_id);
                Ok(type_id)
            }
            Err(CrmApiError::ApiError {
                status: 400,
                message,
            }) if message.to_lowercase().contains("already exists") => {
                tracing::debug!("Association label '{}' already exists, looking it up", label);
                let type_id = self.escalate(self.find_label(label))?;
                self.metrics.record_http_recovered();
                Ok(type_id)
            }
            Err(e @ CrmApiError::ApiError { status: 400, .. }) => self.escalate(Err(e)),
            Err(e) => Err(e),
        }
    }

    /// Scan the contact-to-company labels for one with the given display label.
    pub fn find_label(&self, label: &str) -> CrmApiResult<u64> {
        let response = self.get(LABELS_PATH)?;
        let text = Self::expect_status(response, "list association labels", &[200])?;
        let labels: LabelsResponse = serde_json::from_str(&text)?;

        labels
            .find(label)
            .ok_or_else(|| CrmApiError::LabelNotFound(label.to_string()))
    }

    /// Link a contact to a company with the given association type.
    pub fn add_contact_to_company(
        &self,
        contact_id: &RecordId,
        company_id: &RecordId,
        label_id: u64,
    ) -> CrmApiResult<()> {
        let path = format!(
            "/crm/v4/objects/contact/{}/associations/company/{}",
            urlencoding::encode(contact_id.as_str()),
            urlencoding::encode(company_id.as_str())
        );
        let body = serde_json::to_value(vec![AssociationSpec::user_defined(label_id)])?;

        let response = self.put(&path, &body)?;
        Self::expect_status(response, "associate contact with company", &[200, 201, 204])?;

        tracing::info!(
            "Successfully linked contact {} to company {} (association type {})",
            contact_id,
            company_id,
            label_id
        );
        Ok(())
    }
}

impl CrmApi for HubSpotClient {
    fn create_contact(
        &self,
        email: &str,
        firstname: &str,
        lastname: &str,
    ) -> CrmApiResult<RecordId> {
        HubSpotClient::create_contact(self, email, firstname, lastname)
    }

    fn find_contact_by_email(&self, email: &str) -> CrmApiResult<Option<RecordId>> {
        HubSpotClient::find_contact_by_email(self, email)
    }

    fn create_company(&self, name: &str, domain: &str) -> CrmApiResult<RecordId> {
        HubSpotClient::create_company(self, name, domain)
    }

    fn find_company_by_domain(&self, domain: &str) -> CrmApiResult<Option<RecordId>> {
        HubSpotClient::find_company_by_domain(self, domain)
    }

    fn ensure_employee_label(&self) -> CrmApiResult<u64> {
        HubSpotClient::ensure_employee_label(self)
    }

    fn add_contact_to_company(
        &self,
        contact_id: &RecordId,
        company_id: &RecordId,
        label_id: u64,
    ) -> CrmApiResult<()> {
        HubSpotClient::add_contact_to_company(self, contact_id, company_id, label_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_url() {
        let client = HubSpotClient::with_base_url(
            "https://api.example.com".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client.build_url(CONTACTS_PATH),
            "https://api.example.com/crm/v3/objects/contacts"
        );

        let client_with_slash = HubSpotClient::with_base_url(
            "https://api.example.com/".to_string(),
            "test-key".to_string(),
        );

        assert_eq!(
            client_with_slash.build_url("crm/v3/objects/companies"),
            "https://api.example.com/crm/v3/objects/companies"
        );
    }

    #[test]
    fn test_client_creation() {
        let config = Config {
            api_key: "pat-test".to_string(),
            max_retries: 5,
            ..Config::default()
        };

        let client = HubSpotClient::new(&config);
        assert_eq!(client.base_url, "https://api.hubapi.com");
        assert_eq!(client.api_key, "pat-test");
        assert_eq!(client.max_retries, 5);
        assert_eq!(client.retry_backoff, Duration::from_millis(500));
    }

    #[test]
    fn test_validation_happens_before_network() {
        // Port 9 is never contacted: validation fails first.
        let client =
            HubSpotClient::with_base_url("http://127.0.0.1:9".to_string(), "k".to_string());

        assert!(matches!(
            client.create_company("", "acme.com"),
            Err(CrmApiError::Validation(_))
        ));
        assert!(matches!(
            client.create_contact("a@b.com", "", "B"),
            Err(CrmApiError::Validation(_))
        ));
        assert_eq!(client.metrics().http_requests_total(), 0);
    }
}
