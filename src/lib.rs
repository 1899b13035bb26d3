//! CRM Employee Sync - records a contact's employment at a company in HubSpot.
//!
//! The library creates (or reuses) a contact, creates a company, ensures an
//! "Employee" association label exists between contacts and companies, and links
//! the two records with that label.
//!
//! # Architecture
//!
//! - **config**: Configuration management from environment variables
//! - **error**: Custom error types for precise error handling
//! - **domain**: Record ID value object and input validation
//! - **models**: Request and response bodies for the CRM API
//! - **client**: Blocking HTTP client with pacing and 429 retries
//! - **metrics**: Request and record counters for a run
//! - **services**: The employment sync workflow

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod services;

pub use client::{CrmApi, HubSpotClient};
pub use config::Config;
pub use domain::{RecordId, ValidationError};
pub use error::{ConfigError, CrmApiError, CrmApiResult};
pub use metrics::{Metrics, MetricsSummary};
pub use models::{NewCompany, NewContact};
pub use services::{Employment, EmploymentSync, SyncOutcome};
