//! Service layer.
//!
//! Business workflows built on top of the CRM client.

pub mod employment_sync;

pub use employment_sync::{Employment, EmploymentSync, SyncOutcome};
