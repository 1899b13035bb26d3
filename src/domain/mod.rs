//! Domain value objects and types.
//!
//! Type-safe wrappers for CRM record identifiers plus the input validation
//! shared by every creation call.

pub mod errors;
pub mod record_id;

pub use errors::{require, ValidationError};
pub use record_id::{RecordId, CONFLICT_ID_LEN};
