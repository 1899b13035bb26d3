//! Generic CRM object envelopes shared by contacts and companies.

use crate::domain::RecordId;
use serde::{Deserialize, Serialize};

/// Request body for creating a CRM object: `{"properties": {...}}`.
#[derive(Debug, Serialize)]
pub struct CreateObjectRequest<'a, P: Serialize> {
    pub properties: &'a P,
}

impl<'a, P: Serialize> CreateObjectRequest<'a, P> {
    pub fn new(properties: &'a P) -> Self {
        Self { properties }
    }
}

/// A CRM object as returned by create and search endpoints.
///
/// Only the ID is read; echoed properties are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct CrmObject {
    pub id: RecordId,
}

/// Error body returned by the CRM on 4xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub message: String,
}

impl ApiErrorBody {
    /// Extract the human-readable message from a raw error body.
    ///
    /// Falls back to the raw body when it is not the expected JSON shape.
    pub fn message_of(raw: &str) -> String {
        match serde_json::from_str::<ApiErrorBody>(raw) {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crm_object_deserialize() {
        let obj: CrmObject = serde_json::from_str(
            r#"{"id": "42", "properties": {"email": "a@b.com", "hs_object_id": "42", "lastname": null}}"#,
        )
        .unwrap();
        assert_eq!(obj.id.as_str(), "42");

        assert!(serde_json::from_str::<CrmObject>(r#"{"id": ""}"#).is_err());
    }

    #[test]
    fn test_error_message_extraction() {
        let raw = r#"{"status":"error","message":"Contact already exists. Existing ID: 000000123456","category":"CONFLICT"}"#;
        assert_eq!(
            ApiErrorBody::message_of(raw),
            "Contact already exists. Existing ID: 000000123456"
        );
        assert_eq!(ApiErrorBody::message_of("plain text"), "plain text");
    }
}
