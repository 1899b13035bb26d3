//! Search request/response bodies for the object search endpoints.

use super::object::CrmObject;
use serde::{Deserialize, Serialize};

/// Comparison operators supported by the search filters used here.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterOperator {
    Eq,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

/// Body of a `POST /crm/v3/objects/{type}/search` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    pub properties: Vec<String>,
    pub limit: u32,
}

impl SearchRequest {
    /// Exact-match search on a single property, returning at most `limit` hits.
    pub fn property_equals(property: &str, value: &str, limit: u32) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: property.to_string(),
                    operator: FilterOperator::Eq,
                    value: value.to_string(),
                }],
            }],
            properties: vec![property.to_string()],
            limit,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<CrmObject>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_equals_body() {
        let body = SearchRequest::property_equals("email", "a@b.com", 1);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "filterGroups": [{"filters": [
                    {"propertyName": "email", "operator": "EQ", "value": "a@b.com"}
                ]}],
                "properties": ["email"],
                "limit": 1
            })
        );
    }

    #[test]
    fn test_search_response_empty() {
        let response: SearchResponse =
            serde_json::from_str(r#"{"total": 0, "results": []}"#).unwrap();
        assert!(response.results.is_empty());
    }
}
