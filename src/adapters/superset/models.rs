//! Wire models for the Superset REST API
//!
//! Only the fields supersync actually reads are modelled; the API returns
//! far more, and serde ignores the rest.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/security/login`
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    /// Authentication provider (`db` for local accounts)
    pub provider: String,
    /// Request a refresh token alongside the access token
    pub refresh: bool,
}

/// Response of `POST /api/v1/security/login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Response of `GET /api/v1/security/csrf_token/`
#[derive(Debug, Deserialize)]
pub struct CsrfTokenResponse {
    pub result: String,
}

/// One page of `GET /api/v1/{resource}/`
#[derive(Debug, Deserialize)]
pub struct ListResponse {
    #[serde(default)]
    pub result: Vec<ResourceSummary>,
    /// Total object count across all pages, when the server reports it
    #[serde(default)]
    pub count: Option<u64>,
}

/// One object row from a list response
///
/// Each resource kind names its title field differently
/// (`dashboard_title`, `slice_name`, `table_name`, `database_name`);
/// [`ResourceSummary::name`] picks whichever is present.
#[derive(Debug, Clone, Deserialize)]
pub struct ResourceSummary {
    pub id: u64,
    #[serde(default)]
    pub dashboard_title: Option<String>,
    #[serde(default)]
    pub slice_name: Option<String>,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub database_name: Option<String>,
}

impl ResourceSummary {
    /// Human-readable name, whatever the resource kind calls it
    pub fn name(&self) -> Option<&str> {
        self.dashboard_title
            .as_deref()
            .or(self.slice_name.as_deref())
            .or(self.table_name.as_deref())
            .or(self.database_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_response_deserializes_dashboard_rows() {
        let json = r#"{
            "count": 2,
            "result": [
                {"id": 9, "dashboard_title": "Sales", "published": true},
                {"id": 11, "dashboard_title": "Ops"}
            ]
        }"#;

        let page: ListResponse = serde_json::from_str(json).unwrap();
        assert_eq!(page.count, Some(2));
        assert_eq!(page.result.len(), 2);
        assert_eq!(page.result[0].id, 9);
        assert_eq!(page.result[0].name(), Some("Sales"));
    }

    #[test]
    fn test_resource_summary_name_fallback() {
        let chart: ResourceSummary =
            serde_json::from_str(r#"{"id": 42, "slice_name": "Revenue"}"#).unwrap();
        assert_eq!(chart.name(), Some("Revenue"));

        let dataset: ResourceSummary =
            serde_json::from_str(r#"{"id": 7, "table_name": "orders"}"#).unwrap();
        assert_eq!(dataset.name(), Some("orders"));

        let anonymous: ResourceSummary = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(anonymous.name(), None);
    }

    #[test]
    fn test_login_request_serializes_provider() {
        let req = LoginRequest {
            username: "admin".to_string(),
            password: "admin".to_string(),
            provider: "db".to_string(),
            refresh: true,
        };

        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["provider"], "db");
        assert_eq!(json["refresh"], true);
    }
}
