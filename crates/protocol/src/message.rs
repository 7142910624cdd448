//! Formatos JSON das requisições e respostas HTTP.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetStringRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
    /// Segundos; ausente ou não-positivo significa sem expiração.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStringRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetStringResponse {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl GetStringResponse {
    pub fn new(value: String, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            value,
            expires_at: expires_at.map(format_expiry),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetListRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateListRequest {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GetListResponse {
    pub list: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

impl GetListResponse {
    pub fn new(list: Vec<String>, expires_at: Option<DateTime<Utc>>) -> Self {
        Self {
            list,
            expires_at: expires_at.map(format_expiry),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopResponse {
    pub value: String,
}

/// Query `?key=` usada por GET, DELETE e POP.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyQuery {
    #[serde(default)]
    pub key: String,
}

/// Query `?key=&value=` usada por PUSH.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PushQuery {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// RFC 3339 em UTC com sufixo `Z`, precisão de segundos.
pub fn format_expiry(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn expiry_is_rfc3339_utc() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        assert_eq!(format_expiry(at), "2024-05-01T12:30:00Z");
    }

    #[test]
    fn get_response_omits_missing_expiry() {
        let body = serde_json::to_value(GetStringResponse::new("v".into(), None)).unwrap();
        assert_eq!(body, json!({ "value": "v" }));
    }

    #[test]
    fn list_response_includes_expiry() {
        let at = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let body = serde_json::to_value(GetListResponse::new(vec!["a".into()], Some(at))).unwrap();
        assert_eq!(
            body,
            json!({ "list": ["a"], "expires_at": "2030-01-01T00:00:00Z" })
        );
    }

    #[test]
    fn set_request_ttl_is_optional() {
        let req: SetStringRequest = serde_json::from_value(json!({ "key": "k", "value": "v" })).unwrap();
        assert_eq!(req.ttl, None);

        let req: SetListRequest =
            serde_json::from_value(json!({ "key": "k", "list": ["a"], "ttl": 60 })).unwrap();
        assert_eq!(req.ttl, Some(60));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let req: UpdateStringRequest = serde_json::from_value(json!({})).unwrap();
        assert!(req.key.is_empty());
        assert!(req.value.is_empty());
    }
}
