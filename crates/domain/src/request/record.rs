//! Request record type

use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

use super::{Headers, HttpMethod};
use crate::error::{DomainError, DomainResult};

/// Descriptor of one HTTP call made through the authenticated transport.
///
/// A record is never mutated while in flight. Decoration (auth headers,
/// base URL resolution) produces a new record, so a replay after a token
/// refresh is built from the caller's original descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRequest {
    /// Unique identifier, used to correlate log lines of one call
    pub id: Uuid,
    /// HTTP method
    pub method: HttpMethod,
    /// Target, either a path relative to the API base URL or an absolute URL
    pub url: String,
    /// HTTP headers
    #[serde(default)]
    pub headers: Headers,
    /// Optional JSON body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Creates a request with no headers and no body.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7(),
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Returns the request with the header set (replacing any previous value).
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Returns the request with a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the request with a serializable payload as JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be represented as JSON.
    pub fn with_payload<T: Serialize>(self, payload: &T) -> DomainResult<Self> {
        let body =
            serde_json::to_value(payload).map_err(|e| DomainError::InvalidBody(e.to_string()))?;
        Ok(self.with_json(body))
    }

    /// Returns true if the target is an absolute `http(s)` URL.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.url.starts_with("http://") || self.url.starts_with("https://")
    }

    /// Resolves the target against a base URL.
    ///
    /// Absolute targets are returned unchanged. Relative targets are joined
    /// with exactly one `/` between base and path, so `http://h/api` and
    /// `/orders/` give `http://h/api/orders/`.
    #[must_use]
    pub fn resolve_url(&self, base_url: &str) -> String {
        if self.is_absolute() {
            return self.url.clone();
        }
        format!(
            "{}/{}",
            base_url.trim_end_matches('/'),
            self.url.trim_start_matches('/')
        )
    }

    /// Parses the target as an absolute URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is relative or malformed.
    pub fn parse_url(&self) -> DomainResult<Url> {
        Url::parse(&self.url).map_err(|e| DomainError::InvalidUrl(format!("{e}: {}", self.url)))
    }

    /// Returns the bearer token carried in the `Authorization` header, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.headers
            .get("Authorization")
            .and_then(|v| v.strip_prefix("Bearer "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn relative_targets_join_with_single_slash() {
        let req = ApiRequest::get("/orders/in-transit/?verified=true");
        assert_eq!(
            req.resolve_url("http://localhost:8000/api/"),
            "http://localhost:8000/api/orders/in-transit/?verified=true"
        );

        let req = ApiRequest::get("orders/ofd/");
        assert_eq!(
            req.resolve_url("http://localhost:8000/api"),
            "http://localhost:8000/api/orders/ofd/"
        );
    }

    #[test]
    fn absolute_targets_are_untouched() {
        let req = ApiRequest::get("https://other.example.com/x");
        assert!(req.is_absolute());
        assert_eq!(req.resolve_url("http://ignored"), "https://other.example.com/x");
    }

    #[test]
    fn bearer_token_reads_authorization_header() {
        let req = ApiRequest::post("/orders/make-call/")
            .with_header("authorization", "Bearer abc123")
            .with_json(json!({"awb": "X1"}));

        assert_eq!(req.bearer_token(), Some("abc123"));
        assert_eq!(req.body, Some(json!({"awb": "X1"})));
    }

    #[test]
    fn relative_target_does_not_parse_as_url() {
        assert!(ApiRequest::get("/orders/").parse_url().is_err());
    }
}
