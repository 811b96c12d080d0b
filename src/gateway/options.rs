use http::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use http::Method;
use serde::Serialize;
use serde_json::Value;

use crate::error::GatewayError;
use crate::transport::CredentialsMode;

/// Outbound body of a gateway call.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(Value),
    Text(String),
}

impl RequestBody {
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>, GatewayError> {
        match self {
            RequestBody::Json(value) => serde_json::to_vec(&value)
                .map_err(|e| GatewayError::InvalidRequest(format!("unserializable body: {}", e))),
            RequestBody::Text(text) => Ok(text.into_bytes()),
        }
    }
}

/// What a caller passes to [`ApiGateway::call`](super::ApiGateway::call).
/// Consumed by the call; nothing keeps it afterwards.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    /// `None` keeps the gateway default.
    pub credentials: Option<CredentialsMode>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Like [`header`](Self::header) for names and values that still need validating.
    pub fn try_header(self, name: &str, value: &str) -> Result<Self, GatewayError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| GatewayError::InvalidRequest(format!("header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| GatewayError::InvalidRequest(format!("header '{}': {}", name, e)))?;
        Ok(self.header(name, value))
    }

    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, GatewayError> {
        let value = serde_json::to_value(body)
            .map_err(|e| GatewayError::InvalidRequest(format!("unserializable body: {}", e)))?;
        self.body = Some(RequestBody::Json(value));
        Ok(self)
    }

    pub fn text(mut self, body: impl Into<String>) -> Self {
        self.body = Some(RequestBody::Text(body.into()));
        self
    }

    pub fn credentials(mut self, mode: CredentialsMode) -> Self {
        self.credentials = Some(mode);
        self
    }
}

/// Defaults every gateway call starts from.
#[derive(Debug, Clone)]
pub struct RequestDefaults {
    pub headers: HeaderMap,
    pub credentials: CredentialsMode,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        RequestDefaults {
            headers,
            credentials: CredentialsMode::Include,
        }
    }
}

/// Options after merging with [`RequestDefaults`], ready to send.
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
    pub credentials: CredentialsMode,
}

impl RequestDefaults {
    pub fn merge(&self, options: RequestOptions) -> PreparedRequest {
        PreparedRequest {
            method: options.method,
            headers: merge_headers(&self.headers, &options.headers),
            body: options.body,
            credentials: options.credentials.unwrap_or(self.credentials),
        }
    }
}

/// Caller headers replace defaults key by key; untouched defaults survive.
/// Header names compare case-insensitively.
pub fn merge_headers(defaults: &HeaderMap, caller: &HeaderMap) -> HeaderMap {
    let mut merged = defaults.clone();
    for name in caller.keys() {
        merged.remove(name);
    }
    for (name, value) in caller {
        merged.append(name.clone(), value.clone());
    }
    merged
}
