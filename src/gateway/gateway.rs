use std::sync::Arc;
use std::time::Duration;

use http::header::{CONTENT_TYPE, HeaderMap};
use http::{Method, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{Instrument, debug, error, info_span, warn};
use uuid::Uuid;

use super::options::{RequestDefaults, RequestOptions};
use crate::config::{ApiConfig, RoutesConfig};
use crate::error::GatewayError;
use crate::navigation::{NavigationKind, Navigator, RedirectReason, login_location};
use crate::session::SessionStore;
use crate::transport::Transport;
use crate::utils::log_throttle::should_emit;
use crate::utils::value::message_field;

const SESSION_EXPIRED_LOG_WINDOW: Duration = Duration::from_secs(10);

/// A successful gateway response.
#[derive(Debug)]
pub enum ApiResponse {
    /// The body was JSON and has been decoded.
    Json(Value),
    /// Anything else, left for the caller to read.
    Raw(reqwest::Response),
}

impl ApiResponse {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            ApiResponse::Json(value) => Some(value),
            ApiResponse::Raw(_) => None,
        }
    }
}

/// The single chokepoint for backend calls.
///
/// Every call is sent with the merged defaults (JSON content type, cookies
/// included). A 401 from any endpoint clears the session and requests a
/// client-side redirect to the login view; no other component reacts to
/// network responses by touching the session or navigating.
pub struct ApiGateway {
    base_url: String,
    login_path: String,
    defaults: RequestDefaults,
    transport: Arc<Transport>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl ApiGateway {
    pub fn new(
        api: &ApiConfig,
        routes: &RoutesConfig,
        transport: Arc<Transport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        ApiGateway {
            base_url: api.base_url.clone(),
            login_path: routes.login_path.clone(),
            defaults: RequestDefaults::default(),
            transport,
            session,
            navigator,
        }
    }

    /// Issue `options` against `base_url + endpoint`.
    ///
    /// # Errors
    ///
    /// - `SessionExpired` on 401, after the session was cleared and the redirect requested.
    /// - `Api` for any other non-success status, carrying the body's `message` when present.
    /// - `Transport` when the request never got a response. Nothing is retried.
    pub async fn call(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, GatewayError> {
        let span = info_span!(
            "gateway.call",
            request_id = %Uuid::new_v4(),
            method = %options.method,
            endpoint
        );
        self.send(endpoint, options).instrument(span).await
    }

    pub async fn get(&self, endpoint: &str) -> Result<ApiResponse, GatewayError> {
        self.call(endpoint, RequestOptions::new()).await
    }

    pub async fn post_json<B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<ApiResponse, GatewayError> {
        let options = RequestOptions::new().method(Method::POST).json(body)?;
        self.call(endpoint, options).await
    }

    /// Like [`call`](Self::call), decoding the JSON response into `T`.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, GatewayError> {
        match self.call(endpoint, options).await? {
            ApiResponse::Json(value) => {
                serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))
            }
            ApiResponse::Raw(response) => Err(GatewayError::Decode(format!(
                "expected a JSON response, got content type {:?}",
                response.headers().get(CONTENT_TYPE)
            ))),
        }
    }

    async fn send(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<ApiResponse, GatewayError> {
        let prepared = self.defaults.merge(options);
        let url = format!("{}{}", self.base_url, endpoint);
        debug!(url = url.as_str(), credentials = ?prepared.credentials, "sending request");

        let mut request = self
            .transport
            .client(prepared.credentials)
            .request(prepared.method, &url)
            .headers(prepared.headers);
        if let Some(body) = prepared.body {
            request = request.body(body.into_bytes()?);
        }

        let response = request
            .send()
            .await
            .map_err(GatewayError::from)
            .inspect_err(log_fetch_failure)?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.expire_session();
            return Err(GatewayError::SessionExpired);
        }

        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| message_field(&body))
                .unwrap_or_else(|| format!("API error: {}", status.as_u16()));
            warn!(
                event_name = "gateway.api_error",
                event_domain = "gateway",
                status = status.as_u16(),
                message = message.as_str(),
                "request failed"
            );
            return Err(GatewayError::Api { message, status });
        }

        if is_json(response.headers()) {
            let bytes = response
                .bytes()
                .await
                .map_err(GatewayError::from)
                .inspect_err(log_fetch_failure)?;
            let value: Value = serde_json::from_slice(&bytes)
                .map_err(|e| GatewayError::Decode(e.to_string()))
                .inspect_err(log_fetch_failure)?;
            Ok(ApiResponse::Json(value))
        } else {
            Ok(ApiResponse::Raw(response))
        }
    }

    /// Clear the session and send the user to the login view. Safe to run from
    /// many overlapping calls: clearing twice is a no-op, and each call asks for
    /// its own redirect.
    fn expire_session(&self) {
        let cleared = self.session.clear();
        if let Some(suppressed_count) =
            should_emit("gateway.session_expired", SESSION_EXPIRED_LOG_WINDOW)
        {
            warn!(
                event_name = "gateway.session_expired",
                event_domain = "gateway",
                cleared,
                suppressed_count,
                "session expired, redirecting to login"
            );
        }
        let location = login_location(&self.login_path, Some(RedirectReason::SessionExpired));
        self.navigator.navigate(&location, NavigationKind::ClientSide);
    }
}

/// A call that got no usable response: the request failed, or the success
/// body could not be read or decoded.
fn log_fetch_failure(e: &GatewayError) {
    let event_name = match e {
        GatewayError::Decode(_) => "gateway.decode.failed",
        _ => "gateway.transport.failed",
    };
    error!(
        event_name,
        event_domain = "gateway",
        error = %e,
        "fetch failed"
    );
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.contains("application/json"))
}
