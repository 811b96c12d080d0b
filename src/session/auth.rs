use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error, info, warn};

use super::store::SessionStore;
use crate::config::{ApiConfig, RoutesConfig};
use crate::models::user::MeResponse;
use crate::models::{Credentials, LoginResult, User};
use crate::navigation::{NavigationKind, Navigator, login_location};
use crate::transport::{CredentialsMode, Transport};
use crate::utils::value::message_field;

pub const ME_PATH: &str = "/api/v1/auth/me";
pub const LOGIN_PATH: &str = "/api/v1/auth/login";
pub const LOGOUT_PATH: &str = "/api/v1/auth/logout";

const LOGIN_FAILED: &str = "Login failed";

/// Talks to the backend's `/api/v1/auth/*` endpoints and keeps the
/// [`SessionStore`] in line with the answers.
pub struct AuthClient {
    auth_base_url: String,
    login_path: String,
    transport: Arc<Transport>,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl AuthClient {
    pub fn new(
        api: &ApiConfig,
        routes: &RoutesConfig,
        transport: Arc<Transport>,
        session: SessionStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        AuthClient {
            auth_base_url: api.auth_base_url.clone(),
            login_path: routes.login_path.clone(),
            transport,
            session,
            navigator,
        }
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.auth_base_url, path)
    }

    /// Seed the session from the "who am I" endpoint.
    ///
    /// Never fails: any transport or parse problem leaves the session
    /// Unauthenticated and is reported through tracing.
    pub async fn initialize(&self) {
        match self.probe().await {
            Ok(user) => {
                match &user {
                    Some(user) => info!(user_id = user.id, "session restored"),
                    None => info!("no active session"),
                }
                self.session.set(user);
            }
            Err(e) => {
                error!(
                    event_name = "session.probe.failed",
                    event_domain = "session",
                    error = e.as_str(),
                    "failed to load user"
                );
                self.session.clear();
            }
        }
    }

    /// The status code is not inspected. Whatever JSON comes back decides the
    /// state; a body that is not JSON counts as a failure.
    async fn probe(&self) -> Result<Option<User>, String> {
        let response = self
            .transport
            .client(CredentialsMode::Include)
            .get(self.url(ME_PATH))
            .send()
            .await
            .map_err(|e| format!("Error sending request: {}", e))?;
        debug!(status = response.status().as_u16(), "session probe answered");

        let body: MeResponse = response
            .json()
            .await
            .map_err(|e| format!("Error parsing JSON: {}", e))?;
        Ok(body.user)
    }

    /// Log in with `credentials`.
    ///
    /// On success the returned user becomes the session. On failure the result
    /// carries a message for the UI and the session is left as it was, so a
    /// failed attempt does not log out a user who is already signed in.
    pub async fn login(&self, credentials: &Credentials) -> LoginResult {
        debug!(email = credentials.email.as_str(), "attempting login");
        let response = match self
            .transport
            .client(CredentialsMode::Include)
            .post(self.url(LOGIN_PATH))
            .json(credentials)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    event_name = "session.login.transport_failed",
                    event_domain = "session",
                    error = %e,
                    "login request failed"
                );
                return LoginResult::failure(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|body| message_field(&body))
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            info!(
                event_name = "session.login.rejected",
                event_domain = "session",
                status = status.as_u16(),
                message = message.as_str(),
                "login rejected"
            );
            return LoginResult::failure(message);
        }

        match response.json::<User>().await {
            Ok(user) => {
                info!(user_id = user.id, "login succeeded");
                self.session.set_user(user);
                LoginResult::success()
            }
            Err(e) => {
                warn!(error = %e, "login response was not a user");
                LoginResult::failure(format!("Error parsing login response: {}", e))
            }
        }
    }

    /// Log out. The backend is told on a best-effort basis; whatever happens
    /// there, the session ends up cleared and the user lands on the login view
    /// through a full page navigation.
    pub async fn logout(&self) {
        match self
            .transport
            .client(CredentialsMode::Include)
            .post(self.url(LOGOUT_PATH))
            .send()
            .await
        {
            Ok(response) if response.status().is_success() => debug!("backend session ended"),
            Ok(response) => warn!(
                event_name = "session.logout.rejected",
                event_domain = "session",
                status = response.status().as_u16(),
                "logout endpoint returned an error"
            ),
            Err(e) => error!(
                event_name = "session.logout.failed",
                event_domain = "session",
                error = %e,
                "logout failed"
            ),
        }

        self.session.clear();
        self.navigator
            .navigate(&login_location(&self.login_path, None), NavigationKind::FullReload);
    }
}
