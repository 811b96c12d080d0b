//! Application startup.
//!
//! Wires the transport, session store, auth client and gateway together and
//! seeds the session from the backend.

use std::sync::Arc;

use tracing::info;

use crate::config::ConfigV1;
use crate::gateway::ApiGateway;
use crate::navigation::{HistoryNavigator, Navigator};
use crate::session::{AuthClient, SessionStore};
use crate::state::AppState;
use crate::transport::Transport;

/// Build the application state around `navigator`. The session starts
/// Unauthenticated; call [`AuthClient::initialize`] to probe the backend.
///
/// # Errors
///
/// Returns an error if the HTTP clients cannot be constructed.
pub fn build_state(
    config: Arc<ConfigV1>,
    navigator: Arc<dyn Navigator>,
) -> Result<AppState, reqwest::Error> {
    let transport = Arc::new(Transport::new()?);
    let session = SessionStore::new();

    let auth = Arc::new(AuthClient::new(
        &config.api,
        &config.routes,
        transport.clone(),
        session.clone(),
        navigator.clone(),
    ));
    let gateway = Arc::new(ApiGateway::new(
        &config.api,
        &config.routes,
        transport,
        session.clone(),
        navigator.clone(),
    ));

    Ok(AppState {
        config,
        session,
        auth,
        gateway,
        navigator,
    })
}

/// Build the state, probe the session and report what the user would see.
///
/// # Errors
///
/// Returns an error if the application state cannot be built.
pub async fn run(config: Arc<ConfigV1>) -> Result<AppState, Box<dyn std::error::Error>> {
    info!(
        api = config.api.base_url.as_str(),
        auth = config.api.auth_base_url.as_str(),
        "Starting session client"
    );
    let state = build_state(config, Arc::new(HistoryNavigator::new()))?;

    state.auth.initialize().await;

    match state.session.current_user() {
        Some(user) => info!(
            user_id = user.id,
            name = user.display_name().as_str(),
            roles = ?user.roles,
            "Signed in"
        ),
        None => info!("Not signed in"),
    }
    let sidebar: Vec<String> = state
        .visible_sidebar()
        .into_iter()
        .map(|item| item.label)
        .collect();
    info!(items = ?sidebar, "Visible sidebar");

    Ok(state)
}
