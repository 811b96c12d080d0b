//! Session state and the auth calls that keep it in sync with the backend.

pub mod auth;
pub mod store;

pub use auth::AuthClient;
pub use store::{SessionState, SessionStore};
