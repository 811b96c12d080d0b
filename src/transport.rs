//! HTTP transport shared by the auth client and the gateway.
//!
//! The backend keeps the session in a cookie, so every credentialed request
//! must go through the same cookie jar. Requests that omit credentials use a
//! second client that never sends or stores cookies.

use std::sync::Arc;

use reqwest::cookie::Jar;
use serde::{Deserialize, Serialize};

/// Whether cookies accompany a request (`credentials` in fetch terms).
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CredentialsMode {
    #[default]
    Include,
    Omit,
}

#[derive(Debug, Clone)]
pub struct Transport {
    credentialed: reqwest::Client,
    anonymous: reqwest::Client,
}

impl Transport {
    /// Build both clients. No timeouts are set; transport defaults apply.
    pub fn new() -> Result<Self, reqwest::Error> {
        let jar = Arc::new(Jar::default());
        let credentialed = reqwest::Client::builder()
            .cookie_provider(jar)
            .build()?;
        let anonymous = reqwest::Client::builder().build()?;
        Ok(Transport {
            credentialed,
            anonymous,
        })
    }

    pub fn client(&self, mode: CredentialsMode) -> &reqwest::Client {
        match mode {
            CredentialsMode::Include => &self.credentialed,
            CredentialsMode::Omit => &self.anonymous,
        }
    }
}
