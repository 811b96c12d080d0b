#![allow(dead_code)]

use std::io;
use std::sync::{Arc, Mutex};

use figment::{
    Figment,
    providers::{Format, Yaml},
};
use sessiongate::config::{ConfigV1, extract_config};
use sessiongate::models::User;
use sessiongate::navigation::HistoryNavigator;
use sessiongate::startup::build_state;
use sessiongate::state::AppState;

pub const USER_JSON: &str =
    r#"{"id":1,"firstName":"A","lastName":"B","email":"a@b.com","roles":["user"]}"#;

/// Config pointing both the gateway and the auth endpoints at `server_url`.
pub fn test_config(server_url: &str) -> ConfigV1 {
    let yaml = format!(
        r#"
version: "1.0.0"
logging:
  level: "debug"
  format: "json"
api:
  base_url: "{server_url}/api"
  auth_base_url: "{server_url}"
routes:
  login_path: "/login"
navigation:
  sidebar:
    - label: Dashboard
      href: /dashboard
    - label: Admin
      href: /admin
      permissions: [admin]
"#
    );
    extract_config(&Figment::new().merge(Yaml::string(&yaml))).expect("test config should parse")
}

pub fn build_app(server_url: &str) -> (AppState, Arc<HistoryNavigator>) {
    let navigator = Arc::new(HistoryNavigator::new());
    let state = build_state(Arc::new(test_config(server_url)), navigator.clone())
        .expect("failed to build app state");
    (state, navigator)
}

pub fn signed_in_user(roles: &[&str]) -> User {
    User::new(
        1,
        "A",
        "B",
        "a@b.com",
        Some(roles.iter().map(|r| r.to_string()).collect()),
    )
}

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    /// Install a plain-text subscriber writing into this capture for the
    /// current thread, until the guard is dropped.
    pub fn install(&self) -> tracing::subscriber::DefaultGuard {
        let writer = self.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn error_lines(&self) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains("ERROR"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Ok(mut bytes) = self.0.lock() {
            bytes.extend_from_slice(buf);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
