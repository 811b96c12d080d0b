/// Why the user was sent to the login view. Carried as `?reason=<value>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectReason {
    SessionExpired,
}

impl RedirectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RedirectReason::SessionExpired => "session_expired",
        }
    }

    /// Text the login view shows for this reason.
    pub fn message(&self) -> &'static str {
        match self {
            RedirectReason::SessionExpired => "Your session has expired. Please log in again.",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "session_expired" => Some(RedirectReason::SessionExpired),
            _ => None,
        }
    }

    /// Read the reason back out of a login location such as
    /// `/login?reason=session_expired`. Unknown reasons are ignored.
    pub fn from_location(location: &str) -> Option<Self> {
        let (_, query) = location.split_once('?')?;
        query
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "reason")
            .and_then(|(_, value)| Self::parse(value))
    }
}

/// Build the login location, optionally tagged with a reason.
pub fn login_location(login_path: &str, reason: Option<RedirectReason>) -> String {
    match reason {
        Some(reason) => format!("{}?reason={}", login_path, reason.as_str()),
        None => login_path.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_login_location_with_reason() {
        assert_eq!(
            login_location("/login", Some(RedirectReason::SessionExpired)),
            "/login?reason=session_expired"
        );
        assert_eq!(login_location("/login", None), "/login");
    }

    #[test]
    fn reads_reason_from_location() {
        assert_eq!(
            RedirectReason::from_location("/login?next=%2Fprojects&reason=session_expired"),
            Some(RedirectReason::SessionExpired)
        );
        assert_eq!(RedirectReason::from_location("/login"), None);
        assert_eq!(RedirectReason::from_location("/login?reason=bogus"), None);
    }

    #[test]
    fn login_view_message_for_reason() {
        let reason = RedirectReason::from_location("/login?reason=session_expired").unwrap();
        assert_eq!(
            reason.message(),
            "Your session has expired. Please log in again."
        );
    }
}
