use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::User;

/// The client's belief about who is logged in. At most one user is held.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Unauthenticated,
    Authenticated(User),
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            SessionState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }
}

/// Process-wide, observable holder of the current [`SessionState`].
///
/// Cloning the store yields another handle onto the same state. Observers get a
/// `watch::Receiver` from [`subscribe`](Self::subscribe) and are woken on every
/// change. Queries such as [`has_role`](Self::has_role) always read the live
/// value, so they never answer from a snapshot taken at subscribe time.
#[derive(Clone, Debug)]
pub struct SessionStore {
    state: Arc<watch::Sender<SessionState>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// A new store starts Unauthenticated.
    pub fn new() -> Self {
        let (state, _) = watch::channel(SessionState::Unauthenticated);
        Self {
            state: Arc::new(state),
        }
    }

    pub fn get(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    /// Replace whatever is held with `user`.
    pub fn set_user(&self, user: User) {
        debug!(user_id = user.id, "session set to authenticated user");
        self.state.send_replace(SessionState::Authenticated(user));
    }

    /// Set a probe/login result: `None` means Unauthenticated.
    pub fn set(&self, user: Option<User>) {
        match user {
            Some(user) => self.set_user(user),
            None => {
                self.clear();
            }
        }
    }

    /// Drop the held user. Returns whether anything changed; clearing an
    /// already cleared store does not wake observers.
    pub fn clear(&self) -> bool {
        let changed = self.state.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });
        if changed {
            debug!("session cleared");
        }
        changed
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// True iff a user is held and their role set contains `role`.
    pub fn has_role(&self, role: &str) -> bool {
        self.state
            .borrow()
            .user()
            .is_some_and(|user| user.has_role(role))
    }

    /// Permission gate check: an empty gate is always open, otherwise any one
    /// of the listed roles must be held.
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        if roles.is_empty() {
            return true;
        }
        let state = self.state.borrow();
        match state.user() {
            Some(user) => roles.iter().any(|role| user.has_role(role.as_ref())),
            None => false,
        }
    }
}
