use std::collections::VecDeque;
use std::sync::Mutex;

use tracing::info;

/// How a navigation is carried out by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationKind {
    /// In-app route change; client state survives.
    ClientSide,
    /// Full page load of the target location; client state is rebuilt.
    FullReload,
}

/// A navigation that was requested through a [`Navigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub location: String,
    pub kind: NavigationKind,
}

/// The seam through which the session layer moves the user between views.
///
/// The gateway and the auth client never navigate on their own; they ask the
/// injected navigator, so hosts (and tests) decide what a redirect means.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str, kind: NavigationKind);
}

/// Entries a [`HistoryNavigator`] keeps by default.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

/// Default navigator for non-browser hosts: logs every requested navigation
/// and keeps the most recent ones in order, dropping the oldest past `limit`.
#[derive(Debug)]
pub struct HistoryNavigator {
    history: Mutex<VecDeque<NavigationEntry>>,
    limit: usize,
}

impl Default for HistoryNavigator {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `limit` entries (at least one).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        HistoryNavigator {
            history: Mutex::new(VecDeque::with_capacity(limit)),
            limit,
        }
    }

    pub fn history(&self) -> Vec<NavigationEntry> {
        self.history
            .lock()
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// The location of the most recent navigation, if any happened.
    pub fn current_location(&self) -> Option<String> {
        self.history
            .lock()
            .ok()
            .and_then(|history| history.back().map(|entry| entry.location.clone()))
    }

    pub fn count_to(&self, path: &str) -> usize {
        self.history()
            .iter()
            .filter(|entry| location_path(&entry.location) == path)
            .count()
    }
}

impl Navigator for HistoryNavigator {
    fn navigate(&self, location: &str, kind: NavigationKind) {
        info!(
            event_name = "navigation.requested",
            event_domain = "navigation",
            location,
            kind = ?kind,
            "navigating"
        );
        if let Ok(mut history) = self.history.lock() {
            if history.len() == self.limit {
                history.pop_front();
            }
            history.push_back(NavigationEntry {
                location: location.to_string(),
                kind,
            });
        }
    }
}

/// Strip the query string from a location.
pub fn location_path(location: &str) -> &str {
    location.split_once('?').map_or(location, |(path, _)| path)
}
