//! Per-key log rate limiting.
//!
//! Overlapping gateway calls can all hit the same condition at once (every
//! panel on a page receiving 401 together). Callers ask [`should_emit`] before
//! logging and report how many events were swallowed since the last emission.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, OnceLock};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct Window {
    opened_at: Instant,
    suppressed: u64,
}

static WINDOWS: OnceLock<Mutex<HashMap<&'static str, Window>>> = OnceLock::new();

/// Returns `Some(suppressed_count)` when an event for `key` should be logged,
/// or `None` when it falls inside the open window and is counted instead.
pub fn should_emit(key: &'static str, interval: Duration) -> Option<u64> {
    let mut windows = WINDOWS
        .get_or_init(|| Mutex::new(HashMap::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let now = Instant::now();

    match windows.entry(key) {
        Entry::Vacant(slot) => {
            slot.insert(Window {
                opened_at: now,
                suppressed: 0,
            });
            Some(0)
        }
        Entry::Occupied(mut slot) => {
            let window = slot.get_mut();
            if now.duration_since(window.opened_at) >= interval {
                let suppressed = window.suppressed;
                window.opened_at = now;
                window.suppressed = 0;
                Some(suppressed)
            } else {
                window.suppressed += 1;
                None
            }
        }
    }
}
