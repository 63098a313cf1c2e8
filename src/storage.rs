//! Browser `localStorage` access.
//!
//! Every helper degrades to a no-op (or the default value) when there is no
//! window or storage is disabled, so callers never have to handle failure.

use crate::config::{GOAL_MILES, MILES_KEY, STREAM_URL_KEY};
use crate::utils::coerce_number;
use crate::{normalize_stream_url, Goal};
use log::warn;

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn get_string(key: &str) -> Option<String> {
    local_storage().and_then(|s| s.get_item(key).ok().flatten())
}

fn set_string(key: &str, value: &str) {
    match local_storage() {
        Some(s) => {
            if s.set_item(key, value).is_err() {
                warn!("Could not write {} to localStorage", key);
            }
        }
        None => warn!("localStorage unavailable; {} not saved", key),
    }
}

/// Saved stream URL, or an empty string.
pub fn load_stream_url() -> String {
    get_string(STREAM_URL_KEY).unwrap_or_default()
}

/// Trim and persist a stream URL, returning the value that was stored.
pub fn save_stream_url(raw: &str) -> String {
    let url = normalize_stream_url(raw);
    set_string(STREAM_URL_KEY, &url);
    url
}

/// Saved miles, coerced to a number and clamped into the goal range.
pub fn load_stored_miles() -> u32 {
    let raw = get_string(MILES_KEY).unwrap_or_default();
    Goal::default().clamp_miles(coerce_number(&raw))
}

pub fn save_stored_miles(miles: u32) {
    set_string(MILES_KEY, &miles.min(GOAL_MILES).to_string());
}
