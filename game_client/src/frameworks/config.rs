use std::{env, time::Duration};

// Runtime/client constants.

pub fn push_url() -> String {
    env::var("PUSH_URL").unwrap_or_else(|_| "ws://localhost:5000/listen".to_string())
}

pub fn api_base_url() -> String {
    env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_string())
}

// Session credential sent on the push handshake and on every command.
pub fn session_cookie() -> Option<String> {
    env::var("SESSION_COOKIE")
        .ok()
        .filter(|value| !value.trim().is_empty())
}

pub fn request_timeout() -> Duration {
    let millis = env::var("REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(5000);
    Duration::from_millis(millis)
}

pub const GESTURE_CHANNEL_CAPACITY: usize = 64;
