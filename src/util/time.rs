use std::time::{SystemTime, UNIX_EPOCH};

/// Get a timestamp in seconds since the UNIX epoch
pub fn timestamp_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
