// src/collector/sys.rs
//! System-level info: sample timestamps.

/// Function to generate a timestamp in epoch time.
pub fn get_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
