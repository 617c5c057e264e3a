//! Browser console logging.

/// Log an informational message.
pub fn info(message: &str) {
    web_sys::console::log_1(&message.into());
}

/// Log a warning.
pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}
