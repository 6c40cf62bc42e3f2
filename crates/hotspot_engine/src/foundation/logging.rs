//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Panics if a global logger was already installed; hosts that may call this
/// more than once should use [`try_init`].
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, ignoring an already installed logger
///
/// Returns `true` when this call installed the logger.
pub fn try_init() -> bool {
    env_logger::builder().is_test(cfg!(test)).try_init().is_ok()
}
