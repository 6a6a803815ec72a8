//! Logging utilities
//!
//! The crate logs through the `log` facade; binaries pick the sink. These
//! helpers wire up `env_logger` for hosts that don't bring their own.

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system from the environment (`RUST_LOG`).
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system, tolerating an earlier initialization.
///
/// Embedded hosts and test harnesses may have already installed a logger;
/// this variant is safe to call unconditionally.
pub fn try_init() {
    let _ = env_logger::try_init();
}
