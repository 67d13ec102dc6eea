//! Logging utilities
//!
//! The runtime only emits records through the `log` facade. Hosts decide
//! whether and how those records are printed.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with `env_logger`
///
/// Safe to call more than once; later calls are ignored.
pub fn init() {
    let _ = env_logger::builder().format_timestamp(None).try_init();
}

/// Initialize logging for tests, capturing output per test
#[cfg(test)]
pub(crate) fn init_test() {
    let _ = env_logger::builder().is_test(true).try_init();
}
