//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system
///
/// Honours `RUST_LOG`; calling it more than once is harmless.
pub fn init() {
    let _ = env_logger::try_init();
}

/// Initialize the logging system with a default filter used when `RUST_LOG` is unset
pub fn init_with_default_filter(filter: &str) {
    let env = env_logger::Env::default().default_filter_or(filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}
