//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Key-value storage (sessionStorage on web, in-memory elsewhere)
//! - Route/query parameter lookup (location.search on web)
//! - Logger setup

pub mod route;
pub mod storage;

pub use route::{QueryParams, RouteParams};
pub use storage::{KeyValueStore, MemoryStorage};

#[cfg(target_arch = "wasm32")]
pub use route::LocationParams;
#[cfg(target_arch = "wasm32")]
pub use storage::SessionStorage;

/// Install the console logger and panic hook (WASM only).
///
/// Safe to call more than once; later calls are ignored.
#[cfg(target_arch = "wasm32")]
pub fn init_logging(level: log::Level) {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(level).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Install `env_logger`, honouring `RUST_LOG` (native only).
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging(level: log::Level) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(level.as_str()),
    )
    .try_init();
}
