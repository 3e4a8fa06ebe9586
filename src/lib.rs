//! State Persist - UI state that survives navigation
//!
//! Core modules:
//! - `persistence`: JSON codec (URL parameter and storage round-trips)
//! - `platform`: Browser/native abstraction (storage backends, route params)
//! - `settings`: Namespace and backend configuration

pub mod persistence;
pub mod platform;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use persistence::{PersistenceCodec, relations_to_id, storage_token};
pub use platform::{KeyValueStore, MemoryStorage, QueryParams, RouteParams};
pub use settings::{PersistenceSettings, StorageBackend};
