//! Save/load of UI state through the URL and session storage
//!
//! Features:
//! - JSON codec with fail-open decoding
//! - Namespaced storage tokens (`prefix-key`)
//! - URL-over-storage precedence on restore
//! - Relation-to-id payload transform

pub mod codec;
pub mod relations;

pub use codec::{PersistenceCodec, STORAGE_KEY_SEPARATOR, decode, decode_as, encode, storage_token};
pub use relations::relations_to_id;
