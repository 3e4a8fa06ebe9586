//! Persistence settings
//!
//! Which store backs the codec and which namespace its keys live under.

use serde::{Deserialize, Serialize};

use crate::persistence::PersistenceCodec;
use crate::platform::{KeyValueStore, MemoryStorage};

/// Storage backend preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum StorageBackend {
    /// Browser `sessionStorage`, memory when unavailable
    #[default]
    Session,
    /// In-process map, lost on reload
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Session => "session",
            StorageBackend::Memory => "memory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "session" | "sessionstorage" => Some(StorageBackend::Session),
            "memory" | "mem" => Some(StorageBackend::Memory),
            _ => None,
        }
    }
}

impl TryFrom<String> for StorageBackend {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s).ok_or_else(|| format!("unknown storage backend `{s}`"))
    }
}

/// Persistence settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceSettings {
    /// Namespace prepended to every storage key
    pub storage_key_prefix: String,
    /// Preferred backend
    pub backend: StorageBackend,
}

impl Default for PersistenceSettings {
    fn default() -> Self {
        Self {
            storage_key_prefix: "app".to_string(),
            backend: StorageBackend::Session,
        }
    }
}

impl PersistenceSettings {
    /// Load settings from JSON; malformed input yields the defaults
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Invalid persistence settings ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Open the configured store.
    ///
    /// Falls back to memory when session storage cannot be reached, and on
    /// every non-browser target.
    pub fn open_store(&self) -> Box<dyn KeyValueStore> {
        #[cfg(target_arch = "wasm32")]
        {
            if self.backend == StorageBackend::Session {
                if let Some(storage) = crate::platform::SessionStorage::open() {
                    log::info!("Using sessionStorage");
                    return Box::new(storage);
                }
                log::warn!("sessionStorage unavailable, falling back to memory");
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            if self.backend == StorageBackend::Session {
                log::debug!("No sessionStorage on this target, using memory");
            }
        }

        Box::new(MemoryStorage::new())
    }

    /// Codec over [`Self::open_store`]
    pub fn codec(&self) -> PersistenceCodec<Box<dyn KeyValueStore>> {
        PersistenceCodec::new(self.open_store())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let settings = PersistenceSettings::default();
        assert_eq!(settings.storage_key_prefix, "app");
        assert_eq!(settings.backend, StorageBackend::Session);
    }

    #[test]
    fn test_from_json_partial() {
        let settings = PersistenceSettings::from_json(r#"{"backend":"memory"}"#);
        assert_eq!(settings.backend, StorageBackend::Memory);
        assert_eq!(settings.storage_key_prefix, "app");
    }

    #[test]
    fn test_from_json_backend_aliases() {
        let settings = PersistenceSettings::from_json(r#"{"backend":"MEM"}"#);
        assert_eq!(settings.backend, StorageBackend::Memory);
        let settings =
            PersistenceSettings::from_json(r#"{"backend":"sessionStorage","storage_key_prefix":"crm"}"#);
        assert_eq!(settings.backend, StorageBackend::Session);
        assert_eq!(settings.storage_key_prefix, "crm");
    }

    #[test]
    fn test_settings_survive_reload() {
        let settings = PersistenceSettings {
            storage_key_prefix: "crm".to_string(),
            backend: StorageBackend::Memory,
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(json, r#"{"storage_key_prefix":"crm","backend":"memory"}"#);
        assert_eq!(PersistenceSettings::from_json(&json), settings);
    }

    #[test]
    fn test_from_json_malformed() {
        assert_eq!(
            PersistenceSettings::from_json("{nope"),
            PersistenceSettings::default()
        );
        assert_eq!(
            PersistenceSettings::from_json(r#"{"backend":"disk"}"#),
            PersistenceSettings::default()
        );
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!(StorageBackend::from_str("Session"), Some(StorageBackend::Session));
        assert_eq!(StorageBackend::from_str("mem"), Some(StorageBackend::Memory));
        assert_eq!(StorageBackend::from_str("local"), None);
        assert_eq!(StorageBackend::Memory.as_str(), "memory");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_native_store_is_memory() {
        let settings = PersistenceSettings::default();
        let codec = settings.codec();
        codec.set_to_storage("orders", &settings.storage_key_prefix, &json!({"page": 1}));
        assert_eq!(
            codec.store().get_item("app-orders").as_deref(),
            Some(r#"{"page":1}"#)
        );
    }
}
