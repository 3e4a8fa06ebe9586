//! JSON codec for persisted UI state
//!
//! Reads are fail-open: a missing key, an empty string and malformed JSON all
//! come back as `None`. Callers treat "nothing saved" and "garbage saved" the
//! same way and fall back to their defaults.
//!
//! Writes treat JSON `null` as absence, and reads treat a stored `null` the
//! same way, so a cleared value never reads back as `Some(Value::Null)`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::platform::{KeyValueStore, RouteParams};

/// Joins a namespace prefix and a logical key into a storage token
pub const STORAGE_KEY_SEPARATOR: char = '-';

/// Full storage key for `key` under `prefix` (e.g. `filters-orders`)
pub fn storage_token(prefix: &str, key: &str) -> String {
    format!("{prefix}{STORAGE_KEY_SEPARATOR}{key}")
}

/// Deepest array/object nesting that survives a decode.
///
/// `serde_json` refuses to parse past 127 nested containers, so `encode`
/// refuses to produce anything deeper.
pub const MAX_NESTING_DEPTH: usize = 127;

/// Decode a raw persisted string.
///
/// `None`, `""`, a literal `null` and anything that is not valid JSON decode
/// to `None`.
pub fn decode(raw: Option<&str>) -> Option<Value> {
    let raw = raw.filter(|s| !s.is_empty())?;
    match serde_json::from_str(raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring malformed persisted value: {}", e);
            None
        }
    }
}

/// Decode straight into a typed value. A shape mismatch counts as malformed.
pub fn decode_as<T: DeserializeOwned>(raw: Option<&str>) -> Option<T> {
    match serde_json::from_value(decode(raw)?) {
        Ok(value) => Some(value),
        Err(e) => {
            log::debug!("Ignoring persisted value of unexpected shape: {}", e);
            None
        }
    }
}

/// Encode a value as JSON text.
///
/// `Ok(None)` means the value is null and nothing should be persisted.
/// Values that cannot be represented (non-string map keys, nesting deeper
/// than [`MAX_NESTING_DEPTH`]) are an error.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Option<String>, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    if value.is_null() {
        return Ok(None);
    }
    let depth = nesting_depth(&value);
    if depth > MAX_NESTING_DEPTH {
        return Err(serde::ser::Error::custom(format!(
            "nesting depth {depth} exceeds {MAX_NESTING_DEPTH}"
        )));
    }
    serde_json::to_string(&value).map(Some)
}

fn nesting_depth(value: &Value) -> usize {
    let mut deepest = 0;
    let mut pending = vec![(value, 0)];
    while let Some((value, depth)) = pending.pop() {
        match value {
            Value::Array(items) => {
                deepest = deepest.max(depth + 1);
                pending.extend(items.iter().map(|v| (v, depth + 1)));
            }
            Value::Object(fields) => {
                deepest = deepest.max(depth + 1);
                pending.extend(fields.values().map(|v| (v, depth + 1)));
            }
            _ => {}
        }
    }
    deepest
}

/// Persistence codec over an injected key-value store
#[derive(Debug, Clone, Default)]
pub struct PersistenceCodec<S> {
    store: S,
}

impl<S: KeyValueStore> PersistenceCodec<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read `key` from the route's query parameters
    pub fn get_from_url<R: RouteParams + ?Sized>(&self, key: &str, route: &R) -> Option<Value> {
        decode(route.get(key).as_deref())
    }

    /// Typed variant of [`Self::get_from_url`]
    pub fn get_from_url_as<T, R>(&self, key: &str, route: &R) -> Option<T>
    where
        T: DeserializeOwned,
        R: RouteParams + ?Sized,
    {
        decode_as(route.get(key).as_deref())
    }

    /// Read `prefix-key` from the store
    pub fn get_from_storage(&self, key: &str, prefix: &str) -> Option<Value> {
        decode(self.store.get_item(&storage_token(prefix, key)).as_deref())
    }

    /// Typed variant of [`Self::get_from_storage`]
    pub fn get_from_storage_as<T: DeserializeOwned>(&self, key: &str, prefix: &str) -> Option<T> {
        decode_as(self.store.get_item(&storage_token(prefix, key)).as_deref())
    }

    /// Write `value` under `prefix-key`. A null value removes the entry.
    ///
    /// A value that cannot be encoded leaves the previous entry in place.
    pub fn set_to_storage<T: Serialize + ?Sized>(&self, key: &str, prefix: &str, value: &T) {
        let token = storage_token(prefix, key);
        match encode(value) {
            Ok(Some(json)) => self.store.set_item(&token, &json),
            Ok(None) => self.store.remove_item(&token),
            Err(e) => log::warn!("Not persisting {}: {}", token, e),
        }
    }

    /// Text to put in the `key` query parameter; `Ok(None)` means drop it
    pub fn encode_for_url<T: Serialize + ?Sized>(
        &self,
        value: &T,
    ) -> Result<Option<String>, serde_json::Error> {
        encode(value)
    }

    /// Restore state for `key`, preferring the URL over storage.
    ///
    /// A shared link carries its state in the URL, so that wins. If the URL
    /// has nothing usable (absent, empty or malformed) the session copy
    /// under `prefix-key` is used.
    pub fn restore<R: RouteParams + ?Sized>(
        &self,
        key: &str,
        route: &R,
        prefix: &str,
    ) -> Option<Value> {
        self.get_from_url(key, route)
            .or_else(|| self.get_from_storage(key, prefix))
    }

    /// Typed variant of [`Self::restore`]
    pub fn restore_as<T, R>(&self, key: &str, route: &R, prefix: &str) -> Option<T>
    where
        T: DeserializeOwned,
        R: RouteParams + ?Sized,
    {
        self.get_from_url_as(key, route)
            .or_else(|| self.get_from_storage_as(key, prefix))
    }
}
