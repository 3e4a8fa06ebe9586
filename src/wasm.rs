//! JavaScript bindings (WASM only)
//!
//! Values cross the boundary as JSON through `JSON.parse`/`JSON.stringify`;
//! `null` and `undefined` both mean "nothing persisted". A value that cannot
//! be stringified (BigInt, cycles) is never written.

use std::cell::RefCell;

use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::persistence::{self, PersistenceCodec};
use crate::platform::{self, KeyValueStore, LocationParams};
use crate::settings::PersistenceSettings;

thread_local! {
    static CODEC: RefCell<PersistenceCodec<Box<dyn KeyValueStore>>> =
        RefCell::new(PersistenceSettings::default().codec());
}

#[wasm_bindgen(start)]
pub fn start() {
    platform::init_logging(log::Level::Info);
}

/// Replace the active settings (prefix is still passed per call)
#[wasm_bindgen]
pub fn configure(settings_json: &str) {
    let settings = PersistenceSettings::from_json(settings_json);
    log::info!("Persistence backend: {}", settings.backend.as_str());
    CODEC.with(|codec| *codec.borrow_mut() = settings.codec());
}

#[wasm_bindgen(js_name = getFromUrl)]
pub fn get_from_url(key: &str) -> JsValue {
    let Some(route) = LocationParams::current() else {
        return JsValue::NULL;
    };
    to_js(CODEC.with(|codec| codec.borrow().get_from_url(key, &route)))
}

#[wasm_bindgen(js_name = getFromStorage)]
pub fn get_from_storage(key: &str, prefix: &str) -> JsValue {
    to_js(CODEC.with(|codec| codec.borrow().get_from_storage(key, prefix)))
}

/// URL first, then storage
#[wasm_bindgen]
pub fn restore(key: &str, prefix: &str) -> JsValue {
    let value = CODEC.with(|codec| {
        let codec = codec.borrow();
        match LocationParams::current() {
            Some(route) => codec.restore(key, &route, prefix),
            None => codec.get_from_storage(key, prefix),
        }
    });
    to_js(value)
}

#[wasm_bindgen(js_name = setToStorage)]
pub fn set_to_storage(key: &str, prefix: &str, value: JsValue) {
    let Some(value) = from_js(&value) else {
        log::warn!("Not persisting {}: value is not JSON", key);
        return;
    };
    CODEC.with(|codec| codec.borrow().set_to_storage(key, prefix, &value));
}

/// JSON text for a query parameter, `undefined` to drop it.
/// Throws when the value has no JSON form.
#[wasm_bindgen(js_name = encodeForUrl)]
pub fn encode_for_url(value: JsValue) -> Result<Option<String>, JsError> {
    let value = from_js(&value).ok_or_else(|| JsError::new("value is not JSON"))?;
    persistence::encode(&value).map_err(|e| JsError::new(&e.to_string()))
}

#[wasm_bindgen(js_name = relationsToId)]
pub fn relations_to_id(value: JsValue) -> JsValue {
    to_js(from_js(&value).map(|v| persistence::relations_to_id(&v)))
}

fn to_js(value: Option<Value>) -> JsValue {
    value
        .and_then(|v| serde_json::to_string(&v).ok())
        .and_then(|text| js_sys::JSON::parse(&text).ok())
        .unwrap_or(JsValue::NULL)
}

/// `None` when the value has no JSON form; `null`/`undefined` are `Value::Null`
fn from_js(value: &JsValue) -> Option<Value> {
    if value.is_null() || value.is_undefined() {
        return Some(Value::Null);
    }
    let text = js_sys::JSON::stringify(value).ok()?.as_string()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Value from JS does not parse back: {}", e);
            None
        }
    }
}
