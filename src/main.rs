//! State Persist demo
//!
//! Native only: walks a filter through the URL and in-memory storage.
//! The browser build is driven from JS through the `wasm` bindings.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use serde_json::json;
    use state_persist::{PersistenceSettings, QueryParams, relations_to_id};

    state_persist::platform::init_logging(log::Level::Info);
    log::info!("State Persist (native) starting...");

    let settings = PersistenceSettings::default();
    let prefix = settings.storage_key_prefix.as_str();
    let codec = settings.codec();

    let filter = json!({"status": ["open"], "owner": {"id": 42, "name": "Ann"}, "page": 3});

    // Navigation: filter goes into the URL and the session copy
    let mut params = QueryParams::new();
    match codec.encode_for_url(&filter) {
        Ok(encoded) => params.set_or_remove("orders", encoded),
        Err(e) => log::warn!("Filter cannot go into the URL: {}", e),
    }
    codec.set_to_storage("orders", prefix, &filter);
    let query = params.to_query_string();
    log::info!("Navigating to ?{}", query);

    // Reload from the link
    let route = QueryParams::parse(&query);
    match codec.restore("orders", &route, prefix) {
        Some(restored) => {
            log::info!("Restored filter: {}", restored);
            log::info!("Mutation payload: {}", relations_to_id(&restored));
        }
        None => log::warn!("Nothing persisted for orders"),
    }

    // A mangled link falls back to the session copy
    let broken = QueryParams::parse("orders=%7B%22status");
    match codec.restore("orders", &broken, prefix) {
        Some(restored) => log::info!("Recovered from storage: {}", restored),
        None => log::warn!("Nothing persisted for orders"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm::start, this is just to satisfy the compiler
}
