//! Collapse related objects to their ids
//!
//! Mutation payloads reference other records by id, while the values held by
//! a form carry the full related objects. [`relations_to_id`] turns
//!
//! ```json
//! {"id": 7, "author": {"id": 1, "name": "Ann"}, "tags": [{"id": 3}, {"id": 4}]}
//! ```
//!
//! into `{"id": 7, "author": 1, "tags": [3, 4]}`.

use serde_json::{Map, Value};

const ID_FIELD: &str = "id";

/// Replace every nested object that has an `id` with that id.
///
/// The root object keeps its own `id`. Nested objects without an `id` are
/// walked recursively; arrays are mapped element by element. A root array is
/// treated as a list of root objects. The input is not modified.
pub fn relations_to_id(value: &Value) -> Value {
    match value {
        Value::Object(fields) => Value::Object(map_fields(fields)),
        Value::Array(items) => Value::Array(items.iter().map(relations_to_id).collect()),
        other => other.clone(),
    }
}

fn map_fields(fields: &Map<String, Value>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(name, value)| (name.clone(), relation(value)))
        .collect()
}

fn relation(value: &Value) -> Value {
    match value {
        Value::Object(fields) => match fields.get(ID_FIELD) {
            Some(id) => id.clone(),
            None => Value::Object(map_fields(fields)),
        },
        Value::Array(items) => Value::Array(items.iter().map(relation).collect()),
        other => other.clone(),
    }
}
