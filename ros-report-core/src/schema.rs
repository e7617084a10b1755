use once_cell::sync::Lazy;
use serde_json::Value;

/// JSON Schema describing the analytics snapshot the report is composed from (Draft 2020-12).
pub static SNAPSHOT_SCHEMA_JSON: &str = include_str!("../../schemas/ros-snapshot.schema.json");

/// Lazily parsed schema to make programmatic access ergonomic.
pub static SNAPSHOT_SCHEMA_VALUE: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(SNAPSHOT_SCHEMA_JSON)
        .expect("embedded snapshot schema must be valid JSON")
});

/// Returns a borrowed reference to the parsed snapshot schema as a `serde_json::Value`.
pub fn snapshot_schema() -> &'static Value {
    &SNAPSHOT_SCHEMA_VALUE
}
