//! Layer merging for configuration documents.
//!
//! Layers are merged key by key at the top level only: a key present in the
//! overlay replaces the base value wholesale, nested objects included.

use serde_json::{Map, Value};

/// Merge `overlay` into `base`, with `overlay` taking precedence.
///
/// - Top-level keys in overlay replace keys in base
/// - Nested objects are replaced, not merged
/// - A null overlay value preserves the base value (null means "not specified")
///
/// # Example
/// ```
/// use serde_json::json;
/// use bowerkit::config::shallow_merge;
///
/// let base = json!({"directory": "bower_components", "proxy": {"host": "a"}});
/// let overlay = json!({"proxy": {"port": 8080}, "interactive": true});
/// let merged = shallow_merge(
///     base.as_object().unwrap().clone(),
///     overlay.as_object().unwrap().clone(),
/// );
/// assert_eq!(
///     serde_json::Value::Object(merged),
///     json!({"directory": "bower_components", "proxy": {"port": 8080}, "interactive": true})
/// );
/// ```
pub fn shallow_merge(mut base: Map<String, Value>, overlay: Map<String, Value>) -> Map<String, Value> {
    for (key, value) in overlay {
        if value.is_null() {
            continue;
        }
        base.insert(key, value);
    }
    base
}
