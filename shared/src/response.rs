//! Response envelope normalization
//!
//! The API wraps payloads inconsistently across endpoints. Depending on the
//! route a collection of plants may arrive as any of:
//!
//! ```json
//! { "success": true, "data": { "plants": [ ... ] } }
//! { "success": true, "plants": [ ... ] }
//! { "success": true, "data": [ ... ] }
//! [ ... ]
//! ```
//!
//! [`Envelope`] resolves all of these in one place so callers receive a
//! canonical shape. Each resource declares its keys through [`Resource`].

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::FieldError;

/// A resource the API returns, with the keys it is wrapped under
pub trait Resource: DeserializeOwned {
    /// Key of the collection (e.g. `plants`)
    const COLLECTION: &'static str;
    /// Key of a single item (e.g. `plant`)
    const ITEM: &'static str;
}

/// Raw decoded response body
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    body: Value,
}

impl Envelope {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Empty envelope. Every collection resolves to `[]`.
    pub fn empty() -> Self {
        Self { body: Value::Null }
    }

    pub fn body(&self) -> &Value {
        &self.body
    }

    pub fn into_body(self) -> Value {
        self.body
    }

    /// Server `message` field if present (top level, then under `data`)
    pub fn message(&self) -> Option<&str> {
        self.body
            .get("message")
            .and_then(Value::as_str)
            .or_else(|| {
                self.body
                    .get("data")
                    .and_then(|d| d.get("message"))
                    .and_then(Value::as_str)
            })
    }

    /// `success: false` marks an application-level failure carried by a 2xx
    pub fn is_failure(&self) -> bool {
        self.body.get("success").and_then(Value::as_bool) == Some(false)
    }

    /// Field-level validation messages from an `errors` array
    ///
    /// Returns `None` when no array is present, so callers can fall back to a
    /// generic validation message.
    pub fn field_errors(&self) -> Option<Vec<FieldError>> {
        let errors = self
            .body
            .get("errors")
            .or_else(|| self.body.get("data").and_then(|d| d.get("errors")))?
            .as_array()?;

        Some(
            errors
                .iter()
                .filter_map(|e| match e {
                    Value::String(s) => Some(FieldError {
                        field: None,
                        message: s.clone(),
                    }),
                    other => serde_json::from_value(other.clone()).ok(),
                })
                .collect(),
        )
    }

    /// Decode the collection of `T`
    pub fn into_list<T: Resource>(self) -> Vec<T> {
        self.list_under(T::COLLECTION)
    }

    /// Decode the collection found under `key`
    ///
    /// Tries `data.<key>`, `<key>`, `data`, then the body itself. The first
    /// candidate that is an array wins; anything else yields an empty list.
    /// Elements that fail to decode are dropped with a warning.
    pub fn list_under<T: DeserializeOwned>(self, key: &str) -> Vec<T> {
        let Some(items) = locate_list(&self.body, key) else {
            return Vec::new();
        };

        items
            .iter()
            .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Dropping undecodable list element");
                    None
                }
            })
            .collect()
    }

    /// Decode a single `T`
    pub fn into_item<T: Resource>(self) -> Result<T, serde_json::Error> {
        self.item_under(T::ITEM)
    }

    /// Decode a single item found under `key`
    ///
    /// Tries `data.<key>`, `<key>`, `data` (when an object), then the body.
    pub fn item_under<T: DeserializeOwned>(self, key: &str) -> Result<T, serde_json::Error> {
        let value = locate_item(&self.body, key).cloned().unwrap_or(Value::Null);
        serde_json::from_value(value)
    }
}

impl From<Value> for Envelope {
    fn from(body: Value) -> Self {
        Self::new(body)
    }
}

fn locate_list<'a>(body: &'a Value, key: &str) -> Option<&'a Vec<Value>> {
    let data = body.get("data");
    [
        data.and_then(|d| d.get(key)),
        body.get(key),
        data,
        Some(body),
    ]
    .into_iter()
    .flatten()
    .find_map(Value::as_array)
}

fn locate_item<'a>(body: &'a Value, key: &str) -> Option<&'a Value> {
    let data = body.get("data");
    data.and_then(|d| d.get(key))
        .filter(|v| v.is_object())
        .or_else(|| body.get(key).filter(|v| v.is_object()))
        .or_else(|| data.filter(|v| v.is_object()))
        .or_else(|| Some(body).filter(|v| v.is_object()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Widget {
        id: String,
    }

    impl Resource for Widget {
        const COLLECTION: &'static str = "widgets";
        const ITEM: &'static str = "widget";
    }

    fn ids(list: Vec<Widget>) -> Vec<String> {
        list.into_iter().map(|w| w.id).collect()
    }

    #[test]
    fn test_list_nested_under_data() {
        let env = Envelope::new(json!({"success": true, "data": {"widgets": [{"id": "a"}]}}));
        assert_eq!(ids(env.into_list()), vec!["a"]);
    }

    #[test]
    fn test_list_at_top_level_key() {
        let env = Envelope::new(json!({"widgets": [{"id": "b"}], "count": 1}));
        assert_eq!(ids(env.into_list()), vec!["b"]);
    }

    #[test]
    fn test_list_as_data_array() {
        let env = Envelope::new(json!({"data": [{"id": "c"}]}));
        assert_eq!(ids(env.into_list()), vec!["c"]);
    }

    #[test]
    fn test_list_as_bare_array() {
        let env = Envelope::new(json!([{"id": "d"}, {"id": "e"}]));
        assert_eq!(ids(env.into_list()), vec!["d", "e"]);
    }

    #[test]
    fn test_list_falls_back_to_empty() {
        assert!(Envelope::new(json!({"data": {"total": 3}})).into_list::<Widget>().is_empty());
        assert!(Envelope::new(json!("nope")).into_list::<Widget>().is_empty());
        assert!(Envelope::empty().into_list::<Widget>().is_empty());
    }

    #[test]
    fn test_list_skips_non_array_candidates() {
        // data.widgets is an object, so the data array is not reached; body.widgets wins
        let env = Envelope::new(json!({"data": {"widgets": {"id": "x"}}, "widgets": [{"id": "y"}]}));
        assert_eq!(ids(env.into_list()), vec!["y"]);
    }

    #[test]
    fn test_list_drops_malformed_elements() {
        let env = Envelope::new(json!({"data": [{"id": "ok"}, {"name": "no id"}, 7]}));
        assert_eq!(ids(env.into_list()), vec!["ok"]);
    }

    #[test]
    fn test_item_resolution_order() {
        let nested = Envelope::new(json!({"data": {"widget": {"id": "n"}}}));
        assert_eq!(nested.into_item::<Widget>().unwrap().id, "n");

        let top = Envelope::new(json!({"success": true, "widget": {"id": "t"}}));
        assert_eq!(top.into_item::<Widget>().unwrap().id, "t");

        let data = Envelope::new(json!({"data": {"id": "d"}}));
        assert_eq!(data.into_item::<Widget>().unwrap().id, "d");

        let bare = Envelope::new(json!({"id": "b"}));
        assert_eq!(bare.into_item::<Widget>().unwrap().id, "b");
    }

    #[test]
    fn test_item_missing_is_error() {
        assert!(Envelope::new(json!({"data": null})).into_item::<Widget>().is_err());
    }

    #[test]
    fn test_field_errors() {
        let env = Envelope::new(json!({
            "message": "Validation failed",
            "errors": [{"field": "email", "message": "Email is required"}, "Phone is invalid"]
        }));
        let errors = env.field_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].to_string(), "email: Email is required");
        assert_eq!(errors[1].to_string(), "Phone is invalid");
        assert_eq!(env.message(), Some("Validation failed"));
    }

    #[test]
    fn test_field_errors_absent() {
        let env = Envelope::new(json!({"message": "Validation failed"}));
        assert!(env.field_errors().is_none());
    }

    #[test]
    fn test_is_failure() {
        assert!(Envelope::new(json!({"success": false})).is_failure());
        assert!(!Envelope::new(json!({"success": true})).is_failure());
        assert!(!Envelope::new(json!([])).is_failure());
    }
}
