//! Generic JSON encoding/decoding helpers shared by the spec model.
//! - `JsonEncodable`: produce a `serde_json::Value`, with empty-collapsing
//! - `JsonObjectConvertible`: build an entity from one JSON object
//! - `JsonLookup`: lenient typed key access (missing or mistyped -> None)

use crate::error::SpecParsingError;
use serde_json::{Map, Value};

/// String-keyed JSON object, the unit every spec entity is decoded from.
pub type JsonDictionary = Map<String, Value>;

/// An entity of the spec model that can render itself as a JSON value
/// (object, array, scalar or `null`).
pub trait JsonEncodable {
    fn to_json_value(&self) -> Value;

    /// Drops absent values, `null`, empty arrays and empty objects, so
    /// encoders never emit noise into the output document.
    fn filter_empty<I>(&self, entries: I) -> JsonDictionary
    where
        I: IntoIterator<Item = (String, Option<Value>)>,
    {
        entries
            .into_iter()
            .filter_map(|(key, value)| match value? {
                Value::Null => None,
                Value::Array(items) if items.is_empty() => None,
                Value::Object(map) if map.is_empty() => None,
                value => Some((key, value)),
            })
            .collect()
    }
}

/// An entity that is decoded from a single JSON object.
pub trait JsonObjectConvertible: Sized {
    fn from_json_dictionary(dictionary: &JsonDictionary) -> Result<Self, SpecParsingError>;
}

/// Try-get accessors: a missing key and a value of the wrong type both read
/// as `None`.
pub trait JsonLookup {
    fn json_str(&self, key: &str) -> Option<&str>;
    fn json_bool(&self, key: &str) -> Option<bool>;
}

impl JsonLookup for JsonDictionary {
    fn json_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    fn json_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }
}
