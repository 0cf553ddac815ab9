//! Result type definitions

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single torrent search result
///
/// Only `name` is interpreted by the aggregator. Every other field a
/// provider reports (magnet link, size, seeders, ...) is carried through
/// untouched in `fields`. `fields` never holds a `name` key, since it would
/// clash with `name` once flattened; such a value is kept under `_name`
/// (or `__name`, ... if that is taken too).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentResult {
    /// Display name of the torrent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Provider-specific fields
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl TorrentResult {
    /// Create a result with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Map::new(),
        }
    }

    /// Create a result without a name
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Add a pass-through field
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        park_name_key(&mut self.fields);
        self
    }

    /// Build a result from a JSON object, taking `name_field` as the name
    ///
    /// Returns `None` when `value` is not an object. A name field that is
    /// missing or not a string leaves `name` empty; a non-string value
    /// stays in `fields`. A record's own `name` key that is not the name
    /// field is moved aside (see [`TorrentResult`]).
    pub fn from_object(value: Value, name_field: &str) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };

        let name = match fields.remove(name_field) {
            Some(Value::String(name)) => Some(name),
            Some(other) => {
                fields.insert(name_field.to_string(), other);
                None
            }
            None => None,
        };
        park_name_key(&mut fields);

        Some(Self { name, fields })
    }

    /// Non-empty name, if any
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Look up a pass-through field
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Whether the lower-cased name contains every (already lower-cased) token
    pub fn contains_all(&self, tokens: &[String]) -> bool {
        match self.name() {
            Some(name) => {
                let name = name.to_lowercase();
                tokens.iter().all(|token| name.contains(token.as_str()))
            }
            None => false,
        }
    }
}

/// Move a `name` entry to the first free `_name`, `__name`, ... key
fn park_name_key(fields: &mut Map<String, Value>) {
    let Some(value) = fields.remove("name") else {
        return;
    };

    let mut key = String::from("_name");
    while fields.contains_key(&key) {
        key.insert(0, '_');
    }
    fields.insert(key, value);
}
