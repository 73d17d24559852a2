use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::null_as_default;

/// A named, lifespan-bounded token the platform hands back on the next turn.
///
/// The platform persists these, not us. Names are not guaranteed unique; every
/// lookup takes the first entry with a matching name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub lifespan: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub parameters: Map<String, Value>,
}

impl Context {
    pub fn new(name: impl Into<String>, lifespan: u32) -> Self {
        Self {
            name: name.into(),
            lifespan,
            parameters: Map::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn param(&self, key: &str) -> Option<&Value> {
        self.parameters.get(key).filter(|v| !v.is_null())
    }
}

/// First context carrying `name`, in the order the platform sent them.
pub fn find_first<'a>(contexts: &'a [Context], name: &str) -> Option<&'a Context> {
    contexts.iter().find(|c| c.name == name)
}
