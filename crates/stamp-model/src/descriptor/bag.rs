use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    Labels, ModelError,
    domain::{COMPILED_CODE_KEY, DECLARED_LABELS_KEY},
    error::ModelResult,
};

/// Resolved configuration of a task.
///
/// An open-ended JSON object. Recognized keys are read through validating
/// accessors ([`ConfigBag::declared_labels`], [`ConfigBag::compiled_code`]);
/// unknown keys are kept verbatim for other consumers.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigBag(Map<String, Value>);

impl ConfigBag {
    /// Create an empty bag.
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw access to an entry.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or overwrite a raw entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Builder-style variant of [`ConfigBag::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Attach declared labels under [`DECLARED_LABELS_KEY`].
    pub fn with_labels(self, labels: &Labels) -> Self {
        let obj: Map<String, Value> = labels
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect();
        self.with(DECLARED_LABELS_KEY, Value::Object(obj))
    }

    /// Declared labels of the task.
    ///
    /// - `Ok(None)` when the entry is absent;
    /// - `Ok(Some(labels))` when it is an object of string values;
    /// - [`ModelError::MalformedLabels`] for any other shape.
    pub fn declared_labels(&self) -> ModelResult<Option<Labels>> {
        let Some(raw) = self.0.get(DECLARED_LABELS_KEY) else {
            return Ok(None);
        };
        let obj = raw.as_object().ok_or_else(|| ModelError::MalformedLabels {
            key: DECLARED_LABELS_KEY,
            reason: format!("expected object, got {}", json_type(raw)),
        })?;

        let mut labels = Labels::new();
        for (k, v) in obj {
            let v = v.as_str().ok_or_else(|| ModelError::MalformedLabels {
                key: DECLARED_LABELS_KEY,
                reason: format!("value of '{k}' is {}, expected string", json_type(v)),
            })?;
            labels.insert(k.as_str(), v);
        }
        Ok(Some(labels))
    }

    /// Compiled statement of the task, if any.
    ///
    /// Present entries must be non-empty strings.
    pub fn compiled_code(&self) -> ModelResult<Option<&str>> {
        match self.0.get(COMPILED_CODE_KEY) {
            None => Ok(None),
            Some(Value::String(s)) if !s.trim().is_empty() => Ok(Some(s.as_str())),
            Some(Value::String(_)) => Err(ModelError::InvalidField {
                key: COMPILED_CODE_KEY.to_string(),
                reason: "empty statement".into(),
            }),
            Some(other) => Err(ModelError::InvalidField {
                key: COMPILED_CODE_KEY.to_string(),
                reason: format!("expected string, got {}", json_type(other)),
            }),
        }
    }
}

impl From<Map<String, Value>> for ConfigBag {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_type(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
