use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::location::Coordinate;

/// Caller metadata sent along with a command. Only `location` is interpreted;
/// everything else is forwarded to the text-generation prompt as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct CommandContext(Map<String, Value>);

impl From<Value> for CommandContext {
    fn from(value: Value) -> Self {
        Self::from_value(value)
    }
}

impl From<CommandContext> for Value {
    fn from(context: CommandContext) -> Self {
        Value::Object(context.0)
    }
}

impl CommandContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-object values carry no usable metadata and become an empty context.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.0.insert(key.into(), value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Coordinates from `location`, when both keys are present and numeric.
    pub fn location(&self) -> Option<Coordinate> {
        let location = self.0.get("location")?.as_object()?;
        let pick = |short: &str, long: &str| {
            location
                .get(short)
                .or_else(|| location.get(long))
                .and_then(Value::as_f64)
        };
        Some(Coordinate::new(pick("lat", "latitude")?, pick("lng", "longitude")?))
    }

    pub fn render(&self) -> String {
        Value::Object(self.0.clone()).to_string()
    }
}
