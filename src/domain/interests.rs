use serde_json::Value;

/// The interests a submitter selected, kept exactly as posted.
/// Usually a string or a list of strings, but any non-empty JSON value is accepted.
#[derive(Debug, PartialEq, Clone)]
pub struct Interests(Value);

impl Interests {
    /// Accept a raw field, yielding `None` when it is absent or empty
    pub fn parse(value: Option<Value>) -> Option<Self> {
        let value = value?;
        let present = match &value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
            Value::String(s) => !s.trim().is_empty(),
            Value::Array(items) => !items.is_empty(),
            Value::Object(fields) => !fields.is_empty(),
        };

        present.then_some(Self(value))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }
}
