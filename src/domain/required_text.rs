use serde_json::Value;

/// Required user supplied text, trimmed and never blank
#[derive(Debug, PartialEq, Clone)]
pub struct RequiredText(String);

impl RequiredText {
    /// Trim a raw field, yielding `None` when it is absent or blank
    pub fn parse(value: Option<String>) -> Option<Self> {
        trimmed(value).map(Self)
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Trim an optional field, treating blank text as absent
pub fn trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Render a raw JSON field as text.
/// Strings are taken as given, `null` is absent, and any other value keeps its JSON form.
pub fn as_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}
