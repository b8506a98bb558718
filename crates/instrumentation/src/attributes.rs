//! Typed attribute values, the per-call attribute set, and the span sink.

use opentelemetry::{Array, KeyValue, StringValue, Value};

/// Value of a single extracted attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    String(String),
    I64(i64),
    F64(f64),
    /// Used for finish-reason lists.
    StringArray(Vec<String>),
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_owned())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<i64> for AttributeValue {
    fn from(v: i64) -> Self {
        AttributeValue::I64(v)
    }
}

impl From<f64> for AttributeValue {
    fn from(v: f64) -> Self {
        AttributeValue::F64(v)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(v: Vec<String>) -> Self {
        AttributeValue::StringArray(v)
    }
}

impl From<AttributeValue> for Value {
    fn from(v: AttributeValue) -> Self {
        match v {
            AttributeValue::String(s) => Value::String(s.into()),
            AttributeValue::I64(i) => Value::I64(i),
            AttributeValue::F64(f) => Value::F64(f),
            AttributeValue::StringArray(items) => Value::Array(Array::String(
                items.into_iter().map(StringValue::from).collect(),
            )),
        }
    }
}

/// Insertion-ordered attribute set produced for one request/response pair.
///
/// Setting a key that is already present replaces its value in place, so the
/// position of a key is where it was first set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedAttributes {
    entries: Vec<(&'static str, AttributeValue)>,
}

impl ExtractedAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key` to `value`, replacing any previous value.
    pub fn set(&mut self, key: &'static str, value: impl Into<AttributeValue>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttributeValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &AttributeValue)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Merge `other` into `self`; keys in `other` win.
    pub fn extend(&mut self, other: ExtractedAttributes) {
        for (key, value) in other.entries {
            self.set(key, value);
        }
    }

    /// Convert into OpenTelemetry key-values, preserving order.
    pub fn into_key_values(self) -> Vec<KeyValue> {
        self.entries
            .into_iter()
            .map(|(k, v)| KeyValue::new(k, Value::from(v)))
            .collect()
    }

    /// Write every attribute to `span`.
    pub fn apply_to<S: SpanWrite + ?Sized>(self, span: &mut S) {
        for kv in self.into_key_values() {
            span.set_attribute(kv);
        }
    }
}

/// Anything attributes can be written to.
///
/// Implemented for every OpenTelemetry [`opentelemetry::trace::Span`]; the
/// span itself stays owned by the tracing SDK.
#[cfg_attr(test, mockall::automock)]
pub trait SpanWrite {
    fn set_attribute(&mut self, attribute: KeyValue);
}

impl<S: opentelemetry::trace::Span> SpanWrite for S {
    fn set_attribute(&mut self, attribute: KeyValue) {
        opentelemetry::trace::Span::set_attribute(self, attribute);
    }
}
