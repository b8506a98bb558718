//! Named-field access over SDK request and response objects.
//!
//! The instrumentation hook copies the fields it can see on an SDK input or
//! output into one of these views. Resolution then probes them by the
//! parameter names listed in the service tables.

use std::collections::{BTreeMap, HashMap};

/// A request or response that can be asked for a string field by name.
///
/// Returning `None` means "no value for this parameter"; absent fields are
/// never an error.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

/// A view with no fields, for calls whose response is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFields;

impl FieldSource for NoFields {
    fn field(&self, _name: &str) -> Option<&str> {
        None
    }
}

impl<S: FieldSource + ?Sized> FieldSource for &S {
    fn field(&self, name: &str) -> Option<&str> {
        (**self).field(name)
    }
}

impl FieldSource for HashMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for HashMap<&str, &str> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).copied()
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for [(&str, &str)] {
    fn field(&self, name: &str) -> Option<&str> {
        self.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
    }
}

impl<const N: usize> FieldSource for [(&str, &str); N] {
    fn field(&self, name: &str) -> Option<&str> {
        self.as_slice().field(name)
    }
}

/// Top-level string members of a JSON object. Non-string members and
/// non-object values have no fields.
impl FieldSource for serde_json::Value {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(serde_json::Value::as_str)
    }
}
