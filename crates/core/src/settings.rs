//! Opaque pipeline settings bag.
//!
//! The dashboard's Configuration page edits parameters consumed by the
//! external discovery, processor, queue, and sink services (batch sizes,
//! retention, endpoints, ...). This core only stores and returns them; it
//! never interprets a value. Keys are flat `section.param` strings.

use std::collections::BTreeMap;

use serde_json::Value;

/// Untyped key-value settings passed through to the external services.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineSettings {
    values: BTreeMap<String, Value>,
}

impl PipelineSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current settings, in key order.
    pub fn snapshot(&self) -> &BTreeMap<String, Value> {
        &self.values
    }

    /// One setting by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Apply a batch of updates. Each named key is overwritten; keys not
    /// named are left untouched.
    pub fn merge(&mut self, updates: BTreeMap<String, Value>) {
        self.values.extend(updates);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
