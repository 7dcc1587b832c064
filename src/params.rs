//! Ordered tracking-hit parameters.
//!
//! The collection endpoint takes a flat set of `key=value` pairs. `Params`
//! keeps insertion order (the order pairs reach the wire) with last-write-wins
//! semantics: setting an existing key replaces its value in place, so exactly
//! one value per key is ever serialized.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::Serialize;

/// Caller-supplied extra parameters, merged verbatim into a hit last. Keys
/// here may overwrite anything the hit builders generated; the external API
/// defines their meaning, so no validation happens on this bag.
pub type UserInfo = HashMap<String, String>;

/// Flat parameter set for one tracking hit.
///
/// Serializes as a sequence of pairs, suitable for a URL-encoded form body.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Params(Vec<(Cow<'static, str>, String)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing an existing entry in place.
    pub fn set(&mut self, key: impl Into<Cow<'static, str>>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        if let Some(entry) = self.0.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.0.push((key, value));
        }
    }

    /// Sets `key` only when a value is present. `Some` of a zero or an empty
    /// string still counts as present.
    pub fn set_opt(&mut self, key: impl Into<Cow<'static, str>>, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.set(key, value);
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Removes `key` and returns its value, if any.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    /// Merges `extra` in, overwriting existing keys.
    pub fn merge(&mut self, extra: &UserInfo) {
        for (k, v) in extra {
            self.set(k.clone(), v);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn pairs(&self) -> &[(Cow<'static, str>, String)] {
        &self.0
    }
}
