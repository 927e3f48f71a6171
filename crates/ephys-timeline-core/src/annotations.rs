//! Typed annotation store for channel- and unit-level metadata.
//!
//! Recording formats attach open-ended key/value metadata to channels and
//! sorted units (location, grouping, impedance, quality labels, ...). This
//! module keeps that extensibility but drops the dynamic-typing hazards:
//! entries are keyed by (entity id, property name) and hold a closed variant
//! type, and lookups return `Option` so absence is an ordinary, checkable
//! state instead of a panic.
//!
//! The store is deliberately independent of the timeline machinery; the
//! composite inherits its channel annotations from the first segment at
//! construction time and never merges annotations from later segments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A single annotation value.
///
/// The variant set covers the property shapes seen in practice: flags,
/// counts, physical quantities, text labels, and small numeric vectors such
/// as electrode locations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationValue {
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Floating-point scalar.
    Float(f64),
    /// Text label.
    Str(String),
    /// Small numeric vector (for example, an electrode location).
    FloatList(Vec<f64>),
}

impl AnnotationValue {
    /// Returns the payload if this value is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload if this value is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            AnnotationValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload if this value is a `Float`.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            AnnotationValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the payload if this value is a `Str`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the payload if this value is a `FloatList`.
    pub fn as_float_list(&self) -> Option<&[f64]> {
        match self {
            AnnotationValue::FloatList(v) => Some(v),
            _ => None,
        }
    }
}

impl From<bool> for AnnotationValue {
    fn from(v: bool) -> Self {
        AnnotationValue::Bool(v)
    }
}

impl From<i64> for AnnotationValue {
    fn from(v: i64) -> Self {
        AnnotationValue::Int(v)
    }
}

impl From<f64> for AnnotationValue {
    fn from(v: f64) -> Self {
        AnnotationValue::Float(v)
    }
}

impl From<&str> for AnnotationValue {
    fn from(v: &str) -> Self {
        AnnotationValue::Str(v.to_string())
    }
}

impl From<String> for AnnotationValue {
    fn from(v: String) -> Self {
        AnnotationValue::Str(v)
    }
}

impl From<Vec<f64>> for AnnotationValue {
    fn from(v: Vec<f64>) -> Self {
        AnnotationValue::FloatList(v)
    }
}

/// Annotation entries keyed by (entity id, property name).
///
/// `K` is the entity identifier type (for example, a channel id or a unit
/// id). Backed by `BTreeMap`s so iteration order is deterministic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnnotationStore<K: Ord> {
    entries: BTreeMap<K, BTreeMap<String, AnnotationValue>>,
}

impl<K: Ord> Default for AnnotationStore<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> AnnotationStore<K> {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Sets the value stored under `(key, name)`, replacing any previous one.
    pub fn set(&mut self, key: K, name: impl Into<String>, value: impl Into<AnnotationValue>) {
        self.entries
            .entry(key)
            .or_default()
            .insert(name.into(), value.into());
    }

    /// Returns the value stored under `(key, name)`, if any.
    pub fn get(&self, key: &K, name: &str) -> Option<&AnnotationValue> {
        self.entries.get(key)?.get(name)
    }

    /// Returns true if a value is stored under `(key, name)`.
    pub fn contains(&self, key: &K, name: &str) -> bool {
        self.get(key, name).is_some()
    }

    /// Removes and returns the value stored under `(key, name)`, if any.
    pub fn remove(&mut self, key: &K, name: &str) -> Option<AnnotationValue> {
        let props = self.entries.get_mut(key)?;
        let removed = props.remove(name);
        if props.is_empty() {
            self.entries.remove(key);
        }
        removed
    }

    /// Returns the property names recorded for `key`, in sorted order.
    pub fn names(&self, key: &K) -> Vec<&str> {
        self.entries
            .get(key)
            .map(|props| props.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Total number of (entity, property) entries in the store.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord + Clone> AnnotationStore<K> {
    /// Copies every entry of `other` into this store, replacing values that
    /// share a `(key, name)` pair.
    pub fn merge_from(&mut self, other: &Self) {
        for (key, props) in &other.entries {
            for (name, value) in props {
                self.set(key.clone(), name.clone(), value.clone());
            }
        }
    }
}
