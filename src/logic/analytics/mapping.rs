//! Attribution mapping with explicit arrival order
//!
//! The service sends `shap_values` as a JSON object. Object order is not
//! guaranteed by JSON itself, so the order in which keys arrive on the wire
//! is captured once, at decode time, and kept as a `Vec`.

use std::collections::HashSet;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One feature's signed contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionEntry {
    pub feature: String,
    pub value: f64,
}

impl AttributionEntry {
    pub fn new(feature: impl Into<String>, value: f64) -> Self {
        Self { feature: feature.into(), value }
    }
}

/// Feature → contribution, unique keys, arrival order preserved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributionMapping {
    entries: Vec<AttributionEntry>,
}

/// Attempted to add a feature that is already present
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("duplicate attribution feature: {0}")]
pub struct DuplicateFeature(pub String);

impl AttributionMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from pairs in arrival order; rejects repeated features
    pub fn from_pairs<I, K>(pairs: I) -> Result<Self, DuplicateFeature>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut mapping = Self::new();
        for (feature, value) in pairs {
            mapping.push(feature, value)?;
        }
        Ok(mapping)
    }

    /// Append at the end of the arrival order
    pub fn push(&mut self, feature: impl Into<String>, value: f64) -> Result<(), DuplicateFeature> {
        let feature = feature.into();
        if self.contains(&feature) {
            return Err(DuplicateFeature(feature));
        }
        self.entries.push(AttributionEntry { feature, value });
        Ok(())
    }

    pub fn get(&self, feature: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|entry| entry.feature == feature)
            .map(|entry| entry.value)
    }

    pub fn contains(&self, feature: &str) -> bool {
        self.entries.iter().any(|entry| entry.feature == feature)
    }

    /// Entries in arrival order
    pub fn entries(&self) -> &[AttributionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Left-to-right sum of all contributions
    pub fn total(&self) -> f64 {
        self.entries.iter().fold(0.0, |sum, entry| sum + entry.value)
    }
}

impl<'a> IntoIterator for &'a AttributionMapping {
    type Item = &'a AttributionEntry;
    type IntoIter = std::slice::Iter<'a, AttributionEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// WIRE FORMAT: a plain JSON object
// ============================================================================

impl Serialize for AttributionMapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.feature, &entry.value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttributionMapping {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MappingVisitor)
    }
}

struct MappingVisitor;

impl<'de> Visitor<'de> for MappingVisitor {
    type Value = AttributionMapping;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object of feature name to numeric contribution")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        let mut seen = HashSet::new();

        while let Some((feature, value)) = access.next_entry::<String, f64>()? {
            if !seen.insert(feature.clone()) {
                return Err(de::Error::custom(DuplicateFeature(feature)));
            }
            entries.push(AttributionEntry { feature, value });
        }

        Ok(AttributionMapping { entries })
    }
}
