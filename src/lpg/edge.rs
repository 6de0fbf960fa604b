//! Graph edges: identity by (source, target, label), weighted and deduplicated.

use serde::{Deserialize, Serialize};

use super::property::{PropertyMap, PropertyValue};

/// Property key for the multiplicity counter every edge carries.
pub const WEIGHT: &str = "weight";

/// Property key for the measurement carried by `measures` edges.
pub const VALUE: &str = "value";

/// Lookup key for an edge: the ordered identity triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub source: String,
    pub target: String,
    pub label: String,
}

/// A directed, labeled edge.
///
/// Two edges are equal iff their (source, target, label) triples match;
/// repeated occurrences of the same relationship collapse into one edge
/// with an incremented `weight`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub label: String,
    pub properties: PropertyMap,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(WEIGHT.to_string(), PropertyValue::Int(1));
        Self {
            source: source.into(),
            target: target.into(),
            label: label.into(),
            properties,
        }
    }

    /// Derived display ID, used as the element `id` on the wire.
    pub fn display_id(&self) -> String {
        format!("{}-{}-{}", self.source, self.label, self.target)
    }

    pub fn key(&self) -> EdgeKey {
        EdgeKey {
            source: self.source.clone(),
            target: self.target.clone(),
            label: self.label.clone(),
        }
    }

    pub fn weight(&self) -> i64 {
        self.properties.get(WEIGHT).and_then(|v| v.as_int()).unwrap_or(1)
    }

    /// Record one more occurrence of this relationship.
    pub fn bump_weight(&mut self) {
        let next = self.weight() + 1;
        self.properties.insert(WEIGHT.to_string(), PropertyValue::Int(next));
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source && self.target == other.target && self.label == other.label
    }
}

impl Eq for Edge {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_edge_has_weight_one() {
        let edge = Edge::new("a", "b", "invokes");
        assert_eq!(edge.weight(), 1);
    }

    #[test]
    fn test_display_id() {
        let edge = Edge::new("A.B.M()", "A.B.N()", "invokes");
        assert_eq!(edge.display_id(), "A.B.M()-invokes-A.B.N()");
    }

    #[test]
    fn test_equality_ignores_properties() {
        let mut a = Edge::new("a", "b", "uses");
        a.bump_weight();
        let b = Edge::new("a", "b", "uses");
        let c = Edge::new("a", "b", "invokes");
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
