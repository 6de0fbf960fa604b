//! Halstead complexity records.
//!
//! A record is computed per operation from its token stream and then
//! aggregated upward to classes and namespaces. Aggregates carry the
//! sums of length, volume and effort; vocabulary is meaningless across
//! elements and is pinned to -1, difficulty to NaN.

use serde::{Deserialize, Serialize};

use crate::lpg::{PropertyMap, PropertyValue};

/// Measured Halstead quantities for one element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    /// Qualified name of the measured element.
    pub element_id: String,
    /// `"method"`, `"class"` or `"namespace"`.
    pub element_kind: String,
    /// n1, distinct operators.
    pub unique_operators: usize,
    /// n2, distinct operands.
    pub unique_operands: usize,
    /// N1, total operator occurrences.
    pub total_operators: usize,
    /// N2, total operand occurrences.
    pub total_operands: usize,
    pub vocabulary: i64,
    pub length: i64,
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
    pub estimated_bugs: f64,
}

impl HalsteadMetrics {
    /// Build a record from raw counts, computing the derived quantities.
    pub fn new(
        element_id: impl Into<String>,
        element_kind: impl Into<String>,
        unique_operators: usize,
        unique_operands: usize,
        total_operators: usize,
        total_operands: usize,
    ) -> Self {
        let vocabulary = (unique_operators + unique_operands) as i64;
        let length = (total_operators + total_operands) as i64;
        let volume = length as f64 * (vocabulary.max(1) as f64).log2();
        let difficulty = if unique_operands > 0 {
            (unique_operators as f64 / 2.0) * (total_operands as f64 / unique_operands as f64)
        } else {
            0.0
        };
        let effort = difficulty * volume;
        Self {
            element_id: element_id.into(),
            element_kind: element_kind.into(),
            unique_operators,
            unique_operands,
            total_operators,
            total_operands,
            vocabulary,
            length,
            volume,
            difficulty,
            effort,
            estimated_bugs: volume / 3000.0,
        }
    }

    /// Sum a group of records into one aggregate element.
    ///
    /// Distinct-token counts do not compose across elements, so
    /// `vocabulary` is pinned to -1 and `difficulty` to NaN; estimated
    /// bugs are recomputed from the summed volume.
    pub fn aggregate(
        element_id: impl Into<String>,
        element_kind: impl Into<String>,
        parts: &[HalsteadMetrics],
    ) -> Self {
        let total_operators = parts.iter().map(|p| p.total_operators).sum();
        let total_operands = parts.iter().map(|p| p.total_operands).sum();
        let volume: f64 = parts.iter().map(|p| p.volume).sum();
        Self {
            element_id: element_id.into(),
            element_kind: element_kind.into(),
            unique_operators: 0,
            unique_operands: 0,
            total_operators,
            total_operands,
            vocabulary: -1,
            length: parts.iter().map(|p| p.length).sum(),
            volume,
            difficulty: f64::NAN,
            effort: parts.iter().map(|p| p.effort).sum(),
            estimated_bugs: volume / 3000.0,
        }
    }

    /// Export as a property map. Non-finite quantities are replaced by
    /// `nan_replacement` so the result stays representable in JSON.
    pub fn to_properties(&self, nan_replacement: f64) -> PropertyMap {
        let finite = |v: f64| if v.is_finite() { v } else { nan_replacement };
        let mut map = PropertyMap::new();
        map.insert("id".to_string(), PropertyValue::from(self.element_id.as_str()));
        map.insert("kind".to_string(), PropertyValue::from(self.element_kind.as_str()));
        map.insert("vocabulary".to_string(), PropertyValue::Int(self.vocabulary));
        map.insert("length".to_string(), PropertyValue::Int(self.length));
        map.insert("volume".to_string(), PropertyValue::Float(finite(self.volume)));
        map.insert("difficulty".to_string(), PropertyValue::Float(finite(self.difficulty)));
        map.insert("effort".to_string(), PropertyValue::Float(finite(self.effort)));
        map.insert(
            "estimatedBugs".to_string(),
            PropertyValue::Float(finite(self.estimated_bugs)),
        );
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_quantities() {
        // n1=4, n2=4, N1=10, N2=6.
        let m = HalsteadMetrics::new("A.B.M()", "method", 4, 4, 10, 6);
        assert_eq!(m.vocabulary, 8);
        assert_eq!(m.length, 16);
        assert!((m.volume - 48.0).abs() < 1e-9);
        assert!((m.difficulty - 3.0).abs() < 1e-9);
        assert!((m.effort - 144.0).abs() < 1e-9);
        assert!((m.estimated_bugs - 48.0 / 3000.0).abs() < 1e-12);
    }

    #[test]
    fn test_difficulty_without_operands_is_zero() {
        let m = HalsteadMetrics::new("A.B.M()", "method", 3, 0, 5, 0);
        assert_eq!(m.difficulty, 0.0);
        assert_eq!(m.effort, 0.0);
    }

    #[test]
    fn test_aggregate_sums_additive_quantities() {
        let a = HalsteadMetrics {
            element_id: "A.B.M()".to_string(),
            element_kind: "method".to_string(),
            unique_operators: 3,
            unique_operands: 4,
            total_operators: 5,
            total_operands: 5,
            vocabulary: 7,
            length: 10,
            volume: 20.0,
            difficulty: 2.0,
            effort: 40.0,
            estimated_bugs: 20.0 / 3000.0,
        };
        let b = HalsteadMetrics {
            element_id: "A.B.N()".to_string(),
            element_kind: "method".to_string(),
            unique_operators: 2,
            unique_operands: 2,
            total_operators: 3,
            total_operands: 2,
            vocabulary: 4,
            length: 5,
            volume: 8.0,
            difficulty: 1.0,
            effort: 8.0,
            estimated_bugs: 8.0 / 3000.0,
        };

        let sum = HalsteadMetrics::aggregate("A.B", "class", &[a, b]);
        assert_eq!(sum.length, 15);
        assert!((sum.volume - 28.0).abs() < 1e-9);
        assert!((sum.effort - 48.0).abs() < 1e-9);
        assert_eq!(sum.vocabulary, -1);
        assert!(sum.difficulty.is_nan());
        assert!((sum.estimated_bugs - 28.0 / 3000.0).abs() < 1e-12);
    }

    #[test]
    fn test_export_replaces_nan() {
        let sum = HalsteadMetrics::aggregate("A.B", "class", &[]);
        let props = sum.to_properties(-1.0);
        assert_eq!(props.get("difficulty").unwrap().as_float(), Some(-1.0));
        assert_eq!(props.get("vocabulary").unwrap().as_int(), Some(-1));
    }
}
