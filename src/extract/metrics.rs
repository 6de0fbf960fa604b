//! Metric phase: measurement nodes and their `measures` edges.
//!
//! Metric nodes are one-per-quantity-per-graph; the measured value
//! lives on the `measures` edge, so many entities share one Metric
//! node. Halstead records computed by [`crate::metrics::calculator`]
//! are folded in through the same shape.

use crate::lpg::{edge, Graph, Node, PropertyValue};
use crate::metrics::HalsteadMetrics;
use crate::model::SemanticModel;

use super::schema::{labels, props, relations};
use super::{normalize_id, RunIndex};

fn metric_node(graph: &mut Graph, id: &str, simple: &str, qualified: &str) {
    graph.add_node(
        Node::new(id, labels::METRIC)
            .with_property(props::SIMPLE_NAME, simple)
            .with_property(props::QUALIFIED_NAME, qualified)
            .with_property(props::KIND, "metric"),
    );
}

pub fn collect<M: SemanticModel>(model: &M, graph: &mut Graph, index: &RunIndex) {
    let methods_id = format!("{}#NumMethods", graph.name());
    let statements_id = format!("{}#NumStatements", graph.name());
    metric_node(graph, &methods_id, "NumMethods", "Number of Methods");
    metric_node(graph, &statements_id, "NumStatements", "Number of Statements");

    for symbol in &index.types {
        let type_id = normalize_id(&symbol.qualified_name);
        let count = index
            .operations
            .iter()
            .filter(|op| normalize_id(&op.containing_type) == type_id)
            .count();
        graph
            .add_or_get_edge(&type_id, &methods_id, relations::MEASURES)
            .set_property(edge::VALUE, count as i64);
    }

    for op in &index.operations {
        let statements = model
            .body_of(&op.qualified_name)
            .map(|b| b.statements)
            .unwrap_or(0);
        graph
            .add_or_get_edge(&normalize_id(&op.qualified_name), &statements_id, relations::MEASURES)
            .set_property(edge::VALUE, statements as i64);
    }
}

/// Exported value for one Halstead quantity; NaN (undefined difficulty
/// on aggregates) exports as -1.
fn exported(value: f64) -> PropertyValue {
    if value.is_nan() {
        PropertyValue::Float(-1.0)
    } else {
        PropertyValue::Float(value)
    }
}

pub fn fold_halstead(graph: &mut Graph, records: &[HalsteadMetrics]) {
    if records.is_empty() {
        return;
    }
    let quantities = [
        ("HalsteadVocabulary", "Halstead Vocabulary"),
        ("HalsteadLength", "Halstead Program Length"),
        ("HalsteadVolume", "Halstead Volume"),
        ("HalsteadDifficulty", "Halstead Difficulty"),
        ("HalsteadEffort", "Halstead Effort"),
        ("HalsteadEstimatedBugs", "Halstead Estimated Bugs"),
    ];
    let ids: Vec<String> = quantities
        .iter()
        .map(|(simple, _)| format!("{}#{}", graph.name(), simple))
        .collect();
    for ((simple, qualified), id) in quantities.iter().zip(&ids) {
        metric_node(graph, id, simple, qualified);
    }

    for record in records {
        let source = normalize_id(&record.element_id);
        let values = [
            PropertyValue::Int(record.vocabulary),
            PropertyValue::Int(record.length),
            exported(record.volume),
            exported(record.difficulty),
            exported(record.effort),
            exported(record.estimated_bugs),
        ];
        for (id, value) in ids.iter().zip(values) {
            graph
                .add_or_get_edge(&source, id, relations::MEASURES)
                .set_property(edge::VALUE, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceModel;

    #[test]
    fn test_halstead_nan_exports_as_minus_one() {
        let mut graph = Graph::new("p");
        graph.add_node(Node::new("A.B", labels::TYPE));
        let records = vec![HalsteadMetrics {
            element_id: "A.B".to_string(),
            element_kind: "class".to_string(),
            unique_operators: 0,
            unique_operands: 0,
            total_operators: 0,
            total_operands: 0,
            vocabulary: -1,
            length: 12,
            volume: 30.0,
            difficulty: f64::NAN,
            effort: 90.0,
            estimated_bugs: 0.01,
        }];
        fold_halstead(&mut graph, &records);

        let difficulty = graph
            .find_edge("A.B", "p#HalsteadDifficulty", relations::MEASURES)
            .unwrap();
        assert_eq!(difficulty.property(edge::VALUE).unwrap().as_float(), Some(-1.0));
        let vocab = graph
            .find_edge("A.B", "p#HalsteadVocabulary", relations::MEASURES)
            .unwrap();
        assert_eq!(vocab.property(edge::VALUE).unwrap().as_int(), Some(-1));
    }

    #[test]
    fn test_no_metric_nodes_without_records() {
        let mut graph = Graph::new("p");
        fold_halstead(&mut graph, &[]);
        assert_eq!(graph.node_count(), 0);
    }

    #[test]
    fn test_statement_count_defaults_to_zero() {
        let mut model = SourceModel::new("p", "p.sln");
        let mut graph = Graph::new("p");
        let mut index = RunIndex::default();
        index
            .operations
            .push(crate::model::MethodSymbol::new("A.B.M()", "A.B"));
        model.add_method(index.operations[0].clone());

        collect(&model, &mut graph, &index);
        let statements = graph
            .find_edge("A.B.M()", "p#NumStatements", relations::MEASURES)
            .unwrap();
        assert_eq!(statements.property(edge::VALUE).unwrap().as_int(), Some(0));
    }
}
