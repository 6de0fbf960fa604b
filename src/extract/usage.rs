//! Usage phase: override links and body-level references.
//!
//! Reads the operation bodies of everything the member phase recorded
//! and emits `overrides`, `invokes`, `instantiates` and `uses` edges.
//! Targets are taken at face value; anything unresolved dangles until
//! reconciliation.

use crate::lpg::Graph;
use crate::model::SemanticModel;

use super::schema::relations;
use super::{normalize_id, RunIndex};

pub fn collect<M: SemanticModel>(model: &M, graph: &mut Graph, index: &RunIndex) {
    for op in &index.operations {
        let source = normalize_id(&op.qualified_name);

        // Override links exist even for bodyless declarations.
        if let Some(overridden) = &op.overrides {
            graph.add_or_get_edge(&source, &normalize_id(overridden), relations::OVERRIDES);
        }

        let Some(body) = model.body_of(&op.qualified_name) else {
            continue;
        };

        for call in &body.calls {
            graph.add_or_update_edge(&source, &normalize_id(call), relations::INVOKES);
        }
        for target in &body.instantiations {
            graph.add_or_update_edge(&source, &normalize_id(target), relations::INSTANTIATES);
        }
        for field in body.field_accesses.iter().chain(&body.field_reads) {
            graph.add_or_update_edge(&source, &normalize_id(field), relations::USES);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{MethodSymbol, OperationBody, SourceModel};

    #[test]
    fn test_bodyless_operation_still_links_override() {
        let mut model = SourceModel::new("m", "m.sln");
        let mut graph = Graph::new("m");
        let mut index = RunIndex::default();
        index
            .operations
            .push(MethodSymbol::new("A.I.M()", "A.I").overriding("A.Base.M()"));
        model.add_method(index.operations[0].clone());

        collect(&model, &mut graph, &index);
        let edge = graph.find_edge("A.I.M()", "A.Base.M()", relations::OVERRIDES).unwrap();
        assert_eq!(edge.weight(), 1);
    }

    #[test]
    fn test_instantiation_targets_are_normalized() {
        let mut model = SourceModel::new("m", "m.sln");
        let mut index = RunIndex::default();
        index.operations.push(MethodSymbol::new("A.B.M()", "A.B"));
        model.set_body(
            "A.B.M()",
            OperationBody::new(1).with_instantiation("A.List<int>"),
        );

        let mut graph = Graph::new("m");
        collect(&model, &mut graph, &index);
        assert!(graph.find_edge("A.B.M()", "A.List", relations::INSTANTIATES).is_some());
    }
}
