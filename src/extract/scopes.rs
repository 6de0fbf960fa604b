//! Scope phase: one `Scope` node per namespace.

use crate::lpg::{Graph, Node};
use crate::model::{NamespaceSymbol, SemanticModel};

use super::schema::{labels, props, relations};
use super::normalize_id;

/// Depth-first, parent-before-child walk of the namespace tree. The
/// global namespace gets no node, so its direct children have no
/// parent edge. First occurrence wins.
pub fn collect<M: SemanticModel>(model: &M, graph: &mut Graph) {
    for namespace in model.namespaces() {
        visit(&namespace, None, graph);
    }
}

fn visit(namespace: &NamespaceSymbol, parent_id: Option<&str>, graph: &mut Graph) {
    let id = normalize_id(&namespace.qualified_name);
    if !graph.contains_node(&id) {
        graph.add_node(
            Node::new(&id, labels::SCOPE)
                .with_property(props::SIMPLE_NAME, namespace.simple_name.as_str())
                .with_property(props::QUALIFIED_NAME, namespace.qualified_name.as_str())
                .with_property(props::KIND, "namespace"),
        );
        if let Some(parent_id) = parent_id {
            graph.add_or_get_edge(parent_id, &id, relations::ENCLOSES);
        }
    }
    for child in &namespace.children {
        visit(child, Some(&id), graph);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceModel;

    #[test]
    fn test_nested_namespaces() {
        let mut model = SourceModel::new("p", "p.sln");
        model.add_namespace(
            NamespaceSymbol::new("A")
                .with_child(NamespaceSymbol::new("A.B").with_child(NamespaceSymbol::new("A.B.C"))),
        );

        let mut graph = Graph::new("p");
        collect(&model, &mut graph);

        assert_eq!(graph.find_nodes_with_label(labels::SCOPE).len(), 3);
        // Top-level namespace has no parent edge (global namespace is skipped).
        assert!(graph.edges().all(|e| e.target != "A"));
        assert!(graph.find_edge("A", "A.B", relations::ENCLOSES).is_some());
        assert!(graph.find_edge("A.B", "A.B.C", relations::ENCLOSES).is_some());
    }

    #[test]
    fn test_repeated_namespace_keeps_first_node() {
        let mut model = SourceModel::new("p", "p.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_namespace(NamespaceSymbol::new("A"));

        let mut graph = Graph::new("p");
        collect(&model, &mut graph);
        assert_eq!(graph.find_nodes_with_label(labels::SCOPE).len(), 1);
    }
}
