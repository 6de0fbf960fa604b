//! The multi-pass graph extraction engine.
//!
//! Drives a [`SemanticModel`] through sequential discovery phases —
//! filesystem, scopes, types, hierarchy, members, usage, metrics — each
//! fully consumed before the next starts, so an entity discovered in
//! one phase can be referenced safely by every later phase. Edges are
//! constructed optimistically against symbols that may never become
//! nodes; a final reconciliation sweep discards the dangling ones.

pub mod filesystem;
pub mod members;
pub mod metrics;
pub mod schema;
pub mod scopes;
pub mod types;
pub mod usage;

use std::collections::HashSet;

use indexmap::IndexMap;
use std::path::PathBuf;
use tracing::debug;

use crate::error::Result;
use crate::lpg::Graph;
use crate::metrics::calculator;
use crate::model::{MethodSymbol, SemanticModel, TypeSymbol};

/// Caller-facing extraction switches.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Walk symbols outside the analyzed source set. When false such
    /// symbols produce no nodes, and edges referencing them are swept
    /// by reconciliation.
    pub include_external: bool,
    /// Compute Halstead metrics and fold them into the graph.
    pub halstead: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            include_external: false,
            halstead: true,
        }
    }
}

/// Per-run lookup tables shared between phases. Owned by one extraction
/// run; nothing survives it.
#[derive(Debug, Default)]
pub(crate) struct RunIndex {
    /// Directory path → Folder node ID.
    pub folders: IndexMap<PathBuf, String>,
    /// File path → File node ID.
    pub files: IndexMap<PathBuf, String>,
    /// Type symbols in discovery order, deduplicated by node ID.
    pub types: Vec<TypeSymbol>,
    pub type_ids: HashSet<String>,
    /// Operation symbols in discovery order, deduplicated by node ID.
    pub operations: Vec<MethodSymbol>,
    pub operation_ids: HashSet<String>,
}

/// Normalize a symbol's qualified name into a node ID by stripping
/// generic bracket groups, so distinct instantiations of the same open
/// generic collapse to one node. Bracket groups are matched balanced:
/// `A<B<C>>` → `A`.
pub fn normalize_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut depth = 0usize;
    for c in raw.chars() {
        match c {
            '<' => depth += 1,
            '>' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out
}

/// Run every extraction phase against `model` and return the finished
/// graph. Per-entity resolution failures are skipped, never surfaced;
/// the return is a complete graph or a single aggregate error.
pub fn extract_graph<M: SemanticModel>(model: &M, options: &ExtractOptions) -> Result<Graph> {
    let mut graph = Graph::new(model.name());
    let mut index = RunIndex::default();

    filesystem::collect(model, &mut graph, &mut index);
    debug!(nodes = graph.node_count(), "filesystem phase done");

    scopes::collect(model, &mut graph);
    types::collect(model, options, &mut graph, &mut index);
    types::link_hierarchy(model, &mut graph, &index);
    debug!(types = index.types.len(), "type phases done");

    members::collect(model, &mut graph, &mut index);
    usage::collect(model, &mut graph, &index);
    debug!(operations = index.operations.len(), "member phases done");

    metrics::collect(model, &mut graph, &index);
    if options.halstead {
        let records = calculator::analyze(model);
        metrics::fold_halstead(&mut graph, &records);
    }

    let swept = graph.reconcile();
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        swept,
        "extraction complete"
    );
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::schema::{labels, relations};
    use super::*;
    use crate::model::{
        InitializerBody, NamespaceSymbol, OperationBody, SourceModel, TypeKind, TypeSymbol,
    };
    use crate::model::{FieldSymbol, MethodSymbol};

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("A.List<T>"), "A.List");
        assert_eq!(normalize_id("A.List<U>"), "A.List");
        assert_eq!(normalize_id("A.Map<K, V>.Entry"), "A.Map.Entry");
        assert_eq!(normalize_id("A<B<C>>"), "A");
        assert_eq!(normalize_id("plain.Name"), "plain.Name");
    }

    /// One namespace `A`, class `A.B : A.Base`, method `A.B.M()` calling
    /// `A.B.N()` twice.
    fn sample_model() -> SourceModel {
        let mut model = SourceModel::new("sample", "sample.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_unit("b", Some("src/a/B.cs".into()));
        model.add_type("b", TypeSymbol::new("A.B", TypeKind::Class).with_base("A.Base"));
        model.add_type("b", TypeSymbol::new("A.Base", TypeKind::Class));
        model.add_method(MethodSymbol::new("A.B.M()", "A.B"));
        model.add_method(MethodSymbol::new("A.B.N()", "A.B"));
        model.set_body(
            "A.B.M()",
            OperationBody::new(2).with_call("A.B.N()").with_call("A.B.N()"),
        );
        model
    }

    #[test]
    fn test_end_to_end_sample() {
        let graph = extract_graph(&sample_model(), &ExtractOptions::default()).unwrap();

        // Scope and types.
        let scope = graph.find_by_id("A").unwrap();
        assert!(scope.has_label(labels::SCOPE));
        assert!(graph.find_by_id("A.B").unwrap().has_label(labels::TYPE));
        assert!(graph.find_by_id("A.Base").unwrap().has_label(labels::TYPE));
        assert!(graph.find_edge("A.B", "A.Base", relations::SPECIALIZES).is_some());

        // Operations and the doubled call.
        assert!(graph.find_by_id("A.B.M()").unwrap().has_label(labels::OPERATION));
        assert!(graph.find_by_id("A.B.N()").is_some());
        let invokes = graph.find_edge("A.B.M()", "A.B.N()", relations::INVOKES).unwrap();
        assert_eq!(invokes.weight(), 2);

        // Method-count metric on the class.
        let measures = graph
            .find_edge("A.B", "sample#NumMethods", relations::MEASURES)
            .unwrap();
        assert_eq!(measures.property("value").unwrap().as_int(), Some(2));

        // Statement-count metric on the operation with a body.
        let stmts = graph
            .find_edge("A.B.M()", "sample#NumStatements", relations::MEASURES)
            .unwrap();
        assert_eq!(stmts.property("value").unwrap().as_int(), Some(2));
        let stmts_n = graph
            .find_edge("A.B.N()", "sample#NumStatements", relations::MEASURES)
            .unwrap();
        assert_eq!(stmts_n.property("value").unwrap().as_int(), Some(0));
    }

    #[test]
    fn test_filesystem_layer() {
        let graph = extract_graph(&sample_model(), &ExtractOptions::default()).unwrap();

        let project = graph.find_by_id("sample").unwrap();
        assert!(project.has_label(labels::PROJECT));
        assert_eq!(
            project.property("qualifiedName").unwrap().as_str(),
            Some("sample.sln")
        );

        assert!(graph.find_by_id("src/a/B.cs").unwrap().has_label(labels::FILE));
        assert!(graph.find_by_id("src/a").unwrap().has_label(labels::FOLDER));
        assert!(graph.find_edge("src/a", "src/a/B.cs", relations::CONTAINS).is_some());
        assert!(graph.find_edge("sample", "src/a", relations::INCLUDES).is_some());
        assert!(graph.find_edge("src/a/B.cs", "A.B", relations::DECLARES).is_some());
        assert!(graph.find_edge("A", "A.B", relations::ENCLOSES).is_some());
    }

    #[test]
    fn test_generic_instantiations_collapse() {
        let mut model = SourceModel::new("g", "g.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_unit("u", None);
        model.add_type(
            "u",
            TypeSymbol::new("A.List<T>", TypeKind::Class).in_namespace("A"),
        );
        model.add_type(
            "u",
            TypeSymbol::new("A.List<U>", TypeKind::Class).in_namespace("A"),
        );

        let graph = extract_graph(&model, &ExtractOptions::default()).unwrap();
        assert_eq!(graph.find_nodes_with_label(labels::TYPE).len(), 1);
        assert!(graph.find_by_id("A.List").is_some());
    }

    #[test]
    fn test_external_types_are_excluded_by_default() {
        let mut model = SourceModel::new("x", "x.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_unit("u", None);
        model.add_type("u", TypeSymbol::new("A.Mine", TypeKind::Class).with_base("Lib.Base"));
        model.add_type("u", TypeSymbol::new("Lib.Base", TypeKind::Class).external());

        let graph = extract_graph(&model, &ExtractOptions::default()).unwrap();
        assert!(graph.find_by_id("Lib.Base").is_none());
        // The optimistic specializes edge got swept.
        assert!(graph.find_edge("A.Mine", "Lib.Base", relations::SPECIALIZES).is_none());

        let opts = ExtractOptions {
            include_external: true,
            ..ExtractOptions::default()
        };
        let graph = extract_graph(&model, &opts).unwrap();
        assert!(graph.find_by_id("Lib.Base").is_some());
        assert!(graph.find_edge("A.Mine", "Lib.Base", relations::SPECIALIZES).is_some());
    }

    #[test]
    fn test_members_and_parameters() {
        let mut model = SourceModel::new("m", "m.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_unit("u", None);
        model.add_type("u", TypeSymbol::new("A.B", TypeKind::Class));
        model.add_type("u", TypeSymbol::new("A.C", TypeKind::Class));
        model.add_field(FieldSymbol::new("A.B.count", "A.C"));
        model.add_method(
            MethodSymbol::new("A.B.M(A.C, int)", "A.B")
                .returning("A.C")
                .with_param("c", "A.C")
                .with_param("n", "int"),
        );

        let graph = extract_graph(&model, &ExtractOptions::default()).unwrap();

        // Field.
        let field = graph.find_by_id("A.B.count").unwrap();
        assert!(field.has_label(labels::VARIABLE));
        assert_eq!(field.property("kind").unwrap().as_str(), Some("field"));
        assert!(graph.find_edge("A.B", "A.B.count", relations::ENCAPSULATES).is_some());
        assert!(graph.find_edge("A.B.count", "A.C", relations::TYPED).is_some());

        // Operation and return type.
        assert!(graph.find_edge("A.B", "A.B.M(A.C, int)", relations::ENCAPSULATES).is_some());
        assert!(graph.find_edge("A.B.M(A.C, int)", "A.C", relations::RETURNS).is_some());

        // Parameters.
        let param = graph.find_by_id("A.B.M(A.C, int):param:c").unwrap();
        assert_eq!(param.property("parameterPosition").unwrap().as_int(), Some(0));
        assert!(graph
            .find_edge("A.B.M(A.C, int):param:c", "A.B.M(A.C, int)", relations::PARAMETERIZES)
            .is_some());
        assert!(graph.find_edge("A.B.M(A.C, int):param:c", "A.C", relations::TYPED).is_some());

        // `int` is not a node, so the second parameter's typed edge was swept.
        let n = graph.find_by_id("A.B.M(A.C, int):param:n").unwrap();
        assert_eq!(n.property("parameterPosition").unwrap().as_int(), Some(1));
        assert!(graph.find_edge("A.B.M(A.C, int):param:n", "int", relations::TYPED).is_none());
    }

    #[test]
    fn test_field_initializer_script() {
        let mut model = SourceModel::new("s", "s.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_unit("u", None);
        model.add_type("u", TypeSymbol::new("A.B", TypeKind::Class));
        model.add_field(
            FieldSymbol::new("A.B.helper", "A.B")
                .with_initializer(InitializerBody::default().with_instantiation("A.B")),
        );

        let graph = extract_graph(&model, &ExtractOptions::default()).unwrap();
        let script = graph.find_by_id("A.B.helper.initializer").unwrap();
        assert!(script.has_label(labels::SCRIPT));
        assert!(graph
            .find_edge("A.B.helper.initializer", "A.B", relations::INSTANTIATES)
            .is_some());
    }

    #[test]
    fn test_overrides_and_uses() {
        let mut model = SourceModel::new("o", "o.sln");
        model.add_namespace(NamespaceSymbol::new("A"));
        model.add_unit("u", None);
        model.add_type("u", TypeSymbol::new("A.Base", TypeKind::AbstractClass));
        model.add_type("u", TypeSymbol::new("A.Impl", TypeKind::Class).with_base("A.Base"));
        model.add_field(FieldSymbol::new("A.Impl.state", "int"));
        model.add_method(MethodSymbol::new("A.Base.Run()", "A.Base"));
        model.add_method(MethodSymbol::new("A.Impl.Run()", "A.Impl").overriding("A.Base.Run()"));
        model.set_body(
            "A.Impl.Run()",
            OperationBody::new(2)
                .with_field_access("A.Impl.state")
                .with_field_read("A.Impl.state"),
        );

        let graph = extract_graph(&model, &ExtractOptions::default()).unwrap();
        assert!(graph
            .find_edge("A.Impl.Run()", "A.Base.Run()", relations::OVERRIDES)
            .is_some());
        // Both detection paths land on the same triple and accumulate.
        let uses = graph.find_edge("A.Impl.Run()", "A.Impl.state", relations::USES).unwrap();
        assert_eq!(uses.weight(), 2);
    }

    #[test]
    fn test_halstead_fold_adds_metric_nodes() {
        let graph = extract_graph(&sample_model(), &ExtractOptions::default()).unwrap();
        let volume = graph.find_by_id("sample#HalsteadVolume").unwrap();
        assert!(volume.has_label(labels::METRIC));
        assert!(graph
            .find_edge("A.B.M()", "sample#HalsteadVolume", relations::MEASURES)
            .is_some());
        // Class-level record lands on the Type node.
        assert!(graph
            .find_edge("A.B", "sample#HalsteadLength", relations::MEASURES)
            .is_some());

        let opts = ExtractOptions {
            halstead: false,
            ..ExtractOptions::default()
        };
        let graph = extract_graph(&sample_model(), &opts).unwrap();
        assert!(graph.find_by_id("sample#HalsteadVolume").is_none());
    }
}
