//! Member phase: fields, operations, parameters, field initializers.

use crate::lpg::{Graph, Node};
use crate::model::{FieldSymbol, MethodSymbol, SemanticModel};

use super::schema::{labels, props, relations};
use super::{normalize_id, RunIndex};

pub fn collect<M: SemanticModel>(model: &M, graph: &mut Graph, index: &mut RunIndex) {
    // Snapshot: the type list is read while operations are recorded.
    let types: Vec<(String, String)> = index
        .types
        .iter()
        .map(|t| (normalize_id(&t.qualified_name), t.qualified_name.clone()))
        .collect();

    for (type_id, type_name) in &types {
        for field in model.fields_of(type_name) {
            collect_field(graph, type_id, &field);
        }
        for method in model.methods_of(type_name) {
            let id = normalize_id(&method.qualified_name);
            if index.operation_ids.contains(&id) {
                continue;
            }
            collect_operation(graph, type_id, &id, &method);
            index.operation_ids.insert(id);
            index.operations.push(method);
        }
    }
}

fn collect_field(graph: &mut Graph, type_id: &str, field: &FieldSymbol) {
    let id = normalize_id(&format!("{}.{}", field.containing_type, field.simple_name));
    graph.add_node(
        Node::new(&id, labels::VARIABLE)
            .with_property(props::SIMPLE_NAME, field.simple_name.as_str())
            .with_property(props::QUALIFIED_NAME, field.qualified_name.as_str())
            .with_property(props::KIND, "field")
            .with_property(props::VISIBILITY, field.visibility.as_str())
            .with_property(props::SOURCE_TEXT, field.source_text.as_str())
            .with_property(props::DOC_COMMENT, field.doc_comment.as_str()),
    );
    graph.add_or_get_edge(type_id, &id, relations::ENCAPSULATES);
    graph.add_or_update_edge(&id, &normalize_id(&field.type_name), relations::TYPED);

    // Field initializers with resolved references become Script nodes.
    let Some(initializer) = &field.initializer else {
        return;
    };
    if initializer.is_empty() {
        return;
    }
    let script_id = normalize_id(&format!("{}.initializer", field.qualified_name));
    graph.add_node(
        Node::new(&script_id, labels::SCRIPT)
            .with_property(props::SIMPLE_NAME, format!("{}.initializer", field.simple_name))
            .with_property(
                props::QUALIFIED_NAME,
                format!("{}.initializer", field.qualified_name),
            )
            .with_property(props::KIND, "field-initializer")
            .with_property(props::VISIBILITY, "not applicable"),
    );
    for call in &initializer.calls {
        graph.add_or_update_edge(&script_id, &normalize_id(call), relations::INVOKES);
    }
    for target in &initializer.instantiations {
        graph.add_or_update_edge(&script_id, &normalize_id(target), relations::INSTANTIATES);
    }
}

fn collect_operation(graph: &mut Graph, type_id: &str, id: &str, method: &MethodSymbol) {
    graph.add_node(
        Node::new(id, labels::OPERATION)
            .with_property(props::SIMPLE_NAME, method.simple_name.as_str())
            .with_property(props::QUALIFIED_NAME, method.qualified_name.as_str())
            .with_property(props::KIND, method.kind.as_str())
            .with_property(props::VISIBILITY, method.visibility.as_str())
            .with_property(props::SOURCE_TEXT, method.source_text.as_str())
            .with_property(props::DOC_COMMENT, method.doc_comment.as_str()),
    );
    graph.add_or_get_edge(type_id, id, relations::ENCAPSULATES);

    if let Some(return_type) = &method.return_type {
        graph.add_or_update_edge(id, &normalize_id(return_type), relations::RETURNS);
    }

    for param in &method.parameters {
        let param_id = format!("{}:param:{}", id, param.name);
        graph.add_node(
            Node::new(&param_id, labels::VARIABLE)
                .with_property(props::SIMPLE_NAME, param.name.as_str())
                .with_property(
                    props::QUALIFIED_NAME,
                    format!("{} {}", param.type_name, param.name),
                )
                .with_property(props::KIND, "parameter")
                .with_property(props::VISIBILITY, "public")
                .with_property(props::PARAMETER_POSITION, param.position),
        );
        graph.add_or_get_edge(&param_id, id, relations::PARAMETERIZES);
        graph.add_or_update_edge(&param_id, &normalize_id(&param.type_name), relations::TYPED);
    }
}
