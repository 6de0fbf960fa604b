//! Type and hierarchy phases.

use tracing::trace;

use crate::lpg::{Graph, Node};
use crate::model::SemanticModel;

use super::schema::{labels, props, relations};
use super::{normalize_id, ExtractOptions, RunIndex};

/// One `Type` node per declared symbol, deduplicated across partial
/// declarations, with `declares` from the owning file and `encloses`
/// from the owning scope.
pub fn collect<M: SemanticModel>(
    model: &M,
    options: &ExtractOptions,
    graph: &mut Graph,
    index: &mut RunIndex,
) {
    for unit in model.units() {
        let file_id = unit.path.as_ref().and_then(|p| index.files.get(p).cloned());

        for symbol in model.declared_types(&unit.name) {
            if symbol.external && !options.include_external {
                trace!(symbol = %symbol.qualified_name, "skipping external type");
                continue;
            }
            let id = normalize_id(&symbol.qualified_name);
            if index.type_ids.contains(&id) {
                continue;
            }

            graph.add_node(
                Node::new(&id, labels::TYPE)
                    .with_property(props::SIMPLE_NAME, symbol.simple_name.as_str())
                    .with_property(props::QUALIFIED_NAME, symbol.qualified_name.as_str())
                    .with_property(props::KIND, symbol.kind.as_str())
                    .with_property(props::VISIBILITY, symbol.visibility.as_str())
                    .with_property(props::DOC_COMMENT, symbol.doc_comment.as_str()),
            );

            if let Some(file_id) = &file_id {
                graph.add_or_get_edge(file_id, &id, relations::DECLARES);
            }
            if !symbol.namespace.is_empty() {
                let scope_id = normalize_id(&symbol.namespace);
                graph.add_or_get_edge(&scope_id, &id, relations::ENCLOSES);
            }

            index.type_ids.insert(id);
            index.types.push(symbol);
        }
    }
}

/// `specializes` edges to base types (universal root skipped) and
/// interfaces, `encloses` to nested types. No nodes are created here;
/// unknown targets dangle until the sweep.
pub fn link_hierarchy<M: SemanticModel>(model: &M, graph: &mut Graph, index: &RunIndex) {
    let root = model.universal_root();
    for symbol in &index.types {
        let id = normalize_id(&symbol.qualified_name);

        for nested in &symbol.nested_types {
            graph.add_or_update_edge(&id, &normalize_id(nested), relations::ENCLOSES);
        }

        if let Some(base) = &symbol.base_type {
            let base_id = normalize_id(base);
            if base_id != root {
                graph.add_or_update_edge(&id, &base_id, relations::SPECIALIZES);
            }
        }

        for interface in &symbol.interfaces {
            graph.add_or_update_edge(&id, &normalize_id(interface), relations::SPECIALIZES);
        }
    }
}
