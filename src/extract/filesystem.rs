//! Filesystem phase: Project, Folder and File nodes.

use crate::lpg::{Graph, Node};
use crate::model::SemanticModel;

use super::schema::{labels, props, relations};
use super::RunIndex;

/// Create the Project node, one File node per unit with a resolvable
/// path, one Folder node per unique parent directory (no ancestry
/// walk), `contains` folder→file, and `includes` project→folder.
pub fn collect<M: SemanticModel>(model: &M, graph: &mut Graph, index: &mut RunIndex) {
    let project_id = model.name().to_string();
    graph.add_node(
        Node::new(&project_id, labels::PROJECT)
            .with_property(props::SIMPLE_NAME, model.name())
            .with_property(props::QUALIFIED_NAME, model.origin())
            .with_property(props::KIND, "project"),
    );

    for unit in model.units() {
        let Some(path) = unit.path else { continue };
        if index.files.contains_key(&path) {
            continue;
        }

        let file_id = path.to_string_lossy().to_string();
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_id.clone());
        graph.add_node(
            Node::new(&file_id, labels::FILE)
                .with_property(props::SIMPLE_NAME, file_name)
                .with_property(props::QUALIFIED_NAME, file_id.as_str())
                .with_property(props::KIND, "file"),
        );

        let dir = path.parent().unwrap_or(std::path::Path::new("")).to_path_buf();
        let folder_id = index.folders.get(&dir).cloned().unwrap_or_else(|| {
            let folder_id = dir.to_string_lossy().to_string();
            let folder_name = dir
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| folder_id.clone());
            graph.add_node(
                Node::new(&folder_id, labels::FOLDER)
                    .with_property(props::SIMPLE_NAME, folder_name)
                    .with_property(props::QUALIFIED_NAME, folder_id.as_str())
                    .with_property(props::KIND, "folder"),
            );
            index.folders.insert(dir.clone(), folder_id.clone());
            folder_id
        });

        graph.add_or_get_edge(&folder_id, &file_id, relations::CONTAINS);
        index.files.insert(path, file_id);
    }

    let folder_ids: Vec<String> = index.folders.values().cloned().collect();
    for folder_id in folder_ids {
        graph.add_or_get_edge(&project_id, &folder_id, relations::INCLUDES);
    }
}
