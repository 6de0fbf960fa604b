//! The graph container: deduplicated node and edge sets with string identity.

use indexmap::IndexMap;

use super::edge::{Edge, EdgeKey};
use super::node::Node;

/// A named labeled property graph.
///
/// Nodes are keyed by ID (first insert wins); edges by their identity
/// triple. No foreign-key constraint is enforced during construction:
/// edges may reference nodes that do not exist yet — or never will —
/// until [`Graph::reconcile`] sweeps them out.
#[derive(Debug, Clone)]
pub struct Graph {
    name: String,
    nodes: IndexMap<String, Node>,
    edges: IndexMap<EdgeKey, Edge>,
}

impl Graph {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nodes: IndexMap::new(),
            edges: IndexMap::new(),
        }
    }

    /// Name of the analyzed unit this graph was built from. Bookkeeping
    /// only — the name is not part of any node or edge content.
    pub fn name(&self) -> &str {
        &self.name
    }

    // ─── Node Operations ────────────────────────────────────────

    /// Idempotent insert keyed by ID. A node with an already-present ID
    /// is silently ignored; the first occurrence wins.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.entry(node.id.clone()).or_insert(node);
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn find_nodes_with_label(&self, label: &str) -> Vec<&Node> {
        self.nodes.values().filter(|n| n.has_label(label)).collect()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // ─── Edge Operations ────────────────────────────────────────

    /// Return the edge for the (source, target, label) triple, creating
    /// it with `weight = 1` if absent.
    pub fn add_or_get_edge(
        &mut self,
        source: &str,
        target: &str,
        label: &str,
    ) -> &mut Edge {
        let key = EdgeKey {
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
        };
        self.edges
            .entry(key)
            .or_insert_with(|| Edge::new(source, target, label))
    }

    /// Record one occurrence of a relationship: creates the edge when the
    /// triple is new, otherwise increments its `weight`.
    pub fn add_or_update_edge(&mut self, source: &str, target: &str, label: &str) -> &mut Edge {
        let key = EdgeKey {
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
        };
        match self.edges.entry(key) {
            indexmap::map::Entry::Occupied(entry) => {
                let edge = entry.into_mut();
                edge.bump_weight();
                edge
            }
            indexmap::map::Entry::Vacant(entry) => entry.insert(Edge::new(source, target, label)),
        }
    }

    pub fn find_edge(&self, source: &str, target: &str, label: &str) -> Option<&Edge> {
        let key = EdgeKey {
            source: source.to_string(),
            target: target.to_string(),
            label: label.to_string(),
        };
        self.edges.get(&key)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // ─── Reconciliation ─────────────────────────────────────────

    /// Discard every edge whose source or target is not a node.
    ///
    /// The extraction phases construct edges optimistically against
    /// symbols that may never become nodes; this sweep restores
    /// consistency and is idempotent. Returns the number of edges removed.
    pub fn reconcile(&mut self) -> usize {
        let before = self.edges.len();
        let nodes = &self.nodes;
        self.edges
            .retain(|key, _| nodes.contains_key(&key.source) && nodes.contains_key(&key.target));
        before - self.edges.len()
    }
}
