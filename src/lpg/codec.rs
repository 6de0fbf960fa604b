//! CyJSON element codec.
//!
//! Encodes a graph into the nested element wire format used by
//! Cytoscape-style consumers: a top-level `elements` object holding
//! `nodes` and `edges` arrays, each element wrapped under a `data` key.
//!
//! Decoding is supported for single elements only; decoding a whole
//! graph, node set, or edge set back from the wire format fails with
//! [`Error::NotImplemented`] — full-graph round-tripping is a known gap.

use serde_json::{json, Map, Value};
use tracing::warn;

use crate::error::{Error, Result};

use super::edge::Edge;
use super::graph::Graph;
use super::node::Node;
use super::property::{PropertyMap, PropertyValue};

/// Encode/decode seam between graphs and a wire representation.
pub trait GraphCodec {
    fn encode_node(&self, node: &Node) -> Value;
    fn encode_edge(&self, edge: &Edge) -> Value;
    fn encode_nodes(&self, nodes: &[&Node]) -> Value;
    fn encode_edges(&self, edges: &[&Edge]) -> Value;
    fn encode_graph(&self, graph: &Graph) -> Value;

    fn decode_node(&self, encoded: &Value) -> Result<Node>;
    fn decode_edge(&self, encoded: &Value) -> Result<Edge>;
    fn decode_nodes(&self, encoded: &Value) -> Result<Vec<Node>>;
    fn decode_edges(&self, encoded: &Value) -> Result<Vec<Edge>>;
    fn decode_graph(&self, encoded: &Value) -> Result<Graph>;
}

/// The CyJSON nested element codec.
#[derive(Debug, Default, Clone, Copy)]
pub struct CyJsonCodec;

impl CyJsonCodec {
    pub fn new() -> Self {
        CyJsonCodec
    }

    /// Encode the graph and write it as JSON to `path`.
    ///
    /// A write failure is surfaced to the caller; the in-memory graph
    /// stays valid.
    pub fn write_to_file(&self, graph: &Graph, path: &std::path::Path) -> Result<()> {
        let encoded = self.encode_graph(graph);
        std::fs::write(path, serde_json::to_string_pretty(&encoded)?)?;
        Ok(())
    }
}

fn encode_properties(properties: &PropertyMap) -> Value {
    serde_json::to_value(properties).unwrap_or_else(|_| json!({}))
}

fn decode_properties(data: &Map<String, Value>) -> PropertyMap {
    let mut properties = PropertyMap::new();
    let Some(raw) = data.get("properties").and_then(Value::as_object) else {
        return properties;
    };
    for (key, value) in raw {
        if value.is_null() {
            continue;
        }
        match serde_json::from_value::<PropertyValue>(value.clone()) {
            Ok(decoded) => {
                properties.insert(key.clone(), decoded);
            }
            Err(_) => {
                // Nested objects have no property-model arm.
                warn!(key, "skipping property with unrepresentable value");
            }
        }
    }
    properties
}

fn element_data<'a>(encoded: &'a Value, what: &str) -> Result<&'a Map<String, Value>> {
    encoded
        .get("data")
        .and_then(Value::as_object)
        .ok_or_else(|| Error::MalformedElement(format!("{what} is missing a data object")))
}

fn required_str<'a>(data: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    data.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MalformedElement(format!("missing string field `{field}`")))
}

impl GraphCodec for CyJsonCodec {
    fn encode_node(&self, node: &Node) -> Value {
        json!({
            "data": {
                "id": node.id,
                "labels": node.labels,
                "properties": encode_properties(&node.properties),
            }
        })
    }

    fn encode_edge(&self, edge: &Edge) -> Value {
        json!({
            "data": {
                "id": edge.display_id(),
                "source": edge.source,
                "target": edge.target,
                "label": edge.label,
                "properties": encode_properties(&edge.properties),
            }
        })
    }

    fn encode_nodes(&self, nodes: &[&Node]) -> Value {
        Value::Array(nodes.iter().map(|n| self.encode_node(n)).collect())
    }

    fn encode_edges(&self, edges: &[&Edge]) -> Value {
        Value::Array(edges.iter().map(|e| self.encode_edge(e)).collect())
    }

    fn encode_graph(&self, graph: &Graph) -> Value {
        let nodes: Vec<&Node> = graph.nodes().collect();
        let edges: Vec<&Edge> = graph.edges().collect();
        json!({
            "elements": {
                "nodes": self.encode_nodes(&nodes),
                "edges": self.encode_edges(&edges),
            }
        })
    }

    fn decode_node(&self, encoded: &Value) -> Result<Node> {
        let data = element_data(encoded, "node")?;
        let id = required_str(data, "id")?;
        let labels: Vec<String> = data
            .get("labels")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let mut node = Node::new(id, "");
        node.labels = labels;
        node.properties = decode_properties(data);
        Ok(node)
    }

    fn decode_edge(&self, encoded: &Value) -> Result<Edge> {
        let data = element_data(encoded, "edge")?;
        let mut edge = Edge::new(
            required_str(data, "source")?,
            required_str(data, "target")?,
            required_str(data, "label")?,
        );
        let properties = decode_properties(data);
        if !properties.is_empty() {
            edge.properties = properties;
        }
        Ok(edge)
    }

    fn decode_nodes(&self, _encoded: &Value) -> Result<Vec<Node>> {
        Err(Error::NotImplemented("a node set"))
    }

    fn decode_edges(&self, _encoded: &Value) -> Result<Vec<Edge>> {
        Err(Error::NotImplemented("an edge set"))
    }

    fn decode_graph(&self, _encoded: &Value) -> Result<Graph> {
        Err(Error::NotImplemented("a whole graph"))
    }
}
