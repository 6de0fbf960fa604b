//! Labeled property graph model.
//!
//! Nodes and edges with string identity, heterogeneous property maps,
//! deduplicated insertion, and the CyJSON element codec.

pub mod codec;
pub mod edge;
pub mod graph;
pub mod node;
pub mod property;

pub use codec::{CyJsonCodec, GraphCodec};
pub use edge::{Edge, EdgeKey};
pub use graph::Graph;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
