//! # lpgx
//!
//! Typed labeled-property-graph extraction from resolved source code.
//!
//! lpgx turns a [`SemanticModel`] — an already-bound view of a body of
//! source code — into a deduplicated labeled property graph: files,
//! namespaces, types, operations, variables and metrics as nodes,
//! weighted relationships as edges, serialized as CyJSON.
//!
//! ## Key Features
//!
//! - **Deduplicated**: nodes collapse by ID, edges by their
//!   (source, target, label) triple with occurrence weights
//! - **Optimistic**: edges may reference symbols that never become
//!   nodes; a final reconciliation sweep discards the dangling ones
//! - **Metric-aware**: method/statement counts and Halstead complexity
//!   folded into the graph as measurement edges
//!
//! ## Quick Start
//!
//! ```rust
//! use lpgx::model::{MethodSymbol, NamespaceSymbol, TypeKind, TypeSymbol};
//! use lpgx::{extract_graph, ExtractOptions, SourceModel};
//!
//! let mut model = SourceModel::new("demo", "demo.sln");
//! model.add_namespace(NamespaceSymbol::new("App"));
//! model.add_unit("svc", Some("src/Service.cs".into()));
//! model.add_type("svc", TypeSymbol::new("App.Service", TypeKind::Class));
//! model.add_method(MethodSymbol::new("App.Service.Run()", "App.Service"));
//!
//! let graph = extract_graph(&model, &ExtractOptions::default()).unwrap();
//! assert!(graph.find_by_id("App.Service.Run()").is_some());
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod lpg;
pub mod metrics;
pub mod model;

// Re-exports for convenience
pub use config::LpgxConfig;
pub use error::{Error, Result};
pub use extract::{extract_graph, ExtractOptions};
pub use lpg::{CyJsonCodec, Edge, Graph, GraphCodec, Node, PropertyValue};
pub use metrics::HalsteadMetrics;
pub use model::{SemanticModel, SourceModel};
