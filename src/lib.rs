//! # Kata - Typed Node Graphs for Transformation Pipelines
//!
//! **Kata** is the type engine behind a node-based pipeline editor. Users build
//! data transformation "formats" by wiring nodes together; every node exposes
//! named input and output slots, and every slot carries a schema. Kata decides
//! which slots may be connected, resolves generic slot types as soon as a
//! connection pins them down, and keeps the graph acyclic.
//!
//! ## Core Workflow
//!
//! 1.  **Describe Node Types**: Build [`NodeDefinition`](node::NodeDefinition)s
//!     with the builder, load them from a JSON [`Catalog`](catalog::Catalog), or
//!     implement [`IntoNodeDefinitions`](catalog::IntoNodeDefinitions) for your own format.
//! 2.  **Register**: Add them to a [`NodeRegistry`](registry::NodeRegistry), either
//!     one you own or the process-wide one behind [`registry::init_global`].
//! 3.  **Place Nodes**: A [`GraphInstance`](graph::GraphInstance) places private
//!     copies of registered templates, so generic resolution never leaks
//!     between placements.
//! 4.  **Connect**: [`GraphInstance::propose_edge`](graph::GraphInstance::propose_edge)
//!     runs the compatibility and cycle checks and, if both pass, binds any
//!     generics and commits the edge.
//!
//! ## Quick Start
//!
//! ```rust
//! use kata::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut registry = NodeRegistry::new();
//!     registry.register(
//!         NodeDefinition::builder("math", "add")
//!             .input("a", SchemaNode::generic("T"))
//!             .input("b", SchemaNode::generic("T"))
//!             .output("result", SchemaNode::generic("T"))
//!             .build()?,
//!     )?;
//!     registry.register(
//!         NodeDefinition::builder("literal", "number")
//!             .output("value", SchemaNode::number())
//!             .build()?,
//!     )?;
//!
//!     let mut graph = GraphInstance::new();
//!     let literal = graph.add_node(&registry, "literal-number")?;
//!     let add = graph.add_node(&registry, "math-add")?;
//!
//!     let outcome = graph.propose_edge(&literal, "value", &add, "a")?;
//!     assert!(outcome.is_committed());
//!
//!     // `T` is now `number` on every slot of this placement.
//!     let add = graph.node(&add)?.definition();
//!     assert_eq!(add.slot("result")?.type_label(), "number");
//!     assert!(add.generic_types().is_empty());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod error;
pub mod graph;
pub mod node;
pub mod prelude;
pub mod registry;
pub mod schema;
