//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types from the kata crate.
//!
//! # Example
//!
//! ```rust
//! use kata::prelude::*;
//!
//! let tags = NodeDefinition::builder("text", "join")
//!     .input("items", SchemaNode::array(SchemaNode::string()))
//!     .output("result", SchemaNode::string())
//!     .build()
//!     .unwrap()
//!     .search_tags();
//!
//! assert!(tags.contains("accepts:string"));
//! assert!(tags.contains("outputs:string"));
//! ```

// Schema trees
pub use crate::schema::{CompositeType, PrimitiveKind, SchemaKind, SchemaNode};

// Node types and their registry
pub use crate::node::{NodeDefinition, Slot, SlotSource, connection_filter};
pub use crate::registry::{CatalogDocument, NodeRegistry};

// Graph editing
pub use crate::graph::{Edge, EdgeOutcome, GraphInstance, PlacedNode, RejectionReason};

// Catalog loading
pub use crate::catalog::{Catalog, IntoNodeDefinitions};

// Error types
pub use crate::error::{CatalogError, GraphError, NodeError, RegistryError, SchemaError};
