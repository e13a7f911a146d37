//! Graph instances: placed nodes, the edges between them, and the checks a new
//! edge has to pass before it is committed.

use crate::error::GraphError;
use crate::node::NodeDefinition;
use crate::registry::NodeRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

pub mod compatibility;
pub mod connect;
pub mod cycle;

pub use compatibility::*;
pub use connect::*;
pub use cycle::*;

/// A directed connection from an output slot to an input slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub source_slot: String,
    pub target: String,
    pub target_slot: String,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        source_slot: impl Into<String>,
        target: impl Into<String>,
        target_slot: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            source_slot: source_slot.into(),
            target: target.into(),
            target_slot: target_slot.into(),
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} -> {}.{}",
            self.source, self.source_slot, self.target, self.target_slot
        )
    }
}

/// A node placed in a graph, owning its own copy of the node definition.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNode {
    pub id: String,
    pub type_key: String,
    definition: NodeDefinition,
}

impl PlacedNode {
    /// The definition as resolved for this placement.
    pub fn definition(&self) -> &NodeDefinition {
        &self.definition
    }
}

/// The graph a user is currently editing.
///
/// Nodes and edges together always form a DAG: every edge goes through
/// [`GraphInstance::propose_edge`], which refuses anything that would close a loop.
#[derive(Debug, Clone, Default)]
pub struct GraphInstance {
    nodes: IndexMap<String, PlacedNode>,
    edges: Vec<Edge>,
    next_index: usize,
}

impl GraphInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places a fresh copy of `type_key` and returns its generated id.
    pub fn add_node(
        &mut self,
        registry: &NodeRegistry,
        type_key: &str,
    ) -> Result<String, GraphError> {
        let definition = registry.instantiate(type_key)?;
        let id = loop {
            let candidate = format!("{}-{}", type_key, self.next_index);
            self.next_index += 1;
            if !self.nodes.contains_key(&candidate) {
                break candidate;
            }
        };
        self.place(id.clone(), type_key, definition);
        Ok(id)
    }

    /// Places a fresh copy of `type_key` under an id chosen by the caller.
    pub fn insert_node(
        &mut self,
        id: impl Into<String>,
        registry: &NodeRegistry,
        type_key: &str,
    ) -> Result<(), GraphError> {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNodeId(id));
        }
        let definition = registry.instantiate(type_key)?;
        self.place(id, type_key, definition);
        Ok(())
    }

    fn place(&mut self, id: String, type_key: &str, definition: NodeDefinition) {
        debug!(node = %id, node_type = %type_key, "Placed node");
        self.nodes.insert(
            id.clone(),
            PlacedNode {
                id,
                type_key: type_key.to_string(),
                definition,
            },
        );
    }

    /// Removes a node together with every edge touching it.
    ///
    /// Generics resolved on neighbouring nodes stay resolved.
    pub fn remove_node(&mut self, id: &str) -> Result<PlacedNode, GraphError> {
        let node = self
            .nodes
            .shift_remove(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))?;
        self.edges.retain(|edge| edge.source != id && edge.target != id);
        Ok(node)
    }

    /// Removes a single edge, returning whether it existed.
    pub fn remove_edge(&mut self, edge: &Edge) -> bool {
        let before = self.edges.len();
        self.edges.retain(|existing| existing != edge);
        self.edges.len() != before
    }

    pub fn node(&self, id: &str) -> Result<&PlacedNode, GraphError> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotFound(id.to_string()))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &PlacedNode> {
        self.nodes.values()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn contains_edge(&self, edge: &Edge) -> bool {
        self.edges.contains(edge)
    }

    /// Ids of the nodes fed directly by `id`.
    pub fn outgoers<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.edges
            .iter()
            .filter(move |edge| edge.source == id)
            .map(|edge| edge.target.as_str())
    }
}
