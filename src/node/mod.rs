use crate::error::{NodeError, SchemaError};
use crate::schema::SchemaNode;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use std::fmt;
use tracing::{trace, warn};

mod builder;
pub mod tags;

pub use builder::NodeDefinitionBuilder;
pub use tags::*;

/// Which side of a node a slot lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotSource {
    Input,
    Output,
}

impl SlotSource {
    /// The side a connection from this slot has to land on.
    pub fn opposite(&self) -> Self {
        match self {
            SlotSource::Input => SlotSource::Output,
            SlotSource::Output => SlotSource::Input,
        }
    }
}

impl fmt::Display for SlotSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotSource::Input => write!(f, "input"),
            SlotSource::Output => write!(f, "output"),
        }
    }
}

/// A borrowed view of one named slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot<'a> {
    pub name: &'a str,
    pub source: SlotSource,
    pub schema: &'a SchemaNode,
}

impl Slot<'_> {
    pub fn type_label(&self) -> String {
        self.schema.type_label()
    }

    /// The placeholder deciding this slot's type, if it is still generic.
    pub fn generic(&self) -> Option<&str> {
        self.schema.generic_name()
    }
}

/// A node type: a categorized, named unit with typed input and output slots.
///
/// Definitions registered in a [`crate::registry::NodeRegistry`] act as
/// templates. A graph instance works on its own copy, so resolving a generic
/// on one placed node never leaks into another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeDefinition {
    pub category: String,
    pub name: String,
    pub title: Option<String>,
    pub aliases: Vec<String>,
    pub searchable: bool,
    inputs: IndexMap<String, SchemaNode>,
    outputs: IndexMap<String, SchemaNode>,
    #[serde(skip)]
    generic_types: IndexSet<String>,
}

impl NodeDefinition {
    pub fn builder(category: impl Into<String>, name: impl Into<String>) -> NodeDefinitionBuilder {
        NodeDefinitionBuilder::new(category, name)
    }

    /// The registry key of this node type, `category-name`.
    pub fn type_key(&self) -> String {
        format!("{}-{}", self.category, self.name)
    }

    /// Placeholders still unresolved on any slot of this node.
    pub fn generic_types(&self) -> &IndexSet<String> {
        &self.generic_types
    }

    pub fn inputs(&self) -> impl Iterator<Item = Slot<'_>> {
        self.inputs.iter().map(|(name, schema)| Slot {
            name,
            source: SlotSource::Input,
            schema,
        })
    }

    pub fn outputs(&self) -> impl Iterator<Item = Slot<'_>> {
        self.outputs.iter().map(|(name, schema)| Slot {
            name,
            source: SlotSource::Output,
            schema,
        })
    }

    /// Slots on one side of the node, in declaration order.
    pub fn slots(&self, source: SlotSource) -> Box<dyn Iterator<Item = Slot<'_>> + '_> {
        match source {
            SlotSource::Input => Box::new(self.inputs()),
            SlotSource::Output => Box::new(self.outputs()),
        }
    }

    pub fn has_slot(&self, name: &str) -> bool {
        self.inputs.contains_key(name) || self.outputs.contains_key(name)
    }

    /// Looks a slot up by name on either side of the node.
    pub fn slot(&self, name: &str) -> Result<Slot<'_>, NodeError> {
        if let Some((name, schema)) = self.inputs.get_key_value(name) {
            return Ok(Slot {
                name,
                source: SlotSource::Input,
                schema,
            });
        }
        if let Some((name, schema)) = self.outputs.get_key_value(name) {
            return Ok(Slot {
                name,
                source: SlotSource::Output,
                schema,
            });
        }
        Err(NodeError::SlotNotFound {
            slot: name.to_string(),
            type_key: self.type_key(),
        })
    }

    /// Binds `placeholder` to `resolved_with` on every slot that references it.
    ///
    /// Returns `Ok(false)` without touching the node when the placeholder is not
    /// (or no longer) generic here, which happens routinely when an earlier
    /// edge already resolved it.
    pub fn resolve_generic_type(
        &mut self,
        placeholder: &str,
        resolved_with: &SchemaNode,
    ) -> Result<bool, SchemaError> {
        if !self.generic_types.contains(placeholder) {
            warn!(
                node_type = %self.type_key(),
                placeholder,
                "Ignoring resolution of a placeholder that is not generic on this node"
            );
            return Ok(false);
        }

        // Substitute everything first so a failure leaves the node untouched.
        let mut replaced = Vec::new();
        for (source, map) in [
            (SlotSource::Input, &self.inputs),
            (SlotSource::Output, &self.outputs),
        ] {
            for (name, schema) in map {
                if schema.contains_generic(placeholder) {
                    let schema = schema.substitute(placeholder, resolved_with)?;
                    replaced.push((source, name.clone(), schema));
                }
            }
        }

        for (source, name, schema) in replaced {
            trace!(
                node_type = %self.type_key(),
                slot = %name,
                placeholder,
                resolved = %schema,
                "Resolved generic slot"
            );
            let map = match source {
                SlotSource::Input => &mut self.inputs,
                SlotSource::Output => &mut self.outputs,
            };
            map.insert(name, schema);
        }

        self.refresh_generic_types();
        Ok(true)
    }

    fn refresh_generic_types(&mut self) {
        let mut names = IndexSet::new();
        for schema in self.inputs.values().chain(self.outputs.values()) {
            schema.collect_generic_names(&mut names);
        }
        self.generic_types = names;
    }
}
