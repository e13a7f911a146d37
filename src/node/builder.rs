use super::NodeDefinition;
use crate::error::NodeError;
use crate::schema::SchemaNode;
use indexmap::{IndexMap, IndexSet};

/// Step-by-step construction of a [`NodeDefinition`].
///
/// ```rust
/// use kata::prelude::*;
///
/// let add = NodeDefinition::builder("math", "add")
///     .input("a", SchemaNode::generic("T"))
///     .input("b", SchemaNode::generic("T"))
///     .output("result", SchemaNode::generic("T"))
///     .title("add")
///     .build()
///     .expect("valid definition");
///
/// assert_eq!(add.type_key(), "math-add");
/// assert!(add.generic_types().contains("T"));
/// ```
pub struct NodeDefinitionBuilder {
    category: String,
    name: String,
    title: Option<String>,
    aliases: Vec<String>,
    searchable: bool,
    inputs: Vec<(String, SchemaNode)>,
    outputs: Vec<(String, SchemaNode)>,
}

impl NodeDefinitionBuilder {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            title: None,
            aliases: Vec::new(),
            searchable: true,
            inputs: Vec::new(),
            outputs: Vec::new(),
        }
    }
    pub fn input(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.inputs.push((name.into(), schema));
        self
    }
    pub fn output(mut self, name: impl Into<String>, schema: SchemaNode) -> Self {
        self.outputs.push((name.into(), schema));
        self
    }
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }
    /// Hides the node from catalog documents when `false`.
    pub fn searchable(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Validates the slot layout and computes the node's generic types.
    ///
    /// Slot names must be unique across both sides of the node, since slots
    /// are looked up by name alone.
    pub fn build(self) -> Result<NodeDefinition, NodeError> {
        if self.category.is_empty() {
            return Err(NodeError::EmptyIdentifier("category"));
        }
        if self.name.is_empty() {
            return Err(NodeError::EmptyIdentifier("name"));
        }

        let type_key = format!("{}-{}", self.category, self.name);
        let mut seen = IndexSet::new();
        for (slot, _) in self.inputs.iter().chain(self.outputs.iter()) {
            if slot.is_empty() {
                return Err(NodeError::EmptyIdentifier("slot name"));
            }
            if !seen.insert(slot.as_str()) {
                return Err(NodeError::DuplicateSlot {
                    slot: slot.clone(),
                    type_key,
                });
            }
        }

        let mut definition = NodeDefinition {
            category: self.category,
            name: self.name,
            title: self.title,
            aliases: self.aliases,
            searchable: self.searchable,
            inputs: self.inputs.into_iter().collect::<IndexMap<_, _>>(),
            outputs: self.outputs.into_iter().collect::<IndexMap<_, _>>(),
            generic_types: IndexSet::new(),
        };
        definition.refresh_generic_types();
        Ok(definition)
    }
}
