use crate::error::RegistryError;
use crate::node::NodeDefinition;
use ahash::AHashMap;
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

mod global;

pub use global::{init_global, reset_global, with_global, with_global_mut};

/// One entry of the node picker's search index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogDocument {
    pub id: String,
    pub category: String,
    pub name: String,
    pub title: String,
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
}

/// Node type templates keyed by `category-name`.
///
/// Entries are only ever added. Placing a node in a graph clones the template,
/// so the registry itself is never mutated by generic resolution.
#[derive(Debug, Clone, Default)]
pub struct NodeRegistry {
    definitions: IndexMap<String, NodeDefinition>,
    categories: AHashMap<String, String>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a node type. A key can only be registered once.
    pub fn register(&mut self, definition: NodeDefinition) -> Result<(), RegistryError> {
        let type_key = definition.type_key();
        if self.definitions.contains_key(&type_key) {
            return Err(RegistryError::DuplicateType(type_key));
        }
        debug!(node_type = %type_key, "Registered node type");
        self.definitions.insert(type_key, definition);
        Ok(())
    }

    pub fn lookup(&self, type_key: &str) -> Result<&NodeDefinition, RegistryError> {
        self.definitions
            .get(type_key)
            .ok_or_else(|| RegistryError::TypeNotFound(type_key.to_string()))
    }

    /// A fresh, independently resolvable copy of a registered template.
    pub fn instantiate(&self, type_key: &str) -> Result<NodeDefinition, RegistryError> {
        self.lookup(type_key).cloned()
    }

    pub fn contains(&self, type_key: &str) -> bool {
        self.definitions.contains_key(type_key)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Registered definitions in registration order.
    pub fn definitions(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.definitions.values()
    }

    /// Gives a category a display name used in catalog documents.
    pub fn register_category(&mut self, id: impl Into<String>, display_name: impl Into<String>) {
        self.categories.insert(id.into(), display_name.into());
    }

    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.categories.get(id).map(String::as_str).unwrap_or(id)
    }

    /// Search documents for every searchable node type.
    pub fn documents(&self) -> Vec<CatalogDocument> {
        self.definitions
            .iter()
            .filter(|(_, definition)| definition.searchable)
            .map(|(type_key, definition)| CatalogDocument {
                id: type_key.clone(),
                category: self.category_name(&definition.category).to_string(),
                name: definition.name.clone(),
                title: definition.title.clone().unwrap_or_default(),
                aliases: definition.aliases.clone(),
                tags: definition.search_tags().into_iter().collect(),
            })
            .collect()
    }

    /// Drops every registered type and category.
    pub fn clear(&mut self) {
        self.definitions.clear();
        self.categories.clear();
    }
}
