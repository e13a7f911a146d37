use super::definition::{Catalog, CatalogNode};
use crate::error::CatalogError;
use crate::node::NodeDefinition;
use crate::registry::NodeRegistry;

/// A trait for custom data models that can be turned into node definitions.
///
/// This is how feature-specific node factories plug into the registry: a
/// document integration, for example, reads its placeholder list and emits one
/// definition whose inputs mirror those placeholders.
///
/// # Example
///
/// ```rust
/// use kata::prelude::*;
/// use kata::catalog::IntoNodeDefinitions;
/// use kata::error::CatalogError;
///
/// struct TemplateDocument {
///     id: String,
///     placeholders: Vec<String>,
/// }
///
/// impl IntoNodeDefinitions for TemplateDocument {
///     fn into_definitions(self) -> Result<Vec<NodeDefinition>, CatalogError> {
///         if self.placeholders.is_empty() {
///             let message = format!("document '{}' has no placeholders", self.id);
///             return Err(CatalogError::Validation(message));
///         }
///         let mut builder = NodeDefinition::builder("document", self.id).searchable(false);
///         for placeholder in self.placeholders {
///             builder = builder.input(placeholder, SchemaNode::optional(SchemaNode::string()));
///         }
///         Ok(vec![builder.build()?])
///     }
/// }
///
/// let mut registry = NodeRegistry::new();
/// let document = TemplateDocument {
///     id: "invoice".to_string(),
///     placeholders: vec!["customer".to_string(), "total".to_string()],
/// };
/// for definition in document.into_definitions().unwrap() {
///     registry.register(definition).unwrap();
/// }
/// assert!(registry.contains("document-invoice"));
/// ```
pub trait IntoNodeDefinitions {
    /// Consumes the object and converts it into node definitions.
    fn into_definitions(self) -> Result<Vec<NodeDefinition>, CatalogError>;
}

impl IntoNodeDefinitions for CatalogNode {
    fn into_definitions(self) -> Result<Vec<NodeDefinition>, CatalogError> {
        let mut builder =
            NodeDefinition::builder(self.category, self.name).searchable(self.searchable);
        if let Some(title) = self.title {
            builder = builder.title(title);
        }
        for alias in self.aliases {
            builder = builder.alias(alias);
        }
        for (name, schema) in self.inputs {
            builder = builder.input(name, schema);
        }
        for (name, schema) in self.outputs {
            builder = builder.output(name, schema);
        }
        Ok(vec![builder.build()?])
    }
}

impl IntoNodeDefinitions for Catalog {
    fn into_definitions(self) -> Result<Vec<NodeDefinition>, CatalogError> {
        let mut definitions = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            definitions.extend(node.into_definitions()?);
        }
        Ok(definitions)
    }
}

impl Catalog {
    /// Registers every category and node type of this catalog.
    ///
    /// Fails on the first invalid definition or duplicate type key.
    pub fn register_into(self, registry: &mut NodeRegistry) -> Result<usize, CatalogError> {
        for category in &self.categories {
            registry.register_category(category.id.clone(), category.name.clone());
        }
        let definitions = self.into_definitions()?;
        let count = definitions.len();
        for definition in definitions {
            registry.register(definition)?;
        }
        Ok(count)
    }
}
