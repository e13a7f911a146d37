use crate::error::CatalogError;
use crate::schema::SchemaNode;
use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;

/// A declarative node catalog, usually loaded from JSON.
///
/// ```json
/// {
///   "categories": [{ "id": "math", "name": "Math" }],
///   "nodes": [{
///     "category": "math",
///     "name": "add",
///     "title": "add",
///     "inputs": {
///       "a": { "type": "generic", "name": "T" },
///       "b": { "type": "generic", "name": "T" }
///     },
///     "outputs": { "result": { "type": "generic", "name": "T" } }
///   }]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub categories: Vec<CatalogCategory>,
    #[serde(default)]
    pub nodes: Vec<CatalogNode>,
}

/// Display information for a node category.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogCategory {
    pub id: String,
    pub name: String,
}

/// One node type as written in a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogNode {
    pub category: String,
    pub name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default = "default_searchable")]
    pub searchable: bool,
    #[serde(default)]
    pub inputs: IndexMap<String, SchemaNode>,
    #[serde(default)]
    pub outputs: IndexMap<String, SchemaNode>,
}

fn default_searchable() -> bool {
    true
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path).map_err(|e| CatalogError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
