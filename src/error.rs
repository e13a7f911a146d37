use thiserror::Error;

/// Errors raised while rewriting a schema tree.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    #[error("Unsupported schema shape '{shape}' while {context}")]
    UnsupportedShape { shape: String, context: String },
}

/// Errors raised while authoring or querying a node definition.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("Couldn't pick slot '{slot}' in node with type '{type_key}'")]
    SlotNotFound { slot: String, type_key: String },

    #[error("Slot '{slot}' is declared more than once in node with type '{type_key}'")]
    DuplicateSlot { slot: String, type_key: String },

    #[error("Node definitions require a non-empty {0}")]
    EmptyIdentifier(&'static str),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors raised by the node registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Node type '{0}' is already registered")]
    DuplicateType(String),

    #[error("Node type '{0}' is not registered")]
    TypeNotFound(String),
}

/// Errors raised while editing a graph instance.
///
/// These are configuration failures. A connection the user simply isn't allowed
/// to make is reported through [`crate::graph::EdgeOutcome::Rejected`] instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node '{0}' is not placed in this graph")]
    NodeNotFound(String),

    #[error("A node with id '{0}' is already placed in this graph")]
    DuplicateNodeId(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Errors that can occur when loading a node catalog or converting a custom
/// format into node definitions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to parse catalog JSON: {0}")]
    Parse(String),

    #[error("Could not read catalog file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Invalid custom data: {0}")]
    Validation(String),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
