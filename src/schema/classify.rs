//! Structural queries over schema trees.
//!
//! Everything here is pure: classification never rebuilds a tree, it only
//! borrows into the one it was given.

use super::node::{PrimitiveKind, SchemaNode};
use indexmap::IndexSet;
use itertools::Itertools;
use std::fmt;

/// The variant of a [`SchemaNode`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaKind {
    Primitive,
    Picklist,
    Array,
    Nullable,
    Optional,
    Record,
    Composite,
    Generic,
    Union,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::Primitive => "primitive",
            SchemaKind::Picklist => "picklist",
            SchemaKind::Array => "array",
            SchemaKind::Nullable => "nullable",
            SchemaKind::Optional => "optional",
            SchemaKind::Record => "record",
            SchemaKind::Composite => "composite",
            SchemaKind::Generic => "generic",
            SchemaKind::Union => "union",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SchemaNode {
    pub fn kind(&self) -> SchemaKind {
        match self {
            SchemaNode::Primitive { .. } => SchemaKind::Primitive,
            SchemaNode::Picklist { .. } => SchemaKind::Picklist,
            SchemaNode::Array { .. } => SchemaKind::Array,
            SchemaNode::Nullable { .. } => SchemaKind::Nullable,
            SchemaNode::Optional { .. } => SchemaKind::Optional,
            SchemaNode::Record { .. } => SchemaKind::Record,
            SchemaNode::Composite(_) => SchemaKind::Composite,
            SchemaNode::Generic { .. } => SchemaKind::Generic,
            SchemaNode::Union { .. } => SchemaKind::Union,
        }
    }

    /// `true` if this node itself is a generic placeholder.
    pub fn is_generic(&self) -> bool {
        matches!(self, SchemaNode::Generic { .. })
    }

    /// Strips every `Optional` wrapper around this node.
    ///
    /// `Nullable` is left in place: an absent value and an explicit `null`
    /// are routed separately.
    pub fn unwrapped(&self) -> &SchemaNode {
        match self {
            SchemaNode::Optional { wrapped } => wrapped.unwrapped(),
            other => other,
        }
    }

    /// Strips `Optional`, `Array` and `Nullable` wrappers until reaching the
    /// base kind of the slot.
    pub fn root_type(&self) -> &SchemaNode {
        match self {
            SchemaNode::Optional { wrapped } | SchemaNode::Nullable { wrapped } => {
                wrapped.root_type()
            }
            SchemaNode::Array { item } => item.root_type(),
            other => other,
        }
    }

    /// Every distinct placeholder name reachable from this node, in the order
    /// they are first met.
    pub fn generic_names(&self) -> IndexSet<String> {
        let mut names = IndexSet::new();
        self.collect_generic_names(&mut names);
        names
    }

    pub(crate) fn collect_generic_names(&self, names: &mut IndexSet<String>) {
        match self {
            SchemaNode::Generic { name } => {
                names.insert(name.clone());
            }
            SchemaNode::Array { item } => item.collect_generic_names(names),
            SchemaNode::Nullable { wrapped } | SchemaNode::Optional { wrapped } => {
                wrapped.collect_generic_names(names)
            }
            SchemaNode::Record { key, value } => {
                key.collect_generic_names(names);
                value.collect_generic_names(names);
            }
            SchemaNode::Composite(composite) => {
                for field in composite.fields.values() {
                    field.collect_generic_names(names);
                }
            }
            SchemaNode::Union { options } => {
                for option in options {
                    option.collect_generic_names(names);
                }
            }
            SchemaNode::Primitive { .. } | SchemaNode::Picklist { .. } => {}
        }
    }

    /// `true` if `placeholder` occurs anywhere in this tree.
    pub fn contains_generic(&self, placeholder: &str) -> bool {
        match self {
            SchemaNode::Generic { name } => name == placeholder,
            SchemaNode::Array { item } => item.contains_generic(placeholder),
            SchemaNode::Nullable { wrapped } | SchemaNode::Optional { wrapped } => {
                wrapped.contains_generic(placeholder)
            }
            SchemaNode::Record { key, value } => {
                key.contains_generic(placeholder) || value.contains_generic(placeholder)
            }
            SchemaNode::Composite(composite) => composite
                .fields
                .values()
                .any(|field| field.contains_generic(placeholder)),
            SchemaNode::Union { options } => {
                options.iter().any(|option| option.contains_generic(placeholder))
            }
            SchemaNode::Primitive { .. } | SchemaNode::Picklist { .. } => false,
        }
    }

    /// `true` if no placeholder is reachable from this node.
    pub fn is_concrete(&self) -> bool {
        self.generic_names().is_empty()
    }

    /// The placeholder that decides this slot's type, if any.
    ///
    /// Only the `Array`/`Nullable` spine of the unwrapped node is followed, so
    /// `Array<T | null>` reports `T` while `Record<string, T>` reports nothing.
    pub fn generic_name(&self) -> Option<&str> {
        match self.unwrapped() {
            SchemaNode::Generic { name } => Some(name),
            SchemaNode::Array { item } => item.generic_name(),
            SchemaNode::Nullable { wrapped } => wrapped.generic_name(),
            _ => None,
        }
    }

    /// Whether this node may be used as the key of a record.
    pub fn is_key_capable(&self) -> bool {
        match self {
            SchemaNode::Primitive { kind } => {
                matches!(kind, PrimitiveKind::String | PrimitiveKind::Number)
            }
            SchemaNode::Picklist { .. } | SchemaNode::Generic { .. } => true,
            SchemaNode::Array { .. }
            | SchemaNode::Nullable { .. }
            | SchemaNode::Optional { .. }
            | SchemaNode::Record { .. }
            | SchemaNode::Composite(_)
            | SchemaNode::Union { .. } => false,
        }
    }

    /// Human readable type of a slot, e.g. `Array<number | null>`.
    pub fn type_label(&self) -> String {
        self.unwrapped().label()
    }

    fn label(&self) -> String {
        match self {
            SchemaNode::Primitive { kind } => kind.to_string(),
            SchemaNode::Picklist { options } => {
                options.iter().map(|o| format!("\"{}\"", o)).join(" | ")
            }
            SchemaNode::Array { item } => format!("Array<{}>", item.label()),
            SchemaNode::Nullable { wrapped } => {
                let mut inner = wrapped.as_ref();
                while let SchemaNode::Nullable { wrapped } = inner {
                    inner = wrapped;
                }
                format!("{} | null", inner.label())
            }
            SchemaNode::Optional { wrapped } => format!("{}?", wrapped.label()),
            SchemaNode::Record { key, value } => {
                format!("Record<{}, {}>", key.label(), value.label())
            }
            SchemaNode::Composite(composite) => composite.name.clone(),
            SchemaNode::Generic { name } => name.clone(),
            SchemaNode::Union { options } => options.iter().map(|o| o.label()).join(" | "),
        }
    }

    /// Label of the root type, as used by `accepts:`/`outputs:` catalog tags.
    pub fn tag_label(&self) -> String {
        match self.root_type() {
            SchemaNode::Primitive { kind } => kind.to_string(),
            SchemaNode::Composite(composite) => composite.name.clone(),
            other => other.kind().to_string(),
        }
    }
}
