//! Generic placeholder substitution.

use super::node::{CompositeType, SchemaNode};
use crate::error::SchemaError;
use indexmap::IndexMap;

impl SchemaNode {
    /// Returns a copy of this tree with every `Generic(placeholder)` leaf
    /// replaced by `with`.
    ///
    /// Subtrees that do not reference `placeholder` are cloned untouched, so
    /// substituting an absent placeholder yields a structurally equal tree.
    /// Composites are rebuilt as private copies with their binding for
    /// `placeholder` recorded.
    pub fn substitute(
        &self,
        placeholder: &str,
        with: &SchemaNode,
    ) -> Result<SchemaNode, SchemaError> {
        if !self.contains_generic(placeholder) {
            return Ok(self.clone());
        }

        match self {
            SchemaNode::Generic { .. } => Ok(with.clone()),
            SchemaNode::Array { item } => {
                Ok(SchemaNode::array(item.substitute(placeholder, with)?))
            }
            SchemaNode::Nullable { wrapped } => Ok(SchemaNode::nullable(
                wrapped.substitute(placeholder, with)?,
            )),
            SchemaNode::Optional { wrapped } => Ok(SchemaNode::optional(
                wrapped.substitute(placeholder, with)?,
            )),
            SchemaNode::Record { key, value } => {
                let key = key.substitute(placeholder, with)?;
                if !key.is_key_capable() {
                    return Err(SchemaError::UnsupportedShape {
                        shape: format!("Record<{}, ...>", key.type_label()),
                        context: format!("resolving '{}' inside a record key", placeholder),
                    });
                }
                Ok(SchemaNode::record(key, value.substitute(placeholder, with)?))
            }
            SchemaNode::Composite(composite) => Ok(SchemaNode::Composite(
                composite.substitute(placeholder, with)?,
            )),
            SchemaNode::Union { options } => options
                .iter()
                .map(|option| option.substitute(placeholder, with))
                .collect::<Result<Vec<_>, _>>()
                .map(|options| SchemaNode::Union { options }),
            // Leaves without placeholders were returned by the early exit.
            SchemaNode::Primitive { .. } | SchemaNode::Picklist { .. } => Ok(self.clone()),
        }
    }
}

impl CompositeType {
    fn substitute(
        &self,
        placeholder: &str,
        with: &SchemaNode,
    ) -> Result<CompositeType, SchemaError> {
        let fields: IndexMap<String, SchemaNode> = self
            .fields
            .iter()
            .map(|(name, field)| -> Result<_, SchemaError> {
                Ok((name.clone(), field.substitute(placeholder, with)?))
            })
            .collect::<Result<_, _>>()?;

        let mut generics = self.generics.clone();
        for binding in generics.values_mut().flatten() {
            *binding = binding.substitute(placeholder, with)?;
        }
        if let Some(slot) = generics.get_mut(placeholder) {
            *slot = Some(with.clone());
        }

        let mut replica = CompositeType {
            name: self.name.clone(),
            fields,
            generics,
        };
        replica.track_new_generics();
        Ok(replica)
    }
}
