//! The compatibility gate and the generic bindings a connection implies.

use super::GraphInstance;
use crate::error::GraphError;
use crate::node::SlotSource;
use crate::schema::SchemaNode;
use ahash::AHashSet;
use indexmap::IndexMap;

/// Whether an edge may join two slots of these types.
///
/// Both root types have to match (same primitive kind, same composite name,
/// same picklist options, or the same container kind for records and
/// unions), unless exactly one of them is still a generic placeholder. Two
/// unresolved placeholders carry no type information and never match.
pub fn schemas_compatible(a: &SchemaNode, b: &SchemaNode) -> bool {
    let (a, b) = (a.root_type(), b.root_type());
    match (a.is_generic(), b.is_generic()) {
        (true, true) => false,
        (true, false) | (false, true) => true,
        (false, false) => same_base(a, b),
    }
}

fn same_base(a: &SchemaNode, b: &SchemaNode) -> bool {
    match a {
        SchemaNode::Primitive { kind } => {
            matches!(b, SchemaNode::Primitive { kind: other } if other == kind)
        }
        SchemaNode::Picklist { options } => match b {
            SchemaNode::Picklist { options: other } => {
                options.iter().collect::<AHashSet<_>>() == other.iter().collect::<AHashSet<_>>()
            }
            _ => false,
        },
        SchemaNode::Composite(composite) => {
            matches!(b, SchemaNode::Composite(other) if other.name == composite.name)
        }
        SchemaNode::Record { .. } => matches!(b, SchemaNode::Record { .. }),
        SchemaNode::Union { .. } => matches!(b, SchemaNode::Union { .. }),
        // root_type() never stops on a wrapper, and generics are handled by the caller.
        SchemaNode::Array { .. }
        | SchemaNode::Nullable { .. }
        | SchemaNode::Optional { .. }
        | SchemaNode::Generic { .. } => false,
    }
}

/// Placeholder bindings implied by connecting an output to an input.
///
/// `source` holds bindings for the output's node, `target` for the input's.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingPlan {
    pub source: IndexMap<String, SchemaNode>,
    pub target: IndexMap<String, SchemaNode>,
}

impl BindingPlan {
    pub fn is_empty(&self) -> bool {
        self.source.is_empty() && self.target.is_empty()
    }

    /// Walks both slot types side by side and binds every placeholder met on
    /// one side to the subtree aligned with it on the other.
    ///
    /// Where the two shapes part ways above a placeholder, the placeholder is
    /// bound to the other side's root type instead. Bindings to trees that are
    /// themselves still generic are skipped. Returns the offending placeholder
    /// when one side would need two different bindings for it.
    pub fn between(source: &SchemaNode, target: &SchemaNode) -> Result<Self, String> {
        let mut plan = Self::default();
        plan.align(source, target)?;
        Ok(plan)
    }

    /// Folds both sides into one map, for edges that start and end on the same node.
    pub fn merged(self) -> Result<IndexMap<String, SchemaNode>, String> {
        let mut merged = self.source;
        for (placeholder, schema) in self.target {
            bind(&mut merged, &placeholder, &schema)?;
        }
        Ok(merged)
    }

    fn align(&mut self, source: &SchemaNode, target: &SchemaNode) -> Result<(), String> {
        let (source, target) = (source.unwrapped(), target.unwrapped());
        match (source, target) {
            (SchemaNode::Generic { .. }, SchemaNode::Generic { .. }) => Ok(()),
            (SchemaNode::Generic { name }, concrete) => bind(&mut self.source, name, concrete),
            (concrete, SchemaNode::Generic { name }) => bind(&mut self.target, name, concrete),
            (SchemaNode::Array { item: a }, SchemaNode::Array { item: b }) => self.align(a, b),
            (SchemaNode::Nullable { wrapped: a }, SchemaNode::Nullable { wrapped: b }) => {
                self.align(a, b)
            }
            (
                SchemaNode::Record { key: k1, value: v1 },
                SchemaNode::Record { key: k2, value: v2 },
            ) => {
                self.align(k1, k2)?;
                self.align(v1, v2)
            }
            (SchemaNode::Union { options: a }, SchemaNode::Union { options: b })
                if a.len() == b.len() =>
            {
                a.iter().zip(b).try_for_each(|(a, b)| self.align(a, b))
            }
            (SchemaNode::Composite(a), SchemaNode::Composite(b)) if a.name == b.name => {
                for (name, field) in &a.fields {
                    if let Some(other) = b.fields.get(name) {
                        self.align(field, other)?;
                    }
                }
                Ok(())
            }
            _ => self.diverge(source, target),
        }
    }

    fn diverge(&mut self, source: &SchemaNode, target: &SchemaNode) -> Result<(), String> {
        match (source.generic_name(), target.generic_name()) {
            (Some(name), None) => bind(&mut self.source, name, target.root_type()),
            (None, Some(name)) => bind(&mut self.target, name, source.root_type()),
            _ => Ok(()),
        }
    }
}

fn bind(
    bindings: &mut IndexMap<String, SchemaNode>,
    placeholder: &str,
    schema: &SchemaNode,
) -> Result<(), String> {
    if !schema.is_concrete() {
        return Ok(());
    }
    match bindings.get(placeholder) {
        Some(existing) if existing != schema => Err(placeholder.to_string()),
        Some(_) => Ok(()),
        None => {
            bindings.insert(placeholder.to_string(), schema.clone());
            Ok(())
        }
    }
}

impl GraphInstance {
    /// Whether `from_slot` on `from_node` may be connected to `to_slot` on `to_node`.
    ///
    /// The two slots must sit on opposite sides; either may be the drag start.
    /// Unknown nodes or slots are simply not compatible.
    pub fn compatible(
        &self,
        from_node: &str,
        from_slot: &str,
        to_node: &str,
        to_slot: &str,
    ) -> bool {
        let lookup = |node: &str, slot: &str| -> Option<(SlotSource, SchemaNode)> {
            let placed = self.node(node).ok()?;
            let slot = placed.definition().slot(slot).ok()?;
            Some((slot.source, slot.schema.clone()))
        };
        let (Some((from_source, from)), Some((to_source, to))) =
            (lookup(from_node, from_slot), lookup(to_node, to_slot))
        else {
            return false;
        };
        if from_source == to_source {
            return false;
        }
        let (output, input) = match from_source {
            SlotSource::Output => (&from, &to),
            SlotSource::Input => (&to, &from),
        };
        schemas_compatible(output, input) && BindingPlan::between(output, input).is_ok()
    }

    /// The first slot on `to_node` that `from_slot` could connect to.
    ///
    /// Candidates are the opposite kind of slot, tried in declaration order;
    /// the first compatible one wins.
    pub fn find_compatible_slot(
        &self,
        from_node: &str,
        from_slot: &str,
        to_node: &str,
    ) -> Result<Option<String>, GraphError> {
        let from = self.node(from_node)?.definition().slot(from_slot)?;
        let target = self.node(to_node)?.definition();
        Ok(target
            .slots(from.source.opposite())
            .find(|candidate| {
                self.compatible(from_node, from.name, to_node, candidate.name)
            })
            .map(|candidate| candidate.name.to_string()))
    }
}
