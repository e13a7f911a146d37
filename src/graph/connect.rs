use super::{BindingPlan, Edge, GraphInstance, schemas_compatible};
use crate::error::GraphError;
use crate::node::SlotSource;
use crate::schema::SchemaNode;
use indexmap::IndexMap;
use std::fmt;
use tracing::debug;

/// Why a proposed edge was refused.
#[derive(Debug, Clone, PartialEq)]
pub enum RejectionReason {
    /// Both slots are inputs, or both are outputs.
    SameDirection { source: SlotSource },
    /// The slot types don't match.
    Incompatible { output: String, input: String },
    /// One placeholder would have to be bound to two different types.
    ConflictingBinding { placeholder: String },
    /// The edge would close a loop.
    Cycle,
    /// The exact same edge is already in the graph.
    AlreadyConnected,
    /// The target node exposes no slot the drag could land on.
    NoCompatibleSlot,
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionReason::SameDirection { source } => {
                write!(f, "cannot connect an {} to another {}", source, source)
            }
            RejectionReason::Incompatible { output, input } => {
                write!(f, "output of type '{}' cannot feed an input of type '{}'", output, input)
            }
            RejectionReason::ConflictingBinding { placeholder } => {
                write!(f, "generic '{}' would be bound to two different types", placeholder)
            }
            RejectionReason::Cycle => write!(f, "connection would introduce a cycle"),
            RejectionReason::AlreadyConnected => write!(f, "slots are already connected"),
            RejectionReason::NoCompatibleSlot => write!(f, "no compatible slot on the target node"),
        }
    }
}

/// The terminal state of a proposed edge.
#[derive(Debug, Clone, PartialEq)]
pub enum EdgeOutcome {
    /// The edge was added. `resolved` lists the nodes whose definitions changed
    /// because a generic got bound, so a renderer knows what to redraw.
    Committed { edge: Edge, resolved: Vec<String> },
    Rejected(RejectionReason),
}

impl EdgeOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, EdgeOutcome::Committed { .. })
    }

    pub fn rejection(&self) -> Option<&RejectionReason> {
        match self {
            EdgeOutcome::Rejected(reason) => Some(reason),
            EdgeOutcome::Committed { .. } => None,
        }
    }
}

impl GraphInstance {
    /// Tries to connect two slots, committing the edge if every check passes.
    ///
    /// The drag may start on either side; the committed edge always runs from
    /// the output slot to the input slot. Generic bindings implied by the
    /// connection are only applied once both the compatibility and the
    /// acyclicity checks have passed, so a refused edge leaves the graph exactly
    /// as it was.
    ///
    /// Unknown nodes or slots are configuration errors and returned as `Err`.
    pub fn propose_edge(
        &mut self,
        from_node: &str,
        from_slot: &str,
        to_node: &str,
        to_slot: &str,
    ) -> Result<EdgeOutcome, GraphError> {
        let from = self.node(from_node)?.definition().slot(from_slot)?;
        let to = self.node(to_node)?.definition().slot(to_slot)?;

        if from.source == to.source {
            let reason = RejectionReason::SameDirection {
                source: from.source,
            };
            return Ok(self.reject(from_node, from_slot, to_node, to_slot, reason));
        }

        let (edge, output, input) = match from.source {
            SlotSource::Output => (
                Edge::new(from_node, from.name, to_node, to.name),
                from.schema,
                to.schema,
            ),
            SlotSource::Input => (
                Edge::new(to_node, to.name, from_node, from.name),
                to.schema,
                from.schema,
            ),
        };

        let verdict = self.evaluate(&edge, output, input);
        match verdict {
            Ok(plan) => self.commit(edge, plan),
            Err(reason) => Ok(self.reject(from_node, from_slot, to_node, to_slot, reason)),
        }
    }

    /// Connects `from_slot` to the first compatible slot on `to_node`.
    pub fn connect_to_node(
        &mut self,
        from_node: &str,
        from_slot: &str,
        to_node: &str,
    ) -> Result<EdgeOutcome, GraphError> {
        match self.find_compatible_slot(from_node, from_slot, to_node)? {
            Some(to_slot) => self.propose_edge(from_node, from_slot, to_node, &to_slot),
            None => Ok(self.reject(
                from_node,
                from_slot,
                to_node,
                "*",
                RejectionReason::NoCompatibleSlot,
            )),
        }
    }

    /// Runs both gates against the current graph without changing anything.
    fn evaluate(
        &self,
        edge: &Edge,
        output: &SchemaNode,
        input: &SchemaNode,
    ) -> Result<BindingPlan, RejectionReason> {
        if self.contains_edge(edge) {
            return Err(RejectionReason::AlreadyConnected);
        }
        if !schemas_compatible(output, input) {
            return Err(RejectionReason::Incompatible {
                output: output.type_label(),
                input: input.type_label(),
            });
        }
        let plan = BindingPlan::between(output, input)
            .map_err(|placeholder| RejectionReason::ConflictingBinding { placeholder })?;
        if self.introduces_cycle(edge) {
            return Err(RejectionReason::Cycle);
        }
        Ok(plan)
    }

    fn commit(&mut self, edge: Edge, plan: BindingPlan) -> Result<EdgeOutcome, GraphError> {
        let updates: Vec<(&str, IndexMap<String, SchemaNode>)> = if edge.source == edge.target {
            match plan.merged() {
                Ok(bindings) => vec![(edge.source.as_str(), bindings)],
                Err(placeholder) => {
                    let reason = RejectionReason::ConflictingBinding { placeholder };
                    return Ok(self.reject(
                        &edge.source,
                        &edge.source_slot,
                        &edge.target,
                        &edge.target_slot,
                        reason,
                    ));
                }
            }
        } else {
            vec![
                (edge.source.as_str(), plan.source),
                (edge.target.as_str(), plan.target),
            ]
        };

        // Nothing is written back unless every affected node resolves.
        let mut resolved = Vec::new();
        for (id, bindings) in updates {
            if bindings.is_empty() {
                continue;
            }
            let mut definition = self.node(id)?.definition().clone();
            let mut changed = false;
            for (placeholder, schema) in &bindings {
                changed |= definition.resolve_generic_type(placeholder, schema)?;
            }
            if changed {
                resolved.push((id.to_string(), definition));
            }
        }

        let resolved_ids: Vec<String> = resolved.iter().map(|(id, _)| id.clone()).collect();
        for (id, definition) in resolved {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.definition = definition;
            }
        }

        debug!(edge = %edge, "Committed edge");
        self.edges.push(edge.clone());
        Ok(EdgeOutcome::Committed {
            edge,
            resolved: resolved_ids,
        })
    }

    fn reject(
        &self,
        from_node: &str,
        from_slot: &str,
        to_node: &str,
        to_slot: &str,
        reason: RejectionReason,
    ) -> EdgeOutcome {
        debug!(
            from_node,
            from_slot,
            to_node,
            to_slot,
            reason = %reason,
            "Rejected edge"
        );
        EdgeOutcome::Rejected(reason)
    }
}
