//! Tags consumed by the node picker's search index.

use super::{NodeDefinition, SlotSource};
use crate::error::NodeError;
use indexmap::IndexSet;

pub const ACCEPTS_PREFIX: &str = "accepts";
pub const OUTPUTS_PREFIX: &str = "outputs";

impl NodeDefinition {
    /// `accepts:<root>` for every input and `outputs:<root>` for every output,
    /// de-duplicated in slot order.
    pub fn search_tags(&self) -> IndexSet<String> {
        self.inputs()
            .map(|slot| format!("{}:{}", ACCEPTS_PREFIX, slot.schema.tag_label()))
            .chain(
                self.outputs()
                    .map(|slot| format!("{}:{}", OUTPUTS_PREFIX, slot.schema.tag_label())),
            )
            .collect()
    }
}

/// The tag a picker should filter by when a drag from `slot` is dropped on
/// empty canvas: the new node has to expose the opposite kind of slot.
pub fn connection_filter(definition: &NodeDefinition, slot: &str) -> Result<String, NodeError> {
    let slot = definition.slot(slot)?;
    let prefix = match slot.source {
        SlotSource::Input => OUTPUTS_PREFIX,
        SlotSource::Output => ACCEPTS_PREFIX,
    };
    Ok(format!("{}:{}", prefix, slot.schema.tag_label()))
}
