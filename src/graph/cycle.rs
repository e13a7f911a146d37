use super::{Edge, GraphInstance};
use ahash::{AHashMap, AHashSet};

/// Whether adding `candidate` to `edges` would close a loop.
///
/// Walks forward from the candidate's target; reaching its source means the
/// new edge would complete a cycle. A self-loop is not treated as a cycle here.
pub fn introduces_cycle(candidate: &Edge, edges: &[Edge]) -> bool {
    if candidate.source == candidate.target {
        return false;
    }

    let mut outgoing: AHashMap<&str, Vec<&str>> = AHashMap::new();
    for edge in edges {
        outgoing
            .entry(edge.source.as_str())
            .or_default()
            .push(edge.target.as_str());
    }

    let mut visited: AHashSet<&str> = AHashSet::new();
    let mut stack = vec![candidate.target.as_str()];
    while let Some(node) = stack.pop() {
        if !visited.insert(node) {
            continue;
        }
        for &next in outgoing.get(node).into_iter().flatten() {
            if next == candidate.source {
                return true;
            }
            stack.push(next);
        }
    }

    false
}

impl GraphInstance {
    pub fn introduces_cycle(&self, candidate: &Edge) -> bool {
        introduces_cycle(candidate, &self.edges)
    }
}
