//! Section splitting on hard breaks.

use crate::model::ContentNode;

/// Partition normalized nodes into sections separated by `hr` markers.
///
/// Sections borrow contiguous runs of the input. A hard break closes the
/// current section only if it is non-empty, so runs of breaks and a trailing
/// break never yield empty sections. An empty input yields no sections.
pub fn split_sections(nodes: &[ContentNode]) -> Vec<&[ContentNode]> {
    let mut sections = Vec::new();
    let mut start = 0;

    for (i, node) in nodes.iter().enumerate() {
        if node.is_hard_break() {
            if i > start {
                sections.push(&nodes[start..i]);
            }
            start = i + 1;
        }
    }
    if nodes.len() > start {
        sections.push(&nodes[start..]);
    }
    sections
}
