//! Helpers for in-order queue directories.
//!
//! A queue is a directory whose children were created by POST, so their
//! server-generated keys are lexicographically increasing and a listing
//! comes back in creation order.

use crate::types::Node;

/// Extract the child values of a queue directory, preserving server order.
///
/// Directory children carry no value and are skipped. A leaf node has no
/// children, so it yields an empty list.
pub fn values_in_order(node: &Node) -> Vec<String> {
    node.nodes()
        .iter()
        .filter_map(|child| child.value().map(str::to_string))
        .collect()
}
