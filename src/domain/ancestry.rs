//! Ancestry queries over a snapshot of nodes keyed by identifier.

use std::collections::HashMap;

use crate::domain::tree::Node;

/// Snapshot of nodes keyed by identifier.
pub type NodeMap<'a, T> = HashMap<&'a str, &'a T>;

/// Index `items` by identifier. Later duplicates shadow earlier ones.
pub fn node_map<T: Node>(items: &[T]) -> NodeMap<'_, T> {
    items.iter().map(|n| (n.identifier(), n)).collect()
}

/// True iff following `descendant`'s parent chain reaches `ancestor`.
///
/// A parent missing from `map` counts as reaching the root. The walk is bounded
/// by the map size, so a looping chain ends with `false`.
pub fn is_ancestor<T: Node>(map: &NodeMap<'_, T>, ancestor: &T, descendant: &T) -> bool {
    is_ancestor_id(map, ancestor.identifier(), descendant.parent())
}

/// Id-based form of [`is_ancestor`], starting from a parent reference.
pub(crate) fn is_ancestor_id<'a, T: Node>(
    map: &'a NodeMap<'_, T>,
    ancestor: &str,
    mut current: Option<&'a str>,
) -> bool {
    let mut steps = 0;
    while let Some(parent) = current {
        if parent == ancestor {
            return true;
        }
        if steps > map.len() {
            return false;
        }
        steps += 1;
        current = map.get(parent).and_then(|n| n.parent());
    }
    false
}

/// Depth of `identifier`: the number of ancestors resolvable through `map`.
///
/// Roots, unknown identifiers and nodes whose parent is missing are at level 0.
pub fn level_of<T: Node>(map: &NodeMap<'_, T>, identifier: &str) -> usize {
    let mut level = 0;
    let mut current = map.get(identifier).and_then(|n| n.parent());
    while let Some(parent) = current {
        match map.get(parent) {
            Some(node) if level < map.len() => {
                level += 1;
                current = node.parent();
            }
            _ => break,
        }
    }
    level
}
