//! Parent-pointer forests: building, depth-first linearization and canonical ordering.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::domain::arena::TreeArena;
use crate::domain::entities::Organization;
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// A record taking part in a parent-pointer tree.
///
/// The parent is referenced by identifier, never by pointer.
pub trait Node {
    fn identifier(&self) -> &str;
    fn parent(&self) -> Option<&str>;
}

impl<T: Node + ?Sized> Node for &T {
    fn identifier(&self) -> &str {
        (**self).identifier()
    }

    fn parent(&self) -> Option<&str> {
        (**self).parent()
    }
}

impl Node for Organization {
    fn identifier(&self) -> &str {
        &self.id
    }

    fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Bare `{identifier, parent}` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub identifier: String,
    pub parent: Option<String>,
}

impl NodeRecord {
    pub fn new(identifier: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            identifier: identifier.into(),
            parent: parent.map(str::to_string),
        }
    }
}

impl Node for NodeRecord {
    fn identifier(&self) -> &str {
        &self.identifier
    }

    fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }
}

/// Owned tree view over a record and its children.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem<T> {
    pub identifier: String,
    pub parent: Option<String>,
    /// Children in the relative order they had in the source list
    pub children: Vec<TreeItem<T>>,
    pub item: T,
}

impl<T> TreeItem<T> {
    /// Number of nodes in this subtree, including self.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(current) = stack.pop() {
            count += 1;
            stack.extend(current.children.iter());
        }
        count
    }

    /// Consume the subtree, appending payloads in pre-order.
    pub fn into_preorder(self, out: &mut Vec<T>) {
        let mut stack = vec![self];
        while let Some(TreeItem { item, children, .. }) = stack.pop() {
            out.push(item);
            stack.extend(children.into_iter().rev());
        }
    }
}

/// Build the forest encoded by a flat parent-pointer list.
///
/// Returns the roots in source order. Fails on the first duplicate identifier,
/// dangling parent or parent cycle; no partial forest is returned.
///
/// Pass `items.iter()` to keep the input list; the tree then borrows it.
pub fn build_tree<T, I>(items: I) -> TreeResult<Vec<TreeItem<T>>>
where
    T: Node,
    I: IntoIterator<Item = T>,
{
    Ok(TreeArena::from_items(items)?.into_roots())
}

/// Depth-first, pre-order linearization of a forest.
///
/// Emits each root, then recursively each child in order.
pub fn flatten_by_dfs<T>(roots: &[TreeItem<T>]) -> Vec<&TreeItem<T>> {
    let mut out = Vec::with_capacity(roots.iter().map(TreeItem::size).sum());
    let mut stack: Vec<&TreeItem<T>> = roots.iter().rev().collect();
    while let Some(current) = stack.pop() {
        out.push(current);
        stack.extend(current.children.iter().rev());
    }
    out
}

/// Canonical ordering: the records of `items` rearranged into depth-first
/// pre-order of the forest they encode.
///
/// A list that is already a valid pre-order comes back unchanged.
#[instrument(level = "debug", skip(items))]
pub fn sort_by_dfs<T: Node>(items: Vec<T>) -> TreeResult<Vec<T>> {
    let len = items.len();
    let roots = build_tree(items)?;
    debug!("sort_by_dfs: {} records, {} roots", len, roots.len());
    let mut out = Vec::with_capacity(len);
    for root in roots {
        root.into_preorder(&mut out);
    }
    Ok(out)
}
