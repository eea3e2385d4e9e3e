use std::collections::HashMap;

use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::error::DomainError;
use crate::domain::tree::{Node, TreeItem, TreeResult};

/// Staged node in the arena-based forest.
#[derive(Debug)]
pub struct TreeNode<T> {
    /// Original record
    pub data: T,
    /// Index of parent node in the arena, None for root nodes
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in source order
    pub children: Vec<Index>,
}

/// Arena-based forest used to stage a parent-pointer list before it is
/// materialized into owned [`TreeItem`]s.
///
/// Parent links are resolved by identifier once, at construction; the arena
/// never holds a link to a node that is not part of the same input.
#[derive(Debug)]
pub struct TreeArena<T> {
    arena: Arena<TreeNode<T>>,
    /// Root indices in source order
    roots: Vec<Index>,
}

impl<T: Node> TreeArena<T> {
    /// Stage `items`, resolving every parent reference.
    ///
    /// Fails on the first duplicate identifier or dangling parent, and with
    /// `CycleDetected` when a parent chain loops (such records are unreachable
    /// from any root).
    #[instrument(level = "trace", skip(items))]
    pub fn from_items<I>(items: I) -> TreeResult<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let mut arena = Arena::new();
        let mut order = Vec::new();
        let mut by_id: HashMap<String, Index> = HashMap::new();

        for item in items {
            let id = item.identifier().to_string();
            if by_id.contains_key(&id) {
                return Err(DomainError::DuplicateIdentifier(id));
            }
            let idx = arena.insert(TreeNode {
                data: item,
                parent: None,
                children: Vec::new(),
            });
            by_id.insert(id, idx);
            order.push(idx);
        }

        let mut roots = Vec::new();
        for &idx in &order {
            let (identifier, parent) = {
                let data = &arena[idx].data;
                (
                    data.identifier().to_string(),
                    data.parent().map(str::to_string),
                )
            };
            match parent {
                None => roots.push(idx),
                Some(parent) => {
                    let parent_idx = *by_id
                        .get(&parent)
                        .ok_or(DomainError::DanglingParent { identifier, parent })?;
                    arena[idx].parent = Some(parent_idx);
                    arena[parent_idx].children.push(idx);
                }
            }
        }

        let tree = Self { arena, roots };

        let reachable = tree.iter().count();
        if reachable != tree.arena.len() {
            let mut seen = vec![false; order.len()];
            let positions: HashMap<Index, usize> =
                order.iter().enumerate().map(|(i, &idx)| (idx, i)).collect();
            for (idx, _) in tree.iter() {
                seen[positions[&idx]] = true;
            }
            let stranded = order
                .iter()
                .zip(seen)
                .find(|(_, reached)| !reached)
                .map(|(&idx, _)| tree.arena[idx].data.identifier().to_string())
                .unwrap_or_default();
            return Err(DomainError::CycleDetected(stranded));
        }

        Ok(tree)
    }

    /// Move every record out of the arena into owned trees, one per root.
    ///
    /// Subtrees are assembled bottom-up in reverse pre-order, so the depth of
    /// the forest never grows the call stack.
    #[instrument(level = "trace", skip(self))]
    pub fn into_roots(mut self) -> Vec<TreeItem<T>> {
        let preorder: Vec<Index> = self.iter().map(|(idx, _)| idx).collect();
        let mut built: HashMap<Index, TreeItem<T>> = HashMap::with_capacity(preorder.len());
        for idx in preorder.into_iter().rev() {
            let Some(node) = self.arena.remove(idx) else {
                continue;
            };
            let children = node
                .children
                .iter()
                .filter_map(|child| built.remove(child))
                .collect();
            built.insert(
                idx,
                TreeItem {
                    identifier: node.data.identifier().to_string(),
                    parent: node.data.parent().map(str::to_string),
                    children,
                    item: node.data,
                },
            );
        }
        std::mem::take(&mut self.roots)
            .into_iter()
            .filter_map(|root| built.remove(&root))
            .collect()
    }
}

impl<T> TreeArena<T> {
    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub fn roots(&self) -> &[Index] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal over all roots, children left to right.
    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }
}

pub struct TreeIterator<'a, T> {
    arena: &'a TreeArena<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(arena: &'a TreeArena<T>) -> Self {
        let stack = arena.roots.iter().rev().copied().collect();
        Self { arena, stack }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.stack.pop()?;
        let node = self.arena.get_node(current_idx)?;
        // Push children in reverse order for left-to-right traversal
        for &child in node.children.iter().rev() {
            self.stack.push(child);
        }
        Some((current_idx, node))
    }
}
