//! Breadth-first traversals over a binary tree view.

use std::collections::VecDeque;

use tracing::{instrument, trace};

use crate::binary::{BinaryNode, BinaryTree, NodeId, Subtree};
use crate::errors::{TreeError, TreeResult};
use crate::stack;

/// Deepest tree whose perfect slot grid is still materialized.
pub const MAX_ENCODED_DEPTH: usize = 24;

/// Level-order iterator yielding `(id, node, depth)` with the root at depth 1.
pub struct LevelOrder<'a, T> {
    tree: &'a BinaryTree<T>,
    queue: VecDeque<(NodeId, usize)>,
}

impl<'a, T> LevelOrder<'a, T> {
    pub fn new(view: Subtree<'a, T>) -> Self {
        Self {
            tree: view.tree(),
            queue: view.root().map(|root| (root, 1)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = (NodeId, &'a BinaryNode<T>, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, depth)) = self.queue.pop_front() {
            if let Some(node) = self.tree.node(current) {
                self.queue
                    .extend(node.children().map(|child| (child, depth + 1)));
                return Some((current, node, depth));
            }
        }
        None
    }
}

/// Number of nodes on each level, root level first.
pub fn level_widths<T>(view: Subtree<'_, T>) -> Vec<usize> {
    let mut widths: Vec<usize> = Vec::new();
    for (_, _, depth) in LevelOrder::new(view) {
        if widths.len() < depth {
            widths.push(0);
        }
        widths[depth - 1] += 1;
    }
    widths
}

/// Every slot of the perfect tree as deep as `view`, in level order.
///
/// Absent slots are `None` and still contribute two absent children, so the
/// result always has `2^depth - 1` entries.
#[instrument(level = "debug", skip_all)]
pub fn level_slots<T>(view: Subtree<'_, T>) -> TreeResult<Vec<Option<NodeId>>> {
    let depth = stack::max_depth(view);
    if depth > MAX_ENCODED_DEPTH {
        return Err(TreeError::TooDeep(depth));
    }
    let total = (1usize << depth) - 1;
    trace!("depth {} needs {} slots", depth, total);

    let tree = view.tree();
    let mut slots = Vec::with_capacity(total);
    let mut queue: VecDeque<Option<NodeId>> = VecDeque::from([view.root()]);
    while slots.len() < total {
        let Some(slot) = queue.pop_front() else { break };
        match slot.and_then(|id| tree.node(id)) {
            Some(node) => {
                queue.push_back(node.left);
                queue.push_back(node.right);
            }
            None => {
                queue.push_back(None);
                queue.push_back(None);
            }
        }
        slots.push(slot);
    }
    Ok(slots)
}
