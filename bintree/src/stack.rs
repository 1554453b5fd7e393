/*
Explicit-stack variants of the binary tree queries.

The recursive versions on `Subtree` use the call stack and are bounded by the
height of the tree. These versions keep their own `Vec` stack instead, so very
deep (skewed) trees cannot overflow the thread stack. Results are identical.

Post-order state:
Instead of returning per-child results up the call stack, `max_sum` keeps the
extendable gain of every finished child in a map until its parent consumes it.
 */
use std::collections::HashMap;

use num_traits::CheckedAdd;
use tracing::{debug, instrument};

use crate::binary::{checked_sum, larger, smaller, BinaryNode, BinaryTree, NodeId, Subtree};
use crate::errors::{TreeError, TreeResult};

/// Pre-order iterator, left before right.
pub struct PreOrder<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<NodeId>,
}

impl<'a, T> PreOrder<'a, T> {
    pub fn new(view: Subtree<'a, T>) -> Self {
        Self {
            tree: view.tree(),
            stack: view.root().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PreOrder<'a, T> {
    type Item = (NodeId, &'a BinaryNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                // Push right first for left-to-right traversal
                self.stack.extend(node.right);
                self.stack.extend(node.left);
                return Some((current, node));
            }
        }
        None
    }
}

/// Post-order iterator: both children are yielded before their parent.
pub struct PostOrder<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<(NodeId, bool)>,
}

impl<'a, T> PostOrder<'a, T> {
    pub fn new(view: Subtree<'a, T>) -> Self {
        Self {
            tree: view.tree(),
            stack: view.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrder<'a, T> {
    type Item = (NodeId, &'a BinaryNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.node(current) {
                if visited {
                    return Some((current, node));
                }
                self.stack.push((current, true));
                self.stack.extend(node.right.map(|child| (child, false)));
                self.stack.extend(node.left.map(|child| (child, false)));
            }
        }
        None
    }
}

/// Walks `(node, depth)` pairs with the root at depth 1.
fn with_depths<'a, T>(
    view: Subtree<'a, T>,
) -> impl Iterator<Item = (&'a BinaryNode<T>, NodeId, usize)> {
    let tree = view.tree();
    let mut stack: Vec<(NodeId, usize)> =
        view.root().map(|root| (root, 1)).into_iter().collect();
    std::iter::from_fn(move || {
        while let Some((current, depth)) = stack.pop() {
            if let Some(node) = tree.node(current) {
                stack.extend(node.children().map(|child| (child, depth + 1)));
                return Some((node, current, depth));
            }
        }
        None
    })
}

#[instrument(level = "debug", skip_all)]
pub fn min_depth<T>(view: Subtree<'_, T>) -> usize {
    with_depths(view)
        .filter(|(node, _, _)| node.is_leaf())
        .map(|(_, _, depth)| depth)
        .min()
        .unwrap_or(0)
}

#[instrument(level = "debug", skip_all)]
pub fn max_depth<T>(view: Subtree<'_, T>) -> usize {
    with_depths(view)
        .map(|(_, _, depth)| depth)
        .max()
        .unwrap_or(0)
}

/// Edge count from the view root to `target`.
#[instrument(level = "debug", skip(view))]
pub fn find_depth<T>(view: Subtree<'_, T>, target: NodeId) -> Option<usize> {
    with_depths(view)
        .find(|(_, id, _)| *id == target)
        .map(|(_, _, depth)| depth - 1)
}

#[instrument(level = "debug", skip_all)]
pub fn next_larger<T: Copy + PartialOrd>(view: Subtree<'_, T>, bound: T) -> Option<T> {
    view.iter()
        .map(|(_, node)| node.value)
        .filter(|value| *value > bound)
        .reduce(smaller)
}

#[instrument(level = "debug", skip_all)]
pub fn max_sum<T>(view: Subtree<'_, T>) -> TreeResult<T>
where
    T: Copy + PartialOrd + CheckedAdd + Default,
{
    let zero = T::default();
    let mut gains: HashMap<NodeId, T> = HashMap::new();
    let mut best: Option<T> = None;

    for (id, node) in PostOrder::new(view) {
        let mut take = |child: Option<NodeId>| {
            child
                .and_then(|child| gains.remove(&child))
                .map_or(zero, |gain| larger(gain, zero))
        };
        let left_gain = take(node.left);
        let right_gain = take(node.right);

        gains.insert(id, checked_sum(node.value, larger(left_gain, right_gain))?);
        let complete = checked_sum(checked_sum(node.value, left_gain)?, right_gain)?;
        best = Some(best.map_or(complete, |best| larger(best, complete)));
    }

    Ok(best.unwrap_or(zero))
}

#[instrument(level = "debug", skip(view))]
pub fn are_cousins<T>(view: Subtree<'_, T>, a: NodeId, b: NodeId) -> TreeResult<bool> {
    if view.siblings(a, b) {
        debug!("{} and {} share a parent", a, b);
        return Ok(false);
    }
    let depth_a = find_depth(view, a).ok_or(TreeError::NodeNotInTree(a))?;
    let depth_b = find_depth(view, b).ok_or(TreeError::NodeNotInTree(b))?;
    Ok(a != b && depth_a == depth_b)
}

/// Lowest common ancestor via parent links, bounded by the view root.
#[instrument(level = "debug", skip(view))]
pub fn lowest_common_ancestor<T>(
    view: Subtree<'_, T>,
    a: NodeId,
    b: NodeId,
) -> TreeResult<NodeId> {
    let root = view.root().ok_or(TreeError::NodeNotInTree(a))?;
    let tree = view.tree();
    let path_a = path_below(tree, root, a)?;
    let path_b = path_below(tree, root, b)?;

    Ok(path_a
        .iter()
        .zip(&path_b)
        .take_while(|(x, y)| x == y)
        .fold(root, |_, (&shared, _)| shared))
}

// Nodes from just below `root` down to `target`, following parent links up.
fn path_below<T>(tree: &BinaryTree<T>, root: NodeId, target: NodeId) -> TreeResult<Vec<NodeId>> {
    let mut path = Vec::new();
    let mut current = target;
    while current != root {
        path.push(current);
        current = tree
            .parent(current)
            .ok_or(TreeError::NodeNotInTree(target))?;
    }
    path.reverse();
    Ok(path)
}
