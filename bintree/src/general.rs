//! General (n-ary) trees and aggregate queries over all of their nodes.

use std::ops::Rem;

use generational_arena::{Arena, Index};
use num_traits::CheckedAdd;
use serde::Deserialize;
use tracing::instrument;

use crate::errors::{TreeError, TreeResult};

/// Tree node in the arena-based n-ary structure.
#[derive(Debug, Clone)]
pub struct TreeNode<T> {
    pub value: T,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in the arena, in insertion order
    pub children: Vec<Index>,
}

/// Nested form used to describe a general tree as JSON:
/// `{"value": 1, "children": [{"value": 2}]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct NestedNode<T> {
    pub value: T,
    #[serde(default)]
    pub children: Vec<NestedNode<T>>,
}

/// Arena-based n-ary tree.
#[derive(Debug, Clone)]
pub struct Tree<T> {
    arena: Arena<TreeNode<T>>,
    root: Option<Index>,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Tree<T> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Adds a node below `parent`, or as the root when `parent` is `None`.
    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_node(&mut self, value: T, parent: Option<Index>) -> TreeResult<Index> {
        match parent {
            None if self.root.is_some() => return Err(TreeError::RootExists),
            Some(parent_idx) if !self.arena.contains(parent_idx) => {
                return Err(TreeError::ParentNotFound(parent_idx))
            }
            _ => {}
        }
        Ok(self.attach(value, parent))
    }

    /// Builds a tree from its nested description, keeping child order.
    #[instrument(level = "debug", skip_all)]
    pub fn from_nested(nested: NestedNode<T>) -> Self {
        let mut tree = Self::new();
        let mut stack = vec![(nested, None)];

        while let Some((current, parent_idx)) = stack.pop() {
            let NestedNode { value, children } = current;
            let node_idx = tree.attach(value, parent_idx);
            // Reverse so the first child is inserted first
            for child in children.into_iter().rev() {
                stack.push((child, Some(node_idx)));
            }
        }
        tree
    }

    // parent indices come from this arena, so no validation is needed
    fn attach(&mut self, value: T, parent: Option<Index>) -> Index {
        let node_idx = self.arena.insert(TreeNode {
            value,
            parent,
            children: Vec::new(),
        });
        match parent.and_then(|parent_idx| self.arena.get_mut(parent_idx)) {
            Some(parent) => parent.children.push(node_idx),
            None => self.root = Some(node_idx),
        }
        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode<T>> {
        self.arena.get(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn iter(&self) -> TreeIterator<'_, T> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_, T> {
        PostOrderIterator::new(self)
    }

    /// Reduces every node value into an accumulator, in pre-order.
    pub fn fold<A, F>(&self, init: A, mut f: F) -> A
    where
        F: FnMut(A, &T) -> A,
    {
        self.iter().fold(init, |acc, (_, node)| f(acc, &node.value))
    }

    /// Number of nodes whose value satisfies `predicate`.
    pub fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.fold(0, |count, value| count + usize::from(predicate(value)))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        if let Some(root) = self.root {
            self.calculate_depth(root)
        } else {
            0
        }
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children
                .iter()
                .map(|&child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Values of all nodes without children, left to right.
    pub fn leaf_values(&self) -> Vec<&T> {
        self.iter()
            .filter(|(_, node)| node.children.is_empty())
            .map(|(_, node)| &node.value)
            .collect()
    }
}

impl<T: Copy + CheckedAdd + Default> Tree<T> {
    /// Sum of all values; [`TreeError::Overflow`] when it leaves the range of `T`.
    pub fn sum_values(&self) -> TreeResult<T> {
        self.fold(Ok(T::default()), |sum, value| {
            sum.and_then(|sum| sum.checked_add(value).ok_or(TreeError::Overflow))
        })
    }
}

impl<T> Tree<T>
where
    T: Copy + Rem<Output = T> + PartialEq + From<u8>,
{
    pub fn count_evens(&self) -> usize {
        let (two, zero) = (T::from(2), T::from(0));
        self.count(|&value| value % two == zero)
    }
}

impl<T: PartialOrd> Tree<T> {
    pub fn num_greater(&self, lower_bound: &T) -> usize {
        self.count(|value| value > lower_bound)
    }
}

pub struct TreeIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<Index>,
}

impl<'a, T> TreeIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for TreeIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                self.stack.extend(node.children.iter().rev());
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a, T> {
    tree: &'a Tree<T>,
    stack: Vec<(Index, bool)>,
}

impl<'a, T> PostOrderIterator<'a, T> {
    fn new(tree: &'a Tree<T>) -> Self {
        Self {
            tree,
            stack: tree.root().map(|root| (root, false)).into_iter().collect(),
        }
    }
}

impl<'a, T> Iterator for PostOrderIterator<'a, T> {
    type Item = (Index, &'a TreeNode<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                if visited {
                    return Some((current_idx, node));
                }
                self.stack.push((current_idx, true));
                for &child in node.children.iter().rev() {
                    self.stack.push((child, false));
                }
            }
        }
        None
    }
}
