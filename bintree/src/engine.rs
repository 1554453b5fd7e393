//! Dispatches queries to the recursive or explicit-stack implementation.

use num_traits::CheckedAdd;
use tracing::{debug, instrument};

use crate::binary::{BinaryTree, NodeId};
use crate::config::{Settings, Traversal};
use crate::errors::TreeResult;
use crate::stack;

/// A tree paired with the traversal chosen for it.
#[derive(Debug)]
pub struct Engine<'a, T> {
    tree: &'a BinaryTree<T>,
    traversal: Traversal,
}

impl<'a, T> Engine<'a, T> {
    /// Resolves `Traversal::Auto` against the tree size.
    #[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
    pub fn new(tree: &'a BinaryTree<T>, settings: &Settings) -> Self {
        let traversal = match settings.traversal {
            Traversal::Auto if tree.len() > settings.recursion_limit => Traversal::Iterative,
            Traversal::Auto => Traversal::Recursive,
            other => other,
        };
        debug!("using {:?} traversal", traversal);
        Self { tree, traversal }
    }

    pub fn traversal(&self) -> Traversal {
        self.traversal
    }

    fn iterative(&self) -> bool {
        self.traversal == Traversal::Iterative
    }

    pub fn min_depth(&self) -> usize {
        if self.iterative() {
            stack::min_depth(self.tree.view())
        } else {
            self.tree.min_depth()
        }
    }

    pub fn max_depth(&self) -> usize {
        if self.iterative() {
            stack::max_depth(self.tree.view())
        } else {
            self.tree.max_depth()
        }
    }

    pub fn find_depth(&self, target: NodeId) -> Option<usize> {
        if self.iterative() {
            stack::find_depth(self.tree.view(), target)
        } else {
            self.tree.find_depth(target)
        }
    }

    pub fn are_cousins(&self, a: NodeId, b: NodeId) -> TreeResult<bool> {
        if self.iterative() {
            stack::are_cousins(self.tree.view(), a, b)
        } else {
            self.tree.are_cousins(a, b)
        }
    }

    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> TreeResult<NodeId> {
        if self.iterative() {
            stack::lowest_common_ancestor(self.tree.view(), a, b)
        } else {
            self.tree.lowest_common_ancestor(a, b)
        }
    }
}

impl<T> Engine<'_, T>
where
    T: Copy + PartialOrd + CheckedAdd + Default,
{
    pub fn max_sum(&self) -> TreeResult<T> {
        if self.iterative() {
            stack::max_sum(self.tree.view())
        } else {
            self.tree.max_sum()
        }
    }
}

impl<T: Copy + PartialOrd> Engine<'_, T> {
    pub fn next_larger(&self, bound: T) -> Option<T> {
        if self.iterative() {
            stack::next_larger(self.tree.view(), bound)
        } else {
            self.tree.next_larger(bound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::deserialize;

    #[test]
    fn given_auto_and_large_tree_when_creating_then_iterative() {
        let tree: BinaryTree<i64> = deserialize("[1,2,3]").unwrap();
        let settings = Settings {
            traversal: Traversal::Auto,
            recursion_limit: 2,
        };
        assert_eq!(Engine::new(&tree, &settings).traversal(), Traversal::Iterative);
    }

    #[test]
    fn given_auto_and_small_tree_when_creating_then_recursive() {
        let tree: BinaryTree<i64> = deserialize("[1,2,3]").unwrap();
        let engine = Engine::new(&tree, &Settings::default());
        assert_eq!(engine.traversal(), Traversal::Recursive);
    }

    #[test]
    fn given_explicit_traversal_when_creating_then_kept() {
        let tree: BinaryTree<i64> = deserialize("[]").unwrap();
        let settings = Settings {
            traversal: Traversal::Iterative,
            ..Settings::default()
        };
        let engine = Engine::new(&tree, &settings);
        assert_eq!(engine.traversal(), Traversal::Iterative);
        assert_eq!(engine.max_depth(), 0);
        assert_eq!(engine.max_sum().unwrap(), 0);
    }
}
