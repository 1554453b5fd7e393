/*
Display conversion into `termtree::Tree<String>`.

Binary nodes with exactly one child render the missing side as `∅`, so the
left/right position of the present child stays visible.
 */
use std::fmt::Display;

use generational_arena::Index;
use termtree::Tree;
use tracing::instrument;

use crate::binary::{BinaryTree, NodeId};
use crate::general;

const ABSENT: &str = "∅";
const EMPTY: &str = "(empty)";

pub trait ToTermTree {
    fn to_term_tree(&self) -> Tree<String>;
}

impl<T: Display> ToTermTree for BinaryTree<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_term_tree(&self) -> Tree<String> {
        fn build<T: Display>(tree: &BinaryTree<T>, node_id: Option<NodeId>) -> Tree<String> {
            let Some(node) = node_id.and_then(|id| tree.node(id)) else {
                return Tree::new(ABSENT.to_string());
            };
            let leaves = if node.is_leaf() {
                Vec::new()
            } else {
                vec![build(tree, node.left), build(tree, node.right)]
            };
            Tree::new(node.value.to_string()).with_leaves(leaves)
        }

        match self.root() {
            Some(root) => build(self, Some(root)),
            None => Tree::new(EMPTY.to_string()),
        }
    }
}

impl<T: Display> ToTermTree for general::Tree<T> {
    #[instrument(level = "debug", skip_all)]
    fn to_term_tree(&self) -> Tree<String> {
        fn build<T: Display>(tree: &general::Tree<T>, node_idx: Index) -> Tree<String> {
            match tree.get_node(node_idx) {
                Some(node) => Tree::new(node.value.to_string()).with_leaves(
                    node.children.iter().map(|&child| build(tree, child)),
                ),
                None => Tree::new(ABSENT.to_string()),
            }
        }

        match self.root() {
            Some(root) => build(self, root),
            None => Tree::new(EMPTY.to_string()),
        }
    }
}
