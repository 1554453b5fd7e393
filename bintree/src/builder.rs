use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::binary::{BinaryTree, NodeId, Side};
use crate::errors::{TreeError, TreeResult};

/// Materializes a [`BinaryTree`] from level-order slots.
///
/// Slot 0 is the root; every dequeued parent (present or absent) consumes the
/// next two slots as its left and right child. A sequence may stop before the
/// last level is complete, missing slots are absent.
pub struct TreeBuilder<T> {
    slots: Vec<Option<T>>,
}

impl<T> Default for TreeBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TreeBuilder<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub fn from_level_order(slots: Vec<Option<T>>) -> Self {
        Self { slots }
    }

    pub fn push(mut self, slot: Option<T>) -> Self {
        self.slots.push(slot);
        self
    }

    #[instrument(level = "debug", skip(self), fields(slots = self.slots.len()))]
    pub fn build(self) -> TreeResult<BinaryTree<T>> {
        let mut tree = BinaryTree::new();
        let mut slots = self.slots.into_iter().enumerate();

        let root = match slots.next() {
            None => return Ok(tree),
            Some((_, Some(value))) => tree.set_root(value)?,
            Some((slot, None)) => {
                return Err(TreeError::MalformedEncoding {
                    slot,
                    reason: "root slot of a non-empty tree is null".to_string(),
                })
            }
        };

        let mut parents: VecDeque<Option<NodeId>> = VecDeque::from([Some(root)]);
        while let Some(parent) = parents.pop_front() {
            for side in [Side::Left, Side::Right] {
                let Some((slot, value)) = slots.next() else {
                    return Ok(tree);
                };
                let child = match (parent, value) {
                    (Some(parent), Some(value)) => Some(tree.insert_child(parent, side, value)?),
                    (None, Some(_)) => {
                        debug!("slot {} holds a value below an absent parent", slot);
                        return Err(TreeError::MalformedEncoding {
                            slot,
                            reason: "value below an absent parent".to_string(),
                        });
                    }
                    (_, None) => None,
                };
                parents.push_back(child);
            }
        }

        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_empty_slots_when_building_then_empty_tree() {
        let tree = TreeBuilder::<i64>::new().build().unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
    }

    #[test]
    fn given_internal_gap_when_building_then_keeps_right_child() {
        //   1
        //    \
        //     3
        let tree = TreeBuilder::new()
            .push(Some(1))
            .push(None)
            .push(Some(3))
            .build()
            .unwrap();
        let root = tree.root().unwrap();
        assert_eq!(tree.left(root), None);
        let right = tree.right(root).unwrap();
        assert_eq!(tree.value(right), Some(&3));
        assert_eq!(tree.parent(right), Some(root));
    }

    #[test]
    fn given_zero_values_when_building_then_zero_is_a_node() {
        let tree = TreeBuilder::from_level_order(vec![Some(0), Some(0), None])
            .build()
            .unwrap();
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn given_null_root_when_building_then_malformed() {
        let result = TreeBuilder::<i64>::from_level_order(vec![None, None, None]).build();
        assert!(matches!(
            result,
            Err(TreeError::MalformedEncoding { slot: 0, .. })
        ));
    }

    #[test]
    fn given_orphan_value_when_building_then_malformed() {
        // slot 3 is the left child of the absent slot 1
        let result =
            TreeBuilder::from_level_order(vec![Some(1), None, Some(2), Some(4)]).build();
        assert!(matches!(
            result,
            Err(TreeError::MalformedEncoding { slot: 3, .. })
        ));
    }

    #[test]
    fn given_truncated_level_when_building_then_missing_slots_are_absent() {
        let tree = TreeBuilder::from_level_order(vec![Some(1), Some(2)])
            .build()
            .unwrap();
        let root = tree.root().unwrap();
        assert!(tree.left(root).is_some());
        assert!(tree.right(root).is_none());
    }
}
