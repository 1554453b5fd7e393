use bintree::stack::{self, PreOrder};
use bintree::{deserialize, serialize, BinaryTree, NodeId, Side};
use proptest::prelude::*;
use proptest::sample::Index;

/// Grows a tree by attaching each value below an existing node with a free
/// child slot, so every generated shape is a valid binary tree.
fn grow(values: &[(Index, bool, i64)]) -> BinaryTree<i64> {
    let mut tree = BinaryTree::new();
    let mut ids: Vec<NodeId> = Vec::new();
    for (pick, prefer_left, value) in values {
        if ids.is_empty() {
            ids.push(tree.set_root(*value).unwrap());
            continue;
        }
        let parent = ids[pick.index(ids.len())];
        let sides = if *prefer_left {
            [Side::Left, Side::Right]
        } else {
            [Side::Right, Side::Left]
        };
        if let Some(side) = sides
            .into_iter()
            .find(|&side| tree.child(parent, side).is_none())
        {
            ids.push(tree.insert_child(parent, side, *value).unwrap());
        }
    }
    tree
}

fn arb_tree(max_nodes: usize) -> impl Strategy<Value = BinaryTree<i64>> {
    prop::collection::vec((any::<Index>(), any::<bool>(), -50i64..50), 0..max_nodes)
        .prop_map(|values| grow(&values))
}

fn ids(tree: &BinaryTree<i64>) -> Vec<NodeId> {
    PreOrder::new(tree.view()).map(|(id, _)| id).collect()
}

proptest! {
    #[test]
    fn given_any_tree_when_depths_then_min_not_above_max(tree in arb_tree(40)) {
        prop_assert!(tree.min_depth() <= tree.max_depth());
        prop_assert_eq!(tree.is_empty(), tree.max_depth() == 0);
    }

    #[test]
    fn given_any_tree_when_round_tripping_then_same_shape_and_values(tree in arb_tree(20)) {
        let text = serialize(&tree).unwrap();
        let decoded: BinaryTree<i64> = deserialize(&text).unwrap();

        prop_assert_eq!(decoded.len(), tree.len());
        prop_assert_eq!(serialize(&decoded).unwrap(), text);
        let paths = |tree: &BinaryTree<i64>| -> Vec<(String, i64)> {
            PreOrder::new(tree.view())
                .map(|(id, node)| (tree.path_of(id).unwrap(), node.value))
                .collect()
        };
        prop_assert_eq!(paths(&decoded), paths(&tree));
    }

    #[test]
    fn given_any_tree_when_iterative_then_same_answers(tree in arb_tree(40), bound in -60i64..60) {
        let view = tree.view();
        prop_assert_eq!(stack::min_depth(view), tree.min_depth());
        prop_assert_eq!(stack::max_depth(view), tree.max_depth());
        prop_assert_eq!(stack::max_sum(view).unwrap(), tree.max_sum().unwrap());
        prop_assert_eq!(stack::next_larger(view, bound), tree.next_larger(bound));
    }

    #[test]
    fn given_any_tree_when_max_sum_then_at_least_every_single_value(tree in arb_tree(40)) {
        let best = tree.max_sum().unwrap();
        for (_, node) in PreOrder::new(tree.view()) {
            prop_assert!(best >= node.value);
        }
    }

    #[test]
    fn given_any_tree_when_next_larger_then_minimal_above_bound(tree in arb_tree(40), bound in -60i64..60) {
        let expected = PreOrder::new(tree.view())
            .map(|(_, node)| node.value)
            .filter(|&value| value > bound)
            .min();
        prop_assert_eq!(tree.next_larger(bound), expected);
    }

    #[test]
    fn given_node_pairs_when_lca_then_ancestor_of_both(tree in arb_tree(30)) {
        let nodes = ids(&tree);
        for &a in &nodes {
            for &b in &nodes {
                let lca = tree.lowest_common_ancestor(a, b).unwrap();
                let scoped = tree.subtree(lca).unwrap();
                prop_assert!(scoped.find(a) && scoped.find(b));
                for child in [scoped.left(), scoped.right()] {
                    prop_assert!(!(child.find(a) && child.find(b)));
                }
                if tree.are_cousins(a, b).unwrap() {
                    prop_assert_eq!(tree.find_depth(a), tree.find_depth(b));
                    prop_assert_ne!(tree.parent(a), tree.parent(b));
                }
            }
        }
    }

    #[test]
    fn given_chain_when_depths_then_min_equals_max_equals_length(sides in prop::collection::vec(any::<bool>(), 0..60)) {
        let (mut tree, mut last) = BinaryTree::with_root(0i64);
        for (value, &left) in sides.iter().enumerate() {
            let side = if left { Side::Left } else { Side::Right };
            last = tree.insert_child(last, side, value as i64).unwrap();
        }
        prop_assert_eq!(tree.min_depth(), sides.len() + 1);
        prop_assert_eq!(tree.max_depth(), sides.len() + 1);
    }
}
