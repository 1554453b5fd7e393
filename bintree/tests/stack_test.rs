//! Explicit-stack implementations must agree with the recursive ones.

use bintree::config::{Settings, Traversal};
use bintree::engine::Engine;
use bintree::stack::{self, PostOrder, PreOrder};
use bintree::util::testing;
use bintree::{deserialize, BinaryTree, NodeId};
use rstest::rstest;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn all_nodes(tree: &BinaryTree<i64>) -> Vec<NodeId> {
    PreOrder::new(tree.view()).map(|(id, _)| id).collect()
}

#[rstest]
#[case("[]")]
#[case("[1]")]
#[case("[-1]")]
#[case("[1,2]")]
#[case("[1,null,2]")]
#[case("[5,3,8,1,4,7,9]")]
#[case("[-10,9,20,null,null,15,7]")]
#[case("[1,2,3,4,null,null,null,5]")]
#[case("[3,5,1,6,2,0,8,null,null,7,4]")]
#[case("[5,4,8,11,null,13,4,7,2,null,null,null,null,null,1]")]
#[case("[-3,-2,-5,0,null,null,-1]")]
fn given_tree_when_iterative_then_matches_recursive(#[case] text: &str) {
    let tree: BinaryTree<i64> = deserialize(text).unwrap();
    let view = tree.view();

    assert_eq!(stack::min_depth(view), tree.min_depth(), "min depth {}", text);
    assert_eq!(stack::max_depth(view), tree.max_depth(), "max depth {}", text);
    assert_eq!(
        stack::max_sum(view).unwrap(),
        tree.max_sum().unwrap(),
        "max sum {}",
        text
    );
    for bound in [-20, -1, 0, 3, 6, 9, 20] {
        assert_eq!(
            stack::next_larger(view, bound),
            tree.next_larger(bound),
            "next larger than {} in {}",
            bound,
            text
        );
    }

    let nodes = all_nodes(&tree);
    for &a in &nodes {
        assert_eq!(stack::find_depth(view, a), tree.find_depth(a));
        for &b in &nodes {
            assert_eq!(
                stack::are_cousins(view, a, b).unwrap(),
                tree.are_cousins(a, b).unwrap(),
                "cousins {} {} in {}",
                a,
                b,
                text
            );
            assert_eq!(
                stack::lowest_common_ancestor(view, a, b).unwrap(),
                tree.lowest_common_ancestor(a, b).unwrap(),
                "lca {} {} in {}",
                a,
                b,
                text
            );
        }
    }
}

#[test]
fn given_subtree_view_when_lca_then_stops_at_view_root() {
    let tree: BinaryTree<i64> = deserialize("[1,2,3,4,5,6,7]").unwrap();
    let left = tree.subtree(tree.node_at_path("L").unwrap()).unwrap();
    let (a, b) = (
        tree.node_at_path("LL").unwrap(),
        tree.node_at_path("LR").unwrap(),
    );
    assert_eq!(
        stack::lowest_common_ancestor(left, a, b).unwrap(),
        tree.node_at_path("L").unwrap()
    );

    let outside = tree.node_at_path("R").unwrap();
    assert!(stack::lowest_common_ancestor(left, a, outside).is_err());
}

#[test]
fn given_tree_when_post_order_then_children_before_parent() {
    let tree: BinaryTree<i64> = deserialize("[1,2,3,4,5]").unwrap();
    let values: Vec<i64> = PostOrder::new(tree.view())
        .map(|(_, node)| node.value)
        .collect();
    assert_eq!(values, vec![4, 5, 2, 3, 1]);
}

#[test]
fn given_deep_chain_when_engine_auto_then_switches_to_iterative() {
    let (mut tree, mut last) = BinaryTree::with_root(0i64);
    for value in 1..50_000 {
        last = tree.insert_left(last, value).unwrap();
    }

    let settings = Settings {
        traversal: Traversal::Auto,
        recursion_limit: 1_000,
    };
    let engine = Engine::new(&tree, &settings);
    assert_eq!(engine.traversal(), Traversal::Iterative);
    assert_eq!(engine.min_depth(), 50_000);
    assert_eq!(engine.max_depth(), 50_000);
    assert_eq!(engine.find_depth(last), Some(49_999));
    assert_eq!(engine.next_larger(49_998), Some(49_999));
    assert_eq!(engine.lowest_common_ancestor(last, last).unwrap(), last);
}

#[rstest]
#[case(Traversal::Recursive)]
#[case(Traversal::Iterative)]
fn given_forced_traversal_when_engine_then_kept_regardless_of_size(#[case] traversal: Traversal) {
    let tree: BinaryTree<i64> = deserialize("[-10,9,20,null,null,15,7]").unwrap();
    let settings = Settings {
        traversal,
        recursion_limit: 0,
    };
    let engine = Engine::new(&tree, &settings);
    assert_eq!(engine.traversal(), traversal);
    assert_eq!(engine.max_sum().unwrap(), 42);
}
