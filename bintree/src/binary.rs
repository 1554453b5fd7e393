//! Arena-backed binary tree and its recursive queries.
//!
//! Nodes live in a generational arena owned by [`BinaryTree`]; child links are
//! arena handles. Recursive algorithms walk [`Subtree`] views, which borrow the
//! tree and never own or copy nodes.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use generational_arena::{Arena, Index};
use num_traits::CheckedAdd;
use tracing::{debug, instrument, trace};

use crate::errors::{TreeError, TreeResult};
use crate::stack::PreOrder;

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Stable identity of a node inside one tree.
///
/// Handles carry the id of the tree that issued them, so a handle from one
/// tree never resolves in another, even when both arenas hand out the same
/// slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: Index,
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.index.into_raw_parts();
        write!(f, "#{}:{}.{}", self.tree, slot, generation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    fn step(self) -> char {
        match self {
            Side::Left => 'L',
            Side::Right => 'R',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Tree node in the arena.
#[derive(Debug, Clone)]
pub struct BinaryNode<T> {
    pub value: T,
    /// None for the root
    pub parent: Option<NodeId>,
    pub left: Option<NodeId>,
    pub right: Option<NodeId>,
}

impl<T> BinaryNode<T> {
    fn new(value: T, parent: Option<NodeId>) -> Self {
        Self {
            value,
            parent,
            left: None,
            right: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Present children, left first.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }
}

/// Binary tree owning all of its nodes.
///
/// Nodes can only be attached to empty child slots of nodes already in the
/// tree, so every node has exactly one parent slot and cycles cannot form.
#[derive(Debug, Clone)]
pub struct BinaryTree<T> {
    id: u64,
    arena: Arena<BinaryNode<T>>,
    root: Option<NodeId>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    pub fn new() -> Self {
        Self {
            id: NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed),
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn with_root(value: T) -> (Self, NodeId) {
        let mut tree = Self::new();
        let root = tree.alloc(BinaryNode::new(value, None));
        tree.root = Some(root);
        (tree, root)
    }

    fn alloc(&mut self, node: BinaryNode<T>) -> NodeId {
        NodeId {
            tree: self.id,
            index: self.arena.insert(node),
        }
    }

    #[instrument(level = "trace", skip_all)]
    pub fn set_root(&mut self, value: T) -> TreeResult<NodeId> {
        if self.root.is_some() {
            return Err(TreeError::RootExists);
        }
        let root = self.alloc(BinaryNode::new(value, None));
        self.root = Some(root);
        Ok(root)
    }

    pub fn insert_left(&mut self, parent: NodeId, value: T) -> TreeResult<NodeId> {
        self.insert_child(parent, Side::Left, value)
    }

    pub fn insert_right(&mut self, parent: NodeId, value: T) -> TreeResult<NodeId> {
        self.insert_child(parent, Side::Right, value)
    }

    #[instrument(level = "trace", skip(self, value))]
    pub fn insert_child(&mut self, parent: NodeId, side: Side, value: T) -> TreeResult<NodeId> {
        match self.node(parent) {
            None => return Err(TreeError::NodeNotInTree(parent)),
            Some(node) if node.child(side).is_some() => {
                return Err(TreeError::SlotOccupied { parent, side })
            }
            Some(_) => {}
        }

        let child = self.alloc(BinaryNode::new(value, Some(parent)));
        if let Some(node) = self.arena.get_mut(parent.index) {
            match side {
                Side::Left => node.left = Some(child),
                Side::Right => node.right = Some(child),
            }
        }
        Ok(child)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> Option<&BinaryNode<T>> {
        if id.tree != self.id {
            return None;
        }
        self.arena.get(id.index)
    }

    pub fn value(&self, id: NodeId) -> Option<&T> {
        self.node(id).map(|node| &node.value)
    }

    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.left)
    }

    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.right)
    }

    pub fn child(&self, id: NodeId, side: Side) -> Option<NodeId> {
        self.node(id).and_then(|node| node.child(side))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        id.tree == self.id && self.arena.contains(id.index)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// View over the whole tree.
    pub fn view(&self) -> Subtree<'_, T> {
        Subtree {
            tree: self,
            root: self.root,
        }
    }

    /// View over the subtree rooted at `id`.
    pub fn subtree(&self, id: NodeId) -> TreeResult<Subtree<'_, T>> {
        if !self.contains(id) {
            return Err(TreeError::NodeNotInTree(id));
        }
        Ok(Subtree {
            tree: self,
            root: Some(id),
        })
    }

    /// Resolves a root-relative path of `L`/`R` steps; `""` or `"."` is the root.
    #[instrument(level = "debug", skip(self))]
    pub fn node_at_path(&self, path: &str) -> TreeResult<NodeId> {
        let invalid = |reason: &str| TreeError::InvalidPath {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let mut current = self.root.ok_or_else(|| invalid("tree is empty"))?;
        let steps = if path == "." { "" } else { path };
        for step in steps.chars() {
            let side = match step.to_ascii_uppercase() {
                'L' => Side::Left,
                'R' => Side::Right,
                other => return Err(invalid(&format!("unexpected step '{}'", other))),
            };
            current = self
                .child(current, side)
                .ok_or_else(|| invalid("path leaves the tree"))?;
        }
        Ok(current)
    }

    /// Inverse of [`BinaryTree::node_at_path`].
    pub fn path_of(&self, id: NodeId) -> TreeResult<String> {
        let mut steps = Vec::new();
        let mut current = id;
        loop {
            let node = self.node(current).ok_or(TreeError::NodeNotInTree(id))?;
            let Some(parent) = node.parent else { break };
            let side = if self.left(parent) == Some(current) {
                Side::Left
            } else {
                Side::Right
            };
            steps.push(side.step());
            current = parent;
        }
        Ok(steps.iter().rev().collect())
    }

    pub fn min_depth(&self) -> usize {
        self.view().min_depth()
    }

    pub fn max_depth(&self) -> usize {
        self.view().max_depth()
    }

    pub fn find(&self, target: NodeId) -> bool {
        self.view().find(target)
    }

    pub fn find_depth(&self, target: NodeId) -> Option<usize> {
        self.view().find_depth(target)
    }

    pub fn are_cousins(&self, a: NodeId, b: NodeId) -> TreeResult<bool> {
        self.view().are_cousins(a, b)
    }

    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> TreeResult<NodeId> {
        self.view().lowest_common_ancestor(a, b)
    }
}

impl<T> BinaryTree<T>
where
    T: Copy + PartialOrd + CheckedAdd + Default,
{
    pub fn max_sum(&self) -> TreeResult<T> {
        self.view().max_sum()
    }
}

impl<T: Copy + PartialOrd> BinaryTree<T> {
    pub fn next_larger(&self, bound: T) -> Option<T> {
        self.view().next_larger(bound)
    }
}

/// Per-node result of the path sum recursion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSum<T> {
    /// Best sum of a path ending at this node that the parent may extend
    pub best_through: T,
    /// Best complete path anywhere in this subtree
    pub best_seen: T,
}

/// Borrowed view of a subtree; `root == None` is the empty tree.
#[derive(Debug)]
pub struct Subtree<'a, T> {
    tree: &'a BinaryTree<T>,
    root: Option<NodeId>,
}

impl<T> Clone for Subtree<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Subtree<'_, T> {}

impl<'a, T> Subtree<'a, T> {
    pub fn tree(&self) -> &'a BinaryTree<T> {
        self.tree
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn value(&self) -> Option<&'a T> {
        self.root.and_then(|root| self.tree.value(root))
    }

    pub fn left(&self) -> Self {
        self.side(Side::Left)
    }

    pub fn right(&self) -> Self {
        self.side(Side::Right)
    }

    fn side(&self, side: Side) -> Self {
        Self {
            tree: self.tree,
            root: self.root.and_then(|root| self.tree.child(root, side)),
        }
    }

    /// Pre-order walk of the nodes in this view.
    pub fn iter(&self) -> PreOrder<'a, T> {
        PreOrder::new(*self)
    }

    /// Number of nodes on the shortest root-to-leaf path.
    ///
    /// An absent child is not a leaf: a node with a single child only takes
    /// the depth of the present side.
    pub fn min_depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        let (left, right) = (self.left(), self.right());
        1 + match (left.is_empty(), right.is_empty()) {
            (true, true) => 0,
            (false, true) => left.min_depth(),
            (true, false) => right.min_depth(),
            (false, false) => left.min_depth().min(right.min_depth()),
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn max_depth(&self) -> usize {
        if self.is_empty() {
            return 0;
        }
        1 + self.left().max_depth().max(self.right().max_depth())
    }

    /// Identity search for `target` below this view's root.
    pub fn find(&self, target: NodeId) -> bool {
        match self.root {
            None => false,
            Some(root) if root == target => true,
            Some(_) => self.left().find(target) || self.right().find(target),
        }
    }

    /// Edge count from this view's root to `target`.
    pub fn find_depth(&self, target: NodeId) -> Option<usize> {
        self.depth_below(target, 0)
    }

    fn depth_below(&self, target: NodeId, depth: usize) -> Option<usize> {
        let root = self.root?;
        if root == target {
            return Some(depth);
        }
        self.left()
            .depth_below(target, depth + 1)
            .or_else(|| self.right().depth_below(target, depth + 1))
    }

    /// Same depth, different parents. A node is never its own cousin.
    #[instrument(level = "debug", skip(self))]
    pub fn are_cousins(&self, a: NodeId, b: NodeId) -> TreeResult<bool> {
        if self.siblings(a, b) {
            debug!("{} and {} share a parent", a, b);
            return Ok(false);
        }
        let depth_a = self.find_depth(a).ok_or(TreeError::NodeNotInTree(a))?;
        let depth_b = self.find_depth(b).ok_or(TreeError::NodeNotInTree(b))?;
        Ok(a != b && depth_a == depth_b)
    }

    pub(crate) fn siblings(&self, a: NodeId, b: NodeId) -> bool {
        self.iter().any(|(_, node)| match (node.left, node.right) {
            (Some(left), Some(right)) => {
                (left == a && right == b) || (left == b && right == a)
            }
            _ => false,
        })
    }

    /// Deepest node having both `a` and `b` below it (a node is its own ancestor).
    #[instrument(level = "debug", skip(self))]
    pub fn lowest_common_ancestor(&self, a: NodeId, b: NodeId) -> TreeResult<NodeId> {
        let mut view = *self;
        while let Some(child) = view.shared_child(a, b) {
            trace!("descending to {:?}", child.root);
            view = child;
        }
        match view.root {
            Some(root) if view.find(a) && view.find(b) => Ok(root),
            _ => Err(TreeError::NodeNotInTree(if view.find(a) { b } else { a })),
        }
    }

    fn shared_child(&self, a: NodeId, b: NodeId) -> Option<Self> {
        [self.left(), self.right()]
            .into_iter()
            .find(|child| child.find(a) && child.find(b))
    }
}

impl<T> Subtree<'_, T>
where
    T: Copy + PartialOrd + CheckedAdd + Default,
{
    /// Largest sum over any simple path; `T::default()` for an empty tree.
    ///
    /// All-negative trees yield their largest single value. Fails with
    /// [`TreeError::Overflow`] when some path sum leaves the range of `T`.
    pub fn max_sum(&self) -> TreeResult<T> {
        Ok(self
            .path_sums()?
            .map(|sums| sums.best_seen)
            .unwrap_or_default())
    }

    pub fn path_sums(&self) -> TreeResult<Option<PathSum<T>>> {
        let Some(&value) = self.value() else {
            return Ok(None);
        };
        let zero = T::default();
        let left = self.left().path_sums()?;
        let right = self.right().path_sums()?;

        let gain = |sums: Option<PathSum<T>>| {
            sums.map_or(zero, |sums| larger(sums.best_through, zero))
        };
        let (left_gain, right_gain) = (gain(left), gain(right));

        let complete = checked_sum(checked_sum(value, left_gain)?, right_gain)?;
        let best_seen = [left, right]
            .into_iter()
            .flatten()
            .fold(complete, |best, sums| larger(best, sums.best_seen));

        Ok(Some(PathSum {
            best_through: checked_sum(value, larger(left_gain, right_gain))?,
            best_seen,
        }))
    }
}

impl<T: Copy + PartialOrd> Subtree<'_, T> {
    /// Smallest value strictly greater than `bound`, in any order of the tree.
    pub fn next_larger(&self, bound: T) -> Option<T> {
        let value = *self.value()?;
        let own = (value > bound).then_some(value);
        [
            self.left().next_larger(bound),
            self.right().next_larger(bound),
            own,
        ]
        .into_iter()
        .flatten()
        .reduce(smaller)
    }
}

pub(crate) fn checked_sum<T: CheckedAdd>(a: T, b: T) -> TreeResult<T> {
    a.checked_add(&b).ok_or(TreeError::Overflow)
}

pub(crate) fn larger<T: PartialOrd>(a: T, b: T) -> T {
    if b > a {
        b
    } else {
        a
    }
}

pub(crate) fn smaller<T: PartialOrd>(a: T, b: T) -> T {
    if b < a {
        b
    } else {
        a
    }
}
