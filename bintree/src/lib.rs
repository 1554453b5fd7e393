//! Binary tree algorithms over an arena-backed node graph.
//!
//! A [`BinaryTree`] owns its nodes; queries run on borrowed [`Subtree`] views:
//! depth bounds, maximum path sum, bounded successor search, depth lookup,
//! cousin detection and lowest common ancestor. Trees round-trip through a
//! level-order JSON encoding (see [`codec`]).
//!
//! ```
//! use bintree::{deserialize, serialize, BinaryTree};
//!
//! let tree: BinaryTree<i64> = deserialize("[-10,9,20,null,null,15,7]").unwrap();
//! assert_eq!(tree.max_sum().unwrap(), 42);
//! assert_eq!(tree.min_depth(), 2);
//! assert_eq!(serialize(&tree).unwrap(), "[-10,9,20,null,null,15,7]");
//! ```

pub mod binary;
pub mod builder;
pub mod cli;
pub mod codec;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exitcode;
pub mod general;
pub mod queue;
pub mod render;
pub mod stack;
pub mod util;

pub use binary::{BinaryNode, BinaryTree, NodeId, PathSum, Side, Subtree};
pub use codec::{deserialize, serialize};
pub use errors::{SettingsError, TreeError, TreeResult};
