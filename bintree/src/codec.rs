//! Level-order text encoding of binary trees.
//!
//! The encoding is a JSON array holding one entry per slot of the perfect tree
//! as deep as the encoded tree: a value, or `null` for an absent node. The empty
//! tree is `[]`.
//!
//! ```text
//!     1
//!    / \
//!   2   3        =>  [1,2,3,null,4,null,null]
//!    \
//!     4
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use crate::binary::BinaryTree;
use crate::builder::TreeBuilder;
use crate::errors::TreeResult;
use crate::queue;

/// Text of the empty tree.
pub const EMPTY: &str = "[]";

#[instrument(level = "debug", skip_all, fields(nodes = tree.len()))]
pub fn serialize<T: Serialize>(tree: &BinaryTree<T>) -> TreeResult<String> {
    let slots: Vec<Option<&T>> = queue::level_slots(tree.view())?
        .into_iter()
        .map(|slot| slot.and_then(|id| tree.value(id)))
        .collect();
    Ok(serde_json::to_string(&slots)?)
}

/// Inverse of [`serialize`].
///
/// Rejects text that is not a JSON array of values and nulls, a null root, and
/// values placed below an absent parent.
#[instrument(level = "debug", skip_all)]
pub fn deserialize<T: DeserializeOwned>(text: &str) -> TreeResult<BinaryTree<T>> {
    let slots: Vec<Option<T>> = serde_json::from_str(text)?;
    TreeBuilder::from_level_order(slots).build()
}
