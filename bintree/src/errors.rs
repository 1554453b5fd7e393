use std::path::PathBuf;
use generational_arena::Index;
use thiserror::Error;

use crate::binary::{NodeId, Side};

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("Node {0} is not part of this tree")]
    NodeNotInTree(NodeId),

    #[error("{side} child slot of node {parent} is already occupied")]
    SlotOccupied { parent: NodeId, side: Side },

    #[error("Parent node {0:?} is not part of this tree")]
    ParentNotFound(Index),

    #[error("Tree already has a root node")]
    RootExists,

    #[error("Invalid node path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Malformed encoding at slot {slot}: {reason}")]
    MalformedEncoding { slot: usize, reason: String },

    #[error("Tree of depth {0} is too deep for a level-order encoding")]
    TooDeep(usize),

    #[error("Path sum does not fit the value type")]
    Overflow,

    #[error("Failed to parse encoded tree: {0}")]
    Parse(#[from] serde_json::Error),
}

pub type TreeResult<T> = Result<T, TreeError>;

/// Errors raised while loading layered settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },

    #[error("Invalid settings: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Failed to serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
}
