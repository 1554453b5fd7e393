//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

use crate::config::Traversal;

/// Binary tree queries over level-order encoded trees such as `[1,2,3,null,4]`
#[derive(Parser, Debug)]
#[command(name = "bintree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Turn debugging information on (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Settings file layered over the global config
    #[arg(short, long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Override the configured traversal
    #[arg(short, long, global = true, value_enum)]
    pub traversal: Option<Traversal>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Nodes are addressed by their path from the root: `.` is the root,
/// `L`/`R` step into the left/right child (e.g. `LR`).
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print minimum and maximum depth
    Depth {
        /// Encoded tree, `-` reads stdin
        tree: String,
    },

    /// Print the largest sum along any path
    MaxSum {
        /// Encoded tree, `-` reads stdin
        tree: String,
    },

    /// Print the smallest value greater than BOUND
    NextLarger {
        /// Encoded tree, `-` reads stdin
        tree: String,
        #[arg(allow_negative_numbers = true)]
        bound: i64,
    },

    /// Print the depth of a node (root is 0)
    FindDepth {
        /// Encoded tree, `-` reads stdin
        tree: String,
        /// Node path
        path: String,
    },

    /// Check whether two nodes are cousins
    Cousins {
        /// Encoded tree, `-` reads stdin
        tree: String,
        /// First node path
        first: String,
        /// Second node path
        second: String,
    },

    /// Print the lowest common ancestor of two nodes
    Lca {
        /// Encoded tree, `-` reads stdin
        tree: String,
        /// First node path
        first: String,
        /// Second node path
        second: String,
    },

    /// Decode and re-encode a tree in canonical form
    Normalize {
        /// Encoded tree, `-` reads stdin
        tree: String,
    },

    /// Draw a tree
    Show {
        /// Encoded tree, `-` reads stdin
        tree: String,
    },

    /// Aggregates over general trees given as nested JSON
    General {
        #[command(subcommand)]
        command: GeneralCommands,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// General tree input: `{"value": 1, "children": [{"value": 2}]}`
#[derive(Subcommand, Debug)]
pub enum GeneralCommands {
    /// Sum of all values
    Sum {
        /// Nested JSON tree, `-` reads stdin
        tree: String,
    },
    /// Number of even values
    Evens {
        /// Nested JSON tree, `-` reads stdin
        tree: String,
    },
    /// Number of values greater than BOUND
    Greater {
        /// Nested JSON tree, `-` reads stdin
        tree: String,
        #[arg(allow_negative_numbers = true)]
        bound: i64,
    },
    /// Draw a general tree
    Show {
        /// Nested JSON tree, `-` reads stdin
        tree: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective settings
    Show,
    /// Print a commented template
    Template,
    /// Print the global config file location
    Path,
}
