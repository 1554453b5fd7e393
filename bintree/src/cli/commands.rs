use std::io::{self, Read};

use clap::CommandFactory;
use clap_complete::generate;
use itertools::Itertools;
use tracing::{debug, instrument};

use crate::binary::BinaryTree;
use crate::cli::args::{Cli, Commands, ConfigCommands, GeneralCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::codec::{deserialize, serialize};
use crate::config::{global_config_path, Settings};
use crate::engine::Engine;
use crate::general::{NestedNode, Tree};
use crate::render::ToTermTree;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Commands::Depth { tree } => _depth(cli, tree),
        Commands::MaxSum { tree } => _max_sum(cli, tree),
        Commands::NextLarger { tree, bound } => _next_larger(cli, tree, *bound),
        Commands::FindDepth { tree, path } => _find_depth(cli, tree, path),
        Commands::Cousins {
            tree,
            first,
            second,
        } => _cousins(cli, tree, first, second),
        Commands::Lca {
            tree,
            first,
            second,
        } => _lca(cli, tree, first, second),
        Commands::Normalize { tree } => _normalize(tree),
        Commands::Show { tree } => _show(tree),
        Commands::General { command } => _general(command),
        Commands::Config { command } => _config(cli, command),
        Commands::Completion { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
    }
}

/// Settings from the config layers, with `--traversal` on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(traversal) = cli.traversal {
        settings.traversal = traversal;
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

/// The argument itself, or stdin for `-`.
fn read_input(arg: &str) -> CliResult<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut text = String::new();
    io::stdin()
        .read_to_string(&mut text)
        .map_err(|e| CliError::io("read tree from stdin", e))?;
    Ok(text)
}

fn load_tree(arg: &str) -> CliResult<BinaryTree<i64>> {
    Ok(deserialize(&read_input(arg)?)?)
}

#[instrument(skip(cli))]
fn _depth(cli: &Cli, tree: &str) -> CliResult<()> {
    let tree = load_tree(tree)?;
    let settings = load_settings(cli)?;
    let engine = Engine::new(&tree, &settings);
    output::action("min", &engine.min_depth());
    output::action("max", &engine.max_depth());
    Ok(())
}

#[instrument(skip(cli))]
fn _max_sum(cli: &Cli, tree: &str) -> CliResult<()> {
    let tree = load_tree(tree)?;
    let settings = load_settings(cli)?;
    output::info(&Engine::new(&tree, &settings).max_sum()?);
    Ok(())
}

#[instrument(skip(cli))]
fn _next_larger(cli: &Cli, tree: &str, bound: i64) -> CliResult<()> {
    let tree = load_tree(tree)?;
    let settings = load_settings(cli)?;
    match Engine::new(&tree, &settings).next_larger(bound) {
        Some(value) => output::info(&value),
        None => output::warning(&format!("no value greater than {}", bound)),
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _find_depth(cli: &Cli, tree: &str, path: &str) -> CliResult<()> {
    let tree = load_tree(tree)?;
    let settings = load_settings(cli)?;
    let node = tree.node_at_path(path)?;
    match Engine::new(&tree, &settings).find_depth(node) {
        Some(depth) => output::info(&depth),
        None => output::warning(&format!("node {} not found", path)),
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _cousins(cli: &Cli, tree: &str, first: &str, second: &str) -> CliResult<()> {
    let tree = load_tree(tree)?;
    let settings = load_settings(cli)?;
    let (a, b) = (tree.node_at_path(first)?, tree.node_at_path(second)?);
    output::info(&Engine::new(&tree, &settings).are_cousins(a, b)?);
    Ok(())
}

#[instrument(skip(cli))]
fn _lca(cli: &Cli, tree: &str, first: &str, second: &str) -> CliResult<()> {
    let tree = load_tree(tree)?;
    let settings = load_settings(cli)?;
    let (a, b) = (tree.node_at_path(first)?, tree.node_at_path(second)?);
    let ancestor = Engine::new(&tree, &settings).lowest_common_ancestor(a, b)?;

    let path = tree.path_of(ancestor)?;
    let label = if path.is_empty() { "." } else { path.as_str() };
    let value = tree
        .value(ancestor)
        .map(ToString::to_string)
        .unwrap_or_default();
    output::action(label, &value);
    Ok(())
}

#[instrument]
fn _normalize(tree: &str) -> CliResult<()> {
    output::info(&serialize(&load_tree(tree)?)?);
    Ok(())
}

#[instrument]
fn _show(tree: &str) -> CliResult<()> {
    output::info(&load_tree(tree)?.to_term_tree());
    Ok(())
}

fn load_general(arg: &str) -> CliResult<Tree<i64>> {
    let nested: NestedNode<i64> = serde_json::from_str(&read_input(arg)?)
        .map_err(crate::errors::TreeError::from)?;
    Ok(Tree::from_nested(nested))
}

#[instrument]
fn _general(command: &GeneralCommands) -> CliResult<()> {
    match command {
        GeneralCommands::Sum { tree } => output::info(&load_general(tree)?.sum_values()?),
        GeneralCommands::Evens { tree } => output::info(&load_general(tree)?.count_evens()),
        GeneralCommands::Greater { tree, bound } => {
            output::info(&load_general(tree)?.num_greater(bound))
        }
        GeneralCommands::Show { tree } => {
            let tree = load_general(tree)?;
            output::info(&tree.to_term_tree());
            let leaves = tree.leaf_values().iter().join(", ");
            output::action("leaves", &leaves);
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => output::info(&load_settings(cli)?.to_toml()?),
        ConfigCommands::Template => output::info(&Settings::template()),
        ConfigCommands::Path => match global_config_path() {
            Some(path) => output::info(&path.display()),
            None => output::warning("no configuration directory on this platform"),
        },
    }
    Ok(())
}
