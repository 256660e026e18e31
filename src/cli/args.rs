//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Convert hierarchical records between flat parent-linked lists and nested trees
#[derive(Parser, Debug)]
#[command(name = "flattree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Directory holding a local .flattree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a tree from a flat JSON list (prints roots with nested children)
    Build {
        /// JSON file with a flat array of nodes, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Sort sibling groups by `id` or an attribute
        #[arg(short, long)]
        sort: Option<String>,
        /// Recompute level/isLeaf after building
        #[arg(long)]
        relevel: bool,
    },

    /// Flatten a JSON tree into a pre-order list
    Flatten {
        /// JSON file with an array of root nodes, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
    },

    /// Show hierarchy as tree
    Show {
        /// JSON file with nodes, `-` for stdin
        #[arg(value_hint = ValueHint::FilePath)]
        input: PathBuf,
        /// Input is a flat list, build it first
        #[arg(long)]
        flat: bool,
        /// Label nodes with this attribute instead of their id
        #[arg(short, long)]
        label: Option<String>,
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

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create config template
    Init {
        /// Create global config
        #[arg(short, long)]
        global: bool,
    },

    /// Show config paths
    Path,
}
