//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueHint};

/// Organization forest editor: reorder, reparent, validate and normalize documents
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug level: -d info, -dd debug, -ddd trace
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub debug: u8,

    /// Config file layered over the global config
    #[arg(short, long, global = true, env = "ORGTREE_CONFIG", value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the organization forest with members
    Tree {
        /// Domain document (JSON)
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Report duplicate and missing names
    Validate {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Reorder organizations depth-first and print the document
    Normalize {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,
    },

    /// Drag an organization onto another and print the resulting document
    Move {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Identifier of the dragged organization
        #[arg(long)]
        active: String,

        /// Identifier of the drop target
        #[arg(long)]
        over: String,

        /// Horizontal drag distance in pixels (one indent level per indent_width)
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        delta_x: f64,
    },

    /// Drag a member within or across organizations and print the resulting document
    MoveMember {
        #[arg(value_hint = ValueHint::FilePath)]
        file: PathBuf,

        /// Identifier of the source organization
        #[arg(long)]
        from: String,

        /// Member index in the source organization
        #[arg(long)]
        index: usize,

        /// Identifier of the destination organization
        #[arg(long)]
        to: String,

        /// Target index in the destination organization
        #[arg(long)]
        at: usize,
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

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Print a commented config template
    Template,
    /// Show the global config file location
    Path,
}
