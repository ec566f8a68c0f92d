//! CLI argument definitions using clap

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueHint};

/// Organization hierarchy explorer: find the closest common manager of two employees
#[derive(Parser, Debug)]
#[command(name = "orgtree")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Debug output, repeat for more (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// Hierarchy data file (JSON), overrides the configured one
    #[arg(short = 'f', long, global = true, value_hint = ValueHint::FilePath)]
    pub data_file: Option<PathBuf>,

    /// Directory holding a local .orgtree.toml (default: cwd)
    #[arg(short = 'C', long, global = true, value_hint = ValueHint::DirPath)]
    pub config_dir: Option<PathBuf>,

    /// Drop subordinate ids that have no record instead of failing
    #[arg(long, global = true)]
    pub skip_unresolved: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Find the closest common manager of two employees
    Manager {
        /// First employee id
        one: String,
        /// Second employee id
        two: String,
    },

    /// Show the reporting line from the root to an employee
    Path {
        /// Employee id
        id: String,
    },

    /// Show the hierarchy as a tree
    Tree,

    /// Show hierarchy summary
    Info,

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
