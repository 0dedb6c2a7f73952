//! Command-line argument definitions for the Sieve CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. A subcommand selects between compiling a source list,
//! building a default configuration from name lists, and joining name
//! lists. Configuration file selection and logging verbosity are global.

use clap::{Parser, Subcommand};

/// Command-line arguments for the Sieve policy compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file (TOML)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a source list into a JSON policy
    Compile(CompileArgs),
    /// Build a default configuration from an element list and an attribute list
    Defaults(DefaultsArgs),
    /// Join name lists into one sorted, wrapped list
    Join(JoinArgs),
}

#[derive(clap::Args, Debug, Default)]
pub struct CompileArgs {
    /// Path to the source list
    #[arg(short, long)]
    pub input: String,

    /// Path to the output JSON file
    #[arg(short, long)]
    pub out: String,

    /// JSON object whose keys are copied into the policy
    #[arg(long)]
    pub base: Option<String>,

    /// Name list of attributes to add to `removeAttributes`
    #[arg(long)]
    pub remove_list: Option<String>,

    /// Sort every collection into canonical order
    #[arg(long)]
    pub sorted: bool,

    /// Write attribute-less HTML elements and plain attributes as bare names
    #[arg(long)]
    pub compact: bool,

    /// Omit empty `attributes` lists
    #[arg(long)]
    pub strip_empty: bool,

    /// Allow comments in sanitized markup
    #[arg(long)]
    pub comments: bool,

    /// Allow `data-*` attributes in sanitized markup
    #[arg(long)]
    pub data_attributes: bool,
}

#[derive(clap::Args, Debug, Default)]
pub struct DefaultsArgs {
    /// Path to the output JSON file
    #[arg(short, long)]
    pub out: String,

    /// JSON object whose keys are copied into the configuration
    #[arg(long)]
    pub base: Option<String>,

    /// Name list of allowed elements
    #[arg(long)]
    pub elements: String,

    /// Name list of attributes allowed on every element
    #[arg(long)]
    pub attributes: String,
}

#[derive(clap::Args, Debug, Default)]
pub struct JoinArgs {
    /// Path to the output text file
    #[arg(short, long)]
    pub out: String,

    /// Maximum line width, overriding the configured width
    #[arg(short, long)]
    pub width: Option<usize>,

    /// Name lists to join
    #[arg(required = true)]
    pub lists: Vec<String>,
}
