//! Command-line argument definitions for the Caliper CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the document description to load, the
//! selection to resolve, the modifier switches, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Caliper selection tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the document description (TOML)
    #[arg(help = "Path to the document description file")]
    pub input: String,

    /// Selection entries: NAME or NAME:SUB[,SUB...], repeatable
    #[arg(short, long = "select", value_name = "SELECTION")]
    pub select: Vec<String>,

    /// Resolve for a duplicating command (copy) instead of an in-place one
    #[arg(long)]
    pub copy: bool,

    /// Resolve for a scaling command
    #[arg(long)]
    pub scale: bool,

    /// Include each resolved object's movable children
    #[arg(long)]
    pub movable_children: bool,

    /// Resolve vertex/edge sub-elements instead of whole objects
    #[arg(long)]
    pub sub_elements: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
