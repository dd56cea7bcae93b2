//! Command-line surface (spec §6).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hashline-tools", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Renders a hash-anchored listing of a file.
    Read {
        path: PathBuf,

        /// 0-indexed line to start the listing at.
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of lines to list.
        #[arg(long, default_value_t = crate::listing::DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Applies a batch of anchor-validated edits to a file.
    Edit {
        path: PathBuf,

        /// The edit batch as a JSON array, given inline.
        #[arg(long, conflicts_with = "edits_stdin")]
        edits: Option<String>,

        /// Reads the edit batch as a JSON array from stdin.
        #[arg(long)]
        edits_stdin: bool,
    },
}
