//! Command-line interface definitions.
//!
//! This module defines the CLI structure for the `fcache` binary using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// File cache tool.
///
/// A CLI for inspecting and modifying a cache directory.
#[derive(Parser, Debug)]
#[command(name = "fcache")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Cache root directory. Defaults to `cache` under the system temp
    /// directory.
    #[arg(long, global = true)]
    pub path: Option<PathBuf>,

    /// The command to execute.
    #[clap(subcommand)]
    pub command: CacheCommand,
}

/// Available cache commands.
#[derive(Subcommand, Debug)]
pub enum CacheCommand {
    /// Get a value by key.
    ///
    /// Prints the stored JSON value, or reports a miss if the key
    /// doesn't exist or has expired.
    Get {
        /// The key to look up.
        key: String,
    },

    /// Set a key-value pair.
    ///
    /// The value is stored as JSON: input that parses as JSON is stored
    /// as-is, anything else as a JSON string.
    Set {
        /// The key to store the value under.
        key: String,
        /// The value to store.
        value: String,
        /// Lifetime in seconds. Omit for an entry that never expires.
        #[arg(long)]
        ttl: Option<i64>,
    },

    /// Delete an entry or a whole category.
    ///
    /// Removes the entry file, or the entire subdirectory when the key
    /// names a category.
    Delete {
        /// The key or category to delete.
        key: String,
    },

    /// Check whether an entry exists.
    ///
    /// Prints `yes` or `no`; the exit status is 0 only for `yes`.
    Has {
        /// The key to check.
        key: String,
    },

    /// Remove the entire cache directory.
    Clear,
}
