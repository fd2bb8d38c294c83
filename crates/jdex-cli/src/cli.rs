//! # CLI Structure and Argument Parsing
//!
//! This module defines the command-line interface for `jdex`. Every command
//! first indexes the configured Javadoc site (class listing plus package
//! overview), then answers lookups against that index.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # One-shot lookups
//! jdex class ArrayList
//! jdex class util.concurrent.TimeUnit
//! jdex method 'List#add(int, E)'
//! jdex package java.util
//!
//! # Index once, then answer lookups read from stdin
//! printf 'class List\nmethod List#size\n' | jdex shell
//!
//! # Another site, machine readable output
//! jdex --base-url https://example.org/apidocs/ --format json stats
//! ```
//!
//! ## Configuration
//!
//! Flags override the settings file; `JDEX_BASE_URL` and `JDEX_CONFIG` can
//! stand in for `--base-url` and `--config`.

use crate::output::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for the `jdex` command
#[derive(Parser, Clone, Debug)]
#[command(name = "jdex")]
#[command(version)]
#[command(about = "jdex - look up classes, methods and packages of a Javadoc site", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Lookup to run
    #[command(subcommand)]
    pub command: Commands,

    /// Root of the Javadoc site (overrides the settings file)
    #[arg(long, global = true, env = "JDEX_BASE_URL", value_name = "URL")]
    pub base_url: Option<String>,

    /// Settings file to read instead of the default location
    #[arg(long, global = true, env = "JDEX_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Per-page fetch timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Render unknown HTML tags instead of rejecting them
    #[arg(long, global = true)]
    pub lenient: bool,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Show a class by simple or partially qualified name
    Class {
        /// e.g. `List`, `util.List`, `java.util.List`
        name: String,
    },

    /// Show a method as `Class#name` or `Class#name(Type, ...)`
    Method {
        /// e.g. `List#add`, `java.util.List#add(int, E)`
        reference: String,
    },

    /// Show a package by its fully qualified name
    Package {
        /// e.g. `java.util`
        name: String,
    },

    /// Index once, then answer `class|method|package|reindex|stats` lines from stdin
    Shell,

    /// Show what the index contains
    Stats,
}
