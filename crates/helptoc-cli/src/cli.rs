//! # CLI Structure and Argument Parsing
//!
//! This module defines the command-line interface for `helptoc`. The CLI is built
//! using `clap` with derive macros.
//!
//! ## Usage Patterns
//!
//! ```bash
//! # Browse a dataset, revealing one entry
//! helptoc show --file HelpTOC.json --active Installation
//!
//! # Everything expanded, as JSON
//! helptoc show --url https://docs.example.com/api/HelpTOC.json --expand-all --format json
//!
//! # Filter the tree
//! helptoc search "completion" --file HelpTOC.json
//!
//! # Breadcrumb for one entry
//! helptoc path Toolbox --file HelpTOC.json
//!
//! # Persisted preferences
//! helptoc config theme dark
//! ```
//!
//! When neither `--file` nor `--url` is given, the dataset is fetched from the URL
//! built from the `[loader]` section of the configuration.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::output::OutputFormat;

/// Main CLI structure for the `helptoc` command
#[derive(Parser, Clone, Debug)]
#[command(name = "helptoc")]
#[command(version)]
#[command(about = "helptoc - Browse and search documentation tables of contents", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file. Also via `HELPTOC_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "HELPTOC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Print the tree as it would be displayed
    Show(ShowArgs),

    /// Filter the tree by a query
    Search(SearchArgs),

    /// Print the breadcrumb from a top-level entry down to an entry
    Path(PathArgs),

    /// Inspect or change persisted settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Where the dataset comes from
#[derive(Args, Clone, Debug, Default)]
#[group(multiple = false)]
pub struct SourceArgs {
    /// Read the dataset from a local JSON file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Fetch the dataset from a URL
    #[arg(long, value_name = "URL")]
    pub url: Option<Url>,
}

/// Arguments for `helptoc show`
#[derive(Args, Clone, Debug)]
pub struct ShowArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Activate this entry and reveal it
    #[arg(long, value_name = "ID")]
    pub active: Option<String>,

    /// Expand every entry
    #[arg(long)]
    pub expand_all: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `helptoc search`
#[derive(Args, Clone, Debug)]
pub struct SearchArgs {
    /// Text to look for in entry and anchor titles
    pub query: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Arguments for `helptoc path`
#[derive(Args, Clone, Debug)]
pub struct PathArgs {
    /// Entry id
    pub id: String,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// `helptoc config` subcommands
#[derive(Subcommand, Clone, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Set the colour theme
    Theme {
        /// auto, light or dark
        value: helptoc_core::Theme,
    },
}

impl Commands {
    /// The output format requested by the command, if it has one.
    pub const fn format(&self) -> Option<OutputFormat> {
        match self {
            Self::Show(args) => Some(args.format),
            Self::Search(args) => Some(args.format),
            Self::Path(args) => Some(args.format),
            Self::Config { .. } => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_file_and_url_are_exclusive() {
        let result = Cli::try_parse_from([
            "helptoc",
            "show",
            "--file",
            "toc.json",
            "--url",
            "https://example.com/toc.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_show_flags() {
        let cli = Cli::try_parse_from([
            "helptoc",
            "--quiet",
            "show",
            "--file",
            "toc.json",
            "--active",
            "Git",
            "--expand-all",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.quiet);
        let Commands::Show(args) = cli.command else {
            unreachable!("parsed a different command");
        };
        assert_eq!(args.active.as_deref(), Some("Git"));
        assert!(args.expand_all);
        assert_eq!(args.format, OutputFormat::Json);
    }

    #[test]
    fn test_theme_value_is_validated() {
        assert!(Cli::try_parse_from(["helptoc", "config", "theme", "dark"]).is_ok());
        assert!(Cli::try_parse_from(["helptoc", "config", "theme", "sepia"]).is_err());
    }
}
