//! # Output Formatting
//!
//! - **Text**: The tree as a person would see it, honouring expansion, with the active
//!   entry highlighted in the configured theme
//! - **JSON**: Pretty-printed state for scripts
//!
//! Logging goes to stderr, so JSON on stdout stays parseable.

mod json;
mod text;

use clap::ValueEnum;

pub use json::{PathEntry, SearchPayload, print_json};
pub use text::TreePrinter;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tree
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}
