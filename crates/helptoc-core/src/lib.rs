//! # helptoc-core
//!
//! Core functionality for helptoc - a tree engine for hierarchical documentation
//! table-of-contents navigation.
//!
//! This crate turns a flat, id-keyed help dataset into a forest of navigable items and
//! manages the interactive state around it: which items are expanded, which one is
//! active, and which survive a search.
//!
//! ## Architecture
//!
//! - **Types**: The raw dataset ([`HelpToc`]) and the built forest ([`TocItem`])
//! - **Parsing**: [`TocParser`] resolves references and orders children
//! - **Tree operations**: Pure functions in [`tree`] that return new forests
//! - **State**: [`TocController`] keeps [`TocState`] consistent across actions
//! - **Loading**: [`TableOfContents`] runs the load lifecycle, debounced search and
//!   click handling, and implements the [`TocApi`] control surface
//! - **Fetching**: [`HttpSource`] acquires datasets over HTTP with one fallback
//! - **Configuration** and **Error Handling**
//!
//! ## Quick Start
//!
//! ```rust
//! use helptoc_core::{HelpToc, TableOfContents, TocOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> helptoc_core::Result<()> {
//! let data = HelpToc::from_json(r#"{
//!     "entities": {"pages": {
//!         "intro": {"id": "intro", "title": "Introduction", "level": 0},
//!         "setup": {"id": "setup", "title": "Setup", "parentId": "intro", "level": 1}
//!     }},
//!     "topLevelIds": ["intro"]
//! }"#)?;
//!
//! let mut toc = TableOfContents::new(TocOptions {
//!     data: Some(data),
//!     initial_active_id: Some("setup".into()),
//!     ..TocOptions::default()
//! });
//! toc.load().await?;
//!
//! assert!(toc.state().expanded_items.contains("intro"));
//! assert_eq!(toc.state().active_item_id.as_deref(), Some("setup"));
//! # Ok(())
//! # }
//! ```

/// Configuration management
pub mod config;
/// Quiet-period timer used for search input
pub mod debounce;
/// Error types and result aliases
pub mod error;
/// HTTP dataset acquisition
pub mod fetcher;
/// Load lifecycle and the table-of-contents facade
pub mod loader;
/// Dataset to forest conversion
pub mod parser;
/// Table-of-contents state and its controller
pub mod state;
/// Pure operations over item forests
pub mod tree;
/// Core data types
pub mod types;

// Re-export commonly used types
pub use config::{Config, DisplayConfig, LoaderConfig, SearchConfig, Theme, TreeConfig};
pub use debounce::Debouncer;
pub use error::{Error, Result};
pub use fetcher::{DatasetSource, Fetcher, HttpSource};
pub use loader::{LoadPhase, LoadTicket, TableOfContents, TocApi, TocEvents, TocOptions};
pub use parser::{ReferencePolicy, TocParser};
pub use state::{TocController, TocState};
pub use types::*;
