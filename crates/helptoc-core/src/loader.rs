//! The table-of-contents facade: dataset loading, debounced search, click handling
//! and the programmatic control surface.
//!
//! ## Load lifecycle
//!
//! ```text
//! Idle ──load──▶ Loading ──ok──▶ Ready ──reload──▶ Loading
//!                   │                                 ▲
//!                   └──err──▶ Failed ──reload─────────┘
//! ```
//!
//! A load is split into [`TableOfContents::begin_load`], which hands out a
//! [`LoadTicket`] that acquires the dataset without borrowing the facade, and
//! [`TableOfContents::finish_load`], which installs the result. Hosts that need to stay
//! interactive while a fetch is pending drive these two steps themselves; everyone
//! else calls [`TableOfContents::reload`]. Only one load can be in flight at a time.
//!
//! ## Search
//!
//! Typed queries are stored immediately but only applied once they have been stable
//! for the configured debounce period; see [`TableOfContents::set_search_query`].

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::config::{Config, SearchConfig};
use crate::debounce::Debouncer;
use crate::fetcher::DatasetSource;
use crate::parser::{ReferencePolicy, TocParser};
use crate::state::{TocController, TocState};
use crate::tree;
use crate::types::{HelpToc, TocAnchor, TocItem};
use crate::{Error, Result};

/// Where the facade is in its load lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    /// Nothing has been loaded yet.
    Idle,
    /// A load is in flight.
    Loading,
    /// A forest is installed.
    Ready,
    /// The last load failed; the message is meant for display.
    Failed(String),
}

impl fmt::Display for LoadPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Loading => f.write_str("loading"),
            Self::Ready => f.write_str("ready"),
            Self::Failed(message) => write!(f, "failed: {message}"),
        }
    }
}

/// Options for a [`TableOfContents`].
#[derive(Debug, Clone)]
pub struct TocOptions {
    /// A dataset supplied in-process. When present, no source is consulted.
    pub data: Option<HelpToc>,
    /// Item to activate once a forest is installed.
    pub initial_active_id: Option<String>,
    /// Expand ancestors when activating.
    pub auto_expand_active: bool,
    /// Search behaviour.
    pub search: SearchConfig,
    /// How unresolved dataset references are treated.
    pub reference_policy: ReferencePolicy,
}

impl Default for TocOptions {
    fn default() -> Self {
        Self {
            data: None,
            initial_active_id: None,
            auto_expand_active: true,
            search: SearchConfig::default(),
            reference_policy: ReferencePolicy::Lenient,
        }
    }
}

impl TocOptions {
    /// Options derived from the tree and search sections of a [`Config`].
    pub fn from_config(config: &Config) -> Self {
        Self {
            auto_expand_active: config.tree.auto_expand_active,
            search: config.search.clone(),
            reference_policy: config.tree.reference_policy,
            ..Self::default()
        }
    }
}

/// Callbacks through which the host performs actual navigation.
pub trait TocEvents: Send {
    /// An item was clicked.
    fn on_item_click(&mut self, _item: &TocItem) {}

    /// An anchor was clicked; `href` is the owning page's URL with the fragment appended.
    fn on_anchor_click(&mut self, _anchor: &TocAnchor, _href: &str) {}
}

struct NoEvents;

impl TocEvents for NoEvents {}

/// The control surface a host application drives the table of contents through.
#[async_trait]
pub trait TocApi: Send {
    /// Activate an item, expanding its ancestors when configured to.
    fn set_active_by_id(&mut self, id: &str);
    /// Expand every item.
    fn expand_all(&mut self);
    /// Collapse every item.
    fn collapse_all(&mut self);
    /// Set the search query (debounced).
    fn filter_by_string(&mut self, query: &str);
    /// Drop the search query and the filtered view.
    fn clear_filter(&mut self);
    /// The active item, if any.
    fn get_active_item(&self) -> Option<&TocItem>;
    /// Re-run the load sequence.
    async fn reload(&mut self) -> Result<()>;
}

/// Permission to run one load, obtained from [`TableOfContents::begin_load`].
pub struct LoadTicket {
    generation: u64,
    acquire: Acquire,
}

enum Acquire {
    Supplied(HelpToc),
    Remote(Arc<dyn DatasetSource>),
    Unconfigured,
}

impl LoadTicket {
    /// Acquire the dataset: the supplied one, or whatever the source returns.
    pub async fn acquire(&self) -> Result<HelpToc> {
        match &self.acquire {
            Acquire::Supplied(toc) => Ok(toc.clone()),
            Acquire::Remote(source) => source.fetch_dataset().await,
            Acquire::Unconfigured => Err(Error::Config(
                "no dataset supplied and no source configured".into(),
            )),
        }
    }
}

/// A table of contents with its load lifecycle, debounced search and event callbacks.
pub struct TableOfContents {
    options: TocOptions,
    source: Option<Arc<dyn DatasetSource>>,
    controller: TocController,
    phase: LoadPhase,
    in_flight: bool,
    generation: u64,
    debouncer: Debouncer<String>,
    events: Box<dyn TocEvents>,
}

impl fmt::Debug for TableOfContents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableOfContents")
            .field("phase", &self.phase)
            .field("in_flight", &self.in_flight)
            .field("items", &tree::count(self.controller.items()))
            .field("has_source", &self.source.is_some())
            .finish_non_exhaustive()
    }
}

impl TableOfContents {
    /// Create a table of contents that loads only supplied data.
    pub fn new(options: TocOptions) -> Self {
        let controller = TocController::new(options.search.clone());
        let debouncer = Debouncer::new(options.search.debounce());
        Self {
            options,
            source: None,
            controller,
            phase: LoadPhase::Idle,
            in_flight: false,
            generation: 0,
            debouncer,
            events: Box::new(NoEvents),
        }
    }

    /// Create a table of contents that fetches from `source` when no data is supplied.
    pub fn with_source(options: TocOptions, source: impl DatasetSource + 'static) -> Self {
        let mut toc = Self::new(options);
        toc.source = Some(Arc::new(source));
        toc
    }

    /// Route click notifications to `events`.
    #[must_use]
    pub fn with_events(mut self, events: impl TocEvents + 'static) -> Self {
        self.events = Box::new(events);
        self
    }

    /// Current lifecycle phase.
    pub const fn phase(&self) -> &LoadPhase {
        &self.phase
    }

    /// Whether a load is in flight.
    pub const fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// The failure message of the last load, if it failed.
    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            LoadPhase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a forest has been installed.
    pub fn is_ready(&self) -> bool {
        self.phase == LoadPhase::Ready
    }

    /// The current state.
    pub const fn state(&self) -> &TocState {
        self.controller.state()
    }

    /// The underlying controller.
    pub const fn controller(&self) -> &TocController {
        &self.controller
    }

    /// The forest to render.
    pub fn display_items(&self) -> &[TocItem] {
        self.controller.display_items()
    }

    /// Mount: load once if nothing has been loaded yet.
    pub async fn load(&mut self) -> Result<()> {
        if self.phase != LoadPhase::Idle {
            debug!(phase = %self.phase, "load skipped: already mounted");
            return Ok(());
        }
        self.reload().await
    }

    /// Re-run the load sequence. Ignored while another load is in flight.
    pub async fn reload(&mut self) -> Result<()> {
        let Some(ticket) = self.begin_load() else {
            debug!("reload ignored: a load is already in flight");
            return Ok(());
        };
        let result = ticket.acquire().await;
        self.finish_load(&ticket, result)
    }

    /// Enter `Loading` and hand out the ticket for this load, or `None` while another
    /// load is in flight.
    pub fn begin_load(&mut self) -> Option<LoadTicket> {
        if self.in_flight {
            return None;
        }
        self.in_flight = true;
        self.generation += 1;
        self.phase = LoadPhase::Loading;

        let acquire = match (&self.options.data, &self.source) {
            (Some(data), _) => Acquire::Supplied(data.clone()),
            (None, Some(source)) => Acquire::Remote(Arc::clone(source)),
            (None, None) => Acquire::Unconfigured,
        };
        info!(generation = self.generation, "loading table of contents");
        Some(LoadTicket {
            generation: self.generation,
            acquire,
        })
    }

    /// Install the outcome of the load `ticket` was issued for.
    ///
    /// Results for a ticket that has since been cancelled are discarded.
    pub fn finish_load(&mut self, ticket: &LoadTicket, result: Result<HelpToc>) -> Result<()> {
        if !self.in_flight || ticket.generation != self.generation {
            debug!(generation = ticket.generation, "discarding stale load result");
            return Ok(());
        }
        self.in_flight = false;

        let parsed = result.and_then(|toc| {
            TocParser::with_policy(self.options.reference_policy).parse(&toc)
        });
        match parsed {
            Ok(items) => {
                info!(items = tree::count(&items), "table of contents ready");
                self.controller.install(items);
                self.phase = LoadPhase::Ready;
                if let Some(id) = self.options.initial_active_id.clone() {
                    self.controller
                        .set_active_item(Some(&id), self.options.auto_expand_active);
                }
                Ok(())
            },
            Err(err) => {
                warn!(category = err.category(), "loading table of contents failed: {err}");
                self.controller.install(Vec::new());
                self.phase = LoadPhase::Failed(err.to_string());
                Err(err)
            },
        }
    }

    /// Abandon the in-flight load, if any. Its result will be discarded.
    pub fn cancel_load(&mut self) {
        if !self.in_flight {
            return;
        }
        self.in_flight = false;
        self.generation += 1;
        if self.phase == LoadPhase::Loading {
            self.phase = if self.controller.items().is_empty() {
                LoadPhase::Idle
            } else {
                LoadPhase::Ready
            };
        }
    }

    /// Flip the expansion of `id`.
    pub fn toggle_expanded(&mut self, id: &str) {
        self.controller.toggle_expanded(id);
    }

    /// Activate `id` (or clear with `None`), expanding ancestors when configured to.
    pub fn set_active_item(&mut self, id: Option<&str>) {
        self.controller
            .set_active_item(id, self.options.auto_expand_active);
    }

    /// Expand every item.
    pub fn expand_all(&mut self) {
        self.controller.expand_all();
    }

    /// Collapse every item.
    pub fn collapse_all(&mut self) {
        self.controller.collapse_all();
    }

    /// Store the live query and restart the debounce period.
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.controller.set_search_query(query.clone());
        self.debouncer.push(query);
        self.poll_search(Instant::now());
    }

    /// Apply the debounced query if its quiet period has elapsed by `now`.
    ///
    /// Returns `true` when the filtered view was recomputed.
    pub fn poll_search(&mut self, now: Instant) -> bool {
        let released = self.debouncer.poll(now);
        self.apply_released(released)
    }

    /// Wait for the pending query's quiet period and apply it.
    ///
    /// Returns `true` when the filtered view was recomputed.
    pub async fn settle_search(&mut self) -> bool {
        let released = self.debouncer.settled().await;
        self.apply_released(released)
    }

    fn apply_released(&mut self, released: Option<String>) -> bool {
        match released {
            Some(query) if query != self.controller.applied_query() => {
                self.controller.apply_query(&query);
                true
            },
            Some(query) => {
                debug!(%query, "debounced query unchanged; filter kept");
                false
            },
            None => false,
        }
    }

    /// Whether a typed query is still waiting to be applied. A pending query equal to
    /// the applied one would change nothing, so it does not count.
    pub fn is_searching(&self) -> bool {
        self.debouncer
            .pending()
            .is_some_and(|pending| pending.as_str() != self.controller.applied_query())
    }

    /// Drop the query, any pending debounce and the filtered view.
    pub fn clear_search(&mut self) {
        self.debouncer.cancel();
        self.controller.clear_search();
    }

    /// Handle a click on an item: items with children toggle, the item becomes active,
    /// and the host is notified. Returns `false` when the id is unknown.
    pub fn click_item(&mut self, id: &str) -> bool {
        let Some(has_children) =
            tree::find_by_id(self.controller.items(), id).map(TocItem::has_children)
        else {
            return false;
        };
        if has_children {
            self.controller.toggle_expanded(id);
        }
        self.set_active_item(Some(id));
        if let Some(item) = tree::find_by_id(self.controller.items(), id) {
            self.events.on_item_click(item);
        }
        true
    }

    /// Handle a click on an anchor of `page_id`. Returns the navigation target.
    pub fn click_anchor(&mut self, page_id: &str, anchor_id: &str) -> Option<String> {
        let page = tree::find_by_id(self.controller.items(), page_id)?;
        let anchor = page.anchors.iter().find(|a| a.id == anchor_id)?;
        let href = page.anchor_href(anchor);
        self.events.on_anchor_click(anchor, &href);
        Some(href)
    }
}

#[async_trait]
impl TocApi for TableOfContents {
    fn set_active_by_id(&mut self, id: &str) {
        self.set_active_item(Some(id));
    }

    fn expand_all(&mut self) {
        Self::expand_all(self);
    }

    fn collapse_all(&mut self) {
        Self::collapse_all(self);
    }

    fn filter_by_string(&mut self, query: &str) {
        self.set_search_query(query);
    }

    fn clear_filter(&mut self) {
        self.clear_search();
    }

    fn get_active_item(&self) -> Option<&TocItem> {
        self.controller.active_item()
    }

    async fn reload(&mut self) -> Result<()> {
        Self::reload(self).await
    }
}
