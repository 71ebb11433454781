//! The table-of-contents state and the controller that owns it.
//!
//! [`TocController`] applies [`tree`](crate::tree) operations and replaces its
//! [`TocState`] as a whole on every action, so `expanded_items` is always recomputed
//! from the forest it describes and the filtered view always reflects the current
//! forest. Actions naming ids that are not in the forest are ignored, which also makes
//! every action a no-op before a dataset has been loaded.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SearchConfig;
use crate::tree;
use crate::types::TocItem;

/// Snapshot of everything a consumer needs to render the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocState {
    /// The canonical forest.
    pub items: Vec<TocItem>,
    /// Id of the active item, if any.
    pub active_item_id: Option<String>,
    /// Ids of every expanded item in `items`.
    pub expanded_items: BTreeSet<String>,
    /// The live search query, exactly as typed.
    pub search_query: String,
    /// Pruned forest while a search is applied.
    pub filtered_items: Option<Vec<TocItem>>,
}

impl TocState {
    /// The forest to render: the filtered view when one exists, the full forest otherwise.
    pub fn display_items(&self) -> &[TocItem] {
        self.filtered_items.as_deref().unwrap_or(&self.items)
    }
}

/// Owns a [`TocState`] and exposes the actions that transform it.
#[derive(Debug, Clone, Default)]
pub struct TocController {
    state: TocState,
    search: SearchConfig,
    applied_query: String,
    filter_passes: u64,
}

impl TocController {
    /// Create a controller with an empty forest.
    pub fn new(search: SearchConfig) -> Self {
        Self {
            search,
            ..Self::default()
        }
    }

    /// The current state.
    pub const fn state(&self) -> &TocState {
        &self.state
    }

    /// The canonical forest.
    pub fn items(&self) -> &[TocItem] {
        &self.state.items
    }

    /// The forest to render.
    pub fn display_items(&self) -> &[TocItem] {
        self.state.display_items()
    }

    /// The query the filtered view was last computed from.
    pub fn applied_query(&self) -> &str {
        &self.applied_query
    }

    /// How many times a filtered view has been computed.
    pub const fn filter_passes(&self) -> u64 {
        self.filter_passes
    }

    /// Search behaviour in effect.
    pub const fn search_config(&self) -> &SearchConfig {
        &self.search
    }

    /// The active item, looked up in the current forest.
    pub fn active_item(&self) -> Option<&TocItem> {
        let id = self.state.active_item_id.as_deref()?;
        tree::find_by_id(&self.state.items, id)
    }

    /// Replace the forest wholesale. Activation and expansion start over; the search
    /// query survives and is re-applied to the new forest.
    pub fn install(&mut self, items: Vec<TocItem>) {
        self.commit(items, None);
    }

    /// Flip the expansion of `id`.
    pub fn toggle_expanded(&mut self, id: &str) {
        let Some(expanded) = tree::find_by_id(&self.state.items, id).map(|i| i.is_expanded)
        else {
            debug!(id, "toggle ignored: no such item");
            return;
        };
        let items = tree::set_expanded(&self.state.items, id, !expanded);
        self.commit(items, self.state.active_item_id.clone());
    }

    /// Make `id` the only active item, or clear activation with `None`.
    ///
    /// With `auto_expand`, every ancestor of the item is expanded so it is visible.
    pub fn set_active_item(&mut self, id: Option<&str>, auto_expand: bool) {
        if let Some(id) = id {
            if tree::find_by_id(&self.state.items, id).is_none() {
                debug!(id, "activation ignored: no such item");
                return;
            }
        }

        let mut items = tree::set_active(&self.state.items, id);
        if let (Some(id), true) = (id, auto_expand) {
            for ancestor in tree::ancestor_ids(&items, id) {
                items = tree::set_expanded(&items, &ancestor, true);
            }
        }
        self.commit(items, id.map(str::to_string));
    }

    /// Expand every item.
    pub fn expand_all(&mut self) {
        let items = tree::expand_all(&self.state.items);
        self.commit(items, self.state.active_item_id.clone());
    }

    /// Collapse every item. Activation and the search query are left alone.
    pub fn collapse_all(&mut self) {
        let items = tree::collapse_all(&self.state.items);
        self.commit(items, self.state.active_item_id.clone());
    }

    /// Store the live query verbatim. The filtered view only changes once the query
    /// is applied with [`apply_query`](Self::apply_query).
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.state.search_query = query.into();
    }

    /// Recompute the filtered view from `query`.
    pub fn apply_query(&mut self, query: &str) {
        query.clone_into(&mut self.applied_query);
        self.refresh_filter();
    }

    /// Drop the query and the filtered view.
    pub fn clear_search(&mut self) {
        self.state.search_query.clear();
        self.applied_query.clear();
        self.state.filtered_items = None;
    }

    /// Whether `query` is long enough to filter with under the current settings.
    pub fn is_filtering_query(&self, query: &str) -> bool {
        let trimmed = query.trim();
        self.search.enabled
            && !trimmed.is_empty()
            && trimmed.chars().count() >= self.search.min_query_length
    }

    fn commit(&mut self, items: Vec<TocItem>, active_item_id: Option<String>) {
        self.state.expanded_items = tree::expanded_ids(&items);
        self.state.items = items;
        self.state.active_item_id = active_item_id;
        self.refresh_filter();
    }

    fn refresh_filter(&mut self) {
        self.state.filtered_items = if self.is_filtering_query(&self.applied_query) {
            self.filter_passes += 1;
            Some(tree::filter_by_query(
                &self.state.items,
                &self.applied_query,
            ))
        } else {
            None
        };
    }
}
