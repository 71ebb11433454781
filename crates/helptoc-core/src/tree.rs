//! Pure operations over a table-of-contents forest.
//!
//! Nothing here mutates its input: every transformation returns a fresh forest. Lookups
//! for ids that do not exist return `None` or an empty path rather than failing.

use std::collections::BTreeSet;

use crate::types::TocItem;

/// Find the first item with `id` in pre-order.
pub fn find_by_id<'a>(forest: &'a [TocItem], id: &str) -> Option<&'a TocItem> {
    for item in forest {
        if item.id == id {
            return Some(item);
        }
        if let Some(found) = find_by_id(&item.children, id) {
            return Some(found);
        }
    }
    None
}

/// Ids of every ancestor of `id`, root first. Empty when `id` is a root or is absent.
pub fn ancestor_ids(forest: &[TocItem], id: &str) -> Vec<String> {
    let mut path = Vec::new();
    if collect_path(forest, id, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn collect_path(forest: &[TocItem], id: &str, path: &mut Vec<String>) -> bool {
    for item in forest {
        if item.id == id {
            return true;
        }
        path.push(item.id.clone());
        if collect_path(&item.children, id, path) {
            return true;
        }
        path.pop();
    }
    false
}

/// Set `is_expanded` on the item with `id`.
pub fn set_expanded(forest: &[TocItem], id: &str, expanded: bool) -> Vec<TocItem> {
    forest
        .iter()
        .map(|item| {
            if item.id == id {
                TocItem {
                    is_expanded: expanded,
                    ..item.clone()
                }
            } else {
                TocItem {
                    children: set_expanded(&item.children, id, expanded),
                    ..item.clone_shallow()
                }
            }
        })
        .collect()
}

/// Mark the item with `id` active and every other item inactive. `None` clears.
pub fn set_active(forest: &[TocItem], id: Option<&str>) -> Vec<TocItem> {
    forest
        .iter()
        .map(|item| TocItem {
            is_active: Some(item.id.as_str()) == id,
            children: set_active(&item.children, id),
            ..item.clone_shallow()
        })
        .collect()
}

/// Expand every item.
pub fn expand_all(forest: &[TocItem]) -> Vec<TocItem> {
    set_all_expanded(forest, true)
}

/// Collapse every item.
pub fn collapse_all(forest: &[TocItem]) -> Vec<TocItem> {
    set_all_expanded(forest, false)
}

fn set_all_expanded(forest: &[TocItem], expanded: bool) -> Vec<TocItem> {
    forest
        .iter()
        .map(|item| TocItem {
            is_expanded: expanded,
            children: set_all_expanded(&item.children, expanded),
            ..item.clone_shallow()
        })
        .collect()
}

/// Prune the forest to items whose title or anchor titles contain `query`
/// (case-insensitive), keeping the ancestors of every match.
///
/// Surviving items are expanded exactly when some of their children survive. A blank
/// query returns the forest unchanged.
pub fn filter_by_query(forest: &[TocItem], query: &str) -> Vec<TocItem> {
    if query.trim().is_empty() {
        return forest.to_vec();
    }
    filter_lowercase(forest, &query.to_lowercase())
}

fn filter_lowercase(forest: &[TocItem], needle: &str) -> Vec<TocItem> {
    forest
        .iter()
        .filter_map(|item| {
            let children = filter_lowercase(&item.children, needle);
            (item.matches_lowercase(needle) || !children.is_empty()).then(|| TocItem {
                is_expanded: !children.is_empty(),
                children,
                ..item.clone_shallow()
            })
        })
        .collect()
}

/// Every item in pre-order.
pub fn flatten(forest: &[TocItem]) -> Vec<&TocItem> {
    let mut out = Vec::new();
    push_flat(forest, &mut out);
    out
}

fn push_flat<'a>(forest: &'a [TocItem], out: &mut Vec<&'a TocItem>) {
    for item in forest {
        out.push(item);
        push_flat(&item.children, out);
    }
}

/// Ids of every expanded item.
pub fn expanded_ids(forest: &[TocItem]) -> BTreeSet<String> {
    flatten(forest)
        .into_iter()
        .filter(|item| item.is_expanded)
        .map(|item| item.id.clone())
        .collect()
}

/// Ids of every item.
pub fn all_ids(forest: &[TocItem]) -> BTreeSet<String> {
    flatten(forest).into_iter().map(|item| item.id.clone()).collect()
}

/// Total number of items in the forest.
pub fn count(forest: &[TocItem]) -> usize {
    forest.iter().map(|item| 1 + count(&item.children)).sum()
}

impl TocItem {
    /// Clone everything except the children, which the caller rebuilds.
    fn clone_shallow(&self) -> Self {
        Self {
            id: self.id.clone(),
            title: self.title.clone(),
            url: self.url.clone(),
            level: self.level,
            children: Vec::new(),
            anchors: self.anchors.clone(),
            is_expanded: self.is_expanded,
            is_active: self.is_active,
        }
    }
}
