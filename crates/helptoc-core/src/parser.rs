//! Conversion of the flat page/anchor dataset into an ordered forest of [`TocItem`]s.
//!
//! Children are discovered through each page's `parentId`, not through the page's own
//! `pages` list, and a child is only accepted when its `level` is exactly one deeper
//! than its parent's. Because levels strictly increase along every accepted edge, a
//! `parentId` cycle in the dataset cannot make the parser recurse forever.
//!
//! ## Sibling order
//!
//! Siblings are sorted ascending by `tabIndex` when *every* sibling defines one;
//! otherwise they keep the order in which they appear in the page table. Top-level
//! items always follow `topLevelIds`.
//!
//! ## Reference gaps
//!
//! What happens to an unresolved top-level id, anchor id, dangling `parentId`, a
//! level mismatch or a page that would appear twice in the forest depends on the
//! [`ReferencePolicy`]. Ids are unique in the built forest: the first occurrence in
//! build order wins.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::{HelpPage, HelpToc, TocAnchor, TocItem};
use crate::{Error, Result};

/// How the parser treats references that cannot be resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Omit anything that does not resolve and keep going.
    #[default]
    Lenient,
    /// Reject the dataset, listing every unresolved reference.
    Strict,
}

/// Builds [`TocItem`] forests from [`HelpToc`] datasets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TocParser {
    policy: ReferencePolicy,
}

impl TocParser {
    /// Create a parser with the lenient reference policy.
    pub const fn new() -> Self {
        Self {
            policy: ReferencePolicy::Lenient,
        }
    }

    /// Create a parser with an explicit reference policy.
    pub const fn with_policy(policy: ReferencePolicy) -> Self {
        Self { policy }
    }

    /// The policy this parser applies to unresolved references.
    pub const fn policy(&self) -> ReferencePolicy {
        self.policy
    }

    /// Parse a dataset into a forest. Every node starts collapsed and inactive.
    pub fn parse(&self, toc: &HelpToc) -> Result<Vec<TocItem>> {
        let mut build = Build::new(toc);
        build.check_parents();

        let mut items = Vec::with_capacity(toc.top_level_ids.len());
        for id in &toc.top_level_ids {
            match toc.entities.pages.get(id) {
                Some(page) if build.claim(page) => items.push(build.item(page)),
                Some(_) => {},
                None => build.gap(format!("top-level id `{id}` has no page")),
            }
        }

        if self.policy == ReferencePolicy::Strict && !build.gaps.is_empty() {
            return Err(Error::Dataset(format!(
                "{} unresolved reference(s): {}",
                build.gaps.len(),
                build.gaps.join("; ")
            )));
        }

        debug!(
            roots = items.len(),
            skipped = build.gaps.len(),
            "parsed table of contents"
        );
        Ok(items)
    }
}

/// Parse a dataset with the lenient reference policy.
pub fn parse(toc: &HelpToc) -> Result<Vec<TocItem>> {
    TocParser::new().parse(toc)
}

struct Build<'a> {
    toc: &'a HelpToc,
    children: HashMap<&'a str, Vec<&'a HelpPage>>,
    emitted: HashSet<&'a str>,
    gaps: Vec<String>,
}

impl<'a> Build<'a> {
    fn new(toc: &'a HelpToc) -> Self {
        let mut children: HashMap<&str, Vec<&HelpPage>> = HashMap::new();
        for page in toc.entities.pages.values() {
            if let Some(parent) = page.parent_id.as_deref() {
                children.entry(parent).or_default().push(page);
            }
        }
        Self {
            toc,
            children,
            emitted: HashSet::new(),
            gaps: Vec::new(),
        }
    }

    fn gap(&mut self, message: String) {
        debug!("skipping reference: {message}");
        self.gaps.push(message);
    }

    /// Reserve `page` for the forest; a page already placed is a gap.
    fn claim(&mut self, page: &'a HelpPage) -> bool {
        if self.emitted.insert(page.id.as_str()) {
            return true;
        }
        self.gap(format!("page `{}` appears more than once", page.id));
        false
    }

    fn check_parents(&mut self) {
        let pages = &self.toc.entities.pages;
        let dangling: Vec<String> = pages
            .values()
            .filter_map(|page| {
                let parent = page.parent_id.as_deref()?;
                (!pages.contains_key(parent))
                    .then(|| format!("page `{}` has unknown parent `{parent}`", page.id))
            })
            .collect();
        for message in dangling {
            self.gap(message);
        }
    }

    fn item(&mut self, page: &'a HelpPage) -> TocItem {
        let anchors = self.anchors(page);
        let children = self
            .child_pages(page)
            .into_iter()
            .map(|child| self.item(child))
            .collect();

        TocItem {
            id: page.id.clone(),
            title: page.title.clone(),
            url: page.url.clone(),
            level: page.level,
            children,
            anchors,
            is_expanded: false,
            is_active: false,
        }
    }

    fn anchors(&mut self, page: &HelpPage) -> Vec<TocAnchor> {
        let Some(ids) = page.anchors.as_ref() else {
            return Vec::new();
        };

        let mut anchors = Vec::with_capacity(ids.len());
        for id in ids {
            match self.toc.entities.anchors.get(id) {
                Some(anchor) => anchors.push(TocAnchor::from(anchor)),
                None => self.gap(format!("page `{}` references unknown anchor `{id}`", page.id)),
            }
        }
        anchors
    }

    fn child_pages(&mut self, parent: &HelpPage) -> Vec<&'a HelpPage> {
        let Some(candidates) = self.children.get(parent.id.as_str()) else {
            return Vec::new();
        };

        // No level follows u32::MAX, so every candidate under it is a mismatch.
        let expected = parent.level.checked_add(1);
        let (mut accepted, rejected): (Vec<&HelpPage>, Vec<&HelpPage>) = candidates
            .iter()
            .copied()
            .partition(|page| Some(page.level) == expected);

        for page in rejected {
            self.gap(format!(
                "page `{}` has level {} but its parent `{}` has level {}",
                page.id, page.level, parent.id, parent.level
            ));
        }

        if accepted.iter().all(|page| page.tab_index.is_some()) {
            accepted.sort_by_key(|page| page.tab_index);
        }
        accepted.retain(|page| self.claim(*page));
        accepted
    }
}
