use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A documentation page as it appears in the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpPage {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub level: u32,
    /// Child page ids as listed by the dataset. Informational only; children are
    /// derived from `parent_id`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchors: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tab_index: Option<i64>,
}

/// An in-page fragment reference as it appears in the raw dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpAnchor {
    pub id: String,
    pub title: String,
    pub url: String,
    pub anchor: String,
    pub level: u32,
}

/// Page and anchor tables, keyed by id in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpEntities {
    pub pages: IndexMap<String, HelpPage>,
    #[serde(default)]
    pub anchors: IndexMap<String, HelpAnchor>,
}

/// The raw table-of-contents dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpToc {
    pub entities: HelpEntities,
    pub top_level_ids: Vec<String>,
}

impl HelpToc {
    /// Deserialize a dataset from JSON text.
    ///
    /// Any structural problem, including a missing `entities.pages`, is reported as
    /// [`Error::Dataset`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::Dataset(e.to_string()))
    }

    /// Deserialize a dataset from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::Dataset(e.to_string()))
    }
}

/// A node of the derived table-of-contents forest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TocItem {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub level: u32,
    pub children: Vec<TocItem>,
    pub anchors: Vec<TocAnchor>,
    pub is_expanded: bool,
    pub is_active: bool,
}

impl TocItem {
    /// Whether this item has child pages (and can therefore be expanded).
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Navigation target for one of this item's anchors: the item's URL, or the
    /// anchor's own when the item has none, followed by the fragment.
    pub fn anchor_href(&self, anchor: &TocAnchor) -> String {
        format!(
            "{}{}",
            self.url.as_deref().unwrap_or(&anchor.url),
            anchor.anchor
        )
    }

    /// Whether the title or any anchor title contains `query`, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        self.matches_lowercase(&query.to_lowercase())
    }

    /// Case-insensitive match of an already lowercased needle against the title
    /// and every anchor title.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .anchors
                .iter()
                .any(|anchor| anchor.title.to_lowercase().contains(needle))
    }
}

/// A leaf reference to a fragment within a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocAnchor {
    pub id: String,
    pub title: String,
    pub url: String,
    pub anchor: String,
    pub level: u32,
}

impl TocAnchor {
    /// The anchor's own URL with its fragment appended.
    pub fn href(&self) -> String {
        format!("{}{}", self.url, self.anchor)
    }
}

impl From<&HelpAnchor> for TocAnchor {
    fn from(anchor: &HelpAnchor) -> Self {
        Self {
            id: anchor.id.clone(),
            title: anchor.title.clone(),
            url: anchor.url.clone(),
            anchor: anchor.anchor.clone(),
            level: anchor.level,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_camel_case_dataset() {
        let json = r##"{
            "entities": {
                "pages": {
                    "a": {"id": "a", "title": "A", "level": 0, "tabIndex": 2, "pages": ["b"]},
                    "b": {"id": "b", "title": "B", "parentId": "a", "level": 1, "anchors": ["x"]}
                },
                "anchors": {
                    "x": {"id": "x", "title": "X", "url": "/b", "anchor": "#x", "level": 2}
                }
            },
            "topLevelIds": ["a"]
        }"##;

        let toc = HelpToc::from_json(json).unwrap();
        assert_eq!(toc.top_level_ids, vec!["a"]);
        assert_eq!(toc.entities.pages["a"].tab_index, Some(2));
        assert_eq!(toc.entities.pages["b"].parent_id.as_deref(), Some("a"));
        assert_eq!(toc.entities.anchors["x"].anchor, "#x");
    }

    #[test]
    fn page_table_keeps_document_order() {
        let json = r#"{
            "entities": {"pages": {
                "zeta": {"id": "zeta", "title": "Z", "level": 0},
                "alpha": {"id": "alpha", "title": "A", "level": 0}
            }},
            "topLevelIds": []
        }"#;

        let toc = HelpToc::from_json(json).unwrap();
        let keys: Vec<_> = toc.entities.pages.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn anchors_table_is_optional() {
        let toc =
            HelpToc::from_json(r#"{"entities": {"pages": {}}, "topLevelIds": []}"#).unwrap();
        assert!(toc.entities.anchors.is_empty());
    }

    #[test]
    fn missing_pages_is_a_dataset_error() {
        let err = HelpToc::from_json(r#"{"entities": {}, "topLevelIds": []}"#).unwrap_err();
        assert!(matches!(err, Error::Dataset(ref msg) if msg.contains("pages")));
    }

    #[test]
    fn anchor_href_prefers_item_url() {
        let anchor = TocAnchor {
            id: "proxy".into(),
            title: "Proxy".into(),
            url: "/settings".into(),
            anchor: "#proxy".into(),
            level: 2,
        };
        let mut item = TocItem {
            id: "ide".into(),
            title: "IDE".into(),
            url: Some("/ide-configuration".into()),
            level: 1,
            children: Vec::new(),
            anchors: vec![anchor.clone()],
            is_expanded: false,
            is_active: false,
        };
        assert_eq!(item.anchor_href(&anchor), "/ide-configuration#proxy");

        item.url = None;
        assert_eq!(item.anchor_href(&anchor), "/settings#proxy");
    }

    #[test]
    fn non_json_body_is_a_dataset_error() {
        let err = HelpToc::from_slice(b"<html>502 Bad Gateway</html>").unwrap_err();
        assert_eq!(err.category(), "dataset");
    }

    #[test]
    fn toc_item_serializes_camel_case_flags() {
        let item = TocItem {
            id: "a".into(),
            title: "A".into(),
            url: None,
            level: 0,
            children: Vec::new(),
            anchors: Vec::new(),
            is_expanded: true,
            is_active: false,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["isExpanded"], true);
        assert_eq!(value["isActive"], false);
        assert!(value.get("url").is_none());
    }

    #[test]
    fn anchor_href_appends_fragment() {
        let anchor = TocAnchor {
            id: "x".into(),
            title: "X".into(),
            url: "/page.html".into(),
            anchor: "#section".into(),
            level: 1,
        };
        assert_eq!(anchor.href(), "/page.html#section");
    }
}
