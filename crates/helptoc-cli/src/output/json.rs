use anyhow::Result;
use helptoc_core::TocItem;
use serde::Serialize;

/// Result of `helptoc search`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPayload<'a> {
    pub query: &'a str,
    /// Whether the query was long enough to filter with.
    pub filtered: bool,
    /// Entries whose own title or anchors matched.
    pub match_count: usize,
    pub items: &'a [TocItem],
}

/// One step of a breadcrumb.
#[derive(Debug, Serialize)]
pub struct PathEntry<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<&'a str>,
}

impl<'a> From<&'a TocItem> for PathEntry<'a> {
    fn from(item: &'a TocItem) -> Self {
        Self {
            id: &item.id,
            title: &item.title,
            url: item.url.as_deref(),
        }
    }
}

/// Pretty-print `value` to stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
