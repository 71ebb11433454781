use std::fmt::Write as _;

use colored::{ColoredString, Colorize};
use helptoc_core::{Theme, TocItem};

const EXPANDED: &str = "▾";
const COLLAPSED: &str = "▸";
const LEAF: &str = "•";

/// Renders a forest the way it is displayed: children only under expanded entries,
/// anchors only under the active entry.
#[derive(Debug, Clone, Default)]
pub struct TreePrinter {
    theme: Theme,
    needle: Option<String>,
}

impl TreePrinter {
    pub const fn new(theme: Theme) -> Self {
        Self {
            theme,
            needle: None,
        }
    }

    /// Emphasise titles containing `query` (case-insensitive).
    #[must_use]
    pub fn highlight(mut self, query: &str) -> Self {
        let query = query.trim();
        self.needle = (!query.is_empty()).then(|| query.to_lowercase());
        self
    }

    pub fn render(&self, forest: &[TocItem]) -> String {
        let mut out = String::new();
        self.render_level(forest, 0, &mut out);
        out
    }

    pub fn print(&self, forest: &[TocItem]) {
        print!("{}", self.render(forest));
    }

    fn render_level(&self, forest: &[TocItem], depth: usize, out: &mut String) {
        let indent = "  ".repeat(depth);
        for item in forest {
            let marker = match (item.has_children(), item.is_expanded) {
                (true, true) => EXPANDED,
                (true, false) => COLLAPSED,
                (false, _) => LEAF,
            };
            let _ = write!(out, "{indent}{marker} {}", self.title(item));
            if item.is_active {
                let _ = write!(out, " {}", "[active]".dimmed());
            }
            out.push('\n');

            if item.is_active {
                for anchor in &item.anchors {
                    let href = item.anchor_href(anchor);
                    let _ = writeln!(
                        out,
                        "{indent}    # {} ({})",
                        anchor.title,
                        href.as_str().dimmed()
                    );
                }
            }
            if item.is_expanded {
                self.render_level(&item.children, depth + 1, out);
            }
        }
    }

    fn title(&self, item: &TocItem) -> ColoredString {
        let title = item.title.as_str();
        if item.is_active {
            return match self.theme {
                Theme::Dark => title.bright_cyan().bold(),
                Theme::Light => title.blue().bold(),
                Theme::Auto => title.green().bold(),
            };
        }
        match &self.needle {
            Some(needle) if title.to_lowercase().contains(needle) => title.underline(),
            _ => title.normal(),
        }
    }
}
