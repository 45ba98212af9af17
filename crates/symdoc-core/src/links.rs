//! Link registry shared across one build
//!
//! Maps longnames to page URLs. Registration is idempotent per longname
//! (first registration wins, so a record and a late alias cannot fight over
//! the URL). Rendering falls back to escaped plain text for names nothing
//! ever registered.

use std::collections::HashMap;

use crate::html::escape_html;

/// Longname → URL mapping for one build
#[derive(Debug, Default)]
pub struct LinkRegistry {
    paths: HashMap<String, String>,
}

impl LinkRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the URL for a longname; later registrations are ignored
    pub fn register(&mut self, longname: impl Into<String>, url: impl Into<String>) {
        self.paths.entry(longname.into()).or_insert_with(|| url.into());
    }

    /// The registered URL for a longname, if any
    pub fn url_for(&self, longname: &str) -> Option<&str> {
        self.paths.get(longname).map(String::as_str)
    }

    /// Render a link to a longname, or escaped plain text when unresolved
    pub fn render_link(&self, longname: &str, text: &str) -> String {
        match self.paths.get(longname) {
            Some(url) => format!(
                "<a href=\"{}\">{}</a>",
                escape_html(url),
                escape_html(text)
            ),
            None => escape_html(text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_first_wins() {
        let mut links = LinkRegistry::new();
        links.register("Widget", "widget.html");
        links.register("Widget", "other.html");
        assert_eq!(links.url_for("Widget"), Some("widget.html"));
    }

    #[test]
    fn test_render_resolved() {
        let mut links = LinkRegistry::new();
        links.register("Widget", "widget.html");
        assert_eq!(
            links.render_link("Widget", "Widget"),
            "<a href=\"widget.html\">Widget</a>"
        );
    }

    #[test]
    fn test_render_unresolved_is_plain_text() {
        let links = LinkRegistry::new();
        assert_eq!(links.render_link("Gone", "A<B>"), "A&lt;B&gt;");
    }
}
