//! Heading extraction from rendered page prose
//!
//! Scans rendered HTML for `<h1>`..`<h6>` elements and yields the flat
//! `(id, text, level)` sequence the TOC builder consumes. This is a tolerant
//! scan over markup the renderer produced, not an HTML parser.

use regex::Regex;

use crate::slug::anchor;
use crate::toc::Heading;

/// Extract the heading sequence from rendered HTML
pub fn extract_headings(html: &str) -> Vec<Heading> {
    // Opening tag with optional attributes, body up to the matching closer
    let re = Regex::new(r"(?is)<h([1-6])([^>]*)>(.*?)</h[1-6]\s*>")
        .expect("heading pattern is valid");
    let id_re = Regex::new(r#"(?i)id\s*=\s*["']([^"']*)["']"#).expect("id pattern is valid");

    let mut headings = Vec::new();
    for caps in re.captures_iter(html) {
        let level = caps[1].parse::<usize>().unwrap_or(6);
        let text = strip_tags(&caps[3]).trim().to_string();
        if text.is_empty() {
            continue;
        }
        let id = id_re
            .captures(&caps[2])
            .map_or_else(|| anchor(&text), |id_caps| id_caps[1].to_string());
        headings.push(Heading { id, text, level });
    }
    headings
}

/// Drop nested markup from heading text
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
