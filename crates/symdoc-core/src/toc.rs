//! Per-page table-of-contents construction
//!
//! Turns a page's flat heading sequence into a contents tree. Placement of
//! non-root headings descends through the most-recently-added child rather
//! than searching for a level-matching ancestor; the resulting last-child
//! bias is the output contract of previously generated sites and must not be
//! "corrected" to a nearest-ancestor algorithm.

use crate::record::Kind;
use crate::slug::anchor;
use crate::store::SymbolStore;

/// One heading extracted from a page's rendered prose
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub id: String,
    pub text: String,
    /// Declared heading level, 1..=6
    pub level: usize,
}

/// One node of a page's contents tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    pub id: String,
    pub text: String,
    pub children: Vec<TocNode>,
}

impl TocNode {
    fn leaf(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            children: Vec::new(),
        }
    }
}

/// Member categories a symbol page can list, in section order
const MEMBER_CATEGORIES: &[Kind] = &[
    Kind::Member,
    Kind::Function,
    Kind::Typedef,
    Kind::Constant,
    Kind::Event,
];

/// Build the contents tree for one page's heading sequence
pub fn build_toc(headings: &[Heading]) -> Vec<TocNode> {
    let min_level = headings.iter().map(|h| h.level).min().unwrap_or(6);
    let root_threshold = min_level.max(2);

    let mut roots: Vec<TocNode> = Vec::new();
    for heading in headings {
        let node = TocNode::leaf(heading.id.clone(), heading.text.clone());
        if heading.level <= root_threshold || roots.is_empty() {
            roots.push(node);
            continue;
        }

        // Descend through the most-recently-added child until the depth
        // counter reaches the heading's level, stopping at childless nodes
        // roots is non-empty here; the branch above catches the empty case
        let mut current = roots.last_mut().unwrap();
        let mut depth = root_threshold;
        while depth < heading.level && !current.children.is_empty() {
            current = current.children.last_mut().unwrap();
            depth += 1;
        }
        current.children.push(node);
    }
    roots
}

/// Synthesized contents for pages whose prose carries no headings:
/// Description, Usage, then one section per populated member category
pub fn fallback_sections(store: &SymbolStore, longname: &str) -> Vec<TocNode> {
    let mut sections = Vec::new();
    if let Some(record) = store.get(longname) {
        if record.description.as_deref().is_some_and(|d| !d.is_empty()) {
            sections.push(TocNode::leaf("description", "Description"));
        }
        if !record.examples.is_empty() {
            sections.push(TocNode::leaf("usage", "Usage"));
        }
    }
    sections.extend(member_sections(store, longname));
    sections
}

/// One section per populated member category of a container page
pub fn member_sections(store: &SymbolStore, longname: &str) -> Vec<TocNode> {
    let mut sections = Vec::new();
    for &kind in MEMBER_CATEGORIES {
        let leaves: Vec<TocNode> = store
            .members_of(longname)
            .filter(|m| m.kind == kind)
            .map(|m| {
                let label = format!("{}{}", m.attrib_prefix(), m.name);
                TocNode::leaf(anchor(&m.name), label)
            })
            .collect();
        if leaves.is_empty() {
            continue;
        }
        let title = pluralize(kind.label());
        sections.push(TocNode {
            id: anchor(&title),
            text: title,
            children: leaves,
        });
    }
    sections
}

/// Simple English pluralization for category labels
pub fn pluralize(word: &str) -> String {
    if word.ends_with('s') || word.ends_with('x') {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y') {
        let penultimate = stem.chars().last();
        if penultimate.is_some_and(|c| !"aeiou".contains(c.to_ascii_lowercase())) {
            return format!("{stem}ies");
        }
    }
    format!("{word}s")
}
