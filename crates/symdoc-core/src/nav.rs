//! Navigation tree construction
//!
//! Builds one deduplicated menu tree per build: an optional "API" subtree
//! rooted at the configured entry record, the standard category sections,
//! tutorials, and a trailing globals section. A single seen-set threads
//! through the whole build so a record reachable via two membership paths is
//! emitted exactly once.

use std::collections::HashSet;

use crate::links::LinkRegistry;
use crate::record::Kind;
use crate::store::SymbolStore;
use crate::toc::pluralize;
use crate::tutorial::Tutorial;

/// Safety cap for cyclic membership relations
const MAX_DEPTH: usize = 64;

/// Containers deeper than this collapse into an expandable group
const EXPAND_DEPTH: usize = 2;

/// How a navigation node is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStyle {
    /// Section heading, children listed inline
    Heading,
    /// Bare link, no children
    Link,
    /// Collapsible group with children
    Group,
}

/// One node of the navigation tree
#[derive(Debug, Clone)]
pub struct NavNode {
    pub title: String,
    pub href: Option<String>,
    pub style: NavStyle,
    pub children: Vec<NavNode>,
}

impl NavNode {
    fn heading(title: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self {
            title: title.into(),
            href: None,
            style: NavStyle::Heading,
            children,
        }
    }

    fn link(title: impl Into<String>, href: Option<String>) -> Self {
        Self {
            title: title.into(),
            href,
            style: NavStyle::Link,
            children: Vec::new(),
        }
    }
}

/// Builds the navigation tree for one whole build
pub struct NavBuilder<'a> {
    store: &'a SymbolStore,
    links: &'a LinkRegistry,
    seen: HashSet<String>,
}

impl<'a> NavBuilder<'a> {
    pub fn new(store: &'a SymbolStore, links: &'a LinkRegistry) -> Self {
        Self {
            store,
            links,
            seen: HashSet::new(),
        }
    }

    /// Build the full tree: API subtree, categories, tutorials, globals
    pub fn build(mut self, api_entry: Option<&str>, tutorials: &[Tutorial]) -> Vec<NavNode> {
        let mut tree = Vec::new();

        if let Some(api) = self.build_api_section(api_entry) {
            tree.push(api);
        }

        for &kind in Kind::categories() {
            if let Some(section) = self.build_category_section(kind) {
                tree.push(section);
            }
        }

        if let Some(section) = self.build_tutorial_section(tutorials) {
            tree.push(section);
        }

        if let Some(section) = self.build_globals_section() {
            tree.push(section);
        }

        tree
    }

    /// The "API" subtree, emitted only when the entry longname resolves to
    /// exactly one root-level container; otherwise the entry record falls
    /// back into ordinary category listing
    fn build_api_section(&mut self, api_entry: Option<&str>) -> Option<NavNode> {
        let entry = api_entry?;
        let root = self
            .store
            .roots()
            .find(|r| r.kind.is_container() && r.longname == entry)?;
        let longname = root.longname.clone();

        self.seen.insert(longname.clone());
        let children = self.container_members(&longname, 1);
        Some(NavNode::heading("API", children))
    }

    /// Container-kind members of a container, recursively, seen-marked at
    /// the moment of emission
    fn container_members(&mut self, longname: &str, depth: usize) -> Vec<NavNode> {
        if depth >= MAX_DEPTH {
            return Vec::new();
        }
        let members: Vec<(String, String)> = self
            .store
            .members_of(longname)
            .filter(|m| m.kind.is_container())
            .map(|m| (m.longname.clone(), m.name.clone()))
            .collect();

        let mut nodes = Vec::new();
        for (member_longname, name) in members {
            if !self.seen.insert(member_longname.clone()) {
                continue;
            }
            let children = self.container_members(&member_longname, depth + 1);
            let href = self.links.url_for(&member_longname).map(str::to_string);
            // Depth controls presentation only, never ordering
            let style = if children.is_empty() {
                NavStyle::Link
            } else if depth > EXPAND_DEPTH {
                NavStyle::Group
            } else {
                NavStyle::Heading
            };
            nodes.push(NavNode {
                title: name,
                href,
                style,
                children,
            });
        }
        nodes
    }

    /// Flat heading + list for one standard category, skipping seen records
    fn build_category_section(&mut self, kind: Kind) -> Option<NavNode> {
        let pending: Vec<(String, String)> = self
            .store
            .of_kind(kind)
            .filter(|r| !self.seen.contains(&r.longname))
            .map(|r| (r.longname.clone(), r.name.clone()))
            .collect();
        if pending.is_empty() {
            return None;
        }

        let mut children = Vec::new();
        for (longname, name) in pending {
            self.seen.insert(longname.clone());
            let href = self.links.url_for(&longname).map(str::to_string);
            children.push(NavNode::link(name, href));
        }
        Some(NavNode::heading(pluralize(kind.label()), children))
    }

    fn build_tutorial_section(&mut self, tutorials: &[Tutorial]) -> Option<NavNode> {
        if tutorials.is_empty() {
            return None;
        }
        let children = self.tutorial_nodes(tutorials, 1);
        (!children.is_empty()).then(|| NavNode::heading("Tutorials", children))
    }

    fn tutorial_nodes(&mut self, tutorials: &[Tutorial], depth: usize) -> Vec<NavNode> {
        if depth >= MAX_DEPTH {
            return Vec::new();
        }
        let mut nodes = Vec::new();
        for tutorial in tutorials {
            // Namespaced keys keep tutorials from colliding with symbols
            let key = format!("tutorial:{}", tutorial.name);
            if !self.seen.insert(key.clone()) {
                continue;
            }
            let children = self.tutorial_nodes(&tutorial.children, depth + 1);
            let href = self.links.url_for(&key).map(str::to_string);
            let style = if children.is_empty() {
                NavStyle::Link
            } else if depth > EXPAND_DEPTH {
                NavStyle::Group
            } else {
                NavStyle::Heading
            };
            nodes.push(NavNode {
                title: tutorial.title.clone(),
                href,
                style,
                children,
            });
        }
        nodes
    }

    /// Trailing section for root-level records with no narrower placement;
    /// these kinds never collide with earlier sections, so they are not
    /// seen-marked
    fn build_globals_section(&self) -> Option<NavNode> {
        let leftovers: Vec<NavNode> = self
            .store
            .roots()
            .filter(|r| {
                matches!(
                    r.kind,
                    Kind::Member | Kind::Function | Kind::Typedef | Kind::Constant
                ) && !self.seen.contains(&r.longname)
            })
            .map(|r| {
                let href = self.links.url_for(&r.longname).map(str::to_string);
                NavNode::link(r.name.clone(), href)
            })
            .collect();
        (!leftovers.is_empty()).then(|| NavNode::heading("Globals", leftovers))
    }
}
