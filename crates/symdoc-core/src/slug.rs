//! Collision-avoiding slugs for page filenames and anchors

use std::collections::{HashMap, HashSet};

/// Create an anchor id from a display name
pub fn anchor(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect()
}

/// Allocates unique page filenames for one build
///
/// Build-scoped state passed by reference through the driver, never global;
/// two builds in one process cannot leak slugs into each other.
#[derive(Debug, Default)]
pub struct SlugAllocator {
    assigned: HashMap<String, String>,
    taken: HashSet<String>,
}

impl SlugAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The filename for a longname, allocating it on first use
    ///
    /// Sanitized stems that collide get a `_<n>` suffix; the mapping is
    /// stable for the lifetime of the allocator.
    pub fn filename_for(&mut self, longname: &str) -> String {
        if let Some(existing) = self.assigned.get(longname) {
            return existing.clone();
        }
        let stem = sanitize(longname);
        let mut candidate = format!("{stem}.html");
        let mut counter = 1usize;
        while self.taken.contains(&candidate) {
            candidate = format!("{stem}_{counter}.html");
            counter += 1;
        }
        self.taken.insert(candidate.clone());
        self.assigned.insert(longname.to_string(), candidate.clone());
        candidate
    }
}

/// Reduce a longname to a filesystem-safe stem
fn sanitize(longname: &str) -> String {
    let stem: String = longname
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '.' || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "index".to_string()
    } else {
        stem
    }
}
