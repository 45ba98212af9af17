//! Narrative units ("tutorials") loaded from a directory
//!
//! Each `.html` or `.md` file in the tutorials directory is one unit; a
//! subdirectory named after a unit holds its children, one nesting level per
//! directory level.

use std::fs;
use std::path::Path;

use crate::error::SiteError;

/// One narrative unit and its nested children
#[derive(Debug, Clone)]
pub struct Tutorial {
    /// Stable identifier, from the file stem
    pub name: String,
    /// Display title, from the first heading or the file stem
    pub title: String,
    /// Raw page body
    pub content: String,
    /// Whether `content` is already HTML (false for markdown sources)
    pub html: bool,
    pub children: Vec<Tutorial>,
}

impl Tutorial {
    /// Load all tutorials under a directory, sorted by file name
    pub fn load_dir(dir: &Path) -> Result<Vec<Tutorial>, SiteError> {
        let mut entries: Vec<_> = fs::read_dir(dir)
            .map_err(|e| SiteError::read(dir, e))?
            .filter_map(Result::ok)
            .map(|e| e.path())
            .collect();
        entries.sort();

        let mut tutorials = Vec::new();
        for path in entries {
            if !path.is_file() {
                continue;
            }
            let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
                continue;
            };
            let html = match ext {
                "html" | "htm" => true,
                "md" | "markdown" => false,
                _ => continue,
            };
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("tutorial")
                .to_string();
            let content = fs::read_to_string(&path).map_err(|e| SiteError::read(&path, e))?;
            let title = extract_title(&content, html).unwrap_or_else(|| name.clone());

            let child_dir = dir.join(&name);
            let children = if child_dir.is_dir() {
                Self::load_dir(&child_dir)?
            } else {
                Vec::new()
            };

            tutorials.push(Tutorial { name, title, content, html, children });
        }
        Ok(tutorials)
    }
}

/// First heading in the body, if any
fn extract_title(content: &str, html: bool) -> Option<String> {
    if html {
        let re = regex::Regex::new(r"(?is)<h1[^>]*>(.*?)</h1>").expect("title pattern is valid");
        let title = re.captures(content)?.get(1)?.as_str().trim();
        (!title.is_empty()).then(|| title.to_string())
    } else {
        content
            .lines()
            .find_map(|line| line.strip_prefix("# "))
            .map(|t| t.trim().to_string())
    }
}
