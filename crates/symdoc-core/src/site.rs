//! Build driver
//!
//! Orders one build strictly: allocate filenames and register links, resolve
//! inheritance over the entire store, build the navigation tree once, then
//! render and write each page. A page whose write fails is reported and
//! skipped; the rest of the build continues.

use std::fs;
use std::path::PathBuf;

use crate::error::SiteError;
use crate::headings::extract_headings;
use crate::html::{HtmlRenderer, PageContext};
use crate::inherit;
use crate::links::LinkRegistry;
use crate::nav::NavBuilder;
use crate::record::SymbolRecord;
use crate::slug::{anchor, SlugAllocator};
use crate::store::SymbolStore;
use crate::toc::{build_toc, fallback_sections, member_sections, TocNode};
use crate::tutorial::Tutorial;

/// Configuration for one site build
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Site title shown in the sidebar and page titles
    pub title: String,
    /// Longname of the record that roots the "API" navigation subtree
    pub api_entry: Option<String>,
    pub output_dir: PathBuf,
}

/// Outcome of one build
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildReport {
    pub pages_written: usize,
    pub pages_skipped: usize,
}

/// Drives one build from records to written pages
pub struct SiteBuilder {
    config: SiteConfig,
}

impl SiteBuilder {
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// Run the whole build
    pub fn build(
        &self,
        records: Vec<SymbolRecord>,
        tutorials: &[Tutorial],
    ) -> Result<BuildReport, SiteError> {
        let mut store = SymbolStore::from_records(records);
        let mut slugs = SlugAllocator::new();
        let mut links = LinkRegistry::new();

        register_links(&store, &mut slugs, &mut links);
        register_tutorial_links(tutorials, &mut slugs, &mut links);

        // Resolution must complete before any tree or page is constructed
        inherit::resolve(&mut store, &links);

        let nav = NavBuilder::new(&store, &links)
            .build(self.config.api_entry.as_deref(), tutorials);
        let ctx = PageContext {
            site_title: &self.config.title,
            nav: &nav,
        };

        fs::create_dir_all(&self.config.output_dir).map_err(|e| SiteError::CreateDir {
            path: self.config.output_dir.clone(),
            source: e,
        })?;

        let mut report = BuildReport::default();
        for record in store.iter() {
            if !has_own_page(record, &store) {
                continue;
            }
            let toc = page_toc(&store, record);
            let html = HtmlRenderer::record_page(&ctx, &store, &links, record, &toc);
            let filename = slugs.filename_for(&record.longname);
            self.write_page(&filename, &html, &mut report);
        }

        self.write_tutorials(&ctx, tutorials, &mut slugs, &mut report);
        Ok(report)
    }

    fn write_tutorials(
        &self,
        ctx: &PageContext<'_>,
        tutorials: &[Tutorial],
        slugs: &mut SlugAllocator,
        report: &mut BuildReport,
    ) {
        for tutorial in tutorials {
            let headings = if tutorial.html {
                extract_headings(&tutorial.content)
            } else {
                Vec::new()
            };
            let toc = build_toc(&headings);
            let html = HtmlRenderer::tutorial_page(ctx, tutorial, &toc);
            let filename = slugs.filename_for(&format!("tutorial:{}", tutorial.name));
            self.write_page(&filename, &html, report);
            self.write_tutorials(ctx, &tutorial.children, slugs, report);
        }
    }

    /// Write one page; failures are reported and skipped, not fatal
    fn write_page(&self, filename: &str, html: &str, report: &mut BuildReport) {
        let path = self.config.output_dir.join(filename);
        match fs::write(&path, html) {
            Ok(()) => report.pages_written += 1,
            Err(e) => {
                log::warn!("skipping page: {}", SiteError::write(&path, e));
                report.pages_skipped += 1;
            }
        }
    }
}

/// Load the extractor's JSON record dump
pub fn load_records(path: &std::path::Path) -> Result<Vec<SymbolRecord>, SiteError> {
    let source = fs::read_to_string(path).map_err(|e| SiteError::read(path, e))?;
    let records: Vec<SymbolRecord> = serde_json::from_str(&source).map_err(|e| {
        SiteError::RecordDump {
            path: path.to_path_buf(),
            source: e,
        }
    })?;
    log::debug!("loaded {} records from {}", records.len(), path.display());
    Ok(records)
}

/// Whether a record gets its own page (containers, roots, and orphans);
/// everything else anchors into its parent's page
fn has_own_page(record: &SymbolRecord, store: &SymbolStore) -> bool {
    if record.kind.is_container() {
        return true;
    }
    match &record.memberof {
        None => true,
        Some(parent) => store.get(parent).is_none(),
    }
}

/// The contents tree for one record page
fn page_toc(store: &SymbolStore, record: &SymbolRecord) -> Vec<TocNode> {
    let headings = record
        .description
        .as_deref()
        .map(extract_headings)
        .unwrap_or_default();
    if headings.is_empty() {
        return fallback_sections(store, &record.longname);
    }
    let mut toc = build_toc(&headings);
    if record.kind.is_container() {
        toc.extend(member_sections(store, &record.longname));
    }
    toc
}

/// Allocate filenames and register links for every record
///
/// Page-owning records register their filename; members register an anchor
/// into their parent's page.
fn register_links(store: &SymbolStore, slugs: &mut SlugAllocator, links: &mut LinkRegistry) {
    for record in store.iter() {
        if has_own_page(record, store) {
            let filename = slugs.filename_for(&record.longname);
            links.register(&record.longname, filename);
        }
    }
    for record in store.iter() {
        if has_own_page(record, store) {
            continue;
        }
        let Some(parent) = record.memberof.as_deref().and_then(|p| store.get(p)) else {
            continue;
        };
        // A member of a non-page parent stays unlinked; anchoring it into a
        // page that is never written would produce a dead href
        if !has_own_page(parent, store) {
            continue;
        }
        let parent_file = slugs.filename_for(&parent.longname);
        links.register(
            &record.longname,
            format!("{parent_file}#{}", anchor(&record.name)),
        );
    }
}

fn register_tutorial_links(
    tutorials: &[Tutorial],
    slugs: &mut SlugAllocator,
    links: &mut LinkRegistry,
) {
    for tutorial in tutorials {
        let key = format!("tutorial:{}", tutorial.name);
        let filename = slugs.filename_for(&key);
        links.register(key, filename);
        register_tutorial_links(&tutorial.children, slugs, links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Kind;

    #[test]
    fn test_member_links_anchor_into_parent_page() {
        let store = SymbolStore::from_records(vec![
            SymbolRecord::new("Widget", "Widget", Kind::Class),
            SymbolRecord::new("Widget#draw", "draw", Kind::Function).with_memberof("Widget"),
        ]);
        let mut slugs = SlugAllocator::new();
        let mut links = LinkRegistry::new();
        register_links(&store, &mut slugs, &mut links);

        assert_eq!(links.url_for("Widget"), Some("Widget.html"));
        assert_eq!(links.url_for("Widget#draw"), Some("Widget.html#draw"));
    }

    #[test]
    fn test_member_of_non_page_parent_stays_unlinked() {
        let store = SymbolStore::from_records(vec![
            SymbolRecord::new("Widget", "Widget", Kind::Class),
            SymbolRecord::new("Widget#state", "state", Kind::Member).with_memberof("Widget"),
            SymbolRecord::new("Widget#state.x", "x", Kind::Member).with_memberof("Widget#state"),
        ]);
        let mut slugs = SlugAllocator::new();
        let mut links = LinkRegistry::new();
        register_links(&store, &mut slugs, &mut links);

        assert_eq!(links.url_for("Widget#state"), Some("Widget.html#state"));
        // `state` owns no page, so `x` cannot anchor anywhere
        assert_eq!(links.url_for("Widget#state.x"), None);
    }

    #[test]
    fn test_orphan_member_gets_own_page() {
        let store = SymbolStore::from_records(vec![
            SymbolRecord::new("Lost#draw", "draw", Kind::Function).with_memberof("Lost"),
        ]);
        let record = store.get("Lost#draw").unwrap();
        assert!(has_own_page(record, &store));
    }

    #[test]
    fn test_build_writes_pages() {
        let dir = tempfile::tempdir().unwrap();
        let builder = SiteBuilder::new(SiteConfig {
            title: "Demo".into(),
            api_entry: None,
            output_dir: dir.path().to_path_buf(),
        });
        let records = vec![
            SymbolRecord::new("Widget", "Widget", Kind::Class).with_meta("w.js", "src"),
            SymbolRecord::new("Widget#draw", "draw", Kind::Function)
                .with_memberof("Widget")
                .with_meta("w.js", "src"),
        ];
        let report = builder.build(records, &[]).unwrap();
        assert_eq!(report.pages_written, 1);
        assert_eq!(report.pages_skipped, 0);
        assert!(dir.path().join("Widget.html").exists());
    }
}
