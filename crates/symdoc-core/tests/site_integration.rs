//! Integration tests for the full build pipeline

use symdoc_core::record::{Kind, ParamDoc, Scope, TemplateParam};
use symdoc_core::{SiteBuilder, SiteConfig, SymbolRecord};

fn sample_records() -> Vec<SymbolRecord> {
    let mut container = SymbolRecord::new("ui", "ui", Kind::Module).with_meta("ui.js", "src");
    container.description = Some("<p>The UI toolkit.</p>".into());

    let mut base = SymbolRecord::new("ui.Base", "Base", Kind::Class)
        .with_memberof("ui")
        .with_scope(Scope::Static)
        .with_meta("base.js", "src");
    base.description = Some("<p>Base widget.</p>".into());
    base.templates = vec![TemplateParam {
        name: "T".into(),
        default: Some("object".into()),
    }];

    let mut base_value = SymbolRecord::new("ui.Base#value", "value", Kind::Member)
        .with_memberof("ui.Base")
        .with_scope(Scope::Instance)
        .with_meta("base.js", "src");
    base_value.description = Some("the held value".into());
    base_value.type_names = vec!["Array<T>".into()];

    let mut panel = SymbolRecord::new("ui.Panel", "Panel", Kind::Class)
        .with_memberof("ui")
        .with_scope(Scope::Static)
        .with_meta("panel.js", "src");
    panel.augments = vec!["ui.Base<string>".into()];

    let panel_value = SymbolRecord::new("ui.Panel#value", "value", Kind::Member)
        .with_memberof("ui.Panel")
        .with_scope(Scope::Instance)
        .with_meta("panel.js", "src");

    let mut render = SymbolRecord::new("ui.Panel#render", "render", Kind::Function)
        .with_memberof("ui.Panel")
        .with_scope(Scope::Instance)
        .with_meta("panel.js", "src");
    render.params = vec![ParamDoc {
        name: "target".into(),
        description: Some("mount point".into()),
        type_names: vec!["Element".into()],
        optional: false,
        default_value: None,
    }];

    vec![container, base, base_value, panel, panel_value, render]
}

#[test]
fn test_full_build_writes_container_pages() {
    let dir = tempfile::tempdir().unwrap();
    let builder = SiteBuilder::new(SiteConfig {
        title: "UI Toolkit".into(),
        api_entry: Some("ui".into()),
        output_dir: dir.path().to_path_buf(),
    });

    let report = builder.build(sample_records(), &[]).unwrap();
    // ui, ui.Base, ui.Panel each get a page; members anchor into them
    assert_eq!(report.pages_written, 3);
    assert_eq!(report.pages_skipped, 0);
    assert!(dir.path().join("ui.html").exists());
    assert!(dir.path().join("ui.Base.html").exists());
    assert!(dir.path().join("ui.Panel.html").exists());
}

#[test]
fn test_inherited_docs_reach_rendered_page() {
    let dir = tempfile::tempdir().unwrap();
    let builder = SiteBuilder::new(SiteConfig {
        title: "UI Toolkit".into(),
        api_entry: Some("ui".into()),
        output_dir: dir.path().to_path_buf(),
    });
    builder.build(sample_records(), &[]).unwrap();

    let panel = std::fs::read_to_string(dir.path().join("ui.Panel.html")).unwrap();
    // Panel#value inherited its description from Base#value
    assert!(panel.contains("the held value"));
    // Array<T> resolved through the use-site binding T -> string
    assert!(panel.contains("string[]"));
}

#[test]
fn test_navigation_covers_api_subtree() {
    let dir = tempfile::tempdir().unwrap();
    let builder = SiteBuilder::new(SiteConfig {
        title: "UI Toolkit".into(),
        api_entry: Some("ui".into()),
        output_dir: dir.path().to_path_buf(),
    });
    builder.build(sample_records(), &[]).unwrap();

    let page = std::fs::read_to_string(dir.path().join("ui.html")).unwrap();
    assert!(page.contains("API"));
    assert!(page.contains("ui.Panel.html"));
    // Everything sits under the API subtree; no duplicate Classes section
    assert!(!page.contains("<h3>Classes</h3>"));
}

#[test]
fn test_tutorial_pages_written_and_linked() {
    let dir = tempfile::tempdir().unwrap();
    let tutorials_src = tempfile::tempdir().unwrap();
    std::fs::write(
        tutorials_src.path().join("getting-started.html"),
        "<h1>Getting Started</h1><h2 id=\"install\">Install</h2>",
    )
    .unwrap();
    let tutorials = symdoc_core::Tutorial::load_dir(tutorials_src.path()).unwrap();

    let builder = SiteBuilder::new(SiteConfig {
        title: "UI Toolkit".into(),
        api_entry: None,
        output_dir: dir.path().to_path_buf(),
    });
    let report = builder.build(sample_records(), &tutorials).unwrap();
    assert_eq!(report.pages_skipped, 0);

    let tutorial_page = dir.path().join("tutorial_getting-started.html");
    assert!(tutorial_page.exists());
    let html = std::fs::read_to_string(tutorial_page).unwrap();
    assert!(html.contains("Getting Started"));
    assert!(html.contains("#install"));
}

#[test]
fn test_category_listing_without_entry() {
    let dir = tempfile::tempdir().unwrap();
    let builder = SiteBuilder::new(SiteConfig {
        title: "UI Toolkit".into(),
        api_entry: None,
        output_dir: dir.path().to_path_buf(),
    });
    builder.build(sample_records(), &[]).unwrap();

    let page = std::fs::read_to_string(dir.path().join("ui.html")).unwrap();
    assert!(page.contains("Modules"));
    assert!(page.contains("Classes"));
}
