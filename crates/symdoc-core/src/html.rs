//! HTML page renderer
//!
//! Serializes the navigation tree, per-page TOC, and resolved record
//! sections into standalone pages. Record descriptions arrive as rendered
//! HTML from the extractor and are injected as-is; everything else is
//! escaped here.

use std::fmt::Write;

use crate::links::LinkRegistry;
use crate::nav::{NavNode, NavStyle};
use crate::record::{Kind, SymbolRecord};
use crate::slug::anchor;
use crate::store::SymbolStore;
use crate::toc::TocNode;
use crate::tutorial::Tutorial;

/// Member categories rendered as page sections, in order
const PAGE_CATEGORIES: &[Kind] = &[
    Kind::Member,
    Kind::Function,
    Kind::Typedef,
    Kind::Constant,
    Kind::Event,
];

/// Build-wide context shared by every rendered page
pub struct PageContext<'a> {
    pub site_title: &'a str,
    pub nav: &'a [NavNode],
}

/// Renders pages from resolved records and build-scoped trees
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Render the page for one symbol record
    pub fn record_page(
        ctx: &PageContext<'_>,
        store: &SymbolStore,
        links: &LinkRegistry,
        record: &SymbolRecord,
        toc: &[TocNode],
    ) -> String {
        let mut out = String::new();
        let page_title = format!("{}: {}", record.kind.label(), record.name);
        Self::write_head(&mut out, ctx, &page_title);
        Self::write_sidebar(&mut out, ctx);

        writeln!(out, "<main class=\"content\">").unwrap();
        Self::write_toc(&mut out, toc);
        Self::write_record(&mut out, store, links, record);
        writeln!(out, "</main>").unwrap();

        Self::write_foot(&mut out, ctx);
        out
    }

    /// Render the page for one tutorial
    pub fn tutorial_page(ctx: &PageContext<'_>, tutorial: &Tutorial, toc: &[TocNode]) -> String {
        let mut out = String::new();
        let page_title = format!("Tutorial: {}", tutorial.title);
        Self::write_head(&mut out, ctx, &page_title);
        Self::write_sidebar(&mut out, ctx);

        writeln!(out, "<main class=\"content\">").unwrap();
        Self::write_toc(&mut out, toc);
        writeln!(out, "<header><h1>{}</h1></header>", escape_html(&tutorial.title)).unwrap();
        writeln!(out, "<article class=\"tutorial\">").unwrap();
        if tutorial.html {
            writeln!(out, "{}", tutorial.content).unwrap();
        } else {
            writeln!(out, "<pre class=\"markdown\">{}</pre>", escape_html(&tutorial.content))
                .unwrap();
        }
        writeln!(out, "</article>").unwrap();
        writeln!(out, "</main>").unwrap();

        Self::write_foot(&mut out, ctx);
        out
    }

    fn write_head(out: &mut String, ctx: &PageContext<'_>, page_title: &str) {
        writeln!(out, "<!DOCTYPE html>").unwrap();
        writeln!(out, "<html lang=\"en\">").unwrap();
        writeln!(out, "<head>").unwrap();
        writeln!(out, "  <meta charset=\"UTF-8\">").unwrap();
        writeln!(
            out,
            "  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">"
        )
        .unwrap();
        writeln!(
            out,
            "  <title>{} - {}</title>",
            escape_html(page_title),
            escape_html(ctx.site_title)
        )
        .unwrap();
        Self::write_styles(out);
        writeln!(out, "</head>").unwrap();
        writeln!(out, "<body>").unwrap();
    }

    fn write_foot(out: &mut String, ctx: &PageContext<'_>) {
        writeln!(out, "<footer>").unwrap();
        writeln!(out, "  <p>{} documentation</p>", escape_html(ctx.site_title)).unwrap();
        writeln!(out, "</footer>").unwrap();
        writeln!(out, "</body>").unwrap();
        writeln!(out, "</html>").unwrap();
    }

    fn write_sidebar(out: &mut String, ctx: &PageContext<'_>) {
        writeln!(out, "<nav class=\"sidebar\">").unwrap();
        writeln!(out, "  <div class=\"sidebar-header\">").unwrap();
        writeln!(out, "    <h2>{}</h2>", escape_html(ctx.site_title)).unwrap();
        writeln!(out, "  </div>").unwrap();
        Self::write_nav_nodes(out, ctx.nav, 1);
        writeln!(out, "</nav>").unwrap();
    }

    fn write_nav_nodes(out: &mut String, nodes: &[NavNode], indent: usize) {
        let pad = "  ".repeat(indent);
        writeln!(out, "{pad}<ul>").unwrap();
        for node in nodes {
            match node.style {
                NavStyle::Heading => {
                    writeln!(out, "{pad}  <li><h3>{}</h3>", escape_html(&node.title)).unwrap();
                    if !node.children.is_empty() {
                        Self::write_nav_nodes(out, &node.children, indent + 1);
                    }
                    writeln!(out, "{pad}  </li>").unwrap();
                }
                NavStyle::Group => {
                    writeln!(out, "{pad}  <li><details>").unwrap();
                    writeln!(
                        out,
                        "{pad}    <summary>{}</summary>",
                        Self::nav_label(node)
                    )
                    .unwrap();
                    Self::write_nav_nodes(out, &node.children, indent + 2);
                    writeln!(out, "{pad}  </details></li>").unwrap();
                }
                NavStyle::Link => {
                    writeln!(out, "{pad}  <li>{}</li>", Self::nav_label(node)).unwrap();
                }
            }
        }
        writeln!(out, "{pad}</ul>").unwrap();
    }

    fn nav_label(node: &NavNode) -> String {
        match &node.href {
            Some(href) => format!(
                "<a href=\"{}\">{}</a>",
                escape_html(href),
                escape_html(&node.title)
            ),
            None => escape_html(&node.title),
        }
    }

    fn write_toc(out: &mut String, toc: &[TocNode]) {
        if toc.is_empty() {
            return;
        }
        writeln!(out, "<aside class=\"toc\">").unwrap();
        writeln!(out, "  <h4>Contents</h4>").unwrap();
        Self::write_toc_nodes(out, toc, 1);
        writeln!(out, "</aside>").unwrap();
    }

    fn write_toc_nodes(out: &mut String, nodes: &[TocNode], indent: usize) {
        let pad = "  ".repeat(indent);
        writeln!(out, "{pad}<ul>").unwrap();
        for node in nodes {
            writeln!(
                out,
                "{pad}  <li><a href=\"#{}\">{}</a>",
                escape_html(&node.id),
                escape_html(&node.text)
            )
            .unwrap();
            if !node.children.is_empty() {
                Self::write_toc_nodes(out, &node.children, indent + 1);
            }
            writeln!(out, "{pad}  </li>").unwrap();
        }
        writeln!(out, "{pad}</ul>").unwrap();
    }

    fn write_record(
        out: &mut String,
        store: &SymbolStore,
        links: &LinkRegistry,
        record: &SymbolRecord,
    ) {
        writeln!(out, "<header>").unwrap();
        if !record.ancestors.is_empty() {
            writeln!(
                out,
                "  <div class=\"breadcrumbs\">{}</div>",
                record.ancestors.join("")
            )
            .unwrap();
        }
        writeln!(
            out,
            "  <h1><span class=\"kind\">{}</span> {}</h1>",
            record.kind.label(),
            escape_html(&record.name)
        )
        .unwrap();
        writeln!(out, "</header>").unwrap();

        if let Some(description) = &record.description {
            writeln!(out, "<section id=\"description\" class=\"description\">").unwrap();
            // Rendered by the extractor; injected as-is
            writeln!(out, "{description}").unwrap();
            writeln!(out, "</section>").unwrap();
        }

        if !record.examples.is_empty() {
            writeln!(out, "<section id=\"usage\">").unwrap();
            writeln!(out, "  <h2>Usage</h2>").unwrap();
            for example in &record.examples {
                writeln!(out, "  <pre>{}</pre>", escape_html(example)).unwrap();
            }
            writeln!(out, "</section>").unwrap();
        }

        Self::write_type_line(out, "Type", &record.type_names);
        Self::write_params_table(out, "Parameters", &record.params);
        Self::write_params_table(out, "Properties", &record.properties);
        Self::write_returns(out, record);

        for &kind in PAGE_CATEGORIES {
            let members: Vec<&SymbolRecord> = store
                .members_of(&record.longname)
                .filter(|m| m.kind == kind)
                .collect();
            if members.is_empty() {
                continue;
            }
            let title = crate::toc::pluralize(kind.label());
            writeln!(out, "<section id=\"{}\">", anchor(&title)).unwrap();
            writeln!(out, "  <h2>{title}</h2>").unwrap();
            for member in members {
                Self::write_member(out, member);
            }
            writeln!(out, "</section>").unwrap();
        }

        if !record.see.is_empty() {
            writeln!(out, "<section id=\"see\">").unwrap();
            writeln!(out, "  <h2>See</h2>").unwrap();
            writeln!(out, "  <ul>").unwrap();
            for reference in &record.see {
                writeln!(out, "    <li>{}</li>", links.render_link(reference, reference)).unwrap();
            }
            writeln!(out, "  </ul>").unwrap();
            writeln!(out, "</section>").unwrap();
        }
    }

    fn write_member(out: &mut String, member: &SymbolRecord) {
        writeln!(out, "  <div class=\"item\" id=\"{}\">", anchor(&member.name)).unwrap();
        writeln!(
            out,
            "    <h3>{}<code>{}</code></h3>",
            member.attrib_prefix(),
            escape_html(&member.name)
        )
        .unwrap();
        if let Some(description) = &member.description {
            writeln!(out, "    <div class=\"description\">{description}</div>").unwrap();
        }
        Self::write_type_line(out, "Type", &member.type_names);
        Self::write_params_table(out, "Parameters", &member.params);
        Self::write_returns(out, member);
        writeln!(out, "  </div>").unwrap();
    }

    fn write_type_line(out: &mut String, label: &str, type_names: &[String]) {
        if type_names.is_empty() {
            return;
        }
        let rendered: Vec<String> = type_names
            .iter()
            .map(|t| format!("<code>{}</code>", escape_html(t)))
            .collect();
        writeln!(
            out,
            "    <p class=\"type\">{label}: {}</p>",
            rendered.join(" | ")
        )
        .unwrap();
    }

    fn write_params_table(out: &mut String, label: &str, params: &[crate::record::ParamDoc]) {
        if params.is_empty() {
            return;
        }
        writeln!(out, "    <div class=\"params\">").unwrap();
        writeln!(out, "      <h4>{label}</h4>").unwrap();
        writeln!(out, "      <table>").unwrap();
        writeln!(
            out,
            "        <tr><th>Name</th><th>Type</th><th>Description</th></tr>"
        )
        .unwrap();
        for param in params {
            let mut name = escape_html(&param.name);
            if param.optional {
                name.push_str(" <em>(optional)</em>");
            }
            let types: Vec<String> = param
                .type_names
                .iter()
                .map(|t| format!("<code>{}</code>", escape_html(t)))
                .collect();
            writeln!(
                out,
                "        <tr><td>{}</td><td>{}</td><td>{}</td></tr>",
                name,
                types.join(" | "),
                escape_html(param.description.as_deref().unwrap_or(""))
            )
            .unwrap();
        }
        writeln!(out, "      </table>").unwrap();
        writeln!(out, "    </div>").unwrap();
    }

    fn write_returns(out: &mut String, record: &SymbolRecord) {
        if record.returns.is_empty() {
            return;
        }
        writeln!(out, "    <div class=\"returns\">").unwrap();
        writeln!(out, "      <h4>Returns</h4>").unwrap();
        for ret in &record.returns {
            let types: Vec<String> = ret
                .type_names
                .iter()
                .map(|t| format!("<code>{}</code>", escape_html(t)))
                .collect();
            writeln!(
                out,
                "      <p>{} {}</p>",
                types.join(" | "),
                escape_html(ret.description.as_deref().unwrap_or(""))
            )
            .unwrap();
        }
        writeln!(out, "    </div>").unwrap();
    }

    fn write_styles(out: &mut String) {
        writeln!(out, "<style>").unwrap();
        writeln!(
            out,
            r"
body {{
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
  margin: 0;
  display: flex;
  line-height: 1.6;
  color: #1f2430;
}}
.sidebar {{
  width: 280px;
  height: 100vh;
  position: fixed;
  overflow-y: auto;
  border-right: 1px solid #ddd;
  padding: 0 1rem;
}}
.sidebar ul {{ list-style: none; padding-left: 0.75rem; }}
.sidebar h3 {{ font-size: 0.85rem; text-transform: uppercase; color: #666; }}
.sidebar a {{ text-decoration: none; color: inherit; }}
.sidebar a:hover {{ color: #4a5bd0; }}
.content {{ margin-left: 300px; padding: 2rem 3rem; max-width: 860px; }}
.toc {{ float: right; border: 1px solid #eee; padding: 0.5rem 1rem; margin-left: 1rem; }}
.toc ul {{ list-style: none; padding-left: 1rem; }}
.breadcrumbs {{ color: #666; font-size: 0.9rem; }}
.kind {{ color: #4a5bd0; font-size: 1.2rem; }}
.item {{ border-left: 3px solid #4a5bd0; padding: 0.5rem 1rem; margin: 1rem 0; }}
.params table {{ border-collapse: collapse; }}
.params td, .params th {{ border: 1px solid #ddd; padding: 0.3rem 0.6rem; }}
pre {{ background: #f5f6fa; padding: 1rem; overflow-x: auto; }}
code {{ background: #f5f6fa; padding: 0.1rem 0.3rem; }}
footer {{ position: fixed; bottom: 0; right: 0; padding: 0.5rem 1rem; color: #888; }}
"
        )
        .unwrap();
        writeln!(out, "</style>").unwrap();
    }
}

/// Escape text for HTML element and attribute content
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
