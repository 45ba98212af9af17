//! Symdoc Core - resolution and tree-building engine for symdoc
//!
//! This crate turns a flat set of extracted symbol records into a linked
//! documentation site:
//! - Store: indexed, queryable record collection
//! - Inheritance Resolver: materializes inherited docs and generic types
//! - Navigation Tree Builder: one deduplicated menu tree per build
//! - TOC Tree Builder: per-page contents trees from heading data
//! - Renderer and site driver: HTML pages on disk

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Symbol records and their payload types
pub mod record;

/// Indexed symbol store
pub mod store;

/// Best-effort type-string rewriting
pub mod typestr;

/// Inheritance resolution
pub mod inherit;

/// Navigation tree construction
pub mod nav;

/// Per-page table-of-contents construction
pub mod toc;

/// Link registry
pub mod links;

/// Heading extraction from rendered prose
pub mod headings;

/// Slug and filename allocation
pub mod slug;

/// HTML page rendering
pub mod html;

/// Build driver
pub mod site;

/// Narrative units
pub mod tutorial;

/// Peripheral error types
pub mod error;

pub use error::SiteError;
pub use links::LinkRegistry;
pub use nav::{NavBuilder, NavNode, NavStyle};
pub use record::{Kind, Scope, SymbolRecord};
pub use site::{BuildReport, SiteBuilder, SiteConfig};
pub use store::SymbolStore;
pub use toc::{build_toc, pluralize, Heading, TocNode};
pub use tutorial::Tutorial;
