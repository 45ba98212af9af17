//! Inheritance resolution over the symbol store
//!
//! One pass over every record carrying source metadata, ancestors before
//! descendants regardless of store order. For each record: members first
//! ride along their container's inheritance edges, then a template-binding
//! map is accumulated across ancestor hops, documentation is copied from the
//! first declared ancestor wherever the record has none of its own, and
//! finally every type-name list is rewritten through the binding map. All
//! lookup failures degrade to "no inheritance"; the resolver never rejects a
//! record and a second run changes nothing.

use std::collections::{HashMap, HashSet};

use crate::links::LinkRegistry;
use crate::record::{ParamDoc, ReturnDoc, SymbolRecord};
use crate::store::SymbolStore;
use crate::typestr;

/// Safety net for cyclic ancestor or membership graphs
const MAX_DEPTH: usize = 64;

/// Bounded chase for chained bindings like `T → U → string`
const MAX_BINDING_CHASE: usize = 8;

/// Resolve inheritance for every eligible record in the store
///
/// Must run to completion before any navigation or TOC tree is built; those
/// consumers read the resolved fields. Links should already be registered so
/// breadcrumbs can render as anchors.
pub fn resolve(store: &mut SymbolStore, links: &LinkRegistry) {
    let mut done = vec![false; store.len()];
    for idx in 0..store.len() {
        resolve_record(store, links, idx, &mut done, 0);
    }
}

/// Resolve one record, its first ancestor candidate first
///
/// Copying docs from an ancestor that appears later in store order must see
/// that ancestor's own inheritance already materialized, so the resolver
/// recurses to the ancestor before copying. The `done` marks keep each
/// record resolved exactly once per run and double as the cycle breaker.
fn resolve_record(
    store: &mut SymbolStore,
    links: &LinkRegistry,
    idx: usize,
    done: &mut [bool],
    depth: usize,
) {
    if done[idx] || depth >= MAX_DEPTH {
        return;
    }
    done[idx] = true;
    if store.record(idx).meta.is_none() {
        return;
    }
    synthesize_member_edges(store, idx);

    let first = candidates(store.record(idx)).into_iter().next();
    if let Some(anc_idx) = first.and_then(|name| store.index_of(&name)) {
        resolve_record(store, links, anc_idx, done, depth + 1);
    }

    let bindings = accumulate_bindings(store, idx);
    copy_from_ancestor(store, idx);
    rewrite_types(store.record_mut(idx), &bindings);

    let trail = breadcrumbs(store, links, idx);
    store.record_mut(idx).ancestors = trail;
}

/// Append container-level inheritance edges to a member record
///
/// A non-container record must be a member of some container declared in the
/// same source file. Each `augments`/`implements` edge on that container
/// yields a member-level ancestor reference (`Base` + scope punctuation +
/// member name), appended to the member's own lists when not already there.
fn synthesize_member_edges(store: &mut SymbolStore, idx: usize) {
    let rec = store.record(idx);
    if rec.kind.is_container() {
        return;
    }
    let Some(memberof) = rec.memberof.clone() else {
        return;
    };
    let Some(meta) = rec.meta.clone() else {
        return;
    };
    let punct = rec.scope_punct();
    let member_name = rec.name.clone();
    let own_longname = rec.longname.clone();

    let Some(container) = find_container(store, &meta, &memberof, &own_longname) else {
        log::debug!("no container record for member {own_longname}");
        return;
    };

    let synth = |edges: &[String]| -> Vec<String> {
        edges
            .iter()
            .map(|edge| format!("{}{}{}", typestr::strip_generics(edge), punct, member_name))
            .collect()
    };
    let new_augments = synth(&container.augments);
    let new_implements = synth(&container.implements);

    let rec = store.record_mut(idx);
    for name in new_augments {
        if !rec.augments.contains(&name) {
            rec.augments.push(name);
        }
    }
    for name in new_implements {
        if !rec.implements.contains(&name) {
            rec.implements.push(name);
        }
    }
}

/// The container a member belongs to: a record in the same source file whose
/// name or longname equals the member's `memberof`
fn find_container<'a>(
    store: &'a SymbolStore,
    meta: &'a crate::record::SourceMeta,
    memberof: &str,
    own_longname: &str,
) -> Option<&'a SymbolRecord> {
    store
        .in_source_file(&meta.filename, &meta.path)
        .find(|c| c.longname != own_longname && (c.name == memberof || c.longname == memberof))
}

/// Candidate ancestors in declaration order: `implements` first, then the
/// flattened edge lists, every entry stripped to its bare name
fn candidates(rec: &SymbolRecord) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut push = |name: &str| {
        let bare = typestr::strip_generics(name).to_string();
        if !bare.is_empty() && !out.contains(&bare) {
            out.push(bare);
        }
    };
    for name in &rec.implements {
        push(name);
    }
    for name in rec
        .augments
        .iter()
        .chain(&rec.implements)
        .chain(&rec.overrides)
    {
        push(name);
    }
    out
}

/// Accumulate the record's template-binding map across all ancestor hops
///
/// Each hop binds the ancestor's declared parameters to the positional
/// arguments from the use-site `<...>` suffix, falling back to the declared
/// default. Nearer hops win; later hops fill gaps only. A final bounded
/// chase flattens chains so `T → U` and `U → string` become `T → string`.
fn accumulate_bindings(store: &SymbolStore, idx: usize) -> HashMap<String, String> {
    let rec = store.record(idx);
    let mut bindings = HashMap::new();

    // The record's own declared defaults are the nearest bindings of all
    for template in &rec.templates {
        if let Some(default) = &template.default {
            bindings.entry(template.name.clone()).or_insert_with(|| default.clone());
        }
    }

    let refs = edge_refs(rec);
    let mut seen = HashSet::new();
    walk_bindings(store, &refs, &mut bindings, &mut seen, 0);

    // A member's synthesized ancestors carry no use-site arguments; the
    // arguments live on its container's edges, so those hops bind too
    if !rec.kind.is_container() {
        if let (Some(meta), Some(memberof)) = (&rec.meta, &rec.memberof) {
            if let Some(container) = find_container(store, meta, memberof, &rec.longname) {
                walk_bindings(store, &edge_refs(container), &mut bindings, &mut seen, 0);
            }
        }
    }

    // Flatten chained bindings
    let keys: Vec<String> = bindings.keys().cloned().collect();
    for key in keys {
        let mut value = bindings[&key].clone();
        for _ in 0..MAX_BINDING_CHASE {
            match bindings.get(&value) {
                Some(next) if *next != value => value = next.clone(),
                _ => break,
            }
        }
        bindings.insert(key, value);
    }
    bindings
}

/// All raw (suffix-carrying) ancestor references of a record
fn edge_refs(rec: &SymbolRecord) -> Vec<String> {
    rec.implements
        .iter()
        .chain(&rec.augments)
        .chain(&rec.overrides)
        .cloned()
        .collect()
}

fn walk_bindings(
    store: &SymbolStore,
    refs: &[String],
    bindings: &mut HashMap<String, String>,
    seen: &mut HashSet<String>,
    depth: usize,
) {
    if depth >= MAX_DEPTH {
        return;
    }
    for raw in refs {
        let bare = typestr::strip_generics(raw).to_string();
        if bare.is_empty() || !seen.insert(bare.clone()) {
            continue;
        }
        let Some(ancestor) = store.get(&bare) else {
            continue;
        };
        let args = typestr::generic_args(raw);
        for (pos, template) in ancestor.templates.iter().enumerate() {
            let value = args.get(pos).cloned().or_else(|| template.default.clone());
            if let Some(value) = value {
                bindings.entry(template.name.clone()).or_insert(value);
            }
        }
        let next = edge_refs(ancestor);
        walk_bindings(store, &next, bindings, seen, depth + 1);
    }
}

/// Documentation payload cloned out of an ancestor record
///
/// An explicit field list rather than a blanket copy: these are exactly the
/// tags inheritance propagates.
struct InheritedDocs {
    description: Option<String>,
    examples: Vec<String>,
    see: Vec<String>,
    params: Vec<ParamDoc>,
    properties: Vec<ParamDoc>,
    type_names: Vec<String>,
    returns: Vec<ReturnDoc>,
    templates: Vec<(String, Option<String>)>,
}

/// Copy documentation from the first declared ancestor where the record has
/// none of its own
fn copy_from_ancestor(store: &mut SymbolStore, idx: usize) {
    let rec = store.record(idx);
    if rec.no_inherit {
        return;
    }
    let candidates = candidates(rec);
    let Some(first) = candidates.first() else {
        return;
    };

    let Some(ancestor) = store.get(first) else {
        log::debug!("no ancestor record for {first}");
        return;
    };
    if ancestor.kind != rec.kind {
        return;
    }
    if !rec.kind.is_container() {
        let name_matches = ancestor.name == rec.name
            || ancestor.alias.as_deref() == Some(rec.name.as_str())
            || rec.alias.as_deref() == Some(ancestor.name.as_str());
        if ancestor.scope != rec.scope || !name_matches {
            return;
        }
    }

    let docs = InheritedDocs {
        description: ancestor.description.clone(),
        examples: ancestor.examples.clone(),
        see: ancestor.see.clone(),
        params: ancestor.params.clone(),
        properties: ancestor.properties.clone(),
        type_names: ancestor.type_names.clone(),
        returns: ancestor.returns.clone(),
        templates: ancestor
            .templates
            .iter()
            .map(|t| (t.name.clone(), t.default.clone()))
            .collect(),
    };

    let rec = store.record_mut(idx);
    if rec.description.as_deref().map_or(true, str::is_empty) {
        rec.description = docs.description;
    }
    if rec.examples.is_empty() {
        rec.examples = docs.examples;
    }
    if rec.see.is_empty() {
        rec.see = docs.see;
    }
    if rec.params.is_empty() {
        rec.params = docs.params;
    }
    if rec.properties.is_empty() {
        rec.properties = docs.properties;
    }
    if rec.type_names.is_empty() {
        rec.type_names = docs.type_names;
    }
    if rec.returns.is_empty() {
        rec.returns = docs.returns;
    }
    // Carry the ancestor's parameter declarations forward so a further
    // descendant can still see their defaults
    for (name, default) in docs.templates {
        if !rec.templates.iter().any(|t| t.name == name) {
            rec.templates.push(crate::record::TemplateParam { name, default });
        }
    }
}

/// Rewrite every type-name list on the record through the binding map
fn rewrite_types(rec: &mut SymbolRecord, bindings: &HashMap<String, String>) {
    typestr::rewrite_list(&mut rec.type_names, bindings);
    for param in &mut rec.params {
        typestr::rewrite_list(&mut param.type_names, bindings);
    }
    for prop in &mut rec.properties {
        typestr::rewrite_list(&mut prop.type_names, bindings);
    }
    for ret in &mut rec.returns {
        typestr::rewrite_list(&mut ret.type_names, bindings);
    }
}

/// Root-first breadcrumb links along the membership chain (display only)
fn breadcrumbs(store: &SymbolStore, links: &LinkRegistry, idx: usize) -> Vec<String> {
    let mut trail = Vec::new();
    let mut current = store.record(idx);
    let mut seen = HashSet::new();

    for _ in 0..MAX_DEPTH {
        let Some(parent_name) = &current.memberof else {
            break;
        };
        if !seen.insert(parent_name.clone()) {
            break;
        }
        let Some(parent) = store.get(parent_name) else {
            break;
        };
        trail.push(format!(
            "{}{}",
            links.render_link(&parent.longname, &parent.name),
            current.scope_punct()
        ));
        current = parent;
    }

    trail.reverse();
    trail
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{Kind, Scope, SymbolRecord, TemplateParam};

    fn resolve_all(records: Vec<SymbolRecord>) -> SymbolStore {
        let mut store = SymbolStore::from_records(records);
        let links = LinkRegistry::new();
        resolve(&mut store, &links);
        store
    }

    #[test]
    fn test_description_copied_from_ancestor() {
        let mut base = SymbolRecord::new("Base", "Base", Kind::Class).with_meta("base.js", "src");
        base.description = Some("foo".into());
        let mut derived =
            SymbolRecord::new("Derived", "Derived", Kind::Class).with_meta("derived.js", "src");
        derived.augments = vec!["Base".into()];

        let store = resolve_all(vec![base, derived]);
        assert_eq!(store.get("Derived").unwrap().description.as_deref(), Some("foo"));
        // Deep copy: the ancestor keeps its own value
        assert_eq!(store.get("Base").unwrap().description.as_deref(), Some("foo"));
    }

    #[test]
    fn test_own_description_wins() {
        let mut base = SymbolRecord::new("Base", "Base", Kind::Class).with_meta("base.js", "src");
        base.description = Some("ancestor".into());
        let mut derived =
            SymbolRecord::new("Derived", "Derived", Kind::Class).with_meta("derived.js", "src");
        derived.augments = vec!["Base".into()];
        derived.description = Some("mine".into());

        let store = resolve_all(vec![base, derived]);
        assert_eq!(store.get("Derived").unwrap().description.as_deref(), Some("mine"));
    }

    #[test]
    fn test_first_declared_candidate_wins() {
        let mut a = SymbolRecord::new("A", "A", Kind::Class).with_meta("a.js", "src");
        a.description = Some("from A".into());
        let mut b = SymbolRecord::new("B", "B", Kind::Class).with_meta("b.js", "src");
        b.description = Some("from B".into());
        let mut derived = SymbolRecord::new("D", "D", Kind::Class).with_meta("d.js", "src");
        derived.augments = vec!["A".into(), "B".into()];

        let store = resolve_all(vec![a, b, derived]);
        assert_eq!(store.get("D").unwrap().description.as_deref(), Some("from A"));
    }

    #[test]
    fn test_implements_candidate_precedes_augments() {
        let mut iface = SymbolRecord::new("Drawable", "Drawable", Kind::Class).with_meta("i.js", "src");
        iface.description = Some("drawable".into());
        let mut base = SymbolRecord::new("Base", "Base", Kind::Class).with_meta("b.js", "src");
        base.description = Some("base".into());
        let mut derived = SymbolRecord::new("D", "D", Kind::Class).with_meta("d.js", "src");
        derived.augments = vec!["Base".into()];
        derived.implements = vec!["Drawable".into()];

        let store = resolve_all(vec![iface, base, derived]);
        assert_eq!(store.get("D").unwrap().description.as_deref(), Some("drawable"));
    }

    #[test]
    fn test_no_inherit_blocks_copy() {
        let mut base = SymbolRecord::new("Base", "Base", Kind::Class).with_meta("base.js", "src");
        base.description = Some("foo".into());
        let mut derived =
            SymbolRecord::new("Derived", "Derived", Kind::Class).with_meta("derived.js", "src");
        derived.augments = vec!["Base".into()];
        derived.no_inherit = true;

        let store = resolve_all(vec![base, derived]);
        assert!(store.get("Derived").unwrap().description.is_none());
    }

    #[test]
    fn test_member_rides_container_inheritance() {
        let mut base = SymbolRecord::new("Base", "Base", Kind::Class).with_meta("base.js", "src");
        base.augments = vec![];
        let mut base_draw = SymbolRecord::new("Base#draw", "draw", Kind::Function)
            .with_memberof("Base")
            .with_scope(Scope::Instance)
            .with_meta("base.js", "src");
        base_draw.description = Some("paints the thing".into());

        let mut panel = SymbolRecord::new("Panel", "Panel", Kind::Class).with_meta("panel.js", "src");
        panel.augments = vec!["Base".into()];
        let panel_draw = SymbolRecord::new("Panel#draw", "draw", Kind::Function)
            .with_memberof("Panel")
            .with_scope(Scope::Instance)
            .with_meta("panel.js", "src");

        let store = resolve_all(vec![base, base_draw, panel, panel_draw]);
        let draw = store.get("Panel#draw").unwrap();
        assert!(draw.augments.contains(&"Base#draw".to_string()));
        assert_eq!(draw.description.as_deref(), Some("paints the thing"));
    }

    #[test]
    fn test_template_substitution_through_use_site() {
        let mut coll = SymbolRecord::new("Collection", "Collection", Kind::Class)
            .with_meta("coll.js", "src");
        coll.templates = vec![TemplateParam { name: "T".into(), default: None }];
        let mut list = SymbolRecord::new("List", "List", Kind::Class).with_meta("list.js", "src");
        list.augments = vec!["Collection<string>".into()];
        list.type_names = vec!["Array<T>".into()];

        let store = resolve_all(vec![coll, list]);
        assert_eq!(store.get("List").unwrap().type_names, vec!["string[]"]);
    }

    #[test]
    fn test_template_default_used_without_use_site_args() {
        let mut coll = SymbolRecord::new("Collection", "Collection", Kind::Class)
            .with_meta("coll.js", "src");
        coll.templates = vec![TemplateParam {
            name: "T".into(),
            default: Some("object".into()),
        }];
        let mut list = SymbolRecord::new("List", "List", Kind::Class).with_meta("list.js", "src");
        list.augments = vec!["Collection".into()];
        list.type_names = vec!["Promise<T>".into()];

        let store = resolve_all(vec![coll, list]);
        assert_eq!(store.get("List").unwrap().type_names, vec!["object"]);
    }

    #[test]
    fn test_transitive_binding_chain_flattens() {
        // Grand binds U, Mid re-exports T as U
        let mut grand = SymbolRecord::new("Grand", "Grand", Kind::Class).with_meta("g.js", "src");
        grand.templates = vec![TemplateParam { name: "U".into(), default: None }];
        let mut mid = SymbolRecord::new("Mid", "Mid", Kind::Class).with_meta("m.js", "src");
        mid.templates = vec![TemplateParam { name: "T".into(), default: Some("U".into()) }];
        mid.augments = vec!["Grand<string>".into()];
        let mut leaf = SymbolRecord::new("Leaf", "Leaf", Kind::Class).with_meta("l.js", "src");
        leaf.augments = vec!["Mid".into()];
        leaf.type_names = vec!["T".into()];

        let store = resolve_all(vec![grand, mid, leaf]);
        assert_eq!(store.get("Leaf").unwrap().type_names, vec!["string"]);
    }

    #[test]
    fn test_unmatched_ancestor_tolerated() {
        let mut derived = SymbolRecord::new("D", "D", Kind::Class).with_meta("d.js", "src");
        derived.augments = vec!["Ghost".into()];

        let store = resolve_all(vec![derived]);
        assert!(store.get("D").unwrap().description.is_none());
    }

    #[test]
    fn test_cyclic_graph_terminates() {
        let mut a = SymbolRecord::new("A", "A", Kind::Class).with_meta("a.js", "src");
        a.augments = vec!["B".into()];
        let mut b = SymbolRecord::new("B", "B", Kind::Class).with_meta("b.js", "src");
        b.augments = vec!["A".into()];
        b.description = Some("b docs".into());

        let store = resolve_all(vec![a, b]);
        assert_eq!(store.get("A").unwrap().description.as_deref(), Some("b docs"));
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut base = SymbolRecord::new("Base", "Base", Kind::Class).with_meta("base.js", "src");
        base.description = Some("foo".into());
        base.templates = vec![TemplateParam { name: "T".into(), default: Some("string".into()) }];
        let mut base_draw = SymbolRecord::new("Base#draw", "draw", Kind::Function)
            .with_memberof("Base")
            .with_scope(Scope::Instance)
            .with_meta("base.js", "src");
        base_draw.returns = vec![crate::record::ReturnDoc {
            description: None,
            type_names: vec!["Promise<T>".into()],
        }];
        let mut panel = SymbolRecord::new("Panel", "Panel", Kind::Class).with_meta("p.js", "src");
        panel.augments = vec!["Base".into()];
        let panel_draw = SymbolRecord::new("Panel#draw", "draw", Kind::Function)
            .with_memberof("Panel")
            .with_scope(Scope::Instance)
            .with_meta("p.js", "src");

        let mut store = SymbolStore::from_records(vec![base, base_draw, panel, panel_draw]);
        let links = LinkRegistry::new();
        resolve(&mut store, &links);
        let snapshot: Vec<SymbolRecord> = store.iter().cloned().collect();

        resolve(&mut store, &links);
        let again: Vec<SymbolRecord> = store.iter().cloned().collect();
        for (before, after) in snapshot.iter().zip(&again) {
            assert_eq!(format!("{before:?}"), format!("{after:?}"));
        }
    }

    #[test]
    fn test_ancestor_later_in_store_order_resolves_first() {
        // X -> A -> B with only B documented, in worst-case store order:
        // A must inherit from B before X copies from A
        let mut x = SymbolRecord::new("X", "X", Kind::Class).with_meta("x.js", "src");
        x.augments = vec!["A".into()];
        let mut a = SymbolRecord::new("A", "A", Kind::Class).with_meta("a.js", "src");
        a.augments = vec!["B".into()];
        let mut b = SymbolRecord::new("B", "B", Kind::Class).with_meta("b.js", "src");
        b.description = Some("foo".into());

        let mut store = SymbolStore::from_records(vec![x, a, b]);
        let links = LinkRegistry::new();
        resolve(&mut store, &links);
        assert_eq!(store.get("X").unwrap().description.as_deref(), Some("foo"));

        // And the first run already converged
        resolve(&mut store, &links);
        assert_eq!(store.get("X").unwrap().description.as_deref(), Some("foo"));
    }

    #[test]
    fn test_longnames_unique_after_resolution() {
        let records = vec![
            SymbolRecord::new("Widget", "Widget", Kind::Class).with_meta("w.js", "src"),
            SymbolRecord::new("Widget", "Widget", Kind::Class).with_meta("w.js", "src"),
            SymbolRecord::new("Widget#id", "id", Kind::Member)
                .with_memberof("Widget")
                .with_meta("w.js", "src"),
        ];
        let store = resolve_all(records);
        let mut seen = HashSet::new();
        for rec in store.iter() {
            assert!(seen.insert(rec.longname.clone()), "duplicate {}", rec.longname);
        }
    }

    #[test]
    fn test_breadcrumbs_root_first() {
        let records = vec![
            SymbolRecord::new("app", "app", Kind::Module).with_meta("app.js", "src"),
            SymbolRecord::new("app.Widget", "Widget", Kind::Class)
                .with_memberof("app")
                .with_scope(Scope::Static)
                .with_meta("app.js", "src"),
            SymbolRecord::new("app.Widget#draw", "draw", Kind::Function)
                .with_memberof("app.Widget")
                .with_scope(Scope::Instance)
                .with_meta("app.js", "src"),
        ];
        let store = resolve_all(records);
        let draw = store.get("app.Widget#draw").unwrap();
        assert_eq!(draw.ancestors, vec!["app.", "Widget#"]);
    }
}
