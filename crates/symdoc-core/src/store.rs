//! In-memory symbol store with explicit multi-key indexes
//!
//! The original system queried records through a generic filter matcher; only
//! a handful of filter shapes were ever issued, so the store exposes them as
//! named lookups backed by three indexes (longname, kind, memberof). Records
//! are mutated in place during inheritance resolution and read-only after.

use std::collections::HashMap;

use crate::record::{Kind, SymbolRecord};

/// The queryable collection of all symbol records in one build
#[derive(Debug, Default)]
pub struct SymbolStore {
    records: Vec<SymbolRecord>,
    by_longname: HashMap<String, usize>,
    by_kind: HashMap<Kind, Vec<usize>>,
    by_memberof: HashMap<String, Vec<usize>>,
    roots: Vec<usize>,
}

impl SymbolStore {
    /// Build a store from the extractor's record list
    ///
    /// Exact duplicate longnames are dropped, first record wins; this is what
    /// keeps longnames unique for the rest of the build.
    pub fn from_records(records: Vec<SymbolRecord>) -> Self {
        let mut store = Self::default();
        for record in records {
            if store.by_longname.contains_key(&record.longname) {
                log::debug!("dropping duplicate record for {}", record.longname);
                continue;
            }
            let idx = store.records.len();
            store.by_longname.insert(record.longname.clone(), idx);
            store.by_kind.entry(record.kind).or_default().push(idx);
            match &record.memberof {
                Some(parent) => {
                    store.by_memberof.entry(parent.clone()).or_default().push(idx);
                }
                None => store.roots.push(idx),
            }
            store.records.push(record);
        }
        store
    }

    /// Number of records in the store
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All records, in ingest order
    pub fn iter(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.records.iter()
    }

    /// Record at a store index
    pub fn record(&self, idx: usize) -> &SymbolRecord {
        &self.records[idx]
    }

    /// Mutable record at a store index (resolution phase only)
    pub fn record_mut(&mut self, idx: usize) -> &mut SymbolRecord {
        &mut self.records[idx]
    }

    /// Look a record up by longname
    pub fn get(&self, longname: &str) -> Option<&SymbolRecord> {
        self.by_longname.get(longname).map(|&idx| &self.records[idx])
    }

    /// Store index of a longname
    pub fn index_of(&self, longname: &str) -> Option<usize> {
        self.by_longname.get(longname).copied()
    }

    /// All records of one kind, in ingest order
    pub fn of_kind(&self, kind: Kind) -> impl Iterator<Item = &SymbolRecord> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&idx| &self.records[idx])
    }

    /// Direct members of a container, in ingest order
    pub fn members_of(&self, longname: &str) -> impl Iterator<Item = &SymbolRecord> {
        self.by_memberof
            .get(longname)
            .into_iter()
            .flatten()
            .map(|&idx| &self.records[idx])
    }

    /// Root records (no `memberof`), in ingest order
    pub fn roots(&self) -> impl Iterator<Item = &SymbolRecord> {
        self.roots.iter().map(|&idx| &self.records[idx])
    }

    /// Root records of one kind
    pub fn roots_of_kind(&self, kind: Kind) -> impl Iterator<Item = &SymbolRecord> {
        self.roots().filter(move |r| r.kind == kind)
    }

    /// Records sharing a source file, by `meta.filename` + `meta.path`
    pub fn in_source_file<'a>(
        &'a self,
        filename: &'a str,
        path: &'a str,
    ) -> impl Iterator<Item = &'a SymbolRecord> + 'a {
        self.records.iter().filter(move |r| {
            r.meta
                .as_ref()
                .is_some_and(|m| m.filename == filename && m.path == path)
        })
    }
}
