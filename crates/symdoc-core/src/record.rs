//! Symbol records produced by the external documentation extractor
//!
//! A [`SymbolRecord`] is one documented entity: its identity, its weak
//! relations to other records (always by longname, never ownership), and its
//! documentation payload. Records are deserialized from the extractor's JSON
//! dump, mutated in place by the inheritance resolver, and read-only after
//! that.

use serde::{Deserialize, Serialize};

/// The kind of a documented symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Module,
    Class,
    Namespace,
    Mixin,
    External,
    Interface,
    Member,
    Function,
    Typedef,
    Constant,
    Event,
}

impl Kind {
    /// Whether this kind can own members
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Kind::Module
                | Kind::Class
                | Kind::Namespace
                | Kind::Mixin
                | Kind::External
                | Kind::Interface
        )
    }

    /// Singular display label for this kind
    pub fn label(self) -> &'static str {
        match self {
            Kind::Module => "Module",
            Kind::Class => "Class",
            Kind::Namespace => "Namespace",
            Kind::Mixin => "Mixin",
            Kind::External => "External",
            Kind::Interface => "Interface",
            Kind::Member => "Member",
            Kind::Function => "Method",
            Kind::Typedef => "Type Definition",
            Kind::Constant => "Constant",
            Kind::Event => "Event",
        }
    }

    /// The navigation categories, in emission order
    pub fn categories() -> &'static [Kind] {
        &[
            Kind::Module,
            Kind::Namespace,
            Kind::Class,
            Kind::Interface,
            Kind::Event,
            Kind::Mixin,
            Kind::External,
        ]
    }
}

/// Scope of a member relative to its container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    Static,
    Instance,
    Inner,
    Global,
}

impl Scope {
    /// The punctuation that joins a container longname to a member name
    pub fn punct(self) -> &'static str {
        match self {
            Scope::Static => ".",
            Scope::Instance => "#",
            Scope::Inner => "~",
            Scope::Global => "",
        }
    }
}

/// A declared type parameter with its default binding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateParam {
    /// Parameter name as written at the declaration site
    pub name: String,
    /// Default type when the use site supplies no argument
    #[serde(default)]
    pub default: Option<String>,
}

/// Documentation for one parameter or property
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Accepted type names (rewritten in place during resolution)
    #[serde(default, rename = "type")]
    pub type_names: Vec<String>,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub default_value: Option<String>,
}

/// Documentation for a return value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnDoc {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub type_names: Vec<String>,
}

/// Source-location metadata attached by the extractor
///
/// Presence makes a record eligible for inheritance resolution; the
/// filename/path pair scopes container matching to one source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMeta {
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub path: String,
}

/// One documented entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymbolRecord {
    /// Globally unique key within one build
    pub longname: String,
    pub name: String,
    pub kind: Kind,
    #[serde(default)]
    pub scope: Option<Scope>,
    #[serde(default)]
    pub alias: Option<String>,

    /// Parent container, absent for root/global records
    #[serde(default)]
    pub memberof: Option<String>,
    /// Extended ancestors; entries may carry a trailing `<...>` suffix
    #[serde(default)]
    pub augments: Vec<String>,
    /// Implemented interfaces; same syntax as `augments`
    #[serde(default)]
    pub implements: Vec<String>,
    /// Overridden ancestor members
    #[serde(default)]
    pub overrides: Vec<String>,
    /// Declared type parameters, in positional order
    #[serde(default)]
    pub templates: Vec<TemplateParam>,

    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub examples: Vec<String>,
    #[serde(default)]
    pub see: Vec<String>,
    #[serde(default)]
    pub params: Vec<ParamDoc>,
    #[serde(default)]
    pub properties: Vec<ParamDoc>,
    #[serde(default, rename = "type")]
    pub type_names: Vec<String>,
    #[serde(default)]
    pub returns: Vec<ReturnDoc>,

    #[serde(default)]
    pub meta: Option<SourceMeta>,
    /// Local marker blocking documentation inheritance
    #[serde(default)]
    pub no_inherit: bool,

    /// Breadcrumb links, root first; written during resolution
    #[serde(default)]
    pub ancestors: Vec<String>,
}

impl SymbolRecord {
    /// Create a bare record; useful for tests and synthetic aggregates
    pub fn new(longname: impl Into<String>, name: impl Into<String>, kind: Kind) -> Self {
        Self {
            longname: longname.into(),
            name: name.into(),
            kind,
            scope: None,
            alias: None,
            memberof: None,
            augments: Vec::new(),
            implements: Vec::new(),
            overrides: Vec::new(),
            templates: Vec::new(),
            description: None,
            examples: Vec::new(),
            see: Vec::new(),
            params: Vec::new(),
            properties: Vec::new(),
            type_names: Vec::new(),
            returns: Vec::new(),
            meta: None,
            no_inherit: false,
            ancestors: Vec::new(),
        }
    }

    /// Set the parent container
    #[must_use]
    pub fn with_memberof(mut self, memberof: impl Into<String>) -> Self {
        self.memberof = Some(memberof.into());
        self
    }

    /// Set the member scope
    #[must_use]
    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = Some(scope);
        self
    }

    /// Attach source-location metadata, making the record resolvable
    #[must_use]
    pub fn with_meta(mut self, filename: impl Into<String>, path: impl Into<String>) -> Self {
        self.meta = Some(SourceMeta {
            filename: filename.into(),
            path: path.into(),
        });
        self
    }

    /// Whether this record is a root (no parent container)
    pub fn is_root(&self) -> bool {
        self.memberof.is_none()
    }

    /// The punctuation joining this member to its container
    pub fn scope_punct(&self) -> &'static str {
        // Instance membership is the extractor's default when scope is absent
        self.scope.map_or("#", Scope::punct)
    }

    /// Attribute prefix shown before a member name in listings
    pub fn attrib_prefix(&self) -> &'static str {
        match self.scope {
            Some(Scope::Static) => "(static) ",
            Some(Scope::Inner) => "(inner) ",
            _ => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_kinds() {
        assert!(Kind::Module.is_container());
        assert!(Kind::Interface.is_container());
        assert!(!Kind::Member.is_container());
        assert!(!Kind::Function.is_container());
    }

    #[test]
    fn test_scope_punctuation() {
        assert_eq!(Scope::Static.punct(), ".");
        assert_eq!(Scope::Instance.punct(), "#");
        assert_eq!(Scope::Inner.punct(), "~");
    }

    #[test]
    fn test_default_scope_punct_is_instance() {
        let rec = SymbolRecord::new("Widget#draw", "draw", Kind::Function);
        assert_eq!(rec.scope_punct(), "#");
    }

    #[test]
    fn test_deserialize_minimal_record() {
        let json = r#"{"longname": "Widget", "name": "Widget", "kind": "class"}"#;
        let rec: SymbolRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.longname, "Widget");
        assert_eq!(rec.kind, Kind::Class);
        assert!(rec.memberof.is_none());
        assert!(rec.params.is_empty());
    }

    #[test]
    fn test_deserialize_relations_and_payload() {
        let json = r#"{
            "longname": "Panel",
            "name": "Panel",
            "kind": "class",
            "augments": ["Container<string>"],
            "templates": [{"name": "T", "default": "object"}],
            "params": [{"name": "opts", "type": ["object"], "optional": true}],
            "meta": {"filename": "panel.js", "path": "src/ui"}
        }"#;
        let rec: SymbolRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rec.augments, vec!["Container<string>"]);
        assert_eq!(rec.templates[0].default.as_deref(), Some("object"));
        assert!(rec.params[0].optional);
        assert_eq!(rec.meta.unwrap().path, "src/ui");
    }
}
