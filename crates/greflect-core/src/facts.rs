//! Declaration fact model: immutable snapshots of reflected classes.
//!
//! This module defines the wire format between the external libclang front
//! end and the generation core:
//! - [`FactStream`]: the JSON envelope carrying one translation unit's facts
//! - [`ClassFact`]: one discovered class (names, bases, trait flags, methods)
//! - [`MethodFact`]: one declared method (signature spellings, qualifiers)
//!
//! Facts are constructed once (by deserialization or by the builders below)
//! and never mutated afterwards; every byte the synthesizer emits is a pure
//! function of a `ClassFact` snapshot. In particular, the generated
//! accessors return the values frozen here — generation-time data, never a
//! live re-query of the type.
//!
//! # Schema Versioning
//!
//! [`FACTS_SCHEMA_VERSION`] tracks breaking changes to the stream layout.
//! Intake rejects any other version rather than guessing at field meanings.

use serde::{Deserialize, Serialize};

/// Schema version of the fact stream.
///
/// Increment when fields change name, type, or meaning; the front-end dumper
/// and this crate must agree on the value.
pub const FACTS_SCHEMA_VERSION: u32 = 1;

fn default_true() -> bool {
    true
}

// ============================================================================
// Fact Stream Envelope
// ============================================================================

/// One translation unit's worth of class facts, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactStream {
    /// Stream schema version; must equal [`FACTS_SCHEMA_VERSION`].
    pub schema_version: u32,
    /// Discovered classes, ordered as the front end encountered them.
    #[serde(default)]
    pub classes: Vec<ClassFact>,
}

impl FactStream {
    /// Create an empty stream at the current schema version.
    pub fn new() -> Self {
        FactStream {
            schema_version: FACTS_SCHEMA_VERSION,
            classes: Vec::new(),
        }
    }
}

impl Default for FactStream {
    fn default() -> Self {
        FactStream::new()
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Record kind as the host language distinguishes it.
///
/// Only `class` records are reflected; `struct` records pass through
/// discovery unreflected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
}

/// C++ member access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    /// Accessible from anywhere; the only level eligible for invocation.
    Public,
    /// Accessible within the class hierarchy.
    Protected,
    /// Accessible only within the defining class.
    Private,
}

// ============================================================================
// Class Facts
// ============================================================================

/// Immutable snapshot of one class declaration.
///
/// Field values mirror the front end's resolved view of the declaration at
/// discovery time. `kind` and `has_definition` are discovery metadata used
/// by intake filtering; everything else feeds the synthesizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassFact {
    /// Unqualified class name.
    pub name: String,
    /// Fully qualified (namespace-qualified) name.
    ///
    /// May be empty on the wire when the class lives in the global
    /// namespace; use [`ClassFact::qualified`] for the effective value.
    #[serde(default)]
    pub qualified_name: String,
    /// Whether the record was declared `class` or `struct`.
    #[serde(default)]
    pub kind: ClassKind,
    /// Whether a complete definition was available in the unit.
    #[serde(default = "default_true")]
    pub has_definition: bool,
    /// Base-type spellings in declaration order (no duplicates).
    #[serde(default)]
    pub bases: Vec<String>,
    /// Number of direct bases.
    #[serde(default)]
    pub num_bases: u32,
    /// Number of virtual bases.
    #[serde(default)]
    pub num_virtual_bases: u32,

    // Trait flags, frozen at generation time.
    #[serde(default)]
    pub has_dependent_bases: bool,
    #[serde(default)]
    pub has_friends: bool,
    #[serde(default)]
    pub has_user_declared_ctor: bool,
    #[serde(default)]
    pub has_user_declared_copy_assign: bool,
    #[serde(default)]
    pub has_user_declared_dtor: bool,
    #[serde(default)]
    pub has_user_provided_default_ctor: bool,
    #[serde(default)]
    pub has_default_ctor: bool,
    #[serde(default)]
    pub is_aggregate: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_polymorphic: bool,
    #[serde(default)]
    pub is_template: bool,

    /// Declared methods in declaration order.
    #[serde(default)]
    pub methods: Vec<MethodFact>,
}

impl ClassFact {
    /// Create a class fact with the given unqualified name.
    ///
    /// The qualified name defaults to the plain name; use
    /// [`ClassFact::with_qualified_name`] for namespaced classes.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        ClassFact {
            qualified_name: name.clone(),
            name,
            kind: ClassKind::Class,
            has_definition: true,
            bases: Vec::new(),
            num_bases: 0,
            num_virtual_bases: 0,
            has_dependent_bases: false,
            has_friends: false,
            has_user_declared_ctor: false,
            has_user_declared_copy_assign: false,
            has_user_declared_dtor: false,
            has_user_provided_default_ctor: false,
            has_default_ctor: false,
            is_aggregate: false,
            is_abstract: false,
            is_polymorphic: false,
            is_template: false,
            methods: Vec::new(),
        }
    }

    /// Set the fully qualified name.
    pub fn with_qualified_name(mut self, qualified: impl Into<String>) -> Self {
        self.qualified_name = qualified.into();
        self
    }

    /// Set the base spellings; `num_bases` follows the list length.
    pub fn with_bases(mut self, bases: Vec<String>) -> Self {
        self.num_bases = bases.len() as u32;
        self.bases = bases;
        self
    }

    /// Set the declared methods.
    pub fn with_methods(mut self, methods: Vec<MethodFact>) -> Self {
        self.methods = methods;
        self
    }

    /// Effective qualified name: falls back to the plain name when the wire
    /// carried an empty qualification.
    pub fn qualified(&self) -> &str {
        if self.qualified_name.is_empty() {
            &self.name
        } else {
            &self.qualified_name
        }
    }

    /// Trait flags in emission order, paired with their accessor names.
    ///
    /// The emitted accessor is named exactly like the fact field, so this
    /// table is the single source of truth for both order and spelling.
    pub fn trait_flags(&self) -> [(&'static str, bool); 11] {
        [
            ("has_dependent_bases", self.has_dependent_bases),
            ("has_friends", self.has_friends),
            ("has_user_declared_ctor", self.has_user_declared_ctor),
            (
                "has_user_declared_copy_assign",
                self.has_user_declared_copy_assign,
            ),
            ("has_user_declared_dtor", self.has_user_declared_dtor),
            (
                "has_user_provided_default_ctor",
                self.has_user_provided_default_ctor,
            ),
            ("has_default_ctor", self.has_default_ctor),
            ("is_aggregate", self.is_aggregate),
            ("is_abstract", self.is_abstract),
            ("is_polymorphic", self.is_polymorphic),
            ("is_template", self.is_template),
        ]
    }
}

// ============================================================================
// Method Facts
// ============================================================================

/// Immutable snapshot of one method declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodFact {
    /// Method name.
    pub name: String,
    /// Raw return-type spelling as the front end printed it.
    pub return_type: String,
    /// Raw parameter-type spellings, in order.
    #[serde(default)]
    pub param_types: Vec<String>,
    /// Whether the method is const-qualified.
    #[serde(default)]
    pub is_const: bool,
    /// Whether the method is static.
    #[serde(default)]
    pub is_static: bool,
    /// Declared access level.
    pub visibility: Visibility,
    /// Whether the method is compiler-defaulted (`= default`).
    #[serde(default)]
    pub is_defaulted: bool,
    /// Whether the method is a special member (constructor, destructor,
    /// copy or move assignment).
    #[serde(default)]
    pub is_special_member: bool,
    /// Whether the body was user-provided rather than implicit.
    #[serde(default)]
    pub is_user_provided: bool,
}

impl MethodFact {
    /// Create a public, non-static, non-const method fact.
    pub fn new(name: impl Into<String>, return_type: impl Into<String>) -> Self {
        MethodFact {
            name: name.into(),
            return_type: return_type.into(),
            param_types: Vec::new(),
            is_const: false,
            is_static: false,
            visibility: Visibility::Public,
            is_defaulted: false,
            is_special_member: false,
            is_user_provided: true,
        }
    }

    /// Set the parameter-type spellings.
    pub fn with_params(mut self, params: Vec<String>) -> Self {
        self.param_types = params;
        self
    }

    /// Set the access level.
    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Set const-qualification.
    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    /// Set staticness.
    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod wire_format {
        use super::*;

        #[test]
        fn minimal_class_record_gets_defaults() {
            let json = r#"{
                "schema_version": 1,
                "classes": [{"name": "Point", "methods": []}]
            }"#;
            let stream: FactStream = serde_json::from_str(json).unwrap();
            assert_eq!(stream.schema_version, FACTS_SCHEMA_VERSION);
            let class = &stream.classes[0];
            assert_eq!(class.name, "Point");
            assert_eq!(class.kind, ClassKind::Class);
            assert!(class.has_definition);
            assert!(!class.is_abstract);
            assert!(class.bases.is_empty());
            assert_eq!(class.num_bases, 0);
        }

        #[test]
        fn qualified_name_falls_back_to_plain_name() {
            let json = r#"{"name": "Point"}"#;
            let class: ClassFact = serde_json::from_str(json).unwrap();
            assert_eq!(class.qualified(), "Point");

            let class = class.with_qualified_name("geometry::Point");
            assert_eq!(class.qualified(), "geometry::Point");
        }

        #[test]
        fn struct_kind_and_definition_flag_round_trip() {
            let json = r#"{"name": "Vec2", "kind": "struct", "has_definition": false}"#;
            let class: ClassFact = serde_json::from_str(json).unwrap();
            assert_eq!(class.kind, ClassKind::Struct);
            assert!(!class.has_definition);
        }

        #[test]
        fn method_visibility_is_required() {
            let json = r#"{"name": "getX", "return_type": "double"}"#;
            assert!(serde_json::from_str::<MethodFact>(json).is_err());

            let json = r#"{"name": "getX", "return_type": "double", "visibility": "public"}"#;
            let method: MethodFact = serde_json::from_str(json).unwrap();
            assert_eq!(method.visibility, Visibility::Public);
            assert!(!method.is_const);
            assert!(method.param_types.is_empty());
        }

        #[test]
        fn visibility_spellings_are_snake_case() {
            for (text, expected) in [
                ("\"public\"", Visibility::Public),
                ("\"protected\"", Visibility::Protected),
                ("\"private\"", Visibility::Private),
            ] {
                let parsed: Visibility = serde_json::from_str(text).unwrap();
                assert_eq!(parsed, expected);
            }
        }
    }

    mod builders {
        use super::*;

        #[test]
        fn with_bases_tracks_base_count() {
            let class = ClassFact::new("Widget")
                .with_bases(vec!["Base1".to_string(), "Base2".to_string()]);
            assert_eq!(class.num_bases, 2);
            assert_eq!(class.bases, vec!["Base1", "Base2"]);
        }

        #[test]
        fn trait_flags_follow_declared_order() {
            let mut class = ClassFact::new("Shape");
            class.is_abstract = true;
            class.is_polymorphic = true;

            let flags = class.trait_flags();
            assert_eq!(flags.len(), 11);
            assert_eq!(flags[0].0, "has_dependent_bases");
            assert_eq!(flags[8], ("is_abstract", true));
            assert_eq!(flags[9], ("is_polymorphic", true));
            assert_eq!(flags[10], ("is_template", false));
        }
    }
}
