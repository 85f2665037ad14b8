//! Method signature normalization and canonical signature keys.
//!
//! A [`CanonicalSignature`] is the normalized `(return type, parameter
//! types, const-qualification)` view of one method. Its rendered form is the
//! C++ member-pointer spelling with the reflected class aliased as `Type`,
//! e.g. `double (Type::*)() const`. That one string serves three jobs:
//! it is the grouping key that merges same-shaped overloads, the sort key
//! component that fixes emission order, and the literal type-alias text
//! emitted into the generated header.
//!
//! Normalization is total: any spelling string passes through unchanged
//! except the compiler-internal boolean form `_Bool`, which is rewritten to
//! the surface spelling `bool`. The rewrite is token-bounded so identifiers
//! that merely contain the sequence (`my_Boolean`, `_Boolx`) survive intact.

use std::sync::OnceLock;

use regex::Regex;

use crate::facts::MethodFact;

/// Token-bounded matcher for the compiler-internal boolean spelling.
fn bool_spelling() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b_Bool\b").expect("literal pattern"))
}

/// Normalize one raw type spelling.
///
/// Rewrites every standalone `_Bool` token to `bool`; all other spellings
/// pass through unchanged.
pub fn normalize_spelling(raw: &str) -> String {
    bool_spelling().replace_all(raw, "bool").into_owned()
}

// ============================================================================
// Canonical Signature
// ============================================================================

/// Normalized method shape: return type, parameter types, constness.
///
/// Two methods on the same class with equal canonical signatures always land
/// in the same invocation group, regardless of name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalSignature {
    /// Normalized return-type spelling.
    pub return_type: String,
    /// Normalized parameter-type spellings, in order.
    pub param_types: Vec<String>,
    /// Whether the method is const-qualified.
    pub is_const: bool,
}

impl CanonicalSignature {
    /// Derive the canonical signature of one method fact.
    ///
    /// Pure: normalizes the return and parameter spellings and copies the
    /// const qualifier; the fact is not touched.
    pub fn of(method: &MethodFact) -> Self {
        CanonicalSignature {
            return_type: normalize_spelling(&method.return_type),
            param_types: method
                .param_types
                .iter()
                .map(|p| normalize_spelling(p))
                .collect(),
            is_const: method.is_const,
        }
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.param_types.len()
    }

    /// Whether invoking this signature yields a value to return.
    pub fn returns_value(&self) -> bool {
        self.return_type != "void"
    }

    /// Member-pointer spelling used as grouping key and emitted alias text,
    /// e.g. `void (Type::*)(int) const`.
    pub fn key(&self) -> String {
        format!(
            "{} (Type::*)({}){}",
            self.return_type,
            self.param_types.join(", "),
            if self.is_const { " const" } else { "" }
        )
    }

    /// The key as a C++ `typedef` line binding `alias`.
    pub fn alias_decl(&self, alias: &str) -> String {
        format!(
            "typedef {} (Type::*{})({}){};",
            self.return_type,
            alias,
            self.param_types.join(", "),
            if self.is_const { " const" } else { "" }
        )
    }

    /// Parameter list pairing each spelling with its positional placeholder,
    /// e.g. `int p1, const std::string & p2`.
    pub fn parameter_list(&self) -> String {
        self.param_types
            .iter()
            .enumerate()
            .map(|(i, ty)| format!("{} p{}", ty, i + 1))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Ownership-forwarding argument list for the placeholders,
    /// e.g. `std::move(p1), std::move(p2)`.
    pub fn argument_list(&self) -> String {
        (1..=self.arity())
            .map(|i| format!("std::move(p{i})"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Total ordering key for invocation groups: ascending arity, then
    /// const-qualification (non-const first), then key length, then the key
    /// itself. The comparison chain is preserved exactly as downstream
    /// consumers observe it in emitted order.
    pub fn order_key(&self) -> (usize, bool, usize, String) {
        let key = self.key();
        (self.arity(), self.is_const, key.len(), key)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::MethodFact;

    fn sig(ret: &str, params: &[&str], is_const: bool) -> CanonicalSignature {
        CanonicalSignature {
            return_type: ret.to_string(),
            param_types: params.iter().map(|p| p.to_string()).collect(),
            is_const,
        }
    }

    mod normalization {
        use super::*;

        #[test]
        fn internal_bool_spelling_becomes_surface_spelling() {
            assert_eq!(normalize_spelling("_Bool"), "bool");
            assert_eq!(normalize_spelling("const _Bool &"), "const bool &");
            assert_eq!(normalize_spelling("_Bool *"), "bool *");
        }

        #[test]
        fn embedded_sequences_pass_through() {
            assert_eq!(normalize_spelling("my_Boolean"), "my_Boolean");
            assert_eq!(normalize_spelling("_Boolx"), "_Boolx");
            assert_eq!(normalize_spelling("space::_Bool_like"), "space::_Bool_like");
        }

        #[test]
        fn unknown_spellings_are_untouched() {
            assert_eq!(
                normalize_spelling("const std::vector<int> &"),
                "const std::vector<int> &"
            );
            assert_eq!(normalize_spelling("void"), "void");
        }

        #[test]
        fn applies_to_return_and_every_parameter() {
            let method = MethodFact::new("flip", "_Bool")
                .with_params(vec!["_Bool".to_string(), "const _Bool &".to_string()]);
            let sig = CanonicalSignature::of(&method);
            assert_eq!(sig.return_type, "bool");
            assert_eq!(sig.param_types, vec!["bool", "const bool &"]);
        }
    }

    mod rendering {
        use super::*;

        #[test]
        fn key_spells_a_member_pointer() {
            assert_eq!(sig("double", &[], true).key(), "double (Type::*)() const");
            assert_eq!(sig("void", &["int"], false).key(), "void (Type::*)(int)");
            assert_eq!(
                sig("int", &["int", "const std::string &"], false).key(),
                "int (Type::*)(int, const std::string &)"
            );
        }

        #[test]
        fn alias_decl_binds_the_alias_inside_the_pointer() {
            assert_eq!(
                sig("double", &[], true).alias_decl("method_type"),
                "typedef double (Type::*method_type)() const;"
            );
            assert_eq!(
                sig("void", &["int"], false).alias_decl("method_type"),
                "typedef void (Type::*method_type)(int);"
            );
        }

        #[test]
        fn placeholders_pair_positionally() {
            let sig = sig("void", &["int", "const std::string &"], false);
            assert_eq!(sig.parameter_list(), "int p1, const std::string & p2");
            assert_eq!(sig.argument_list(), "std::move(p1), std::move(p2)");
        }

        #[test]
        fn nullary_lists_are_empty() {
            let sig = sig("double", &[], true);
            assert_eq!(sig.parameter_list(), "");
            assert_eq!(sig.argument_list(), "");
        }

        #[test]
        fn void_return_is_not_a_value() {
            assert!(!sig("void", &["int"], false).returns_value());
            assert!(sig("void *", &[], false).returns_value());
            assert!(sig("double", &[], true).returns_value());
        }
    }

    mod ordering {
        use super::*;

        #[test]
        fn arity_dominates() {
            let nullary = sig("double", &[], true);
            let unary = sig("void", &["int"], false);
            assert!(nullary.order_key() < unary.order_key());
        }

        #[test]
        fn const_orders_after_non_const_at_equal_arity() {
            // The non-const key is longer; constness must still win.
            let non_const = sig("void", &["unsigned long long"], false);
            let constant = sig("int", &["int"], true);
            assert!(non_const.key().len() > constant.key().len());
            assert!(non_const.order_key() < constant.order_key());
        }

        #[test]
        fn shorter_key_orders_first_at_equal_arity_and_constness() {
            // Lexicographically "double…" < "int…", so length must win here.
            let short = sig("int", &[], false);
            let long = sig("double", &[], false);
            assert!(short.order_key() < long.order_key());
        }

        #[test]
        fn equal_length_keys_fall_back_to_lexicographic() {
            let a = sig("float", &[], false);
            let b = sig("short", &[], false);
            assert_eq!(a.key().len(), b.key().len());
            assert!(a.order_key() < b.order_key());
        }
    }
}
