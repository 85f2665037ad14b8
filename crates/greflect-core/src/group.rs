//! Invocation group construction from per-class method facts.
//!
//! An [`InvocationGroup`] is the unit the synthesizer emits one invocation
//! function for: all eligible methods of a class that share one canonical
//! signature, merged into a single name set. Grouping partitions the eligible
//! methods — every eligible method lands in exactly one group, and two
//! methods share a group iff their canonical signatures are equal.
//!
//! Groups are ordered by the total comparison defined on
//! [`CanonicalSignature::order_key`], so repeated runs over the same facts
//! emit functions in the same order.

use std::collections::HashMap;

use tracing::debug;

use crate::facts::{ClassFact, MethodFact, Visibility};
use crate::signature::CanonicalSignature;

/// One invocation function's worth of methods: a canonical signature and the
/// method names sharing it.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationGroup {
    /// The shared canonical signature.
    pub signature: CanonicalSignature,
    /// Rendered signature key (member-pointer spelling); cached because it is
    /// both the grouping key and the emitted alias text.
    pub key: String,
    /// Method names sharing the signature, insertion-ordered by first
    /// occurrence, duplicate-free.
    pub names: Vec<String>,
}

/// Whether a method participates in dynamic invocation.
///
/// A method is eligible only if it is public, non-static, not a special
/// member (constructor, destructor, copy or move assignment), and not
/// compiler-defaulted.
pub fn is_eligible(method: &MethodFact) -> bool {
    method.visibility == Visibility::Public
        && !method.is_static
        && !method.is_special_member
        && !method.is_defaulted
}

/// Build the ordered invocation groups for one class.
///
/// Returns an empty vector when the class has no eligible methods; that is a
/// valid outcome (the synthesizer emits no invocation functions), not an
/// error. Abstract classes still get groups computed here — suppressing
/// their emission is the synthesizer's call, not the builder's.
pub fn build_groups(class: &ClassFact) -> Vec<InvocationGroup> {
    let mut groups: Vec<InvocationGroup> = Vec::new();
    let mut by_key: HashMap<String, usize> = HashMap::new();

    for method in class.methods.iter().filter(|m| is_eligible(m)) {
        let signature = CanonicalSignature::of(method);
        let key = signature.key();
        match by_key.get(&key) {
            Some(&slot) => {
                let names = &mut groups[slot].names;
                if !names.iter().any(|n| n == &method.name) {
                    names.push(method.name.clone());
                }
            }
            None => {
                by_key.insert(key.clone(), groups.len());
                groups.push(InvocationGroup {
                    signature,
                    key,
                    names: vec![method.name.clone()],
                });
            }
        }
    }

    groups.sort_by_key(|g| g.signature.order_key());

    debug!(
        class = %class.name,
        eligible = groups.iter().map(|g| g.names.len()).sum::<usize>(),
        groups = groups.len(),
        "built invocation groups"
    );
    groups
}

/// Union of eligible method names across the whole class, first-occurrence
/// order, duplicate-free. Feeds the generated method-name accessor.
pub fn eligible_names(class: &ClassFact) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for method in class.methods.iter().filter(|m| is_eligible(m)) {
        if !names.iter().any(|n| n == &method.name) {
            names.push(method.name.clone());
        }
    }
    names
}

// ============================================================================
// Tests
// ============================================================================
