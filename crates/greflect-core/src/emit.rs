//! Deterministic synthesis of the generated reflection header.
//!
//! [`render_unit`] assembles the complete self-contained C++ header for one
//! fact stream: a fixed preamble (pragma guard, std includes, the `reflect`
//! primary template declaration) followed by one block per class in
//! discovery order. [`render_class`] appends a single block: forward
//! declaration, `reflect<T>` specialization header, accessors frozen from
//! the fact snapshot, and the numbered invocation functions.
//!
//! Everything emitted is a pure function of the `ClassFact` snapshot — no
//! timestamps, no addresses, no hash-ordered iteration — so identical inputs
//! always yield byte-identical output. The emitted accessors return the
//! values recorded at generation time; they are deliberately not live
//! queries of the reflected type.

use std::fmt::Write;

use tracing::debug;

use crate::facts::ClassFact;
use crate::group::{build_groups, eligible_names, InvocationGroup};

/// Render the complete generated header for the given classes.
pub fn render_unit(classes: &[ClassFact]) -> String {
    let mut out = String::new();
    out.push_str("#pragma once\n\n");
    out.push_str("// Generated by greflect. Do not edit.\n\n");
    out.push_str("#include <map>\n");
    out.push_str("#include <set>\n");
    out.push_str("#include <stdexcept>\n");
    out.push_str("#include <string>\n");
    out.push_str("#include <utility>\n\n");
    // Declaration only, so several generated headers can coexist in one unit.
    out.push_str("template <typename T>\nclass reflect;\n\n");

    for class in classes {
        let groups = build_groups(class);
        render_class(class, &groups, &mut out);
    }
    out
}

/// Append one class's reflection block to the output.
pub fn render_class(class: &ClassFact, groups: &[InvocationGroup], out: &mut String) {
    debug!(class = %class.name, groups = groups.len(), "rendering reflection block");
    let qualified = class.qualified().to_string();
    let mut e = Emitter { out };

    e.line(0, &format!("class {};", class.name));
    e.blank();
    e.line(0, "template <>");
    e.line(0, &format!("class reflect<{qualified}>"));
    e.line(0, "{");
    e.line(0, "public:");
    e.line(1, &format!("typedef {qualified} Type;"));
    e.line(1, "typedef std::set<std::string> names;");
    e.blank();
    e.line(0, "public:");

    emit_create(&mut e);
    emit_string_accessor(&mut e, "get_name", &class.name);
    emit_string_accessor(&mut e, "get_qualified_name", &qualified);
    emit_insert_accessor(&mut e, "get_base_names", &class.bases, "// no base classes");
    emit_int_accessor(&mut e, "get_num_bases", class.num_bases);
    emit_int_accessor(&mut e, "get_num_virtual_bases", class.num_virtual_bases);
    emit_insert_accessor(
        &mut e,
        "get_method_names",
        &eligible_names(class),
        "// no eligible methods",
    );
    for (name, value) in class.trait_flags() {
        emit_bool_accessor(&mut e, name, value);
    }
    emit_is_derived_from(&mut e);

    // Abstract types cannot be instantiated as `Type`, so invocation stubs
    // would be unreachable; omit them entirely.
    if !class.is_abstract {
        for (index, group) in groups.iter().enumerate() {
            emit_invoke(&mut e, &qualified, index + 1, group);
        }
    }

    e.line(0, &format!("}}; // reflect<{qualified}>"));
    e.blank();
    e.blank();
}

/// Tab-indented line writer over the output string.
struct Emitter<'a> {
    out: &'a mut String,
}

impl Emitter<'_> {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push('\t');
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn blank(&mut self) {
        self.out.push('\n');
    }
}

fn emit_create(e: &mut Emitter<'_>) {
    e.line(1, "template <typename... Args>");
    e.line(1, "Type create(Args&&... args) const");
    e.line(1, "{");
    e.line(2, "return Type(std::forward<Args>(args)...);");
    e.line(1, "}");
    e.blank();
}

fn emit_string_accessor(e: &mut Emitter<'_>, name: &str, value: &str) {
    e.line(1, &format!("std::string {name}() const"));
    e.line(1, "{");
    e.line(2, &format!("return \"{value}\";"));
    e.line(1, "}");
    e.blank();
}

fn emit_int_accessor(e: &mut Emitter<'_>, name: &str, value: u32) {
    e.line(1, &format!("int {name}() const"));
    e.line(1, "{");
    e.line(2, &format!("return {value};"));
    e.line(1, "}");
    e.blank();
}

fn emit_bool_accessor(e: &mut Emitter<'_>, name: &str, value: bool) {
    e.line(1, &format!("bool {name}() const"));
    e.line(1, "{");
    e.line(2, &format!("return {value};"));
    e.line(1, "}");
    e.blank();
}

/// Accessor inserting each entry into a caller-supplied name set; the
/// parameter stays unnamed when there is nothing to insert.
fn emit_insert_accessor(e: &mut Emitter<'_>, name: &str, entries: &[String], empty_note: &str) {
    if entries.is_empty() {
        e.line(1, &format!("void {name}(names&) const"));
        e.line(1, "{");
        e.line(2, empty_note);
    } else {
        e.line(1, &format!("void {name}(names& ns) const"));
        e.line(1, "{");
        for entry in entries {
            e.line(2, &format!("ns.insert(\"{entry}\");"));
        }
    }
    e.line(1, "}");
    e.blank();
}

fn emit_is_derived_from(e: &mut Emitter<'_>) {
    e.line(1, "bool is_derived_from(const std::string& base_name) const");
    e.line(1, "{");
    e.line(2, "names ns;");
    e.line(2, "get_base_names(ns);");
    e.line(2, "return ns.find(base_name) != ns.end();");
    e.line(1, "}");
    e.blank();
}

fn emit_invoke(e: &mut Emitter<'_>, qualified: &str, index: usize, group: &InvocationGroup) {
    let sig = &group.signature;
    let receiver = if sig.is_const {
        "const Type& object"
    } else {
        "Type& object"
    };
    let mut head = format!(
        "{} invoke_{}({}, const std::string& name",
        sig.return_type, index, receiver
    );
    let params = sig.parameter_list();
    if !params.is_empty() {
        let _ = write!(head, ", {params}");
    }
    head.push_str(") const");

    e.line(1, &head);
    e.line(1, "{");
    e.line(2, &sig.alias_decl("method_type"));
    e.line(2, "typedef std::map<std::string, method_type> method_table;");
    // Function-local static initialized by an immediately-invoked lambda:
    // the table is built exactly once, on first call.
    e.line(2, "static const method_table table = []() {");
    e.line(3, "method_table t;");
    for name in &group.names {
        // Assignment form so overloaded names resolve against the typedef.
        e.line(3, &format!("t[\"{name}\"] = &Type::{name};"));
    }
    e.line(3, "return t;");
    e.line(2, "}();");
    e.line(2, "method_table::const_iterator found = table.find(name);");
    e.line(2, "if (found == table.end()) {");
    e.line(
        3,
        &format!(
            "throw std::out_of_range(\"reflect<{qualified}>: unknown method '\" + name + \"'\");"
        ),
    );
    e.line(2, "}");
    let call = format!("(object.*(found->second))({})", sig.argument_list());
    if sig.returns_value() {
        e.line(2, &format!("return {call};"));
    } else {
        e.line(2, &format!("{call};"));
    }
    e.line(1, "}");
    e.blank();
}

// ============================================================================
// Tests
// ============================================================================
