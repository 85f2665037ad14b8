//! Facts intake: the boundary to the external front end.
//!
//! The libclang-based dumper hands us a JSON fact stream; this module loads
//! it, checks the schema version, and applies the discovery filters. Skips
//! are diagnostics, not errors: a filtered class is logged and omitted, and
//! processing continues with the rest of the stream in discovery order.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use greflect_core::error::ReflectError;
use greflect_core::facts::{ClassFact, ClassKind, FactStream, FACTS_SCHEMA_VERSION};

/// Load and validate the fact stream at `path`.
///
/// Fails on a missing or unreadable file, malformed JSON, or a schema
/// version this build does not understand.
pub fn load_facts(path: &Path) -> Result<FactStream, ReflectError> {
    if !path.exists() {
        return Err(ReflectError::input_not_found(path));
    }
    let text = fs::read_to_string(path).map_err(|e| ReflectError::read_failed(path, e))?;
    let stream: FactStream =
        serde_json::from_str(&text).map_err(|e| ReflectError::invalid_facts(path, e))?;
    if stream.schema_version != FACTS_SCHEMA_VERSION {
        return Err(ReflectError::UnsupportedSchema {
            found: stream.schema_version,
            supported: FACTS_SCHEMA_VERSION,
        });
    }
    debug!(
        path = %path.display(),
        classes = stream.classes.len(),
        "loaded fact stream"
    );
    Ok(stream)
}

/// Apply the discovery filters, preserving discovery order.
///
/// Only true classes with a complete definition that are not templates get
/// reflected; everything else is skipped with a diagnostic.
pub fn select_classes(stream: FactStream) -> Vec<ClassFact> {
    stream
        .classes
        .into_iter()
        .filter(|class| {
            if class.kind != ClassKind::Class {
                debug!(name = %class.name, "skipped: not a class");
                return false;
            }
            if !class.has_definition {
                warn!("skipped '{}': no definition", class.name);
                return false;
            }
            if class.is_template {
                warn!("skipped '{}': is a template", class.name);
                return false;
            }
            true
        })
        .collect()
}

// ============================================================================
// Tests
// ============================================================================
