//! Error types and exit code constants for greflect.
//!
//! One unified error type ([`ReflectError`]) covers every failure the tool
//! can surface. Generation itself is pure and cannot fail; the variants all
//! describe boundary failures around it (resolving the input, parsing the
//! fact stream, writing the output).
//!
//! ## Exit Code Mapping
//!
//! - `2`: bad input data (malformed facts, unsupported schema)
//! - `3`: resolution errors (input file missing or unreadable)
//! - `4`: sink failure (destination cannot be written)

use std::io;
use std::path::Path;

use thiserror::Error;

/// Unified error type for the greflect run.
#[derive(Debug, Error)]
pub enum ReflectError {
    /// Input facts file does not exist.
    #[error("input not found: {path}")]
    InputNotFound { path: String },

    /// Input facts file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Facts file is not a well-formed fact stream.
    #[error("invalid facts in {path}: {source}")]
    InvalidFacts {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Facts file carries a schema version this build does not understand.
    #[error("unsupported facts schema version {found} (supported: {supported})")]
    UnsupportedSchema { found: u32, supported: u32 },

    /// Destination header could not be written.
    ///
    /// The synthesized text is fully formed before any write is attempted,
    /// so this failure never leaves a truncated destination behind.
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl ReflectError {
    /// Missing input file.
    pub fn input_not_found(path: &Path) -> Self {
        ReflectError::InputNotFound {
            path: path.display().to_string(),
        }
    }

    /// Read failure on the input file.
    pub fn read_failed(path: &Path, source: io::Error) -> Self {
        ReflectError::ReadFailed {
            path: path.display().to_string(),
            source,
        }
    }

    /// Malformed fact stream.
    pub fn invalid_facts(path: &Path, source: serde_json::Error) -> Self {
        ReflectError::InvalidFacts {
            path: path.display().to_string(),
            source,
        }
    }

    /// Write failure on the destination header.
    pub fn write_failed(path: &Path, source: io::Error) -> Self {
        ReflectError::WriteFailed {
            path: path.display().to_string(),
            source,
        }
    }

    /// Stable process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            ReflectError::InvalidFacts { .. } | ReflectError::UnsupportedSchema { .. } => 2,
            ReflectError::InputNotFound { .. } | ReflectError::ReadFailed { .. } => 3,
            ReflectError::WriteFailed { .. } => 4,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
