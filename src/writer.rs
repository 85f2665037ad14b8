//! Output sink: destination path derivation and atomic header writing.
//!
//! The synthesized header is fully formed in memory before this module is
//! asked to write anything, so a sink failure can never leave a truncated
//! destination looking like valid output: the write goes to a unique temp
//! file in the destination directory and is renamed into place.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

use greflect_core::error::ReflectError;

/// Suffix appended to the derived output file name.
const OUTPUT_SUFFIX: &str = "_reflected.hpp";

/// Outcome of one header write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    /// Destination the header landed at.
    pub path: PathBuf,
    /// Whether the destination existed before this run (rewrite vs fresh).
    pub rewrote: bool,
}

/// Derive the default output path from the input facts path.
///
/// The input's file name is truncated at its first `.` and given the
/// `_reflected.hpp` suffix; the directory is preserved, so dotted directory
/// names (`./build.v2/facts.json`) survive intact.
pub fn default_output_path(input: &Path) -> PathBuf {
    let file_name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = file_name.split('.').next().unwrap_or("").to_string();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}"))
}

/// Write the header to `path` atomically, reporting fresh vs rewrite.
pub fn write_header(path: &Path, content: &str) -> Result<WriteReport, ReflectError> {
    let rewrote = path.exists();
    atomic_write(path, content.as_bytes()).map_err(|e| ReflectError::write_failed(path, e))?;
    info!(
        path = %path.display(),
        bytes = content.len(),
        "{} reflection header",
        if rewrote { "rewrote" } else { "generated" }
    );
    Ok(WriteReport {
        path: path.to_path_buf(),
        rewrote,
    })
}

/// Write via a unique temp file in the same directory, then rename.
///
/// Rename within one directory is atomic on POSIX; a crash before the rename
/// leaves only an orphaned temp file. The temp name includes PID and a
/// timestamp so concurrent writers never collide.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::time::{SystemTime, UNIX_EPOCH};

    let pid = std::process::id();
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    let temp_path = path.with_file_name(format!(
        ".{}.{}.{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy(),
        pid,
        timestamp
    ));
    fs::write(&temp_path, content)?;
    fs::rename(&temp_path, path)?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
