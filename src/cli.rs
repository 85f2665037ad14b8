//! Front-door orchestration for the `greflect` binary.
//!
//! [`run_generate`] is the whole pipeline: load facts, filter classes,
//! render the header, write it atomically. The binary only parses arguments,
//! initializes tracing, and prints the returned summary or error.

use std::fmt;
use std::path::PathBuf;

use tracing::info;

use greflect_core::emit::render_unit;
use greflect_core::error::ReflectError;

use crate::discovery;
use crate::writer;

/// Resolved inputs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Facts file produced by the front end.
    pub input: PathBuf,
    /// Destination header; derived from the input when absent.
    pub output: Option<PathBuf>,
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateSummary {
    /// A header was written.
    Written {
        path: PathBuf,
        classes: usize,
        rewrote: bool,
    },
    /// Every discovered class was filtered out; nothing was written.
    Empty,
}

impl fmt::Display for GenerateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerateSummary::Written {
                path,
                classes,
                rewrote,
            } => {
                let verb = if *rewrote { "Rewrote" } else { "Generated" };
                let plural = if *classes == 1 { "class" } else { "classes" };
                write!(f, "{} {} ({} {})", verb, path.display(), classes, plural)
            }
            GenerateSummary::Empty => write!(f, "no reflectable classes; nothing written"),
        }
    }
}

/// Run the full generation pipeline.
pub fn run_generate(request: &GenerateRequest) -> Result<GenerateSummary, ReflectError> {
    let stream = discovery::load_facts(&request.input)?;
    let classes = discovery::select_classes(stream);
    if classes.is_empty() {
        info!("no reflectable classes in the fact stream");
        return Ok(GenerateSummary::Empty);
    }

    let header = render_unit(&classes);
    let path = request
        .output
        .clone()
        .unwrap_or_else(|| writer::default_output_path(&request.input));
    let report = writer::write_header(&path, &header)?;

    Ok(GenerateSummary::Written {
        path: report.path,
        classes: classes.len(),
        rewrote: report.rewrote,
    })
}

// ============================================================================
// Tests
// ============================================================================
