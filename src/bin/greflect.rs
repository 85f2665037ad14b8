//! Binary entry point for the greflect CLI.
//!
//! Parses the flag surface (`-i`/`-o`/`--log-level`), initializes tracing,
//! runs the generation pipeline, and maps errors to stable exit codes.
//!
//! ## Usage
//!
//! ```bash
//! # Generate next to the facts file (facts_reflected.hpp)
//! greflect -i facts.json
//!
//! # Explicit destination
//! greflect -i facts.json -o include/reflected.hpp
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use greflect::cli::{run_generate, GenerateRequest};

/// Deterministic C++ reflection header generator.
///
/// Consumes a JSON fact stream describing class declarations (produced by
/// the libclang front end) and emits one self-contained header implementing
/// name-indexed invocation and structural introspection for each class.
#[derive(Parser, Debug)]
#[command(name = "greflect", version, about = "Generate C++ reflection headers from class facts")]
struct Cli {
    /// Input facts file (JSON fact stream).
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output header path (default: input name truncated at its first dot,
    /// with `_reflected.hpp` appended).
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Log level for tracing output.
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,
}

/// Log level for tracing output.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn to_tracing_level(self) -> tracing::Level {
        match self {
            LogLevel::Trace => tracing::Level::TRACE,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Error => tracing::Level::ERROR,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level);

    let request = GenerateRequest {
        input: cli.input,
        output: cli.output,
    };
    match run_generate(&request) {
        Ok(summary) => {
            println!("{summary}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(err.exit_code())
        }
    }
}

/// Initialize tracing subscriber: `RUST_LOG` wins, the flag is the fallback.
fn init_tracing(level: LogLevel) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_tracing_level().to_string()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
