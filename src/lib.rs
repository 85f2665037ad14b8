//! greflect: deterministic C++ reflection header generation.
//!
//! The generation core lives in `greflect-core` (fact model, signature
//! normalization, invocation grouping, text synthesis). This crate is the
//! glue around it:
//! - [`discovery`]: load and validate the JSON fact stream, filter classes
//! - [`writer`]: derive the output path and write the header atomically
//! - [`cli`]: the front-door orchestration driven by the `greflect` binary

pub mod cli;
pub mod discovery;
pub mod writer;

pub use greflect_core::error::ReflectError;
