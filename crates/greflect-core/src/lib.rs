//! Core infrastructure for greflect.
//!
//! This crate provides the language-independent generation core:
//! - Declaration fact model for reflected C++ classes
//! - Method signature normalization and canonical signature keys
//! - Invocation group construction from per-class method facts
//! - Deterministic synthesis of the generated reflection header
//! - Error types with stable exit codes

pub mod emit;
pub mod error;
pub mod facts;
pub mod group;
pub mod signature;
